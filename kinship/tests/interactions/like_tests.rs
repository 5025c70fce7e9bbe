use super::support::*;

#[tokio::test]
async fn like_confirmed_by_server_replaces_post() {
    let client = client_as("U1");
    client
        .transport()
        .respond(Ok(json!({ "post": { "_id": "P1", "content": "hello", "likes": ["U2", "U1"] } })));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P0", &[]), post("P1", &["U2"])];

    let outcome = Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P1")
        .await
        .unwrap();

    assert_eq!(outcome, Reconciliation::Replaced(1));
    assert_eq!(like_ids(&posts[1]), vec!["U2", "U1"]);
    assert_eq!(posts[1].content, "hello");
    assert!(notifier.messages().is_empty());

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/posts/P1/like");
    assert_eq!(requests[0].bearer.as_deref(), Some(TOKEN));
    assert_eq!(requests[0].body, RequestBody::Empty);
}

#[tokio::test]
async fn failed_like_reverts_and_notifies() {
    let client = client_as("U1");
    client.transport().respond(server_error(500, "Internal error"));
    let notifier = RecordingNotifier::default();
    let original = vec![post("P1", &["U2"])];
    let mut posts = original.clone();

    let result = Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P1")
        .await;

    assert!(matches!(result, Err(ClientError::Http { status: 500, .. })));
    assert_eq!(posts, original);
    assert_eq!(notifier.messages(), vec!["Internal error"]);
}

#[tokio::test]
async fn like_then_unlike_round_trips_membership() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({ "_id": "P1", "likes": ["U1"] })));
    client.transport().respond(Ok(json!({ "_id": "P1", "likes": [] })));
    let notifier = RecordingNotifier::default();
    let interactions = Interactions::new(&client, &notifier);
    let mut posts = vec![post("P1", &[])];

    interactions.toggle_post_like(&mut posts, "P1").await.unwrap();
    assert!(kinship::interactions::is_liked_by(&posts[0], "U1"));

    interactions.toggle_post_like(&mut posts, "P1").await.unwrap();
    assert!(posts[0].likes.is_empty());
    assert_eq!(client.transport().requests().len(), 2);
}

#[tokio::test]
async fn server_copy_with_alternate_id_field_still_reconciles() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({
        "post": { "id": "P1", "likes": [{ "userId": { "_id": "U1", "name": "Ada" } }] }
    })));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    let outcome = Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P1")
        .await
        .unwrap();

    assert_eq!(outcome, Reconciliation::Replaced(0));
    assert_eq!(like_ids(&posts[0]), vec!["U1"]);
}

#[tokio::test]
async fn save_uses_saved_by_and_save_route() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({ "post": { "_id": "P1", "savedBy": ["U1"] } })));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    Interactions::new(&client, &notifier)
        .toggle_post_save(&mut posts, "P1")
        .await
        .unwrap();

    assert!(kinship::interactions::is_saved_by(&posts[0], "U1"));
    assert_eq!(client.transport().requests()[0].path, "/posts/P1/save");
}

#[tokio::test]
async fn unreadable_success_body_keeps_local_like() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({ "post": { "_id": "P1", "likes": "not-a-list" } })));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &["U2"])];

    let outcome = Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P1")
        .await
        .unwrap();

    assert_eq!(outcome, Reconciliation::Dropped);
    assert_eq!(like_ids(&posts[0]), vec!["U2", "U1"]);
    assert!(notifier.messages().is_empty());
    assert_eq!(client.transport().requests().len(), 1);
}

#[tokio::test]
async fn unlike_removes_populated_like_entry() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({ "post": { "_id": "P1", "likes": [] } })));
    let notifier = RecordingNotifier::default();
    let mut posts: Vec<Post> = serde_json::from_value(json!([{
        "_id": "P1",
        "likes": [{ "_id": "L9", "user": { "_id": "U1", "name": "Ada" } }]
    }]))
    .unwrap();
    assert!(kinship::interactions::is_liked_by(&posts[0], "U1"));

    Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P1")
        .await
        .unwrap();

    assert!(posts[0].likes.is_empty());
    assert!(!kinship::interactions::is_liked_by(&posts[0], "U1"));
    assert_eq!(client.transport().requests()[0].path, "/posts/P1/like");
}
