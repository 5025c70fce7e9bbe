use super::support::*;

#[tokio::test]
async fn anonymous_like_is_blocked_before_any_request() {
    let client = anonymous_client();
    let notifier = RecordingNotifier::default();
    let original = vec![post("P1", &["U2"])];
    let mut posts = original.clone();

    let result = Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P1")
        .await;

    assert!(matches!(result, Err(ClientError::Unauthenticated)));
    assert_eq!(posts, original);
    assert!(client.transport().requests().is_empty());
    assert_eq!(notifier.messages(), vec!["Please log in to continue."]);
}

#[tokio::test]
async fn token_without_profile_cannot_interact() {
    let session = Session::authenticated(TOKEN, None).unwrap();
    let client = ApiClient::new(FakeTransport::default(), session);
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    let result = Interactions::new(&client, &notifier)
        .toggle_post_save(&mut posts, "P1")
        .await;

    assert!(matches!(result, Err(ClientError::NoCurrentUser)));
    assert!(client.transport().requests().is_empty());
    assert_eq!(notifier.messages(), vec!["Your session does not know which user you are."]);
}

#[tokio::test]
async fn direct_mutation_requires_session() {
    let client = anonymous_client();
    let result = client.posts().like("P1").await;
    assert!(matches!(result, Err(ClientError::Unauthenticated)));
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn reads_go_out_without_a_token() {
    let client = anonymous_client();
    client.transport().respond(Ok(json!({ "posts": [{ "_id": "P1" }, { "_id": "P2" }] })));

    let posts = client.posts().list().await.unwrap();

    assert_eq!(posts.len(), 2);
    let requests = client.transport().requests();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, "/posts");
    assert!(requests[0].bearer.is_none());
}

#[tokio::test]
async fn unknown_post_is_reported_without_request() {
    let client = client_as("U1");
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    let result = Interactions::new(&client, &notifier)
        .toggle_post_like(&mut posts, "P404")
        .await;

    assert!(matches!(result, Err(ClientError::NotFound { .. })));
    assert!(client.transport().requests().is_empty());
    assert_eq!(notifier.messages().len(), 1);
}
