use super::support::*;

#[tokio::test]
async fn comment_placeholder_is_replaced_by_server_copy() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({
        "post": {
            "_id": "P1",
            "comments": [{ "_id": "C1", "user": "U1", "text": "Nice!" }]
        }
    })));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    Interactions::new(&client, &notifier)
        .add_comment(&mut posts, "P1", "  Nice!  ")
        .await
        .unwrap();

    let comments = &posts[0].comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].entity_id().unwrap(), "C1");
    assert_eq!(comments[0].content, "Nice!");

    let request = &client.transport().requests()[0];
    assert_eq!(request.path, "/posts/P1/comment");
    assert_eq!(request.body, RequestBody::Json(json!({ "content": "Nice!" })));
}

#[tokio::test]
async fn failed_comment_removes_placeholder() {
    let client = client_as("U1");
    client.transport().respond(server_error(400, "Comment too long"));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    let result = Interactions::new(&client, &notifier)
        .add_comment(&mut posts, "P1", "hello")
        .await;

    assert!(result.is_err());
    assert!(posts[0].comments.is_empty());
    assert_eq!(notifier.messages(), vec!["Comment too long"]);
}

#[tokio::test]
async fn blank_comment_is_rejected_locally() {
    let client = client_as("U1");
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    let result = Interactions::new(&client, &notifier)
        .add_comment(&mut posts, "P1", "   ")
        .await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(client.transport().requests().is_empty());
    assert_eq!(notifier.messages(), vec!["Comment cannot be empty"]);
}

#[tokio::test]
async fn comments_disabled_blocks_new_comments() {
    let client = client_as("U1");
    let notifier = RecordingNotifier::default();
    let mut locked = post("P1", &[]);
    locked.comments_enabled = Some(false);
    let mut posts = vec![locked];

    let result = Interactions::new(&client, &notifier)
        .add_comment(&mut posts, "P1", "hi")
        .await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn toggling_comments_flips_the_flag() {
    let client = client_as("U1");
    client
        .transport()
        .respond(Ok(json!({ "post": { "_id": "P1", "commentsEnabled": false } })));
    let notifier = RecordingNotifier::default();
    let mut posts = vec![post("P1", &[])];

    Interactions::new(&client, &notifier)
        .toggle_comments(&mut posts, "P1")
        .await
        .unwrap();

    assert!(!posts[0].comments_enabled());
    assert_eq!(client.transport().requests()[0].path, "/posts/P1/toggle-comments");
}
