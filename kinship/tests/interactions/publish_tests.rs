use super::support::*;
use kinship::UploadFile;
use kinship::api::PostDraft;
use kinship::models::Story;

#[tokio::test]
async fn post_with_media_goes_out_as_multipart() {
    let client = client_as("U1");
    client
        .transport()
        .respond(Ok(json!({ "post": { "_id": "P9", "content": "Trip", "media": [{ "url": "/u/a.jpg" }] } })));

    let draft = PostDraft::new("Trip")
        .title("Lisbon")
        .attach(UploadFile::new("a.jpg", vec![0xFF, 0xD8, 0xFF]));
    let created = client.posts().create(draft).await.unwrap();
    assert_eq!(created.entity_id().unwrap(), "P9");

    let request = &client.transport().requests()[0];
    assert_eq!(request.path, "/posts");
    let RequestBody::Multipart(form) = &request.body else {
        panic!("expected multipart body, got {:?}", request.body);
    };
    assert_eq!(form.field("content"), Some("Trip"));
    assert_eq!(form.field("title"), Some("Lisbon"));
    assert_eq!(form.files.len(), 1);
    assert_eq!(form.files[0].content_type, "image/jpeg");
}

#[tokio::test]
async fn invalid_media_never_reaches_the_transport() {
    let client = client_as("U1");
    let draft = PostDraft::new("Oops").attach(UploadFile::new("virus.exe", vec![1]));

    let result = client.posts().create(draft).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn story_reaction_is_optimistic() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({
        "story": { "_id": "S1", "user": "U2", "reactions": [{ "user": "U1", "type": "love" }] }
    })));
    let notifier = RecordingNotifier::default();
    let mut stories = vec![Story {
        key: EntityKey::new("S1"),
        user: Some(EntityRef::from_id("U2")),
        ..Default::default()
    }];

    Interactions::new(&client, &notifier)
        .react_to_story(&mut stories, "S1", "love")
        .await
        .unwrap();

    assert_eq!(stories[0].reactions.len(), 1);
    assert_eq!(stories[0].reactions[0].kind, "love");
    let request = &client.transport().requests()[0];
    assert_eq!(request.path, "/stories/S1/reaction");
    assert_eq!(request.body, RequestBody::Json(json!({ "type": "love" })));
}
