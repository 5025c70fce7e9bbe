#[path = "interactions/auth_tests.rs"]
mod auth_tests;
#[path = "interactions/comment_tests.rs"]
mod comment_tests;
#[path = "interactions/group_tests.rs"]
mod group_tests;
#[path = "interactions/like_tests.rs"]
mod like_tests;
#[path = "interactions/publish_tests.rs"]
mod publish_tests;
#[path = "interactions/support.rs"]
mod support;
