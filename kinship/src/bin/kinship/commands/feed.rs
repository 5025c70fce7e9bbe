use std::path::PathBuf;

use clap::Args;
use kinship::api::PostDraft;
use kinship::interactions::{is_liked_by, is_saved_by};
use kinship::models::Post;
use kinship::{Identified, Interactions, UploadFile, merge_feed};

use super::{Result, reported};
use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::{FeedRow, FeedView};

pub const FEED_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Browse",
    commands: &[
        "kinship feed                  # Latest posts and albums",
        "kinship feed --limit 5",
        "kinship --output json feed",
    ],
}];

pub const LIKE_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "React",
    commands: &[
        "kinship like 65f0c1d2e3       # Like, or unlike when already liked",
        "kinship save 65f0c1d2e3       # Save, or unsave when already saved",
        "kinship comment 65f0c1d2e3 \"Great shot\"",
    ],
}];

pub const POST_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Publish",
    commands: &[
        "kinship post \"Morning run done\"",
        "kinship post \"Trip photos\" --title \"Lisbon\" --media a.jpg --media b.mp4",
    ],
}];

#[derive(Args)]
pub struct FeedArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args)]
pub struct PostArgs {
    /// Post text
    pub content: String,

    #[arg(long)]
    pub title: Option<String>,

    /// Image, video or audio file to attach (repeatable)
    #[arg(long = "media", value_name = "PATH")]
    pub media: Vec<PathBuf>,
}

pub async fn handle_feed(args: FeedArgs, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    output.progress("Loading feed");
    let posts = ctx.client.posts();
    let albums = ctx.client.albums();
    let (posts, albums) = tokio::join!(posts.list(), albums.list());
    output.clear_line();

    let mut feed = merge_feed(posts?, albums?);
    feed.truncate(args.limit);
    if feed.is_empty() {
        output.info("Nothing in your feed yet.");
        return Ok(());
    }

    let viewer = ctx.viewer_id();
    let items = feed
        .iter()
        .map(|item| FeedRow::from_item(item, viewer.as_deref()))
        .collect();
    output.display(&FeedView { items })
}

async fn load_post(ctx: &AppContext, post_id: &str) -> Result<Vec<Post>> {
    Ok(vec![ctx.client.posts().get(post_id).await?])
}

pub async fn handle_like(post_id: String, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let mut posts = load_post(ctx, &post_id).await?;
    Interactions::new(&ctx.client, output)
        .toggle_post_like(&mut posts, &post_id)
        .await
        .map_err(reported)?;

    let viewer = ctx.viewer_id().unwrap_or_default();
    let verb = if posts.first().is_some_and(|post| is_liked_by(post, &viewer)) {
        "Liked"
    } else {
        "Unliked"
    };
    let likes = posts.first().map_or(0, |post| post.likes.len());
    output.success(&format!("{verb} {post_id} ({likes} likes)"));
    Ok(())
}

pub async fn handle_save(post_id: String, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let mut posts = load_post(ctx, &post_id).await?;
    Interactions::new(&ctx.client, output)
        .toggle_post_save(&mut posts, &post_id)
        .await
        .map_err(reported)?;

    let viewer = ctx.viewer_id().unwrap_or_default();
    if posts.first().is_some_and(|post| is_saved_by(post, &viewer)) {
        output.success(&format!("Saved {post_id}"));
    } else {
        output.success(&format!("Removed {post_id} from saved posts"));
    }
    Ok(())
}

pub async fn handle_comment(post_id: String, text: String, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let mut posts = load_post(ctx, &post_id).await?;
    Interactions::new(&ctx.client, output)
        .add_comment(&mut posts, &post_id, &text)
        .await
        .map_err(reported)?;
    let comments = posts.first().map_or(0, |post| post.comments.len());
    output.success(&format!("Comment added ({comments} comments)"));
    Ok(())
}

pub async fn handle_post(args: PostArgs, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let mut draft = PostDraft::new(args.content);
    if let Some(title) = args.title {
        draft = draft.title(title);
    }
    for path in &args.media {
        draft = draft.attach(UploadFile::read(path)?);
    }

    output.progress("Publishing");
    let created = ctx.client.posts().create(draft).await;
    output.clear_line();
    let post = created?;

    let id = post.entity_id().unwrap_or_else(|_| "-".to_string());
    output.success(&format!("Published post {id} with {} media file(s)", post.media.len()));
    Ok(())
}
