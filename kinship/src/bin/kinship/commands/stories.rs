use kinship::group_stories;

use super::Result;
use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::StoriesView;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Story bar",
    commands: &["kinship stories", "kinship --output compact stories"],
}];

pub async fn handle_stories(ctx: &AppContext, output: &OutputManager) -> Result<()> {
    output.progress("Loading stories");
    let stories = ctx.client.stories().feed().await;
    output.clear_line();

    let viewer = ctx.viewer_id();
    let groups = group_stories(stories?, viewer.as_deref());
    if groups.is_empty() {
        output.info("No active stories.");
        return Ok(());
    }
    output.display(&StoriesView::from_groups(&groups))
}
