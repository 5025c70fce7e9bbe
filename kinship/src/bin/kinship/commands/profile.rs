use clap::Args;
use kinship::{compute_analytics, recent_activity};

use super::Result;
use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::utils::format_datetime;
use crate::views::ProfileView;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Profiles",
    commands: &[
        "kinship profile               # Your own profile",
        "kinship profile 65f0aa11 --recent 10",
    ],
}];

#[derive(Args)]
pub struct ProfileArgs {
    /// User id; defaults to the logged-in user
    pub user: Option<String>,

    /// Number of recent activity entries to list
    #[arg(long, default_value_t = 5)]
    pub recent: usize,
}

pub async fn handle_profile(args: ProfileArgs, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let user_id = match args.user.or_else(|| ctx.viewer_id()) {
        Some(id) => id,
        None => anyhow::bail!("No user given and no logged-in user. Pass a user id or log in with --user."),
    };

    output.progress("Loading profile");
    let users = ctx.client.users();
    let (user, posts, albums) = tokio::join!(users.get(&user_id), users.posts(&user_id), users.albums(&user_id));
    output.clear_line();
    let (user, posts, albums) = (user?, posts?, albums?);

    let analytics = compute_analytics(&posts, &albums);
    let activity = recent_activity(&posts, &albums, args.recent);
    let view = ProfileView::new(&user, analytics, activity);
    output.display(&view)?;

    if !view.missing_fields.is_empty() {
        output.heading("Complete your profile");
        for field in &view.missing_fields {
            output.bullet(field);
        }
    }
    if !view.recent_activity.is_empty() {
        output.heading("Recent activity");
        for entry in &view.recent_activity {
            output.bullet(&format!(
                "{} {:?} {}",
                format_datetime(Some(entry.created_at)),
                entry.kind,
                entry.summary
            ));
        }
    }
    Ok(())
}
