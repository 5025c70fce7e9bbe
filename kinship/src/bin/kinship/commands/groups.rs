use clap::Args;
use kinship::api::GroupQuery;
use kinship::models::{Group, GroupPrivacy};
use kinship::{GroupFilter, Identified, Interactions, filter_groups};

use super::{Result, reported};
use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::{GroupRow, GroupsView};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Find groups",
        commands: &[
            "kinship groups --search hiking",
            "kinship groups --category sports --privacy public",
            "kinship groups --mine          # Groups you belong to",
        ],
    },
    ExampleGroup {
        title: "Membership",
        commands: &["kinship join 66a1b2c3", "kinship leave 66a1b2c3"],
    },
];

#[derive(Args)]
pub struct GroupsArgs {
    /// Text to look for in group names and descriptions
    #[arg(long)]
    pub search: Option<String>,

    /// Category name or id
    #[arg(long)]
    pub category: Option<String>,

    /// public, private or secret
    #[arg(long)]
    pub privacy: Option<GroupPrivacy>,

    /// Only groups you are a member of
    #[arg(long)]
    pub mine: bool,
}

pub async fn handle_groups(args: GroupsArgs, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer_id();
    if args.mine && viewer.is_none() {
        output.warning("--mine needs a logged-in user; showing all groups.");
    }

    let query = GroupQuery {
        search: args.search.clone(),
        category: args.category.clone(),
        privacy: args.privacy,
    };
    output.progress("Loading groups");
    let groups = ctx.client.groups().list(&query).await;
    output.clear_line();
    let groups = groups?;

    // The backend may ignore some filters, so they are applied again locally.
    let mut filter = GroupFilter {
        search: args.search,
        category: args.category,
        privacy: args.privacy,
        member: None,
    };
    if args.mine
        && let Some(user) = viewer.as_deref()
    {
        filter = filter.mine(user);
    }

    let rows: Vec<GroupRow> = filter_groups(&groups, &filter)
        .into_iter()
        .map(|group| GroupRow::from_group(group, viewer.as_deref()))
        .collect();
    if rows.is_empty() {
        output.info("No groups match.");
        return Ok(());
    }
    output.display(&GroupsView { groups: rows })
}

async fn load_groups(ctx: &AppContext) -> Result<Vec<Group>> {
    Ok(ctx.client.groups().list(&GroupQuery::default()).await?)
}

fn member_count(groups: &[Group], group_id: &str) -> u64 {
    groups
        .iter()
        .find(|group| group.entity_id().is_ok_and(|id| id == group_id))
        .map_or(0, |group| group.stats.member_count)
}

pub async fn handle_join(group_id: String, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let mut groups = load_groups(ctx).await?;
    Interactions::new(&ctx.client, output)
        .join_group(&mut groups, &group_id)
        .await
        .map_err(reported)?;
    output.success(&format!(
        "Joined {group_id} ({} members)",
        member_count(&groups, &group_id)
    ));
    Ok(())
}

pub async fn handle_leave(group_id: String, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let mut groups = load_groups(ctx).await?;
    Interactions::new(&ctx.client, output)
        .leave_group(&mut groups, &group_id)
        .await
        .map_err(reported)?;
    output.success(&format!("Left {group_id}"));
    Ok(())
}
