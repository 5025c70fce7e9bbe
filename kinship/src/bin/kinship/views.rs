//! Rendered shapes for each command's result.

use comfy_table::{Cell, Table};
use kinship::analytics::{ActivityEntry, ProfileAnalytics};
use kinship::interactions::{is_liked_by, is_saved_by};
use kinship::models::{Group, User};
use kinship::optimistic::contains_member;
use kinship::{FeedItem, Identified, StoryGroup};
use serde::Serialize;

use crate::output::{GlobalOptions, TableDisplay, themed_table};
use crate::theme::ICONS;
use crate::utils::{author_label, format_datetime, truncate};

const SUMMARY_WIDTH: usize = 48;

#[derive(Debug, Serialize)]
pub struct FeedRow {
    pub kind: &'static str,
    pub id: String,
    pub author: String,
    pub summary: String,
    pub likes: usize,
    pub comments: usize,
    pub shares: usize,
    pub liked: bool,
    pub saved: bool,
    pub created_at: String,
}

impl FeedRow {
    pub fn from_item(item: &FeedItem, viewer: Option<&str>) -> Self {
        let (summary, likes, comments, shares, liked, saved) = match item {
            FeedItem::Post(post) => (
                post.title.clone().unwrap_or_else(|| post.content.clone()),
                post.likes.len(),
                post.comments.len(),
                post.shares.len(),
                viewer.is_some_and(|user| is_liked_by(post, user)),
                viewer.is_some_and(|user| is_saved_by(post, user)),
            ),
            FeedItem::Album(album) => (
                format!("{} ({} items)", album.name, album.media.len()),
                album.likes.len(),
                album.comments.len(),
                album.shares.len(),
                viewer.is_some_and(|user| contains_member(&album.likes, user)),
                viewer.is_some_and(|user| contains_member(&album.saved_by, user)),
            ),
        };
        Self {
            kind: item.kind(),
            id: item.entity_id().unwrap_or_else(|_| "-".to_string()),
            author: author_label(item.author()),
            summary: truncate(&summary, SUMMARY_WIDTH),
            likes,
            comments,
            shares,
            liked,
            saved,
            created_at: format_datetime(item.created_at()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedView {
    pub items: Vec<FeedRow>,
}

impl TableDisplay for FeedView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Kind", "Id", "Author", "Summary", "Likes", "Comments", "Shares", "When"]);
        for row in &self.items {
            let likes = if row.liked {
                format!("{} {}", row.likes, ICONS.liked)
            } else {
                row.likes.to_string()
            };
            let id = if row.saved {
                format!("{} {}", row.id, ICONS.saved)
            } else {
                row.id.clone()
            };
            table.add_row(vec![
                Cell::new(row.kind),
                Cell::new(id),
                Cell::new(&row.author),
                Cell::new(&row.summary),
                Cell::new(likes),
                Cell::new(row.comments),
                Cell::new(row.shares),
                Cell::new(&row.created_at),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.items
            .iter()
            .map(|row| format!("{}:{} likes={}", row.kind, row.id, row.likes))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct GroupRow {
    pub id: String,
    pub name: String,
    pub privacy: &'static str,
    pub category: String,
    pub members: u64,
    pub role: Option<String>,
}

impl GroupRow {
    pub fn from_group(group: &Group, viewer: Option<&str>) -> Self {
        Self {
            id: group.entity_id().unwrap_or_else(|_| "-".to_string()),
            name: group.name.clone(),
            privacy: group.privacy.as_str(),
            category: group.category_label().unwrap_or_else(|| "-".to_string()),
            members: group.stats.member_count.max(group.members.len() as u64),
            role: viewer
                .and_then(|user| group.role_of(user))
                .map(|role| format!("{role:?}").to_lowercase()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupsView {
    pub groups: Vec<GroupRow>,
}

impl TableDisplay for GroupsView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Id", "Name", "Privacy", "Category", "Members", "Role"]);
        for row in &self.groups {
            let role = match &row.role {
                Some(role) => format!("{} {role}", ICONS.member),
                None => String::new(),
            };
            table.add_row(vec![
                Cell::new(&row.id),
                Cell::new(&row.name),
                Cell::new(row.privacy),
                Cell::new(&row.category),
                Cell::new(row.members),
                Cell::new(role),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.groups
            .iter()
            .map(|row| format!("{} {} ({})", row.id, row.name, row.members))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct StoryRow {
    pub user_id: String,
    pub author: String,
    pub stories: usize,
    pub latest: String,
}

#[derive(Debug, Serialize)]
pub struct StoriesView {
    pub groups: Vec<StoryRow>,
}

impl StoriesView {
    pub fn from_groups(groups: &[StoryGroup]) -> Self {
        let groups = groups
            .iter()
            .map(|group| StoryRow {
                user_id: group.user_id.clone(),
                author: author_label(group.user.as_ref()),
                stories: group.stories.len(),
                latest: format_datetime(group.latest_at()),
            })
            .collect();
        Self { groups }
    }
}

impl TableDisplay for StoriesView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Author", "User id", "Stories", "Latest"]);
        for row in &self.groups {
            table.add_row(vec![
                Cell::new(&row.author),
                Cell::new(&row.user_id),
                Cell::new(row.stories),
                Cell::new(&row.latest),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.groups
            .iter()
            .map(|row| format!("{}={}", row.user_id, row.stories))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user_id: String,
    pub name: String,
    pub completion_percent: u8,
    pub missing_fields: Vec<&'static str>,
    pub followers: usize,
    pub following: usize,
    pub analytics: ProfileAnalytics,
    pub recent_activity: Vec<ActivityEntry>,
}

impl ProfileView {
    pub fn new(user: &User, analytics: ProfileAnalytics, recent_activity: Vec<ActivityEntry>) -> Self {
        Self {
            user_id: user.entity_id().unwrap_or_else(|_| "-".to_string()),
            name: user.name.clone(),
            completion_percent: user.completion_percent(),
            missing_fields: user.missing_profile_fields(),
            followers: user.followers.len(),
            following: user.following.len(),
            analytics,
            recent_activity,
        }
    }
}

impl TableDisplay for ProfileView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let analytics = &self.analytics;
        let mut table = themed_table(options, &["Metric", "Value"]);
        let rows: Vec<(&str, String)> = vec![
            ("Name", self.name.clone()),
            ("Profile complete", format!("{}%", self.completion_percent)),
            ("Followers", self.followers.to_string()),
            ("Following", self.following.to_string()),
            ("Posts", analytics.total_posts.to_string()),
            ("Albums", analytics.total_albums.to_string()),
            ("Likes", analytics.total_likes.to_string()),
            ("Comments", analytics.total_comments.to_string()),
            ("Shares", analytics.total_shares.to_string()),
            ("Views", analytics.total_views.to_string()),
            ("Avg engagement", analytics.average_engagement.to_string()),
            ("Top post", analytics.top_post_id.clone().unwrap_or_else(|| "-".to_string())),
            ("Active days", analytics.timeline.len().to_string()),
        ];
        for (metric, value) in rows {
            table.add_row(vec![Cell::new(metric), Cell::new(value)]);
        }
        table
    }

    fn to_compact(&self) -> String {
        format!(
            "{} complete={}% posts={} likes={}",
            self.user_id, self.completion_percent, self.analytics.total_posts, self.analytics.total_likes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship::id::{EntityKey, EntityRef};
    use kinship::models::Post;

    #[test]
    fn feed_row_marks_viewer_like() {
        let post = Post {
            key: EntityKey::new("P1"),
            content: "Hello there".to_string(),
            likes: vec![EntityRef::from_id("U1")],
            ..Default::default()
        };
        let row = FeedRow::from_item(&FeedItem::Post(post), Some("U1"));
        assert!(row.liked);
        assert!(!row.saved);
        assert_eq!(row.summary, "Hello there");

        let view = FeedView { items: vec![row] };
        assert_eq!(view.to_compact(), "post:P1 likes=1");
    }

    #[test]
    fn profile_table_lists_metrics() {
        let user = User {
            key: EntityKey::new("U1"),
            name: "Ada".to_string(),
            ..Default::default()
        };
        let view = ProfileView::new(&user, ProfileAnalytics::default(), Vec::new());
        assert_eq!(view.completion_percent, 12);
        let rendered = view
            .to_table(&GlobalOptions {
                no_color: true,
                ..Default::default()
            })
            .to_string();
        assert!(rendered.contains("Profile complete"));
    }
}
