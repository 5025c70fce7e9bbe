//! Profile activity and analytics derived from a user's raw posts and albums.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::id::Identified;
use crate::models::{Album, Post};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileAnalytics {
    pub total_posts: u64,
    pub total_albums: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_views: u64,
    /// Mean likes + comments + shares per post, rounded down.
    pub average_engagement: u64,
    pub top_post_id: Option<String>,
    pub timeline: Vec<DailyActivity>,
}

pub fn compute_analytics(posts: &[Post], albums: &[Album]) -> ProfileAnalytics {
    let mut analytics = ProfileAnalytics {
        total_posts: posts.len() as u64,
        total_albums: albums.len() as u64,
        ..Default::default()
    };

    let mut top: Option<(u64, &Post)> = None;
    for post in posts {
        analytics.total_likes += post.likes.len() as u64;
        analytics.total_comments += post.comments.len() as u64;
        analytics.total_shares += post.shares.len() as u64;
        analytics.total_views += post.views;
        let engagement = post.engagement();
        if top.is_none_or(|(best, _)| engagement > best) {
            top = Some((engagement, post));
        }
    }
    for album in albums {
        analytics.total_likes += album.likes.len() as u64;
        analytics.total_comments += album.comments.len() as u64;
        analytics.total_shares += album.shares.len() as u64;
    }

    let post_engagement: u64 = posts.iter().map(Post::engagement).sum();
    analytics.average_engagement = post_engagement.checked_div(analytics.total_posts).unwrap_or(0);
    analytics.top_post_id = top.and_then(|(_, post)| post.entity_id().ok());

    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let dates = posts
        .iter()
        .filter_map(|post| post.created_at)
        .chain(albums.iter().filter_map(|album| album.created_at));
    for created_at in dates {
        *per_day.entry(created_at.date_naive()).or_default() += 1;
    }
    analytics.timeline = per_day
        .into_iter()
        .map(|(date, count)| DailyActivity { date, count })
        .collect();

    analytics
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Post,
    Album,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub summary: String,
}

const SUMMARY_CHARS: usize = 80;

/// The `limit` newest dated items, newest first. Items without id or date are left out.
pub fn recent_activity(posts: &[Post], albums: &[Album], limit: usize) -> Vec<ActivityEntry> {
    let from_posts = posts.iter().filter_map(|post| {
        Some(ActivityEntry {
            kind: ActivityKind::Post,
            id: post.entity_id().ok()?,
            created_at: post.created_at?,
            summary: summarize(post.title.as_deref().unwrap_or(&post.content)),
        })
    });
    let from_albums = albums.iter().filter_map(|album| {
        Some(ActivityEntry {
            kind: ActivityKind::Album,
            id: album.entity_id().ok()?,
            created_at: album.created_at?,
            summary: summarize(&format!("{} ({} items)", album.name, album.media.len())),
        })
    });
    let mut entries: Vec<ActivityEntry> = from_posts.chain(from_albums).collect();
    entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    entries.truncate(limit);
    entries
}

fn summarize(text: &str) -> String {
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() > SUMMARY_CHARS {
        let cut: String = compact.chars().take(SUMMARY_CHARS).collect();
        format!("{cut}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{EntityKey, EntityRef};
    use crate::models::{Comment, Media};
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).single()
    }

    fn refs(count: usize) -> Vec<EntityRef> {
        (0..count).map(|i| EntityRef::from_id(format!("U{i}"))).collect()
    }

    fn post(id: &str, likes: usize, comments: usize, views: u64, created_at: Option<DateTime<Utc>>) -> Post {
        Post {
            key: EntityKey::new(id),
            content: format!("post {id}"),
            likes: refs(likes),
            comments: (0..comments).map(|_| Comment::default()).collect(),
            views,
            created_at,
            ..Default::default()
        }
    }

    #[test]
    fn totals_average_and_top_post() {
        let posts = vec![
            post("P1", 3, 1, 10, at(1, 9)),
            post("P2", 5, 2, 20, at(1, 18)),
            post("P3", 0, 0, 5, at(3, 7)),
        ];
        let albums = vec![Album {
            key: EntityKey::new("A1"),
            likes: refs(4),
            created_at: at(3, 12),
            ..Default::default()
        }];

        let analytics = compute_analytics(&posts, &albums);
        assert_eq!(analytics.total_posts, 3);
        assert_eq!(analytics.total_albums, 1);
        assert_eq!(analytics.total_likes, 12);
        assert_eq!(analytics.total_comments, 3);
        assert_eq!(analytics.total_views, 35);
        assert_eq!(analytics.average_engagement, 3);
        assert_eq!(analytics.top_post_id.as_deref(), Some("P2"));
        assert_eq!(
            analytics.timeline,
            vec![
                DailyActivity {
                    date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    count: 2
                },
                DailyActivity {
                    date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn empty_profile_has_zeroed_analytics() {
        assert_eq!(compute_analytics(&[], &[]), ProfileAnalytics::default());
    }

    #[test]
    fn first_post_wins_engagement_ties() {
        let posts = vec![post("P1", 2, 0, 0, None), post("P2", 1, 1, 0, None)];
        assert_eq!(compute_analytics(&posts, &[]).top_post_id.as_deref(), Some("P1"));
    }

    #[test]
    fn recent_activity_is_newest_first_and_limited() {
        let posts = vec![post("P1", 0, 0, 0, at(1, 9)), post("P2", 0, 0, 0, None), post("P3", 0, 0, 0, at(4, 9))];
        let albums = vec![Album {
            key: EntityKey::new("A1"),
            name: "Summer".to_string(),
            media: vec![Media::default(), Media::default()],
            created_at: at(2, 9),
            ..Default::default()
        }];

        let entries = recent_activity(&posts, &albums, 2);
        let ids: Vec<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["P3", "A1"]);
        assert_eq!(entries[1].summary, "Summer (2 items)");
        assert_eq!(entries[1].kind, ActivityKind::Album);
    }

    #[test]
    fn long_summaries_are_truncated() {
        let text = "word ".repeat(40);
        let summary = summarize(&text);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), SUMMARY_CHARS + 3);
    }
}
