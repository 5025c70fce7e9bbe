//! Dashboard feed and story bar.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::{EntityRef, IdError, Identified};
use crate::models::{Album, Post, Story};

/// One entry of the merged feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "item", rename_all = "lowercase")]
pub enum FeedItem {
    Post(Post),
    Album(Album),
}

impl FeedItem {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            FeedItem::Post(post) => post.created_at,
            FeedItem::Album(album) => album.created_at,
        }
    }

    pub fn author(&self) -> Option<&EntityRef> {
        match self {
            FeedItem::Post(post) => post.user.as_ref(),
            FeedItem::Album(album) => album.user.as_ref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FeedItem::Post(_) => "post",
            FeedItem::Album(_) => "album",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FeedItem::Post(_) => 0,
            FeedItem::Album(_) => 1,
        }
    }
}

impl Identified for FeedItem {
    fn entity_id(&self) -> Result<String, IdError> {
        match self {
            FeedItem::Post(post) => post.entity_id(),
            FeedItem::Album(album) => album.entity_id(),
        }
    }
}

/// Merges posts and albums newest first.
///
/// Equal timestamps put posts before albums; undated items go last. The sort is
/// stable, so fetch order breaks any remaining ties.
pub fn merge_feed(posts: Vec<Post>, albums: Vec<Album>) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = posts
        .into_iter()
        .map(FeedItem::Post)
        .chain(albums.into_iter().map(FeedItem::Album))
        .collect();
    items.sort_by(|left, right| match (left.created_at(), right.created_at()) {
        (Some(a), Some(b)) => b.cmp(&a).then_with(|| left.rank().cmp(&right.rank())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.rank().cmp(&right.rank()),
    });
    items
}

/// All active stories of one author, as shown by one avatar in the story bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryGroup {
    pub user_id: String,
    pub user: Option<EntityRef>,
    pub stories: Vec<Story>,
}

impl StoryGroup {
    pub fn latest_at(&self) -> Option<DateTime<Utc>> {
        self.stories.iter().filter_map(|story| story.created_at).max()
    }
}

/// Groups stories by author in first-appearance order, each group oldest to newest.
///
/// When `viewer_id` is given, the viewer's own group comes first. Stories whose
/// author cannot be identified are skipped.
pub fn group_stories(stories: Vec<Story>, viewer_id: Option<&str>) -> Vec<StoryGroup> {
    let mut groups: Vec<StoryGroup> = Vec::new();
    let mut index_by_user: HashMap<String, usize> = HashMap::new();

    for story in stories {
        let user_id = match story.user.as_ref().map(EntityRef::id) {
            Some(Ok(id)) => id,
            Some(Err(err)) => {
                log::warn!("skipping story with malformed author: {err}");
                continue;
            }
            None => {
                log::warn!("skipping story without an author");
                continue;
            }
        };
        match index_by_user.get(&user_id) {
            Some(&index) => {
                let group = &mut groups[index];
                if group.user.as_ref().is_none_or(|user| matches!(user, EntityRef::Id(_))) {
                    group.user = story.user.clone();
                }
                group.stories.push(story);
            }
            None => {
                index_by_user.insert(user_id.clone(), groups.len());
                groups.push(StoryGroup {
                    user_id,
                    user: story.user.clone(),
                    stories: vec![story],
                });
            }
        }
    }

    for group in &mut groups {
        group.stories.sort_by(|left, right| match (left.created_at, right.created_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    if let Some(viewer) = viewer_id
        && let Some(position) = groups.iter().position(|group| group.user_id == viewer)
    {
        let own = groups.remove(position);
        groups.insert(0, own);
    }
    groups
}
