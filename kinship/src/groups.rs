//! Client-side filtering of the group directory.

use crate::id::Identified;
use crate::models::{Group, GroupPrivacy};

/// Filters applied to an already-fetched group list. Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub privacy: Option<GroupPrivacy>,
    /// Keep only groups this user belongs to.
    pub member: Option<String>,
}

impl GroupFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn privacy(mut self, privacy: GroupPrivacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    pub fn mine(mut self, user_id: impl Into<String>) -> Self {
        self.member = Some(user_id.into());
        self
    }

    pub fn matches(&self, group: &Group) -> bool {
        self.matches_search(group)
            && self.matches_category(group)
            && self.privacy.is_none_or(|privacy| group.privacy == privacy)
            && self.member.as_deref().is_none_or(|user| group.is_member(user))
    }

    fn matches_search(&self, group: &Group) -> bool {
        let Some(needle) = non_blank(self.search.as_deref()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        group.name.to_lowercase().contains(&needle)
            || group
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, group: &Group) -> bool {
        let Some(wanted) = non_blank(self.category.as_deref()) else {
            return true;
        };
        let label = group.category_label();
        let id = group.category.as_ref().and_then(|category| category.entity_id().ok());
        [label, id]
            .into_iter()
            .flatten()
            .any(|candidate| candidate.eq_ignore_ascii_case(wanted))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn filter_groups<'a>(groups: &'a [Group], filter: &GroupFilter) -> Vec<&'a Group> {
    groups.iter().filter(|group| filter.matches(group)).collect()
}
