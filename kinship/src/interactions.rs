//! Social interactions built on [`apply_optimistic`].
//!
//! Every call needs a logged-in user; without one the action is blocked before
//! any local change and the notifier is asked to prompt for login.

use chrono::Utc;

use crate::api::{ApiClient, Transport};
use crate::errors::{ClientError, ValidationError};
use crate::id::{EntityKey, EntityRef, generate_temp_id};
use crate::models::{Album, Comment, Group, GroupMember, MemberRole, Post, Reaction, Story};
use crate::notify::Notifier;
use crate::optimistic::{Reconciliation, apply_optimistic, contains_member, position_of, toggle_membership};

pub struct Interactions<'a, T: Transport, N: Notifier + ?Sized> {
    api: &'a ApiClient<T>,
    notifier: &'a N,
}

impl<'a, T: Transport, N: Notifier + ?Sized> Interactions<'a, T, N> {
    pub fn new(api: &'a ApiClient<T>, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    fn current_user(&self) -> Result<String, ClientError> {
        self.api.session().user_id().inspect_err(|err| self.notifier.notify(err))
    }

    fn reject(&self, err: ClientError) -> ClientError {
        self.notifier.notify(&err);
        err
    }

    /// Likes or unlikes a post depending on whether the current user is in `likes`.
    pub async fn toggle_post_like(&self, posts: &mut Vec<Post>, post_id: &str) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.posts();
        apply_optimistic(
            posts,
            post_id,
            |post| {
                toggle_membership(&mut post.likes, &user_id);
            },
            handle.like(post_id),
            self.notifier,
        )
        .await
    }

    pub async fn toggle_post_save(&self, posts: &mut Vec<Post>, post_id: &str) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.posts();
        apply_optimistic(
            posts,
            post_id,
            |post| {
                toggle_membership(&mut post.saved_by, &user_id);
            },
            handle.save(post_id),
            self.notifier,
        )
        .await
    }

    pub async fn share_post(
        &self,
        posts: &mut Vec<Post>,
        post_id: &str,
        message: Option<&str>,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.posts();
        apply_optimistic(
            posts,
            post_id,
            |post| post.shares.push(EntityRef::from_id(user_id.as_str())),
            handle.share(post_id, message),
            self.notifier,
        )
        .await
    }

    /// Appends a placeholder comment until the server returns the real one.
    pub async fn add_comment(
        &self,
        posts: &mut Vec<Post>,
        post_id: &str,
        content: &str,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let content = content.trim();
        if content.is_empty() {
            return Err(self.reject(ValidationError::single("content", "required", "Comment cannot be empty").into()));
        }
        if let Some(index) = position_of(posts, post_id)
            && !posts[index].comments_enabled()
        {
            return Err(self.reject(
                ValidationError::single("content", "disabled", "Comments are turned off for this post").into(),
            ));
        }

        let placeholder = Comment {
            key: EntityKey::new(generate_temp_id()),
            user: Some(EntityRef::from_id(user_id.as_str())),
            content: content.to_string(),
            likes: Vec::new(),
            created_at: Some(Utc::now()),
        };
        let handle = self.api.posts();
        apply_optimistic(
            posts,
            post_id,
            |post| post.comments.push(placeholder),
            handle.comment(post_id, content),
            self.notifier,
        )
        .await
    }

    pub async fn toggle_comments(&self, posts: &mut Vec<Post>, post_id: &str) -> Result<Reconciliation, ClientError> {
        self.current_user()?;
        let handle = self.api.posts();
        apply_optimistic(
            posts,
            post_id,
            |post| post.comments_enabled = Some(!post.comments_enabled()),
            handle.toggle_comments(post_id),
            self.notifier,
        )
        .await
    }

    pub async fn toggle_pin(&self, posts: &mut Vec<Post>, post_id: &str) -> Result<Reconciliation, ClientError> {
        self.current_user()?;
        let handle = self.api.posts();
        apply_optimistic(
            posts,
            post_id,
            |post| post.pinned = !post.pinned,
            handle.pin(post_id),
            self.notifier,
        )
        .await
    }

    pub async fn toggle_album_like(
        &self,
        albums: &mut Vec<Album>,
        album_id: &str,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.albums();
        apply_optimistic(
            albums,
            album_id,
            |album| {
                toggle_membership(&mut album.likes, &user_id);
            },
            handle.like(album_id),
            self.notifier,
        )
        .await
    }

    pub async fn toggle_album_save(
        &self,
        albums: &mut Vec<Album>,
        album_id: &str,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.albums();
        apply_optimistic(
            albums,
            album_id,
            |album| {
                toggle_membership(&mut album.saved_by, &user_id);
            },
            handle.save(album_id),
            self.notifier,
        )
        .await
    }

    pub async fn join_group(&self, groups: &mut Vec<Group>, group_id: &str) -> Result<Reconciliation, ClientError> {
        self.set_group_membership(groups, group_id, true).await
    }

    pub async fn leave_group(&self, groups: &mut Vec<Group>, group_id: &str) -> Result<Reconciliation, ClientError> {
        self.set_group_membership(groups, group_id, false).await
    }

    /// Joins when the current user is not a member, leaves otherwise.
    pub async fn toggle_group_membership(
        &self,
        groups: &mut Vec<Group>,
        group_id: &str,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let joining = position_of(groups, group_id).is_none_or(|index| !groups[index].is_member(&user_id));
        self.set_group_membership(groups, group_id, joining).await
    }

    async fn set_group_membership(
        &self,
        groups: &mut Vec<Group>,
        group_id: &str,
        join: bool,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.groups();
        let request = async {
            if join {
                handle.join(group_id).await
            } else {
                handle.leave(group_id).await
            }
        };
        apply_optimistic(
            groups,
            group_id,
            |group| apply_membership(group, &user_id, join),
            request,
            self.notifier,
        )
        .await
    }

    /// Sets the current user's reaction; reacting again with the same kind removes it.
    pub async fn react_to_story(
        &self,
        stories: &mut Vec<Story>,
        story_id: &str,
        reaction: &str,
    ) -> Result<Reconciliation, ClientError> {
        let user_id = self.current_user()?;
        let handle = self.api.stories();
        apply_optimistic(
            stories,
            story_id,
            |story| apply_reaction(&mut story.reactions, &user_id, reaction),
            handle.react(story_id, reaction),
            self.notifier,
        )
        .await
    }
}

fn apply_membership(group: &mut Group, user_id: &str, join: bool) {
    let is_member = group.is_member(user_id);
    if join && !is_member {
        group.members.push(GroupMember {
            user: EntityRef::from_id(user_id),
            role: MemberRole::Member,
            joined_at: Some(Utc::now()),
        });
        group.stats.member_count += 1;
    } else if !join && is_member {
        group.members.retain(|member| !member.user.is(user_id));
        group.stats.member_count = group.stats.member_count.saturating_sub(1);
    }
}

fn apply_reaction(reactions: &mut Vec<Reaction>, user_id: &str, kind: &str) {
    let by_user = |reaction: &Reaction| reaction.user.as_ref().is_some_and(|user| user.is(user_id));
    let previous = reactions.iter().position(by_user);
    match previous {
        Some(index) if reactions[index].kind == kind => {
            reactions.remove(index);
        }
        Some(index) => {
            reactions[index].kind = kind.to_string();
            reactions[index].created_at = Some(Utc::now());
        }
        None => reactions.push(Reaction {
            user: Some(EntityRef::from_id(user_id)),
            kind: kind.to_string(),
            created_at: Some(Utc::now()),
        }),
    }
}

/// Whether `user_id` currently likes `post`.
pub fn is_liked_by(post: &Post, user_id: &str) -> bool {
    contains_member(&post.likes, user_id)
}

/// Whether `user_id` has saved `post`.
pub fn is_saved_by(post: &Post, user_id: &str) -> bool {
    contains_member(&post.saved_by, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(members: &[&str]) -> Group {
        Group {
            key: EntityKey::new("G1"),
            name: "Hikers".to_string(),
            members: members
                .iter()
                .map(|id| GroupMember {
                    user: EntityRef::from_id(*id),
                    role: MemberRole::Member,
                    joined_at: None,
                })
                .collect(),
            stats: crate::models::GroupStats {
                member_count: members.len() as u64,
                post_count: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn membership_join_and_leave_adjust_counts() {
        let mut group = group_with(&["U2"]);
        apply_membership(&mut group, "U1", true);
        assert!(group.is_member("U1"));
        assert_eq!(group.stats.member_count, 2);

        apply_membership(&mut group, "U1", true);
        assert_eq!(group.stats.member_count, 2, "joining twice is a no-op");

        apply_membership(&mut group, "U1", false);
        assert!(!group.is_member("U1"));
        assert_eq!(group.stats.member_count, 1);
    }

    #[test]
    fn leaving_never_underflows() {
        let mut group = group_with(&["U1"]);
        group.stats.member_count = 0;
        apply_membership(&mut group, "U1", false);
        assert_eq!(group.stats.member_count, 0);
    }

    #[test]
    fn reaction_replace_and_toggle_off() {
        let mut reactions = Vec::new();
        apply_reaction(&mut reactions, "U1", "love");
        assert_eq!(reactions.len(), 1);

        apply_reaction(&mut reactions, "U1", "haha");
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].kind, "haha");

        apply_reaction(&mut reactions, "U1", "haha");
        assert!(reactions.is_empty());
    }
}
