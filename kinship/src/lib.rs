//! Kinship client core.
//!
//! Typed access to the Kinship social API plus the client-side logic that sits
//! on top of it: identifier normalization, optimistic interactions with
//! rollback, feed and story assembly, profile analytics and upload checks.

pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod feed;
pub mod groups;
pub mod id;
pub mod interactions;
pub mod models;
pub mod notify;
pub mod optimistic;
pub mod search;
pub mod session;
pub mod upload;
pub mod validators;

pub use analytics::{ProfileAnalytics, compute_analytics, recent_activity};
pub use api::{ApiClient, HttpTransport, Transport};
pub use config::ClientConfig;
pub use errors::*;
pub use feed::{FeedItem, StoryGroup, group_stories, merge_feed};
pub use groups::{GroupFilter, filter_groups};
pub use id::{EntityKey, EntityRef, IdError, Identified, normalize_id};
pub use interactions::Interactions;
pub use notify::{LogNotifier, Notifier};
pub use optimistic::{Reconciliation, apply_optimistic};
pub use search::SearchSequencer;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use upload::UploadFile;
