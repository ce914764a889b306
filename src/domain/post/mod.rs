pub mod commands;
pub mod entity;

pub use entity::{AuthorView, FeedEntry, NewPost, Post};

/// Upper bound on the posts a single feed read returns.
pub const FEED_LIMIT: i64 = 100;

/// Upper bound on identities requested from the provider in one batch.
pub const AUTHOR_LOOKUP_LIMIT: usize = 100;
