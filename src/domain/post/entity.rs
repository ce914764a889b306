use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identity::Identity;

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	pub id: Uuid,
	pub content: String,
	pub author_id: String,
	pub created_at: DateTime<Utc>,
}

/// Row to insert. `id` and `created_at` are left to the store.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewPost {
	pub content: String,
	pub author_id: String,
}

/// The part of an identity that is safe to show next to a post.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
	pub id: String,
	pub username: Option<String>,
	pub image_url: String,
}

impl From<&Identity> for AuthorView {
	fn from(user: &Identity) -> Self {
		Self {
			id: user.id.clone(),
			username: user.username.clone(),
			image_url: user.image_url.clone(),
		}
	}
}

impl From<Identity> for AuthorView {
	fn from(user: Identity) -> Self {
		Self {
			id: user.id,
			username: user.username,
			image_url: user.image_url,
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FeedEntry {
	pub post: Post,
	pub author: AuthorView,
}
