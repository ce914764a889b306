pub(crate) mod post_repository;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::post::{NewPost, Post};

pub use post_repository::PgPostRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// Storage for posts. Ids and creation times are assigned here, never by callers.
#[async_trait]
pub trait PostStore: Send + Sync {
	async fn create(
		&self,
		new_post: NewPost,
	) -> Result<Post, RepositoryError>;

	/// At most `take` posts, in whatever order the store yields them.
	async fn find_many(
		&self,
		take: i64,
	) -> Result<Vec<Post>, RepositoryError>;

	/// The post with the greatest `created_at`, if any.
	async fn find_latest(&self) -> Result<Option<Post>, RepositoryError>;
}

/// Keeps posts in insertion order.
#[derive(Default)]
pub struct InMemoryPostStore {
	posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds a fully formed row, bypassing id and timestamp assignment.
	pub async fn insert(
		&self,
		post: Post,
	) {
		self.posts.write().await.push(post);
	}

	pub async fn len(&self) -> usize {
		self.posts.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.posts.read().await.is_empty()
	}
}

#[async_trait]
impl PostStore for InMemoryPostStore {
	async fn create(
		&self,
		new_post: NewPost,
	) -> Result<Post, RepositoryError> {
		let post = Post {
			id: Uuid::new_v4(),
			content: new_post.content,
			author_id: new_post.author_id,
			created_at: Utc::now(),
		};
		self.posts.write().await.push(post.clone());
		Ok(post)
	}

	async fn find_many(
		&self,
		take: i64,
	) -> Result<Vec<Post>, RepositoryError> {
		let take = usize::try_from(take).unwrap_or(0);
		Ok(self.posts.read().await.iter().take(take).cloned().collect())
	}

	async fn find_latest(&self) -> Result<Option<Post>, RepositoryError> {
		// max_by_key keeps the last of equal keys, so ties go to the newest insert
		Ok(self.posts.read().await.iter().max_by_key(|post| post.created_at).cloned())
	}
}
