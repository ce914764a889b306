use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::post::{NewPost, Post};

use super::{PostStore, RepositoryError};

#[derive(Clone)]
pub struct PgPostRepository {
	pool: PgPool,
}

impl PgPostRepository {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl PostStore for PgPostRepository {
	async fn create(
		&self,
		new_post: NewPost,
	) -> Result<Post, RepositoryError> {
		let post = sqlx::query_as::<_, Post>(
			r#"
			INSERT INTO post (content, author_id)
			VALUES ($1, $2)
			RETURNING id, content, author_id, created_at
			"#,
		)
		.bind(new_post.content)
		.bind(new_post.author_id)
		.fetch_one(&self.pool)
		.await?;
		Ok(post)
	}

	async fn find_many(
		&self,
		take: i64,
	) -> Result<Vec<Post>, RepositoryError> {
		let posts = sqlx::query_as::<_, Post>(
			r#"
			SELECT id, content, author_id, created_at
			FROM post
			LIMIT $1
			"#,
		)
		.bind(take)
		.fetch_all(&self.pool)
		.await?;
		Ok(posts)
	}

	async fn find_latest(&self) -> Result<Option<Post>, RepositoryError> {
		let post = sqlx::query_as::<_, Post>(
			r#"
			SELECT id, content, author_id, created_at
			FROM post
			ORDER BY created_at DESC
			LIMIT 1
			"#,
		)
		.fetch_optional(&self.pool)
		.await?;
		Ok(post)
	}
}
