use validator::Validate;

use crate::{
	dependencies::AppState,
	domain::{
		identity::RequestContext,
		post::{commands::CreatePost, AuthorView, FeedEntry, NewPost, Post, AUTHOR_LOOKUP_LIMIT, FEED_LIMIT},
	},
};

use super::{
	feed::{compose_feed, distinct_author_ids},
	response::ServiceError,
};

pub struct PostHandler;
impl PostHandler {
	/// Public. Reads a bounded batch of posts, then resolves their authors in one call.
	pub async fn get_all(state: &AppState) -> Result<Vec<FeedEntry>, ServiceError> {
		let posts = state.posts.find_many(FEED_LIMIT).await?;

		let author_ids = distinct_author_ids(&posts);
		let authors = state
			.identities
			.get_user_list(&author_ids, AUTHOR_LOOKUP_LIMIT)
			.await?
			.iter()
			.map(AuthorView::from)
			.collect();

		compose_feed(posts, authors)
	}

	/// Public. An empty store yields `None`.
	pub async fn get_latest(state: &AppState) -> Result<Option<Post>, ServiceError> {
		Ok(state.posts.find_latest().await?)
	}

	/// Private. The author is always the caller.
	pub async fn create(
		state: &AppState,
		context: &RequestContext,
		input: CreatePost,
	) -> Result<Post, ServiceError> {
		let author = context.require_identity()?;
		input.validate()?;

		let post = state
			.posts
			.create(NewPost {
				content: input.content,
				author_id: author.id.clone(),
			})
			.await?;
		tracing::info!("Post {} created by {}", post.id, post.author_id);
		Ok(post)
	}
}
