use std::collections::{HashMap, HashSet};

use crate::domain::post::{AuthorView, FeedEntry, Post};

use super::response::ServiceError;

/// Author ids in first-seen order, without repeats.
pub fn distinct_author_ids(posts: &[Post]) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut ids = Vec::new();
	for post in posts {
		if seen.insert(post.author_id.as_str()) {
			ids.push(post.author_id.clone());
		}
	}
	ids
}

/// Pairs every post with its author, keeping post order.
///
/// A post whose author is missing from `authors` fails the whole feed. Dropping it
/// would hide that the store and the identity provider disagree.
pub fn compose_feed(
	posts: Vec<Post>,
	authors: Vec<AuthorView>,
) -> Result<Vec<FeedEntry>, ServiceError> {
	let authors: HashMap<String, AuthorView> = authors.into_iter().map(|author| (author.id.clone(), author)).collect();

	posts
		.into_iter()
		.map(|post| match authors.get(&post.author_id) {
			Some(author) => Ok(FeedEntry {
				author: author.clone(),
				post,
			}),
			None => Err(ServiceError::MissingAuthor {
				post_id: post.id,
				author_id: post.author_id,
			}),
		})
		.collect()
}
