pub mod clerk;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::identity::Identity;

pub use clerk::{ClerkClient, SessionVerifier};

#[derive(Debug, Error)]
pub enum IdentityError {
	#[error("Identity provider request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Identity provider answered {status}: {body}")]
	UnexpectedStatus { status: u16, body: String },

	#[error("Invalid session verification key: {0}")]
	InvalidKey(#[from] jsonwebtoken::errors::Error),
}

/// Directory of users kept by the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
	/// Resolves the user behind a session token. Invalid or expired tokens resolve to `None`.
	async fn current_user(
		&self,
		session_token: &str,
	) -> Result<Option<Identity>, IdentityError>;

	/// Users whose id is in `user_ids`, at most `limit` of them. Unknown ids are skipped.
	async fn get_user_list(
		&self,
		user_ids: &[String],
		limit: usize,
	) -> Result<Vec<Identity>, IdentityError>;
}

/// In-process directory with fixed session tokens.
#[derive(Default)]
pub struct StaticDirectory {
	users: RwLock<Vec<Identity>>,
	sessions: RwLock<HashMap<String, String>>,
}

impl StaticDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn add_user(
		&self,
		identity: Identity,
	) {
		let mut users = self.users.write().await;
		users.retain(|user| user.id != identity.id);
		users.push(identity);
	}

	pub async fn remove_user(
		&self,
		user_id: &str,
	) {
		self.users.write().await.retain(|user| user.id != user_id);
	}

	/// Makes `token` resolve to `user_id`.
	pub async fn add_session(
		&self,
		token: impl Into<String>,
		user_id: impl Into<String>,
	) {
		self.sessions.write().await.insert(token.into(), user_id.into());
	}
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
	async fn current_user(
		&self,
		session_token: &str,
	) -> Result<Option<Identity>, IdentityError> {
		let Some(user_id) = self.sessions.read().await.get(session_token).cloned() else {
			return Ok(None);
		};
		Ok(self.users.read().await.iter().find(|user| user.id == user_id).cloned())
	}

	async fn get_user_list(
		&self,
		user_ids: &[String],
		limit: usize,
	) -> Result<Vec<Identity>, IdentityError> {
		Ok(self
			.users
			.read()
			.await
			.iter()
			.filter(|user| user_ids.contains(&user.id))
			.take(limit)
			.cloned()
			.collect())
	}
}
