use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::domain::identity::Identity;

use super::{IdentityError, IdentityProvider};

/// Checks session tokens against the instance's PEM public key, without calling the provider.
pub struct SessionVerifier {
	key: DecodingKey,
	validation: Validation,
	authorized_parties: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
	sub: String,
	#[serde(default)]
	azp: Option<String>,
}

impl SessionVerifier {
	pub fn from_pem(
		pem: &str,
		authorized_parties: Vec<String>,
	) -> Result<Self, IdentityError> {
		let key = DecodingKey::from_rsa_pem(pem.as_bytes())?;

		let mut validation = Validation::new(Algorithm::RS256);
		validation.set_required_spec_claims(&["exp", "sub"]);
		validation.validate_nbf = true;
		validation.validate_aud = false;
		validation.leeway = 5;

		Ok(Self {
			key,
			validation,
			authorized_parties,
		})
	}

	/// Returns the user id the token was issued for.
	pub fn verify(
		&self,
		token: &str,
	) -> Option<String> {
		let claims = match decode::<SessionClaims>(token, &self.key, &self.validation) {
			Ok(data) => data.claims,
			Err(err) => {
				tracing::debug!("Session token rejected: {}", err);
				return None;
			}
		};

		if !self.authorized_parties.is_empty() {
			let authorized = claims.azp.as_ref().is_some_and(|azp| self.authorized_parties.contains(azp));
			if !authorized {
				tracing::debug!("Session token rejected: unauthorized party {:?}", claims.azp);
				return None;
			}
		}
		Some(claims.sub)
	}
}

#[derive(Debug, Deserialize)]
struct ClerkUser {
	id: String,
	#[serde(default)]
	username: Option<String>,
	#[serde(default)]
	image_url: String,
}

impl From<ClerkUser> for Identity {
	fn from(user: ClerkUser) -> Self {
		Identity {
			id: user.id,
			username: user.username,
			image_url: user.image_url,
		}
	}
}

/// Clerk backend API client.
pub struct ClerkClient {
	http: Client,
	api_url: String,
	secret_key: String,
	verifier: SessionVerifier,
}

impl ClerkClient {
	pub fn new(
		api_url: impl Into<String>,
		secret_key: impl Into<String>,
		verifier: SessionVerifier,
	) -> Result<Self, IdentityError> {
		let http = Client::builder().timeout(Duration::from_secs(10)).connect_timeout(Duration::from_secs(3)).build()?;
		Ok(Self {
			http,
			api_url: api_url.into().trim_end_matches('/').to_string(),
			secret_key: secret_key.into(),
			verifier,
		})
	}

	async fn ensure_success(response: Response) -> Result<Response, IdentityError> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let body = response.text().await.unwrap_or_default();
		Err(IdentityError::UnexpectedStatus {
			status: status.as_u16(),
			body,
		})
	}
}

#[async_trait]
impl IdentityProvider for ClerkClient {
	async fn current_user(
		&self,
		session_token: &str,
	) -> Result<Option<Identity>, IdentityError> {
		let Some(user_id) = self.verifier.verify(session_token) else {
			return Ok(None);
		};

		let response = self
			.http
			.get(format!("{}/users/{}", self.api_url, user_id))
			.bearer_auth(&self.secret_key)
			.send()
			.await?;
		if response.status() == StatusCode::NOT_FOUND {
			tracing::warn!("Session token issued for unknown user {}", user_id);
			return Ok(None);
		}

		let user: ClerkUser = Self::ensure_success(response).await?.json().await?;
		Ok(Some(user.into()))
	}

	async fn get_user_list(
		&self,
		user_ids: &[String],
		limit: usize,
	) -> Result<Vec<Identity>, IdentityError> {
		// Without a user_id filter the endpoint lists every user
		if user_ids.is_empty() {
			return Ok(Vec::new());
		}

		let limit = limit.to_string();
		let mut query: Vec<(&str, &str)> = user_ids.iter().map(|id| ("user_id", id.as_str())).collect();
		query.push(("limit", limit.as_str()));

		let response = self
			.http
			.get(format!("{}/users", self.api_url))
			.bearer_auth(&self.secret_key)
			.query(&query)
			.send()
			.await?;
		let users: Vec<ClerkUser> = Self::ensure_success(response).await?.json().await?;
		Ok(users.into_iter().map(Identity::from).collect())
	}
}
