use std::sync::Arc;

use anyhow::Context;

use crate::adapters::identity::{ClerkClient, SessionVerifier};
use crate::adapters::repositories::PgPostRepository;
use crate::config::Config;
use crate::database::{connection_pool, migrate};
use crate::dependencies::{AppState, PageSettings};

pub struct Bootstrap;
impl Bootstrap {
	/// Connects the post store and the identity provider described by `config`.
	pub async fn app_state(config: &Config) -> anyhow::Result<AppState> {
		let pool = connection_pool(&config.database_url, config.database_max_connections)
			.await
			.context("Failed to connect to the database")?;
		migrate(&pool).await.context("Failed to apply migrations")?;
		tracing::info!("Database ready");

		let verifier = SessionVerifier::from_pem(&config.clerk_jwt_key, config.clerk_authorized_parties.clone())
			.context("CLERK_JWT_KEY is not a valid RSA public key")?;
		let identities = ClerkClient::new(&config.clerk_api_url, &config.clerk_secret_key, verifier).context("Failed to build identity provider client")?;

		Ok(AppState {
			posts: Arc::new(PgPostRepository::new(pool)),
			identities: Arc::new(identities),
			pages: PageSettings::from(config),
		})
	}
}
