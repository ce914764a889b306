use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn connection_pool(
	url: &str,
	max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
	PgPoolOptions::new()
		.max_connections(max_connections)
		.acquire_timeout(Duration::from_secs(5))
		.connect(url)
		.await
}

/// Applies the migrations embedded from `./migrations`.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
	sqlx::migrate!("./migrations").run(pool).await
}
