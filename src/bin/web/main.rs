use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use axum::http::{HeaderValue, Method};

use guestbook::{bootstrap::Bootstrap, dependencies::config, routes::create_routes};
use tower_http::{
	cors::{AllowOrigin, CorsLayer},
	trace::TraceLayer,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = config()?;

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("{},guestbook=info,tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections are being pooled...");
	let state = Bootstrap::app_state(config).await?;

	let origins = config
		.allow_origins
		.iter()
		.map(|origin| origin.parse::<HeaderValue>().with_context(|| format!("Invalid origin in ALLOW_ORIGINS: {origin}")))
		.collect::<anyhow::Result<Vec<_>>>()?;

	let app = create_routes(state)
		.layer(
			CorsLayer::new()
				.allow_origin(AllowOrigin::list(origins))
				.allow_methods([Method::GET, Method::POST]),
		)
		.layer(TraceLayer::new_for_http());

	let address = SocketAddr::from_str(&config.server_ip_port).with_context(|| format!("Invalid SERVER_IP_PORT: {}", config.server_ip_port))?;
	tracing::info!("Start web server on {}", address);
	axum::Server::bind(&address)
		.serve(app.into_make_service())
		.with_graceful_shutdown(shutdown_signal())
		.await?;
	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
	tracing::info!("Shutting down");
}
