use std::{fmt::Display, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{0} must be set")]
	Missing(&'static str),

	#[error("Invalid {key} value: {message}")]
	Invalid { key: &'static str, message: String },
}

pub struct Config {
	/// Which errors we want to log
	pub log_level: String,

	/// Port server is listening to
	pub server_ip_port: String,
	pub database_url: String,
	pub database_max_connections: u32,
	pub allow_origins: Vec<String>,

	pub clerk_secret_key: String,
	/// PEM encoded public key used to verify session tokens without a network round trip
	pub clerk_jwt_key: String,
	pub clerk_api_url: String,
	pub clerk_authorized_parties: Vec<String>,

	pub sign_in_url: String,
	pub sign_out_url: String,
}

impl Config {
	pub fn new() -> Result<Config, ConfigError> {
		dotenv::dotenv().ok();
		let log_level = std::env::var("LOG_LEVEL").unwrap_or("warn".to_string());
		let server_ip_port = std::env::var("SERVER_IP_PORT").unwrap_or("0.0.0.0:80".into());
		let database_url = required("DATABASE_URL")?;
		let database_max_connections = parsed("DATABASE_MAX_CONNECTIONS", 30)?;
		let allow_origins = list(&std::env::var("ALLOW_ORIGINS").unwrap_or("http://localhost:3000,http://localhost:3001".to_string()));

		let clerk_secret_key = required("CLERK_SECRET_KEY")?;
		let clerk_jwt_key = required("CLERK_JWT_KEY")?;
		let clerk_api_url = std::env::var("CLERK_API_URL").unwrap_or("https://api.clerk.com/v1".into());
		let clerk_authorized_parties = list(&std::env::var("CLERK_AUTHORIZED_PARTIES").unwrap_or_default());

		let sign_in_url = std::env::var("SIGN_IN_URL").unwrap_or("/sign-in".into());
		let sign_out_url = std::env::var("SIGN_OUT_URL").unwrap_or("/sign-out".into());

		Ok(Config {
			log_level,
			server_ip_port,
			database_url,
			database_max_connections,
			allow_origins,
			clerk_secret_key,
			clerk_jwt_key,
			clerk_api_url,
			clerk_authorized_parties,
			sign_in_url,
			sign_out_url,
		})
	}
}

fn required(key: &'static str) -> Result<String, ConfigError> {
	std::env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn parsed<T>(
	key: &'static str,
	default: T,
) -> Result<T, ConfigError>
where
	T: FromStr,
	T::Err: Display,
{
	match std::env::var(key) {
		Err(_) => Ok(default),
		Ok(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
			key,
			message: err.to_string(),
		}),
	}
}

/// Splits a comma separated variable, skipping blanks.
pub(crate) fn list(value: &str) -> Vec<String> {
	value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(String::from).collect()
}
