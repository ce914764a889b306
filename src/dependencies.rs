use std::sync::{Arc, OnceLock};

use crate::adapters::{identity::IdentityProvider, repositories::PostStore};
use crate::config::{Config, ConfigError};

/// Everything a request needs, handed over explicitly rather than looked up.
#[derive(Clone)]
pub struct AppState {
	pub posts: Arc<dyn PostStore>,
	pub identities: Arc<dyn IdentityProvider>,
	pub pages: PageSettings,
}

#[derive(Clone, Debug)]
pub struct PageSettings {
	pub sign_in_url: String,
	pub sign_out_url: String,
}

impl Default for PageSettings {
	fn default() -> Self {
		Self {
			sign_in_url: "/sign-in".to_string(),
			sign_out_url: "/sign-out".to_string(),
		}
	}
}

impl From<&Config> for PageSettings {
	fn from(config: &Config) -> Self {
		Self {
			sign_in_url: config.sign_in_url.clone(),
			sign_out_url: config.sign_out_url.clone(),
		}
	}
}

pub fn config() -> Result<&'static Config, ConfigError> {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	let config = match CONFIG.get() {
		None => {
			let config = Config::new()?;

			CONFIG.get_or_init(|| config)
		}
		Some(config) => config,
	};
	Ok(config)
}
