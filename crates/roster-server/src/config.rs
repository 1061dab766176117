// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered server configuration.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`ROSTER_SERVER_*`)
//! 2. Config file (TOML; `/etc/roster/server.toml` by default)
//! 3. Built-in defaults
//!
//! Secrets (the caller bearer token, the admin API service token)
//! enter via environment only and never appear in the TOML layer.

use std::path::Path;
use std::str::FromStr;

use roster_core::SecretString;
use serde::Deserialize;
use tracing::debug;

/// Default location of the config file when no override is given.
const DEFAULT_CONFIG_PATH: &str = "/etc/roster/server.toml";

const ENV_HTTP_HOST: &str = "ROSTER_SERVER_HTTP_HOST";
const ENV_HTTP_PORT: &str = "ROSTER_SERVER_HTTP_PORT";
const ENV_STORE_BACKEND: &str = "ROSTER_SERVER_STORE_BACKEND";
const ENV_STORE_ADMIN_URL: &str = "ROSTER_SERVER_STORE_ADMIN_URL";
const ENV_LOG_LEVEL: &str = "ROSTER_SERVER_LOG_LEVEL";
const ENV_AUTH_TOKEN: &str = "ROSTER_SERVER_AUTH_TOKEN";
const ENV_STORE_TOKEN: &str = "ROSTER_SERVER_STORE_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Read {
		path: String,
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("invalid value for {key}: {value}")]
	InvalidValue { key: String, value: String },

	#[error("{0}")]
	Invalid(String),
}

/// Which store implementations the server wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
	/// In-process stores; local development only.
	#[default]
	Memory,
	/// REST clients against the managed platform's admin API.
	Rest,
}

impl FromStr for StoreBackend {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"memory" => Ok(StoreBackend::Memory),
			"rest" => Ok(StoreBackend::Rest),
			_ => Err(()),
		}
	}
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub auth: AuthConfig,
	pub store: StoreConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Bearer token callers must present. `None` rejects everything,
	/// so an unconfigured server fails closed.
	pub token: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
	pub backend: StoreBackend,
	pub admin_url: Option<String>,
	pub service_token: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
	pub level: String,
}

/// Partial configuration for merging (TOML and environment layers).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: HttpLayer,
	#[serde(default)]
	pub store: StoreLayer,
	#[serde(default)]
	pub logging: LoggingLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpLayer {
	#[serde(default)]
	pub host: Option<String>,
	#[serde(default)]
	pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreLayer {
	#[serde(default)]
	pub backend: Option<String>,
	#[serde(default)]
	pub admin_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
}

impl ServerConfigLayer {
	pub fn merge(&mut self, other: ServerConfigLayer) {
		if other.http.host.is_some() {
			self.http.host = other.http.host;
		}
		if other.http.port.is_some() {
			self.http.port = other.http.port;
		}
		if other.store.backend.is_some() {
			self.store.backend = other.store.backend;
		}
		if other.store.admin_url.is_some() {
			self.store.admin_url = other.store.admin_url;
		}
		if other.logging.level.is_some() {
			self.logging.level = other.logging.level;
		}
	}

	/// Layer built from `ROSTER_SERVER_*` environment variables.
	pub fn from_env() -> Result<ServerConfigLayer, ConfigError> {
		let port = match std::env::var(ENV_HTTP_PORT) {
			Ok(raw) => Some(raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
				key: ENV_HTTP_PORT.to_string(),
				value: raw,
			})?),
			Err(_) => None,
		};

		Ok(ServerConfigLayer {
			http: HttpLayer {
				host: std::env::var(ENV_HTTP_HOST).ok(),
				port,
			},
			store: StoreLayer {
				backend: std::env::var(ENV_STORE_BACKEND).ok(),
				admin_url: std::env::var(ENV_STORE_ADMIN_URL).ok(),
			},
			logging: LoggingLayer {
				level: std::env::var(ENV_LOG_LEVEL).ok(),
			},
		})
	}

	pub fn finalize(
		self,
		auth_token: Option<SecretString>,
		store_token: Option<SecretString>,
	) -> Result<ServerConfig, ConfigError> {
		let backend = match self.store.backend.as_deref() {
			None => StoreBackend::default(),
			Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
				key: "store.backend".to_string(),
				value: raw.to_string(),
			})?,
		};

		if backend == StoreBackend::Rest
			&& (self.store.admin_url.is_none() || store_token.is_none())
		{
			return Err(ConfigError::Invalid(format!(
				"store.backend = \"rest\" requires store.admin_url and {ENV_STORE_TOKEN}"
			)));
		}

		Ok(ServerConfig {
			http: HttpConfig {
				host: self.http.host.unwrap_or_else(|| "127.0.0.1".to_string()),
				port: self.http.port.unwrap_or(8080),
			},
			auth: AuthConfig { token: auth_token },
			store: StoreConfig {
				backend,
				admin_url: self.store.admin_url,
				service_token: store_token,
			},
			logging: LoggingConfig {
				level: self.logging.level.unwrap_or_else(|| "info".to_string()),
			},
		})
	}
}

/// Load configuration from all sources with standard precedence.
///
/// An explicitly given path must exist; the default path is skipped
/// silently when absent.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();

	let (file, required) = match path {
		Some(p) => (p.to_path_buf(), true),
		None => (Path::new(DEFAULT_CONFIG_PATH).to_path_buf(), false),
	};

	match std::fs::read_to_string(&file) {
		Ok(contents) => {
			debug!(path = %file.display(), "loading config file");
			merged.merge(toml::from_str(&contents)?);
		}
		Err(source) if required => {
			return Err(ConfigError::Read {
				path: file.display().to_string(),
				source,
			});
		}
		Err(_) => {}
	}

	merged.merge(ServerConfigLayer::from_env()?);

	let auth_token = std::env::var(ENV_AUTH_TOKEN).ok().map(SecretString::new);
	let store_token = std::env::var(ENV_STORE_TOKEN).ok().map(SecretString::new);
	merged.finalize(auth_token, store_token)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_bind_localhost_with_memory_backend() {
		let config = ServerConfigLayer::default().finalize(None, None).unwrap();
		assert_eq!(config.socket_addr(), "127.0.0.1:8080");
		assert_eq!(config.store.backend, StoreBackend::Memory);
		assert_eq!(config.logging.level, "info");
		assert!(config.auth.token.is_none());
	}

	#[test]
	fn toml_layer_overrides_defaults() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			host = "0.0.0.0"
			port = 9090

			[logging]
			level = "debug"
			"#,
		)
		.unwrap();

		let mut merged = ServerConfigLayer::default();
		merged.merge(layer);
		let config = merged.finalize(None, None).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:9090");
		assert_eq!(config.logging.level, "debug");
	}

	#[test]
	fn later_layer_wins_field_by_field() {
		let mut base: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			host = "0.0.0.0"
			port = 9090
			"#,
		)
		.unwrap();
		let env_like: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			port = 7000
			"#,
		)
		.unwrap();

		base.merge(env_like);
		let config = base.finalize(None, None).unwrap();
		assert_eq!(config.http.host, "0.0.0.0");
		assert_eq!(config.http.port, 7000);
	}

	#[test]
	fn rest_backend_requires_url_and_token() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[store]
			backend = "rest"
			"#,
		)
		.unwrap();
		assert!(matches!(
			layer.clone().finalize(None, None),
			Err(ConfigError::Invalid(_))
		));

		let layer_with_url: ServerConfigLayer = toml::from_str(
			r#"
			[store]
			backend = "rest"
			admin_url = "https://admin.example"
			"#,
		)
		.unwrap();
		assert!(layer_with_url
			.finalize(None, Some("service-token".into()))
			.is_ok());
	}

	#[test]
	fn unknown_backend_is_rejected() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[store]
			backend = "carrier-pigeon"
			"#,
		)
		.unwrap();
		assert!(matches!(
			layer.finalize(None, None),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn explicit_config_path_must_exist() {
		let missing = Path::new("/nonexistent/roster.toml");
		assert!(matches!(
			load_config(Some(missing)),
			Err(ConfigError::Read { .. })
		));
	}

	#[test]
	fn config_file_is_loaded_from_explicit_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(
			&path,
			r#"
			[http]
			port = 9191
			"#,
		)
		.unwrap();

		let config = load_config(Some(&path)).unwrap();
		assert_eq!(config.http.port, 9191);
	}
}
