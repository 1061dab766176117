// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! REST implementations of the store interfaces.
//!
//! These talk to the managed platform's admin API with a service
//! bearer token. Error bodies are `{"error": <stable-code>,
//! "message": <text>}`; the codes are translated into [`StoreError`]
//! kinds here so callers never see platform strings.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use roster_core::{Document, SecretString, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::documents::DocumentStore;
use crate::error::{Result, StoreError};
use crate::identity::{ClaimSet, CredentialRecord, IdentityStore, NewCredential};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by both REST stores.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
	/// Example: `https://admin.platform.example`
	pub base_url: String,
	pub service_token: SecretString,
	pub request_timeout: Duration,
}

impl RestStoreConfig {
	pub fn new(base_url: impl Into<String>, service_token: SecretString) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			service_token,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	fn build_client(&self) -> Result<Client> {
		Client::builder()
			.timeout(self.request_timeout)
			.build()
			.map_err(|e| StoreError::Unavailable(e.to_string()))
	}
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	error: Option<String>,
	message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountBody<'a> {
	email: &'a str,
	password: &'a str,
	display_name: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	phone_number: Option<&'a str>,
}

fn transport_error(e: reqwest::Error) -> StoreError {
	StoreError::Unavailable(e.to_string())
}

/// Translate a non-success response into a [`StoreError`] kind.
fn map_error(status: StatusCode, body: Option<ErrorBody>) -> StoreError {
	if status.is_server_error() {
		return StoreError::Unavailable(format!("admin API returned {status}"));
	}
	match body.as_ref().and_then(|b| b.error.as_deref()) {
		Some("email-already-in-use") => StoreError::EmailAlreadyExists,
		Some("weak-password") => StoreError::WeakPassword,
		Some("invalid-phone-number") => StoreError::InvalidPhoneNumber,
		Some("user-not-found") => StoreError::UserNotFound,
		None if status == StatusCode::NOT_FOUND => StoreError::UserNotFound,
		_ => StoreError::Platform {
			message: body.and_then(|b| b.message),
		},
	}
}

async fn error_from_response(response: Response) -> StoreError {
	let status = response.status();
	let body = response.json::<ErrorBody>().await.ok();
	map_error(status, body)
}

/// Identity store backed by the platform admin API.
pub struct RestIdentityStore {
	client: Client,
	config: RestStoreConfig,
}

impl RestIdentityStore {
	pub fn new(config: RestStoreConfig) -> Result<Self> {
		let client = config.build_client()?;
		Ok(Self { client, config })
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.config.base_url, path)
	}
}

#[async_trait]
impl IdentityStore for RestIdentityStore {
	async fn create_user(&self, new: &NewCredential) -> Result<CredentialRecord> {
		let body = CreateAccountBody {
			email: &new.email,
			password: new.password.expose(),
			display_name: &new.display_name,
			phone_number: new.phone_number.as_deref(),
		};

		let response = self
			.client
			.post(self.url("/v1/accounts"))
			.bearer_auth(self.config.service_token.expose())
			.json(&body)
			.send()
			.await
			.map_err(transport_error)?;

		if response.status().is_success() {
			let record = response
				.json::<CredentialRecord>()
				.await
				.map_err(transport_error)?;
			debug!(uid = %record.id, "rest identity store: created credential");
			Ok(record)
		} else {
			Err(error_from_response(response).await)
		}
	}

	async fn delete_user(&self, id: &UserId) -> Result<()> {
		let response = self
			.client
			.delete(self.url(&format!("/v1/accounts/{id}")))
			.bearer_auth(self.config.service_token.expose())
			.send()
			.await
			.map_err(transport_error)?;

		if response.status().is_success() {
			Ok(())
		} else {
			Err(error_from_response(response).await)
		}
	}

	async fn set_custom_claims(&self, id: &UserId, claims: &ClaimSet) -> Result<()> {
		let response = self
			.client
			.put(self.url(&format!("/v1/accounts/{id}/claims")))
			.bearer_auth(self.config.service_token.expose())
			.json(claims)
			.send()
			.await
			.map_err(transport_error)?;

		if response.status().is_success() {
			Ok(())
		} else {
			Err(error_from_response(response).await)
		}
	}
}

/// Document store backed by the platform admin API. The server
/// resolves timestamp sentinels, so documents are sent as written.
pub struct RestDocumentStore {
	client: Client,
	config: RestStoreConfig,
}

impl RestDocumentStore {
	pub fn new(config: RestStoreConfig) -> Result<Self> {
		let client = config.build_client()?;
		Ok(Self { client, config })
	}

	fn url(&self, collection: &str, id: &UserId) -> String {
		format!(
			"{}/v1/collections/{collection}/documents/{id}",
			self.config.base_url
		)
	}
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
	async fn set_document(&self, collection: &str, id: &UserId, doc: &Document) -> Result<()> {
		let response = self
			.client
			.patch(self.url(collection, id))
			.bearer_auth(self.config.service_token.expose())
			.json(doc)
			.send()
			.await
			.map_err(transport_error)?;

		if response.status().is_success() {
			Ok(())
		} else {
			Err(error_from_response(response).await)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn body(error: &str, message: &str) -> Option<ErrorBody> {
		Some(ErrorBody {
			error: Some(error.to_string()),
			message: Some(message.to_string()),
		})
	}

	#[test]
	fn known_codes_map_to_stable_kinds() {
		assert_eq!(
			map_error(StatusCode::CONFLICT, body("email-already-in-use", "taken")),
			StoreError::EmailAlreadyExists
		);
		assert_eq!(
			map_error(StatusCode::BAD_REQUEST, body("weak-password", "too weak")),
			StoreError::WeakPassword
		);
		assert_eq!(
			map_error(StatusCode::NOT_FOUND, body("user-not-found", "gone")),
			StoreError::UserNotFound
		);
	}

	#[test]
	fn bare_404_maps_to_user_not_found() {
		assert_eq!(
			map_error(StatusCode::NOT_FOUND, None),
			StoreError::UserNotFound
		);
	}

	#[test]
	fn unknown_code_keeps_platform_message() {
		let err = map_error(StatusCode::BAD_REQUEST, body("quota-exceeded", "quota hit"));
		assert_eq!(
			err,
			StoreError::Platform {
				message: Some("quota hit".to_string())
			}
		);
	}

	#[test]
	fn server_errors_map_to_unavailable() {
		assert!(matches!(
			map_error(StatusCode::INTERNAL_SERVER_ERROR, None),
			StoreError::Unavailable(_)
		));
	}

	#[test]
	fn base_url_trailing_slash_is_trimmed() {
		let config = RestStoreConfig::new("https://admin.example/", "token".into());
		assert_eq!(config.base_url, "https://admin.example");
	}
}
