// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer-token authentication middleware.

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};
use roster_core::SecretString;
use roster_provisioning::Caller;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::ApiError;

/// Authenticate the caller before any payload validation runs.
///
/// Token comparison is constant-time. A server with no token
/// configured rejects every caller. On success the [`Caller`] is made
/// available to handlers as a request extension.
pub async fn bearer_auth_middleware(
	State(expected_token): State<Option<SecretString>>,
	mut request: Request,
	next: Next,
) -> Result<Response, ApiError> {
	let Some(expected) = expected_token else {
		warn!("auth failed: no token configured");
		return Err(ApiError::unauthenticated());
	};

	let auth_header = request
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok());

	let Some(auth_value) = auth_header else {
		warn!("auth failed: missing Authorization header");
		return Err(ApiError::unauthenticated());
	};

	let Some(token) = auth_value.strip_prefix("Bearer ").map(str::trim) else {
		warn!("auth failed: invalid Authorization format");
		return Err(ApiError::unauthenticated());
	};

	let expected_bytes = expected.expose().as_bytes();
	let token_bytes = token.as_bytes();

	if expected_bytes.len() != token_bytes.len() {
		warn!("auth failed: token length mismatch");
		return Err(ApiError::unauthenticated());
	}

	if expected_bytes.ct_eq(token_bytes).into() {
		request
			.extensions_mut()
			.insert(Caller::authenticated("service-token"));
		Ok(next.run(request).await)
	} else {
		warn!("auth failed: invalid token");
		Err(ApiError::unauthenticated())
	}
}
