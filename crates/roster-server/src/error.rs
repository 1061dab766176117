// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire-level error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_provisioning::{ErrorCode, ProvisionError};
use serde::Serialize;

/// Error body all failing routes return.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
	pub error: &'static str,
	pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error(transparent)]
	Provision(#[from] ProvisionError),

	#[error("invalid user id: {0}")]
	InvalidUserId(String),
}

impl ApiError {
	pub fn unauthenticated() -> Self {
		ApiError::Provision(ProvisionError::Unauthenticated)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, code, message) = match &self {
			ApiError::Provision(err) => {
				let status = match err.code() {
					ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
					ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
					ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
				};
				(status, err.code().as_str(), err.to_string())
			}
			ApiError::InvalidUserId(_) => (
				StatusCode::BAD_REQUEST,
				ErrorCode::InvalidArgument.as_str(),
				self.to_string(),
			),
		};

		let body = ErrorBody {
			error: code,
			message,
		};
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use roster_core::ValidationError;

	#[test]
	fn provision_errors_map_to_expected_statuses() {
		let cases = [
			(ProvisionError::Unauthenticated, StatusCode::UNAUTHORIZED),
			(
				ProvisionError::InvalidArgument(ValidationError::MissingField),
				StatusCode::BAD_REQUEST,
			),
			(
				ProvisionError::Internal("boom".to_string()),
				StatusCode::INTERNAL_SERVER_ERROR,
			),
		];
		for (err, expected) in cases {
			let response = ApiError::from(err).into_response();
			assert_eq!(response.status(), expected);
		}
	}

	#[test]
	fn invalid_user_id_is_a_bad_request() {
		let response = ApiError::InvalidUserId("nope".to_string()).into_response();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}
}
