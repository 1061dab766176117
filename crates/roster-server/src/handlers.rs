// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Extension, Json,
};
use roster_core::{ProvisionOutcome, ProvisionUserRequest, UserId};
use roster_provisioning::Caller;

use crate::error::ApiError;
use crate::routes::AppState;

/// `POST /v1/users` - the provisioning call.
pub async fn provision_user(
	State(state): State<AppState>,
	caller: Option<Extension<Caller>>,
	Json(request): Json<ProvisionUserRequest>,
) -> Result<Json<ProvisionOutcome>, ApiError> {
	let caller = caller.map(|Extension(c)| c).unwrap_or(Caller::Anonymous);
	let outcome = state.provisioning.provision_user(&caller, &request).await?;
	Ok(Json(outcome))
}

/// `POST /v1/hooks/profile-deleted/{user_id}` - the document-deletion
/// trigger delivered by the platform. The deleted profile's key
/// arrives as the path parameter; nothing consumes the response body,
/// so success is an empty 204 (including the already-absent no-op).
pub async fn profile_deleted(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
	let uid = UserId::parse(&user_id).map_err(|_| ApiError::InvalidUserId(user_id))?;
	state.provisioning.deprovision_user(uid).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// `GET /healthz` - liveness probe.
pub async fn healthz() -> &'static str {
	"ok"
}
