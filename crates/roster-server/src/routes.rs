// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router assembly.

use std::sync::Arc;

use axum::{
	middleware,
	routing::{get, post},
	Router,
};
use roster_core::SecretString;
use roster_provisioning::ProvisioningService;

use crate::auth::bearer_auth_middleware;
use crate::handlers;

/// Shared state handed to handlers.
#[derive(Clone)]
pub struct AppState {
	pub provisioning: Arc<ProvisioningService>,
}

/// Build the full router. Lifecycle routes sit behind the bearer-auth
/// middleware; the health probe does not.
pub fn create_router(state: AppState, token: Option<SecretString>) -> Router {
	let lifecycle = Router::new()
		.route("/v1/users", post(handlers::provision_user))
		.route(
			"/v1/hooks/profile-deleted/{user_id}",
			post(handlers::profile_deleted),
		)
		.layer(middleware::from_fn_with_state(token, bearer_auth_middleware))
		.with_state(state);

	Router::new()
		.route("/healthz", get(handlers::healthz))
		.merge(lifecycle)
}
