// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP surface for the roster account provisioning service.
//!
//! Two authenticated routes map onto the two lifecycle operations:
//! `POST /v1/users` for provisioning and
//! `POST /v1/hooks/profile-deleted/{user_id}` for the platform's
//! document-deletion trigger. `GET /healthz` is the unauthenticated
//! liveness probe.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::{load_config, ConfigError, ServerConfig, StoreBackend};
pub use error::ApiError;
pub use routes::{create_router, AppState};
