// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tests for the lifecycle routes.
//!
//! Key invariants:
//! - unauthenticated calls fail before any payload validation
//! - rejected requests leave both stores untouched
//! - a valid call creates exactly one credential, one profile, and
//!   the role claim
//! - the profile-deleted hook deletes the credential and treats an
//!   already-absent credential as success

use std::sync::Arc;

use axum::{
	body::Body,
	http::{header, Method, Request, StatusCode},
	response::Response,
	Router,
};
use roster_core::profile::USERS_COLLECTION;
use roster_provisioning::ProvisioningService;
use roster_server::{create_router, AppState};
use roster_store::{MemoryDocumentStore, MemoryIdentityStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "test-service-token";

struct TestApp {
	router: Router,
	identity: Arc<MemoryIdentityStore>,
	documents: Arc<MemoryDocumentStore>,
}

fn test_app() -> TestApp {
	let identity = Arc::new(MemoryIdentityStore::new());
	let documents = Arc::new(MemoryDocumentStore::new());
	let provisioning = Arc::new(ProvisioningService::new(
		identity.clone(),
		documents.clone(),
	));
	let router = create_router(AppState { provisioning }, Some(TOKEN.into()));
	TestApp {
		router,
		identity,
		documents,
	}
}

impl TestApp {
	async fn post(&self, path: &str, token: Option<&str>, body: Option<Value>) -> Response {
		let mut builder = Request::builder().method(Method::POST).uri(path);
		if let Some(token) = token {
			builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
		}
		let request = match body {
			Some(value) => builder
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(value.to_string())),
			None => builder.body(Body::empty()),
		}
		.unwrap();
		self.router.clone().oneshot(request).await.unwrap()
	}

	async fn get(&self, path: &str) -> Response {
		let request = Request::builder().uri(path).body(Body::empty()).unwrap();
		self.router.clone().oneshot(request).await.unwrap()
	}
}

async fn body_json(response: Response) -> Value {
	let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body_bytes).unwrap()
}

fn valid_payload() -> Value {
	json!({
		"name": "A",
		"email": "a@b.com",
		"password": "secret1",
		"department": "X",
		"role": "staff"
	})
}

#[tokio::test]
async fn healthz_is_public() {
	let app = test_app();
	let response = app.get("/healthz").await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_auth_fails_before_validation() {
	let app = test_app();

	// Deliberately invalid payload: the auth failure must win.
	let response = app.post("/v1/users", None, Some(json!({}))).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	let body = body_json(response).await;
	assert_eq!(body["error"], "unauthenticated");
	assert_eq!(app.identity.user_count(), 0);
}

#[tokio::test]
async fn wrong_token_is_rejected() {
	let app = test_app();
	let response = app
		.post("/v1/users", Some("not-the-token"), Some(valid_payload()))
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(app.identity.user_count(), 0);
}

#[tokio::test]
async fn missing_required_field_is_invalid_argument() {
	let app = test_app();
	let mut payload = valid_payload();
	payload.as_object_mut().unwrap().remove("department");

	let response = app.post("/v1/users", Some(TOKEN), Some(payload)).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid-argument");
	assert_eq!(
		body["message"],
		"Required data (email, password, name, department, role) is missing."
	);
	assert_eq!(app.identity.user_count(), 0);
	assert_eq!(app.documents.document_count(), 0);
}

#[tokio::test]
async fn short_password_is_invalid_argument() {
	let app = test_app();
	let mut payload = valid_payload();
	payload["password"] = json!("five5");

	let response = app.post("/v1/users", Some(TOKEN), Some(payload)).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid-argument");
	assert_eq!(body["message"], "Password must be at least 6 characters long.");
	assert_eq!(app.identity.user_count(), 0);
}

#[tokio::test]
async fn malformed_email_is_invalid_argument() {
	let app = test_app();
	let mut payload = valid_payload();
	payload["email"] = json!("not-an-email");

	let response = app.post("/v1/users", Some(TOKEN), Some(payload)).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid-argument");
	assert_eq!(body["message"], "Invalid email format.");
	assert_eq!(app.identity.user_count(), 0);
}

#[tokio::test]
async fn valid_request_provisions_account() {
	let app = test_app();

	let response = app
		.post("/v1/users", Some(TOKEN), Some(valid_payload()))
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;
	assert_eq!(body["success"], true);
	assert_eq!(body["message"], "User created successfully.");

	assert_eq!(app.identity.user_count(), 1);
	let record = app.identity.find_by_email("a@b.com").unwrap();

	assert_eq!(app.documents.document_count(), 1);
	let doc = app.documents.get(USERS_COLLECTION, &record.id).unwrap();
	assert_eq!(doc.get_str("phoneNumber"), Some(""));
	assert_eq!(doc.get_str("role"), Some("staff"));
	assert_eq!(doc.get_str("uid"), Some(record.id.to_string().as_str()));

	let claims = app.identity.claims(&record.id).unwrap();
	assert_eq!(claims.get("role"), Some("staff"));
}

#[tokio::test]
async fn duplicate_email_reports_already_registered() {
	let app = test_app();
	let first = app
		.post("/v1/users", Some(TOKEN), Some(valid_payload()))
		.await;
	assert_eq!(first.status(), StatusCode::OK);

	let second = app
		.post("/v1/users", Some(TOKEN), Some(valid_payload()))
		.await;
	assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = body_json(second).await;
	assert_eq!(body["error"], "internal");
	assert_eq!(body["message"], "This email is already registered.");
	assert_eq!(app.identity.user_count(), 1);
}

#[tokio::test]
async fn profile_deleted_hook_removes_credential() {
	let app = test_app();
	app.post("/v1/users", Some(TOKEN), Some(valid_payload()))
		.await;
	let record = app.identity.find_by_email("a@b.com").unwrap();

	// An external actor removes the profile document; the platform
	// then delivers the deletion event.
	assert!(app.documents.delete(USERS_COLLECTION, &record.id));
	let response = app
		.post(
			&format!("/v1/hooks/profile-deleted/{}", record.id),
			Some(TOKEN),
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);
	assert_eq!(app.identity.user_count(), 0);
}

#[tokio::test]
async fn hook_for_absent_credential_succeeds() {
	let app = test_app();
	let response = app
		.post(
			&format!("/v1/hooks/profile-deleted/{}", roster_core::UserId::generate()),
			Some(TOKEN),
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn hook_rejects_malformed_user_id() {
	let app = test_app();
	let response = app
		.post("/v1/hooks/profile-deleted/not-a-uuid", Some(TOKEN), None)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid-argument");
}

#[tokio::test]
async fn hook_requires_auth() {
	let app = test_app();
	let response = app
		.post(
			&format!("/v1/hooks/profile-deleted/{}", roster_core::UserId::generate()),
			None,
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
