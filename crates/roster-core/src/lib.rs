// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core domain types for the roster account provisioning service.
//!
//! This crate defines the types shared by the store interfaces, the
//! provisioning service, and the HTTP surface:
//!
//! - [`UserId`]: type-safe wrapper around the identifier the identity
//!   store assigns to a credential record
//! - [`SecretString`]: write-only secret wrapper (passwords, tokens)
//! - [`ProvisionUserRequest`] / [`ProvisionOutcome`]: the provisioning
//!   call payload and its success result
//! - [`Profile`] / [`Document`]: the profile document written to the
//!   document store, with a server-timestamp sentinel
//! - [`validation`]: ordered request validation

pub mod document;
pub mod profile;
pub mod request;
pub mod secret;
pub mod types;
pub mod validation;

pub use document::{Document, FieldValue};
pub use profile::Profile;
pub use request::{ProvisionOutcome, ProvisionUserRequest};
pub use secret::SecretString;
pub use types::UserId;
pub use validation::{validate_request, ValidationError, MIN_PASSWORD_LEN};
