// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document store interface.

use async_trait::async_trait;
use roster_core::{Document, UserId};

use crate::error::Result;

/// External managed service providing keyed document storage with
/// server-assigned timestamps.
///
/// Writes are by collection and key, so a retried write of the same
/// profile is idempotent. Server-timestamp sentinels in the document
/// are resolved by the store at write time.
#[async_trait]
pub trait DocumentStore: Send + Sync {
	async fn set_document(&self, collection: &str, id: &UserId, doc: &Document) -> Result<()>;
}
