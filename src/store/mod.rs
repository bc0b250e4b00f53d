// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Secure credential storage.
//!
//! The store holds small string values only: the two session credentials
//! plus the ask-once background-permission flag. Reads are safe with no
//! prior state.

pub mod file;
pub mod memory;

pub use file::SealedFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;

/// Credential keys in active use.
pub mod keys {
    /// Signed-in user's id
    pub const USER_ID: &str = "user_id";
    /// Opaque backend access token
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Set once the background-permission prompt has been shown
    pub const ASKED_BG_PERM: &str = "asked_bg_perm";
}

/// Secure key-value store for session credentials.
///
/// Written on sign-in, read before every authenticated call, deleted on
/// sign-out. Individual reads are atomic at the storage level; reading
/// two keys is not atomic as a pair, and callers must treat a partially
/// missing pair as signed-out.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Store a value, overwriting any previous value for `key`.
    async fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Fetch a value. `None` when the key was never written or the
    /// backend could not be read.
    async fn get(&self, key: &str) -> Option<String>;

    /// Remove a value. No-op when absent.
    async fn delete(&self, key: &str) -> Result<()>;
}
