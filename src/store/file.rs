// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Encrypted file-backed credential store.
//!
//! The whole key-value map is sealed with AES-256-GCM under a key derived
//! from an operator secret via HKDF-SHA256. Every write re-seals the file
//! with a fresh random nonce; the nonce is prefixed to the ciphertext and
//! the result is base64-encoded on disk. Contents are cached in memory,
//! so reads never touch the disk after open.

use crate::error::{AgentError, Result};
use crate::store::CredentialStore;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use dashmap::DashMap;
use hkdf::Hkdf;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::collections::HashMap;
use std::path::PathBuf;

/// HKDF info string; versioned so the sealing scheme can rotate.
const KEY_INFO: &[u8] = b"nearbuy-agent credential sealing v1";

/// Credential store sealed into a single file.
pub struct SealedFileStore {
    path: PathBuf,
    key: LessSafeKey,
    rng: SystemRandom,
    cache: DashMap<String, String>,
    /// Serializes re-seals so concurrent writers cannot interleave
    write_lock: tokio::sync::Mutex<()>,
}

impl SealedFileStore {
    /// Open the store at `path`, creating it on first write.
    ///
    /// Fails when an existing file cannot be decrypted with the key
    /// derived from `secret`.
    pub async fn open(path: impl Into<PathBuf>, secret: &str) -> Result<Self> {
        let store = Self {
            path: path.into(),
            key: derive_key(secret)?,
            rng: SystemRandom::new(),
            cache: DashMap::new(),
            write_lock: tokio::sync::Mutex::new(()),
        };
        store.load().await?;
        Ok(store)
    }

    /// Load and unseal the file into the cache. Absent file is fine.
    async fn load(&self) -> Result<()> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(AgentError::Storage(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let raw = BASE64
            .decode(data.trim())
            .map_err(|e| AgentError::Storage(format!("sealed store corrupt: {}", e)))?;
        if raw.len() < NONCE_LEN {
            return Err(AgentError::Storage("sealed store truncated".to_string()));
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| AgentError::Storage("sealed store nonce invalid".to_string()))?;

        let mut buf = ciphertext.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut buf)
            .map_err(|_| {
                AgentError::Storage("sealed store failed to decrypt (wrong key?)".to_string())
            })?;

        let values: HashMap<String, String> = serde_json::from_slice(plaintext)
            .map_err(|e| AgentError::Storage(format!("sealed store payload invalid: {}", e)))?;
        for (k, v) in values {
            self.cache.insert(k, v);
        }
        Ok(())
    }

    /// Seal the cache and write it out under a fresh nonce.
    async fn persist(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let values: HashMap<String, String> = self
            .cache
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let mut buf = serde_json::to_vec(&values)
            .map_err(|e| AgentError::Storage(format!("serialize store: {}", e)))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| AgentError::Storage("nonce generation failed".to_string()))?;

        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut buf,
            )
            .map_err(|_| AgentError::Storage("sealing failed".to_string()))?;

        let mut out = nonce_bytes.to_vec();
        out.extend_from_slice(&buf);

        tokio::fs::write(&self.path, BASE64.encode(out))
            .await
            .map_err(|e| {
                AgentError::Storage(format!("write {}: {}", self.path.display(), e))
            })?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SealedFileStore {
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.cache.insert(key.to_string(), value.to_string());
        self.persist().await
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|v| v.value().clone())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.cache.remove(key).is_none() {
            return Ok(());
        }
        self.persist().await
    }
}

/// Derive the AES-256-GCM sealing key from the operator secret.
fn derive_key(secret: &str) -> Result<LessSafeKey> {
    let hk = Hkdf::<Sha256>::new(None, secret.as_bytes());
    let mut okm = [0u8; 32];
    hk.expand(KEY_INFO, &mut okm)
        .map_err(|_| AgentError::Storage("key derivation failed".to_string()))?;

    let unbound = UnboundKey::new(&AES_256_GCM, &okm)
        .map_err(|_| AgentError::Storage("sealing key rejected".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}
