//! # Passkey Gates
//!
//! Two independent gates are built on the same hash/verify primitives:
//!
//! - the **store gate**: one digest file next to the collection, satisfied
//!   once per session to authorize navigation and viewing;
//! - the **per-entry gate**: a digest stored on each entry, checked on every
//!   mutating operation and never cached beyond it.
//!
//! A missing or empty stored digest means the gate was never configured,
//! which is a distinct state ([`GateStatus::NotConfigured`]) from a failed
//! verification. Verification itself never errors; it reports a bool.

use crate::error::{DaybookError, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration state of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    NotConfigured,
    Configured,
}

/// One-way hash of a passkey. Deterministic SHA-256, hex-encoded.
pub fn hash_passkey(passkey: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(passkey.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a passkey against a stored digest. Never errors.
pub fn verify_passkey(passkey: &str, stored_digest: &str) -> bool {
    if stored_digest.is_empty() {
        return false;
    }
    hash_passkey(passkey) == stored_digest
}

/// The store-wide gate, backed by a digest file in the store directory.
#[derive(Debug, Clone)]
pub struct StoreGate {
    digest_file: PathBuf,
}

impl StoreGate {
    pub fn new(store_dir: &Path) -> Self {
        Self {
            digest_file: store_dir.join(".passkey"),
        }
    }

    pub fn status(&self) -> GateStatus {
        match fs::read_to_string(&self.digest_file) {
            Ok(digest) if !digest.trim().is_empty() => GateStatus::Configured,
            _ => GateStatus::NotConfigured,
        }
    }

    /// Configure the gate. Refuses to overwrite an existing digest; changing
    /// the passkey is not an operation this tool offers.
    pub fn setup(&self, passkey: &str) -> Result<()> {
        if passkey.is_empty() {
            return Err(DaybookError::Validation(vec![
                "Passkey cannot be empty".to_string()
            ]));
        }
        if self.status() == GateStatus::Configured {
            return Err(DaybookError::Store(
                "Store passkey is already set".to_string(),
            ));
        }
        if let Some(parent) = self.digest_file.parent() {
            fs::create_dir_all(parent).map_err(DaybookError::Io)?;
        }
        fs::write(&self.digest_file, hash_passkey(passkey)).map_err(DaybookError::Io)?;
        Ok(())
    }

    /// Verify a passkey for this session.
    ///
    /// Returns `SetupRequired` when the gate was never configured and
    /// `AuthFailed` on mismatch; both leave no state behind.
    pub fn verify(&self, passkey: &str) -> Result<()> {
        let digest = match fs::read_to_string(&self.digest_file) {
            Ok(d) => d.trim().to_string(),
            Err(_) => return Err(DaybookError::SetupRequired),
        };
        if digest.is_empty() {
            return Err(DaybookError::SetupRequired);
        }
        if verify_passkey(passkey, &digest) {
            Ok(())
        } else {
            Err(DaybookError::AuthFailed)
        }
    }
}
