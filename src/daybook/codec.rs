//! # At-Rest Content Obfuscation
//!
//! Entry bodies are stored obfuscated and held in plaintext in memory; the
//! store is the single boundary where the transform is applied. The codec is
//! abstracted behind [`ContentCodec`] so a real authenticated-encryption
//! implementation can replace [`Base64Codec`] without touching any caller.
//!
//! The key-material lifecycle ([`load_or_create_key`]) already exists for
//! that replacement: a 32-byte key is generated once, persisted next to the
//! collection, and loaded on every subsequent run. The base64 codec itself
//! does not consume the key.
//!
//! `decode` is fail-open by contract: corrupt stored data must not block the
//! whole store from loading, so malformed input comes back unchanged.

use crate::error::{DaybookError, Result};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::RngCore;
use std::fs;
use std::path::Path;

/// Reversible at-rest transform for entry bodies.
///
/// Round-trip law: `decode(encode(x)) == x` for every string, including the
/// empty string. Implementations must not panic on malformed input to
/// `decode`; they return it unchanged.
pub trait ContentCodec {
    fn encode(&self, plaintext: &str) -> String;
    fn decode(&self, stored: &str) -> String;
}

/// URL-safe base64 obfuscation. Not a security boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl ContentCodec for Base64Codec {
    fn encode(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        URL_SAFE.encode(plaintext.as_bytes())
    }

    fn decode(&self, stored: &str) -> String {
        if stored.is_empty() {
            return String::new();
        }
        match URL_SAFE.decode(stored.as_bytes()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => stored.to_string(),
            },
            Err(_) => stored.to_string(),
        }
    }
}

/// Load the codec key from `key_file`, generating and persisting a fresh
/// 32-byte key on first run.
pub fn load_or_create_key(key_file: &Path) -> Result<Vec<u8>> {
    if key_file.exists() {
        let encoded = fs::read_to_string(key_file).map_err(DaybookError::Io)?;
        return URL_SAFE
            .decode(encoded.trim().as_bytes())
            .map_err(|e| DaybookError::Store(format!("Corrupt codec key file: {}", e)));
    }

    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    let encoded = URL_SAFE.encode(key);
    if let Some(parent) = key_file.parent() {
        fs::create_dir_all(parent).map_err(DaybookError::Io)?;
    }
    fs::write(key_file, encoded).map_err(DaybookError::Io)?;
    Ok(key.to_vec())
}
