//! # Storage Layer
//!
//! This module defines the storage abstraction for daybook. The
//! [`EntryStore`] trait allows the application to work with different
//! storage backends.
//!
//! ## Codec Boundary
//!
//! Entry bodies are plaintext everywhere in memory and obfuscated on disk.
//! The store is the single place where the [`ContentCodec`] transform is
//! applied and reversed; nothing above this layer ever sees an encoded body.
//! A body that fails to decode is passed through unchanged so one corrupt
//! record never blocks the rest of the collection.
//!
//! ## Mutation Gate
//!
//! `update` and `remove` verify the per-entry passkey themselves. The check
//! used to be a caller obligation, which made it possible to skip by
//! omission; embedding it here means no code path can mutate a protected
//! entry without the matching passkey. The store-wide gate is a separate
//! concern and stays outside (see `passkey::StoreGate`).
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Full collection in `entries.json` (ordered JSON array)
//!   - Store gate digest in `.passkey`, codec key in `.codec_key`
//!   - Writes are atomic: temp file then rename, so a reader sees the old
//!     collection or the new one, never a partial write
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence, no codec round-trip
//!   - Fast, isolated test execution
//!
//! ## Ordering
//!
//! `load_all` returns entries in stored order. `append` adds at the end,
//! `update` preserves the entry's position, `remove` closes the gap. File
//! order is therefore insertion order for the life of the collection.

use crate::error::Result;
use crate::model::Entry;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for entry storage.
///
/// Single-process, single-writer model: concurrent writers racing on the
/// same collection are out of scope, last writer wins.
pub trait EntryStore {
    /// Load the full collection in stored order, bodies decoded.
    ///
    /// An unreadable or malformed medium yields an empty collection and a
    /// logged diagnostic; it never fails the caller.
    fn load_all(&self) -> Result<Vec<Entry>>;

    /// Persist the full collection, bodies encoded, atomically with respect
    /// to readers.
    fn save_all(&mut self, entries: &[Entry]) -> Result<()>;

    /// Append one entry to the collection.
    fn append(&mut self, entry: Entry) -> Result<()>;

    /// Replace the entry with `entry.id`, preserving its position.
    ///
    /// Verifies `passkey` against the stored entry's digest before touching
    /// anything; fails with `AuthFailed` on mismatch.
    fn update(&mut self, entry: Entry, passkey: &str) -> Result<()>;

    /// Remove the entry with the given id after passkey verification.
    fn remove(&mut self, id: &Uuid, passkey: &str) -> Result<()>;
}

/// Shared gate check for `update`/`remove` implementations.
pub(crate) fn check_entry_gate(stored: &Entry, passkey: &str) -> Result<()> {
    use crate::error::DaybookError;
    use crate::passkey::verify_passkey;

    if stored.passkey_hash.is_empty() {
        // Gate never configured for this entry; nothing to verify.
        return Ok(());
    }
    if verify_passkey(passkey, &stored.passkey_hash) {
        Ok(())
    } else {
        Err(DaybookError::AuthFailed)
    }
}
