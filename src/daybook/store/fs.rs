use super::{check_entry_gate, EntryStore};
use crate::codec::ContentCodec;
use crate::error::{DaybookError, Result};
use crate::model::Entry;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ENTRIES_FILENAME: &str = "entries.json";

/// File-based entry storage.
///
/// The whole collection lives in one JSON array; adjacent dot-files hold the
/// store gate digest and the codec key. The directory is created on first
/// write, and a missing collection file reads as an empty collection.
pub struct FileStore<C: ContentCodec> {
    root: PathBuf,
    codec: C,
}

impl<C: ContentCodec> FileStore<C> {
    pub fn new(root: PathBuf, codec: C) -> Self {
        Self { root, codec }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries_file(&self) -> PathBuf {
        self.root.join(ENTRIES_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DaybookError::Io)?;
        }
        Ok(())
    }

    fn decode_bodies(&self, mut entries: Vec<Entry>) -> Vec<Entry> {
        for entry in &mut entries {
            entry.body = self.codec.decode(&entry.body);
        }
        entries
    }

    fn encode_bodies(&self, entries: &[Entry]) -> Vec<Entry> {
        entries
            .iter()
            .map(|e| {
                let mut copy = e.clone();
                copy.body = self.codec.encode(&e.body);
                copy
            })
            .collect()
    }

    /// Write the serialized collection atomically: temp file in the same
    /// directory, then rename over the target.
    fn write_atomic(&self, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.entries_file();
        let tmp = self.root.join(format!(".{}.tmp", ENTRIES_FILENAME));
        fs::write(&tmp, content).map_err(DaybookError::Io)?;
        fs::rename(&tmp, &target).map_err(DaybookError::Io)?;
        Ok(())
    }
}

impl<C: ContentCodec> EntryStore for FileStore<C> {
    fn load_all(&self) -> Result<Vec<Entry>> {
        let file = self.entries_file();
        if !file.exists() {
            return Ok(Vec::new());
        }

        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) => {
                warn!("Entries file unreadable, treating as empty: {}", e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<Entry>>(&content) {
            Ok(entries) => Ok(self.decode_bodies(entries)),
            Err(e) => {
                warn!("Entries file malformed, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&mut self, entries: &[Entry]) -> Result<()> {
        let encoded = self.encode_bodies(entries);
        let content =
            serde_json::to_string_pretty(&encoded).map_err(DaybookError::Serialization)?;
        self.write_atomic(&content)
    }

    fn append(&mut self, entry: Entry) -> Result<()> {
        let mut entries = self.load_all()?;
        entries.push(entry);
        self.save_all(&entries)
    }

    fn update(&mut self, entry: Entry, passkey: &str) -> Result<()> {
        let mut entries = self.load_all()?;
        let pos = entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or(DaybookError::EntryNotFound(entry.id))?;
        check_entry_gate(&entries[pos], passkey)?;
        entries[pos] = entry;
        self.save_all(&entries)
    }

    fn remove(&mut self, id: &Uuid, passkey: &str) -> Result<()> {
        let mut entries = self.load_all()?;
        let pos = entries
            .iter()
            .position(|e| e.id == *id)
            .ok_or(DaybookError::EntryNotFound(*id))?;
        check_entry_gate(&entries[pos], passkey)?;
        entries.remove(pos);
        self.save_all(&entries)
    }
}
