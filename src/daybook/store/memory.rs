use super::{check_entry_gate, EntryStore};
use crate::error::{DaybookError, Result};
use crate::model::Entry;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data and skips the codec round-trip.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Vec<Entry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for InMemoryStore {
    fn load_all(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.clone())
    }

    fn save_all(&mut self, entries: &[Entry]) -> Result<()> {
        self.entries = entries.to_vec();
        Ok(())
    }

    fn append(&mut self, entry: Entry) -> Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn update(&mut self, entry: Entry, passkey: &str) -> Result<()> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or(DaybookError::EntryNotFound(entry.id))?;
        check_entry_gate(&self.entries[pos], passkey)?;
        self.entries[pos] = entry;
        Ok(())
    }

    fn remove(&mut self, id: &Uuid, passkey: &str) -> Result<()> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == *id)
            .ok_or(DaybookError::EntryNotFound(*id))?;
        check_entry_gate(&self.entries[pos], passkey)?;
        self.entries.remove(pos);
        Ok(())
    }
}

// --- Test Fixtures ---


#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;

    #[test]
    fn append_then_load_preserves_order() {
        let store = fixtures::store_with(&["one", "two", "three"]);
        let titles: Vec<_> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn update_gate_is_enforced() {
        let mut store = InMemoryStore::new();
        let mut e = fixtures::entry("guarded", "old", "right");
        store.append(e.clone()).unwrap();

        e.body = "new".to_string();
        assert!(matches!(
            store.update(e.clone(), "wrong"),
            Err(DaybookError::AuthFailed)
        ));
        store.update(e, "right").unwrap();
        assert_eq!(store.load_all().unwrap()[0].body, "new");
    }

    #[test]
    fn entry_with_unset_gate_is_open() {
        let mut store = InMemoryStore::new();
        let mut e = fixtures::entry("open", "body", "ignored");
        e.passkey_hash = String::new();
        let id = e.id;
        store.append(e).unwrap();
        store.remove(&id, "anything").unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }
}
