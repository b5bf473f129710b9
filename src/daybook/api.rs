//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for all daybook operations, regardless of the UI
//! driving it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Carries the collaborators** (sentiment analyzer, keyword extractor,
//!   document builder) so commands stay pure functions over the store
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O formatting**: no stdout, stderr, or terminal assumptions
//! - **Session state**: the store gate is verified per request; nothing is
//!   cached here
//!
//! ## Generic Over EntryStore
//!
//! `DaybookApi<S: EntryStore>` is generic over the storage backend:
//! production uses `FileStore`, tests use `InMemoryStore`.

use crate::analysis::{
    FrequencyExtractor, KeywordExtractor, LexiconAnalyzer, SentimentAnalyzer,
};
use crate::commands;
use crate::config::DaybookConfig;
use crate::document::DocumentBuilder;
use crate::error::Result;
use crate::model::{EntryDraft, Tag};
use crate::passkey::StoreGate;
use crate::store::EntryStore;
use std::path::PathBuf;
use uuid::Uuid;

pub use crate::commands::{CmdMessage, CmdResult, EntryUpdate, MessageLevel, StatsSummary};

/// The main API facade for daybook operations.
pub struct DaybookApi<S: EntryStore> {
    store: S,
    gate: StoreGate,
    config: DaybookConfig,
    analyzer: Box<dyn SentimentAnalyzer>,
    extractor: Box<dyn KeywordExtractor>,
}

impl<S: EntryStore> DaybookApi<S> {
    pub fn new(store: S, gate: StoreGate, config: DaybookConfig) -> Self {
        Self {
            store,
            gate,
            config,
            analyzer: Box::new(LexiconAnalyzer),
            extractor: Box::new(FrequencyExtractor),
        }
    }

    /// Swap the analysis collaborators (e.g. for a richer sentiment model).
    pub fn with_collaborators(
        mut self,
        analyzer: Box<dyn SentimentAnalyzer>,
        extractor: Box<dyn KeywordExtractor>,
    ) -> Self {
        self.analyzer = analyzer;
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &DaybookConfig {
        &self.config
    }

    pub fn write_entry(&mut self, draft: EntryDraft) -> Result<CmdResult> {
        commands::write::run(
            &mut self.store,
            draft,
            self.analyzer.as_ref(),
            self.extractor.as_ref(),
            self.config.keyword_count,
        )
    }

    pub fn edit_entry(&mut self, update: EntryUpdate) -> Result<CmdResult> {
        commands::edit::run(
            &mut self.store,
            update,
            self.analyzer.as_ref(),
            self.extractor.as_ref(),
            self.config.keyword_count,
        )
    }

    pub fn delete_entry(&mut self, id: &Uuid, passkey: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id, passkey)
    }

    pub fn list_entries(&self, search: Option<&str>, tag: Option<Tag>) -> Result<CmdResult> {
        commands::list::run(&self.store, search, tag)
    }

    pub fn view_entry(&self, id: &Uuid) -> Result<CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn export_entries(&self, ids: &[Uuid], output_dir: PathBuf) -> Result<CmdResult> {
        let builder = DocumentBuilder::new(&self.config.document_title)
            .with_image_size(self.config.image_width, self.config.image_height);
        commands::export::run(&self.store, ids, &builder, &output_dir)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store, self.extractor.as_ref(), self.config.keyword_count)
    }

    pub fn gate_setup(&self, passkey: &str, confirm: &str) -> Result<CmdResult> {
        commands::gate::setup(&self.gate, passkey, confirm)
    }

    pub fn gate_verify(&self, passkey: &str) -> Result<CmdResult> {
        commands::gate::verify(&self.gate, passkey)
    }

    pub fn gate_status(&self) -> Result<CmdResult> {
        commands::gate::status(&self.gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;
    use crate::store::memory::InMemoryStore;

    fn api() -> DaybookApi<InMemoryStore> {
        let dir = std::env::temp_dir().join(format!("daybook-api-test-{}", Uuid::new_v4()));
        DaybookApi::new(
            InMemoryStore::new(),
            StoreGate::new(&dir),
            DaybookConfig::default(),
        )
    }

    fn draft(title: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            body: "a fine day".to_string(),
            tags: vec![Tag::Personal],
            passkey: "pk".to_string(),
            ..EntryDraft::default()
        }
    }

    #[test]
    fn write_then_list_dispatches_through_commands() {
        let mut api = api();
        api.write_entry(draft("First")).unwrap();
        api.write_entry(draft("Second")).unwrap();

        let listed = api.list_entries(None, None).unwrap().listed_entries;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "First");
    }

    #[test]
    fn edit_roundtrips_through_view() {
        let mut api = api();
        let id = api.write_entry(draft("Day")).unwrap().affected_entries[0].id;

        api.edit_entry(EntryUpdate {
            id,
            title: "Day, revised".to_string(),
            body: "better words".to_string(),
            date: None,
            mood: Some(Mood::Happy),
            tags: vec![Tag::Reflections],
            image: None,
            passkey: "pk".to_string(),
        })
        .unwrap();

        let entry = &api.view_entry(&id).unwrap().listed_entries[0];
        assert_eq!(entry.title, "Day, revised");
        assert_eq!(entry.mood, Mood::Happy);
    }

    #[test]
    fn delete_dispatches_with_passkey() {
        let mut api = api();
        let id = api.write_entry(draft("Gone")).unwrap().affected_entries[0].id;
        api.delete_entry(&id, "pk").unwrap();
        assert!(api.list_entries(None, None).unwrap().listed_entries.is_empty());
    }
}
