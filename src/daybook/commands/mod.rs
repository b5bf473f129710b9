use crate::model::{Entry, Mood, Tag};
use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

pub mod delete;
pub mod edit;
pub mod export;
pub mod gate;
pub mod list;
pub mod stats;
pub mod view;
pub mod write;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Numeric summaries over the whole journal.
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub entry_count: usize,
    pub total_words: usize,
    pub avg_polarity: f64,
    pub avg_words_per_entry: f64,
    pub mood_counts: Vec<(Mood, usize)>,
    pub top_keywords: Vec<(String, usize)>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<Entry>,
    pub listed_entries: Vec<Entry>,
    pub document_path: Option<PathBuf>,
    pub stats: Option<StatsSummary>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<Entry>) -> Self {
        self.listed_entries = entries;
        self
    }
}

/// Field changes for the edit path. `id` and the entry's passkey hash are
/// never part of an update; the caller's `passkey` unlocks the stored gate.
#[derive(Debug, Clone)]
pub struct EntryUpdate {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Vec<Tag>,
    /// `None` keeps the current image, `Some(None)` removes it.
    pub image: Option<Option<String>>,
    pub passkey: String,
}
