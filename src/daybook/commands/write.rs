use crate::analysis::{KeywordExtractor, SentimentAnalyzer};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DaybookError, Result};
use crate::model::{DerivedMetrics, Entry, EntryDraft, Mood};
use crate::passkey::hash_passkey;
use crate::store::EntryStore;
use chrono::Utc;
use uuid::Uuid;

/// Validate a draft and append it as a fresh entry.
///
/// All field failures are collected and reported together; nothing is
/// persisted unless every required field is present.
pub fn run<S: EntryStore>(
    store: &mut S,
    draft: EntryDraft,
    analyzer: &dyn SentimentAnalyzer,
    extractor: &dyn KeywordExtractor,
    keyword_count: usize,
) -> Result<CmdResult> {
    validate(&draft)?;

    let metrics = analyzer.analyze(&draft.body);
    let keywords = extractor
        .extract(&draft.body, keyword_count)
        .into_iter()
        .map(|(word, _)| word)
        .collect();

    let entry = Entry {
        id: Uuid::new_v4(),
        date: draft.date.unwrap_or_else(|| Utc::now().date_naive()),
        created_at: Utc::now(),
        last_edited_at: None,
        title: draft.title,
        body: draft.body,
        mood: draft.mood.unwrap_or(Mood::Content),
        tags: draft.tags,
        image: draft.image,
        metrics: DerivedMetrics {
            word_count: metrics.word_count,
            polarity: metrics.polarity,
            subjectivity: metrics.subjectivity,
            keywords,
        },
        passkey_hash: hash_passkey(&draft.passkey),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry saved: {} ({} words)",
        entry.title, entry.metrics.word_count
    )));
    result.affected_entries.push(entry.clone());
    store.append(entry)?;
    Ok(result)
}

pub(crate) fn validate(draft: &EntryDraft) -> Result<()> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }
    if draft.body.trim().is_empty() {
        errors.push("Content is required".to_string());
    }
    if draft.tags.is_empty() {
        errors.push("At least one tag is required".to_string());
    }
    if draft.passkey.is_empty() {
        errors.push("Entry passkey is required".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DaybookError::Validation(errors))
    }
}
