use crate::analysis::{KeywordExtractor, SentimentAnalyzer};
use crate::commands::{CmdMessage, CmdResult, EntryUpdate};
use crate::error::{DaybookError, Result};
use crate::model::{DerivedMetrics, EntryDraft};
use crate::store::EntryStore;
use chrono::Utc;

/// Apply field changes to an existing entry.
///
/// The per-entry gate is enforced by the store; a wrong passkey leaves the
/// collection untouched. Metrics are recomputed, `last_edited_at` is set,
/// and `id`, `created_at` and the passkey hash are preserved, as is the
/// entry's position in the collection.
pub fn run<S: EntryStore>(
    store: &mut S,
    update: EntryUpdate,
    analyzer: &dyn SentimentAnalyzer,
    extractor: &dyn KeywordExtractor,
    keyword_count: usize,
) -> Result<CmdResult> {
    let entries = store.load_all()?;
    let current = entries
        .iter()
        .find(|e| e.id == update.id)
        .ok_or(DaybookError::EntryNotFound(update.id))?;

    // Reuse the write-path validation; the passkey slot is the entry's own
    // gate here, checked by the store rather than validated as a new field.
    super::write::validate(&EntryDraft {
        title: update.title.clone(),
        body: update.body.clone(),
        tags: update.tags.clone(),
        passkey: "unchanged".to_string(),
        ..EntryDraft::default()
    })?;

    let metrics = analyzer.analyze(&update.body);
    let keywords = extractor
        .extract(&update.body, keyword_count)
        .into_iter()
        .map(|(word, _)| word)
        .collect();

    let mut edited = current.clone();
    edited.title = update.title;
    edited.body = update.body;
    if let Some(date) = update.date {
        edited.date = date;
    }
    if let Some(mood) = update.mood {
        edited.mood = mood;
    }
    edited.tags = update.tags;
    if let Some(image) = update.image {
        edited.image = image;
    }
    edited.metrics = DerivedMetrics {
        word_count: metrics.word_count,
        polarity: metrics.polarity,
        subjectivity: metrics.subjectivity,
        keywords,
    };
    edited.last_edited_at = Some(Utc::now());

    store.update(edited.clone(), &update.passkey)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry updated: {}",
        edited.title
    )));
    result.affected_entries.push(edited);
    Ok(result)
}
