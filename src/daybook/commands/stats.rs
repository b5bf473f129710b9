use crate::analysis::KeywordExtractor;
use crate::commands::{CmdMessage, CmdResult, StatsSummary};
use crate::error::Result;
use crate::model::Mood;
use crate::store::EntryStore;

/// Numeric writing summary over the whole collection: entry and word
/// totals, average sentiment, mood distribution and cross-entry keywords.
/// Per-entry metrics come from the stored denormalized values.
pub fn run<S: EntryStore>(
    store: &S,
    extractor: &dyn KeywordExtractor,
    keyword_count: usize,
) -> Result<CmdResult> {
    let entries = store.load_all()?;
    let mut result = CmdResult::default();

    if entries.is_empty() {
        result.add_message(CmdMessage::info("No data to analyze yet"));
        return Ok(result);
    }

    let total_words: usize = entries.iter().map(|e| e.metrics.word_count).sum();
    let avg_polarity =
        entries.iter().map(|e| e.metrics.polarity).sum::<f64>() / entries.len() as f64;

    let mood_counts = Mood::all()
        .iter()
        .map(|m| (*m, entries.iter().filter(|e| e.mood == *m).count()))
        .filter(|(_, n)| *n > 0)
        .collect();

    let all_text = entries
        .iter()
        .map(|e| e.body.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let top_keywords = extractor.extract(&all_text, keyword_count);

    result.stats = Some(StatsSummary {
        entry_count: entries.len(),
        total_words,
        avg_polarity,
        avg_words_per_entry: total_words as f64 / entries.len() as f64,
        mood_counts,
        top_keywords,
    });
    Ok(result)
}
