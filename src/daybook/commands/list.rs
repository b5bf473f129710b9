use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Tag;
use crate::store::EntryStore;

/// List entries in stored order, optionally filtered by a search term
/// (title and body, case-insensitive) and/or a tag.
pub fn run<S: EntryStore>(
    store: &S,
    search: Option<&str>,
    tag: Option<Tag>,
) -> Result<CmdResult> {
    let mut entries = store.load_all()?;

    if let Some(term) = search {
        let needle = term.to_lowercase();
        entries.retain(|e| {
            e.title.to_lowercase().contains(&needle) || e.body.to_lowercase().contains(&needle)
        });
    }
    if let Some(tag) = tag {
        entries.retain(|e| e.tags.contains(&tag));
    }

    let mut result = CmdResult::default().with_listed_entries(entries);
    if result.listed_entries.is_empty() {
        result.add_message(CmdMessage::info("No entries found. Start writing!"));
    }
    Ok(result)
}
