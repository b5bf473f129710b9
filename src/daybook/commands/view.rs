use crate::commands::CmdResult;
use crate::error::{DaybookError, Result};
use crate::store::EntryStore;
use uuid::Uuid;

/// Fetch a single entry for display. Rendering the body through the markup
/// formatter is the presentation layer's job.
pub fn run<S: EntryStore>(store: &S, id: &Uuid) -> Result<CmdResult> {
    let entry = store
        .load_all()?
        .into_iter()
        .find(|e| e.id == *id)
        .ok_or(DaybookError::EntryNotFound(*id))?;

    Ok(CmdResult::default().with_listed_entries(vec![entry]))
}
