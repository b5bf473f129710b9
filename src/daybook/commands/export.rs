use crate::commands::{CmdMessage, CmdResult};
use crate::document::{export_filename, DocumentBuilder};
use crate::error::{DaybookError, Result};
use crate::store::EntryStore;
use chrono::Utc;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Build a document from the selected entries (all of them when `ids` is
/// empty, store order either way) and write it into `output_dir`.
pub fn run<S: EntryStore>(
    store: &S,
    ids: &[Uuid],
    builder: &DocumentBuilder,
    output_dir: &Path,
) -> Result<CmdResult> {
    let all = store.load_all()?;
    let selected: Vec<_> = if ids.is_empty() {
        all
    } else {
        for id in ids {
            if !all.iter().any(|e| e.id == *id) {
                return Err(DaybookError::EntryNotFound(*id));
            }
        }
        all.into_iter().filter(|e| ids.contains(&e.id)).collect()
    };

    if selected.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No entries to export."));
        return Ok(result);
    }

    let bytes = builder.build(&selected)?;
    let path = output_dir.join(export_filename(&selected, Utc::now()));
    // Medium unavailable at write time is the one fatal failure here;
    // report it, never mask it.
    fs::write(&path, bytes).map_err(DaybookError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} entries to {}",
        selected.len(),
        path.display()
    )));
    result.document_path = Some(path);
    Ok(result)
}
