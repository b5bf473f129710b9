use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DaybookError, Result};
use crate::store::EntryStore;
use uuid::Uuid;

/// Remove an entry after passkey verification (enforced by the store).
pub fn run<S: EntryStore>(store: &mut S, id: &Uuid, passkey: &str) -> Result<CmdResult> {
    let title = store
        .load_all()?
        .into_iter()
        .find(|e| e.id == *id)
        .map(|e| e.title)
        .ok_or(DaybookError::EntryNotFound(*id))?;

    store.remove(id, passkey)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Entry deleted: {}", title)));
    Ok(result)
}
