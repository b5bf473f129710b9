use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DaybookError, Result};
use crate::passkey::{GateStatus, StoreGate};

/// Configure the store-wide passkey.
pub fn setup(gate: &StoreGate, passkey: &str, confirm: &str) -> Result<CmdResult> {
    if passkey != confirm {
        return Err(DaybookError::Validation(vec![
            "Passkeys do not match".to_string(),
        ]));
    }
    gate.setup(passkey)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Passkey set successfully!"));
    Ok(result)
}

/// Verify the store-wide passkey for this session.
pub fn verify(gate: &StoreGate, passkey: &str) -> Result<CmdResult> {
    gate.verify(passkey)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Passkey verified."));
    Ok(result)
}

/// Report whether the gate has been configured.
pub fn status(gate: &StoreGate) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match gate.status() {
        GateStatus::Configured => {
            result.add_message(CmdMessage::info("Store passkey is set."));
        }
        GateStatus::NotConfigured => {
            result.add_message(CmdMessage::warning(
                "No store passkey yet. Run `daybook gate setup` first.",
            ));
        }
    }
    Ok(result)
}
