//! File-based logging bootstrap for the binary.
//!
//! The library itself only emits through the `log` facade (store
//! diagnostics, codec fallbacks, image failures). Initialization happens
//! once per process, here, and is idempotent; a failed init degrades to no
//! logging rather than failing the command.

use flexi_logger::{FileSpec, Logger, LoggerHandle};
use once_cell::sync::OnceCell;
use std::path::Path;

static LOGGER: OnceCell<Option<LoggerHandle>> = OnceCell::new();

const LOG_FILE_BASENAME: &str = "daybook";

/// Initialize file logging into `log_dir`. Safe to call more than once;
/// later calls are no-ops.
pub fn init(log_dir: &Path) {
    LOGGER.get_or_init(|| {
        Logger::try_with_env_or_str("info")
            .ok()?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME)
                    .suppress_timestamp(),
            )
            .append()
            .start()
            .ok()
    });
}
