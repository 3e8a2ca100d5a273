//! Logging setup.
//!
//! Records go through the `log` facade into tui-logger, which keeps them for
//! the log panel.

use crate::error::AppError;
use log::LevelFilter;
use tui_logger::{init_logger, set_default_level};

/// Install tui-logger as the global logger, capturing records at `level`
/// and above. Fails if a logger is already set.
///
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    init_logger(level).map_err(|e| AppError::Logger(format!("{:?}", e)))?;
    set_default_level(level);
    Ok(())
}

/// Hand buffered records over to the log widget. Called once per frame.
///
pub fn flush() {
    tui_logger::move_events();
}
