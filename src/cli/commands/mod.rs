pub mod entity;
pub mod init;

use crate::Result;

/// Common trait for all command handlers.
pub trait CommandHandler {
    /// Execute the command.
    fn execute(&self) -> Result<()>;

    /// Get command name for logging.
    fn name(&self) -> &'static str;

    /// Check if command modifies project files.
    fn modifies_files(&self) -> bool {
        true
    }
}
