// Gateway module for utils - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod errors;
mod format;
mod logger;

// Public re-exports - the ONLY way to access utils functionality
pub use errors::{extract_error_message, StackError};
pub use format::format_bytes;
pub use logger::{init_file_logger, init_logger};
