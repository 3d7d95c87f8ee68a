// Gateway module for process-wide UI signals - follows the Train Station Pattern

mod loading;
mod snackbar;

pub use loading::{LoadingSignal, LoadingSnapshot};
pub use snackbar::{Notification, Notifier, Severity};
