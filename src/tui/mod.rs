// Gateway module for TUI - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod app;
mod dialogs;
mod icons;
mod import;
mod input;
mod render;
mod theme;
mod ui;
mod widgets;

// Public re-exports - the ONLY way to access TUI functionality
pub use app::{App, AppCommand, UiEvent};
pub use dialogs::{DeleteConfirmState, DialogOutcome, EditorMode, StringEditorState};
pub use icons::FileKind;
pub use import::{import_file, UploadState};
pub use ui::run_ui;
