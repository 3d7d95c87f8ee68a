use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parking_lot::Mutex;
use tracing::debug;

use super::dialogs::{DeleteConfirmState, DialogOutcome, EditorMode, StringEditorState};
use super::import::UploadState;
use super::input::{FormAction, LoginForm};
use crate::app::AppContext;
use crate::constants::{DEFAULT_CONFIRM_WORD, ROUTE_HOME, ROUTE_PROFILE};
use crate::routing::Page;

/// What a confirmed string editor applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPurpose {
    AddItem,
    RenameItem(usize),
    ImportFile,
}

/// The modal currently on top of the page
pub enum Dialog {
    DeleteConfirm {
        state: DeleteConfirmState,
        index: usize,
    },
    StringEditor {
        state: StringEditorState,
        purpose: EditPurpose,
    },
}

/// Work the event loop runs off the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Login { email: String, password: String },
    Logout,
    Import(PathBuf),
}

/// Completion messages from spawned tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    LoginFinished { success: bool },
    Imported(Result<String, String>),
}

/// Terminal application state
pub struct App {
    /// Shared session, routing and signal state
    pub ctx: Arc<AppContext>,
    /// Is the app running?
    pub running: bool,
    pub login_form: LoginForm,
    /// Workspace entries shown on the home page
    pub items: Vec<String>,
    pub selected: usize,
    pub dialog: Option<Dialog>,
    /// Written by the import task, read by the renderer
    pub upload: Arc<Mutex<UploadState>>,
    /// Frame counter for spinners
    pub tick: u64,
}

impl App {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            running: true,
            login_form: LoginForm::new(),
            items: Vec::new(),
            selected: 0,
            dialog: None,
            upload: Arc::new(Mutex::new(UploadState::default())),
            tick: 0,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn page(&self) -> Page {
        self.ctx.router.current_route().page
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Keys are swallowed while a blocking overlay is up, except Ctrl+C
    fn is_blocked(&self) -> bool {
        self.ctx.loading.is_loading() || self.upload.lock().is_uploading
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }
        if self.is_blocked() {
            debug!(code = ?key.code, "input blocked while loading");
            return None;
        }

        if let Some(dialog) = self.dialog.take() {
            return self.handle_dialog_key(dialog, key);
        }

        if key.code == KeyCode::Esc && self.ctx.notifier.current().is_some() {
            self.ctx.notifier.dismiss();
            return None;
        }

        match self.page() {
            Page::Login => match self.login_form.handle_key(key) {
                FormAction::Submit { email, password } => {
                    Some(AppCommand::Login { email, password })
                }
                FormAction::None => None,
            },
            Page::Home => self.handle_home_key(key),
            Page::Profile => match key.code {
                KeyCode::Esc | KeyCode::Char('h') => {
                    self.ctx.router.navigate(ROUTE_HOME);
                    None
                }
                KeyCode::Char('L') => Some(AppCommand::Logout),
                KeyCode::Char('q') => {
                    self.quit();
                    None
                }
                _ => None,
            },
            Page::NotFound => match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.ctx.router.navigate(ROUTE_HOME);
                    None
                }
                KeyCode::Char('q') => {
                    self.quit();
                    None
                }
                _ => None,
            },
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('a') => {
                self.dialog = Some(Dialog::StringEditor {
                    state: StringEditorState::new(EditorMode::Add, "")
                        .with_title("Add Item")
                        .with_label("Name"),
                    purpose: EditPurpose::AddItem,
                });
            }
            KeyCode::Char('e') => {
                if let Some(name) = self.selected_item() {
                    let state = StringEditorState::new(EditorMode::Edit, name)
                        .with_title("Rename Item")
                        .with_label("Name");
                    self.dialog = Some(Dialog::StringEditor {
                        state,
                        purpose: EditPurpose::RenameItem(self.selected),
                    });
                }
            }
            KeyCode::Char('d') => {
                if let Some(name) = self.selected_item() {
                    let state = DeleteConfirmState::new(
                        "Confirm Deletion",
                        &format!("Delete \"{}\"? This cannot be undone.", name),
                        DEFAULT_CONFIRM_WORD,
                    );
                    self.dialog = Some(Dialog::DeleteConfirm {
                        state,
                        index: self.selected,
                    });
                }
            }
            KeyCode::Char('i') => {
                self.dialog = Some(Dialog::StringEditor {
                    state: StringEditorState::new(EditorMode::Add, "")
                        .with_title("Upload File")
                        .with_description("Path of a local file to add to the workspace.")
                        .with_label("Path")
                        .with_confirm_label("Upload"),
                    purpose: EditPurpose::ImportFile,
                });
            }
            KeyCode::Char('p') => {
                self.ctx.router.navigate(ROUTE_PROFILE);
            }
            KeyCode::Char('L') => return Some(AppCommand::Logout),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
        None
    }

    fn handle_dialog_key(&mut self, dialog: Dialog, key: KeyEvent) -> Option<AppCommand> {
        match dialog {
            Dialog::DeleteConfirm { mut state, index } => match state.handle_key(key) {
                DialogOutcome::Pending => {
                    self.dialog = Some(Dialog::DeleteConfirm { state, index });
                    None
                }
                DialogOutcome::Cancelled => None,
                DialogOutcome::Confirmed(()) => {
                    self.delete_item(index);
                    None
                }
            },
            Dialog::StringEditor { mut state, purpose } => match state.handle_key(key) {
                DialogOutcome::Pending => {
                    self.dialog = Some(Dialog::StringEditor { state, purpose });
                    None
                }
                DialogOutcome::Cancelled => None,
                DialogOutcome::Confirmed(value) => self.apply_edit(purpose, value),
            },
        }
    }

    fn apply_edit(&mut self, purpose: EditPurpose, value: String) -> Option<AppCommand> {
        match purpose {
            EditPurpose::AddItem => {
                self.items.push(value.clone());
                self.selected = self.items.len() - 1;
                self.ctx.notifier.success(format!("Added {}", value));
                None
            }
            EditPurpose::RenameItem(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    *item = value;
                    self.ctx.notifier.info("Item renamed");
                }
                None
            }
            EditPurpose::ImportFile => Some(AppCommand::Import(PathBuf::from(value))),
        }
    }

    fn delete_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let removed = self.items.remove(index);
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        self.ctx.notifier.success(format!("Deleted {}", removed));
    }

    /// Fold a finished background task back into the UI state
    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::LoginFinished { success } => {
                if success {
                    self.login_form = LoginForm::new();
                } else {
                    self.login_form.clear_password();
                }
            }
            UiEvent::Imported(Ok(name)) => {
                self.ctx.notifier.success(format!("Uploaded {}", name));
                self.items.push(name);
                self.selected = self.items.len() - 1;
            }
            UiEvent::Imported(Err(message)) => {
                self.ctx.notifier.error(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BearerToken, MockAccountApi, User};
    use crate::app::Config;
    use crate::constants::ROUTE_LOGIN;
    use crate::session::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn test_app() -> App {
        let ctx = AppContext::new(
            Config::default(),
            Arc::new(MockAccountApi::new()),
            BearerToken::new(),
            Arc::new(MemoryStorage::new()),
        );
        ctx.loading.set_loading(false);
        App::new(Arc::new(ctx))
    }

    fn logged_in_app() -> App {
        let app = test_app();
        app.ctx.router.set_current_user(Some(User {
            user_id: "u1".to_string(),
            email: "a@b.c".to_string(),
            token: "T".to_string(),
        }));
        app.ctx.router.navigate(ROUTE_HOME);
        app
    }

    #[test]
    fn test_keys_blocked_while_loading() {
        let mut app = test_app();
        app.ctx.router.navigate(ROUTE_LOGIN);
        app.ctx.loading.set_loading(true);

        type_text(&mut app, "abc");
        assert_eq!(app.login_form.email(), "");

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_login_submit_emits_command() {
        let mut app = test_app();
        app.ctx.router.navigate(ROUTE_LOGIN);
        assert_eq!(app.page(), Page::Login);

        type_text(&mut app, "a@b.c");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "pw");
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Some(AppCommand::Login {
                email: "a@b.c".to_string(),
                password: "pw".to_string(),
            })
        );
    }

    #[test]
    fn test_home_requires_login() {
        let mut app = test_app();
        app.ctx.router.navigate(ROUTE_HOME);
        assert_eq!(app.page(), Page::Login);
        // Typing goes to the login form, not home shortcuts
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.running);
    }

    #[test]
    fn test_add_rename_delete_item() {
        let mut app = logged_in_app();
        assert_eq!(app.page(), Page::Home);

        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "notes.md");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.items, vec!["notes.md".to_string()]);
        assert!(app.dialog.is_none());

        app.handle_key(key(KeyCode::Char('e')));
        for _ in 0.."notes.md".len() {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "todo.txt");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.items, vec!["todo.txt".to_string()]);

        app.handle_key(key(KeyCode::Char('d')));
        // Not confirmed until the word is typed
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.items.len(), 1);
        type_text(&mut app, "confirm");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.items.is_empty());
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_dialog_cancel_keeps_items() {
        let mut app = logged_in_app();
        app.items = vec!["a.pdf".to_string()];
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.dialog.is_none());
        assert_eq!(app.items.len(), 1);
    }

    #[test]
    fn test_import_dialog_emits_command() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Char('i')));
        type_text(&mut app, "/tmp/report.pdf");
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Some(AppCommand::Import(PathBuf::from("/tmp/report.pdf")))
        );

        app.apply_event(UiEvent::Imported(Ok("report.pdf".to_string())));
        assert_eq!(app.items, vec!["report.pdf".to_string()]);
        let notification = app.ctx.notifier.current().unwrap();
        assert_eq!(notification.message, "Uploaded report.pdf");
    }

    #[test]
    fn test_esc_dismisses_snackbar() {
        let mut app = logged_in_app();
        app.ctx.notifier.error("boom");
        app.handle_key(key(KeyCode::Esc));
        assert!(app.ctx.notifier.current().is_none());
    }

    #[test]
    fn test_profile_and_logout_keys() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.page(), Page::Profile);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.page(), Page::Home);
        assert_eq!(app.handle_key(key(KeyCode::Char('L'))), Some(AppCommand::Logout));
    }
}
