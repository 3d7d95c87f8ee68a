use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use super::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// What the login form wants after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit { email: String, password: String },
}

/// Email and masked password inputs for the login page
pub struct LoginForm {
    email: TextArea<'static>,
    password: TextArea<'static>,
    focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

fn field(title: &str) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(Style::default());
    input.set_block(Block::default().borders(Borders::ALL).title(title.to_string()));
    input
}

fn style_field(input: &mut TextArea<'static>, title: &str, focused: bool) {
    let (border, cursor) = if focused {
        (theme::ACCENT, Style::default().add_modifier(Modifier::REVERSED))
    } else {
        (theme::MUTED, Style::default())
    };
    input.set_cursor_style(cursor);
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title.to_string()),
    );
}

impl LoginForm {
    pub fn new() -> Self {
        let mut password = field("Password");
        password.set_mask_char('•');
        let mut form = Self {
            email: field("Email"),
            password,
            focus: LoginField::Email,
        };
        form.refresh_focus();
        form
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn email(&self) -> String {
        self.email.lines().join("").trim().to_string()
    }

    pub fn password(&self) -> String {
        self.password.lines().join("")
    }

    pub fn email_input(&self) -> &TextArea<'static> {
        &self.email
    }

    pub fn password_input(&self) -> &TextArea<'static> {
        &self.password
    }

    /// Both fields are required before submitting
    pub fn can_submit(&self) -> bool {
        !self.email().is_empty() && !self.password().is_empty()
    }

    /// Drop the password, keep the email
    pub fn clear_password(&mut self) {
        let mut password = field("Password");
        password.set_mask_char('•');
        self.password = password;
        self.focus = LoginField::Password;
        self.refresh_focus();
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.refresh_focus();
    }

    fn refresh_focus(&mut self) {
        let email_focused = self.focus == LoginField::Email;
        style_field(&mut self.email, "Email", email_focused);
        style_field(&mut self.password, "Password", !email_focused);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                FormAction::None
            }
            KeyCode::Enter => {
                if self.focus == LoginField::Email {
                    self.toggle_focus();
                    return FormAction::None;
                }
                if !self.can_submit() {
                    return FormAction::None;
                }
                FormAction::Submit {
                    email: self.email(),
                    password: self.password(),
                }
            }
            _ => {
                match self.focus {
                    LoginField::Email => self.email.input(key),
                    LoginField::Password => self.password.input(key),
                };
                FormAction::None
            }
        }
    }
}
