use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use tui_textarea::TextArea;

use super::theme;
use super::widgets::centered_rect;
use crate::constants::DEFAULT_CONFIRM_WORD;

/// What a key press did to an open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Pending,
    Cancelled,
    Confirmed(T),
}

fn single_line_input(label: &str) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(Style::default());
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MUTED))
            .title(label.to_string()),
    );
    input
}

fn input_text(input: &TextArea<'_>) -> String {
    input.lines().join("")
}

/// Destructive-action confirmation: the user types a confirm word before
/// the action is enabled. An empty confirm word enables it immediately.
pub struct DeleteConfirmState {
    pub title: String,
    pub message: String,
    pub confirm_word: String,
    input: TextArea<'static>,
}

impl Default for DeleteConfirmState {
    fn default() -> Self {
        Self::new(
            "Confirm Deletion",
            "Please confirm if you want to delete this item.",
            DEFAULT_CONFIRM_WORD,
        )
    }
}

impl DeleteConfirmState {
    pub fn new(title: &str, message: &str, confirm_word: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            confirm_word: confirm_word.to_string(),
            input: single_line_input(&format!("Type \"{}\" to confirm", confirm_word)),
        }
    }

    pub fn typed(&self) -> String {
        input_text(&self.input)
    }

    pub fn is_confirm_enabled(&self) -> bool {
        self.confirm_word.is_empty() || self.typed() == self.confirm_word
    }

    /// Clear the typed text
    pub fn reset(&mut self) {
        self.input = single_line_input(&format!("Type \"{}\" to confirm", self.confirm_word));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<()> {
        match key.code {
            KeyCode::Esc => {
                self.reset();
                DialogOutcome::Cancelled
            }
            KeyCode::Enter if self.is_confirm_enabled() => {
                self.reset();
                DialogOutcome::Confirmed(())
            }
            KeyCode::Enter => DialogOutcome::Pending,
            _ => {
                if !self.confirm_word.is_empty() {
                    self.input.input(key);
                }
                DialogOutcome::Pending
            }
        }
    }
}

pub struct DeleteConfirmDialog<'a> {
    pub state: &'a DeleteConfirmState,
}

impl Widget for DeleteConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let with_input = !self.state.confirm_word.is_empty();
        let height = if with_input { 11 } else { 8 };
        let dialog_area = centered_rect(60, height, area);

        Clear.render(dialog_area, buf);
        let block = Block::default()
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Red))
            .style(Style::default().bg(theme::SURFACE));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let [message_area, input_area, actions_area] = Layout::vertical([
            Constraint::Min(2),
            Constraint::Length(if with_input { 3 } else { 0 }),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.state.message.as_str())
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        if with_input {
            (&self.state.input).render(input_area, buf);
        }

        Line::from(vec![
            Span::styled("[Esc] Cancel", theme::hint_style()),
            Span::raw("   "),
            Span::styled(
                "[Enter] Confirm",
                theme::danger_style(self.state.is_confirm_enabled()),
            ),
        ])
        .alignment(Alignment::Center)
        .render(actions_area, buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit,
}

/// Single string add/edit dialog
pub struct StringEditorState {
    pub mode: EditorMode,
    pub title: Option<String>,
    pub description: Option<String>,
    pub label: String,
    pub confirm_label: Option<String>,
    input: TextArea<'static>,
}

impl StringEditorState {
    pub fn new(mode: EditorMode, initial_value: &str) -> Self {
        let label = "Value".to_string();
        let mut input = single_line_input(&label);
        input.insert_str(initial_value);
        Self {
            mode,
            title: None,
            description: None,
            label,
            confirm_label: None,
            input,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        let value = input_text(&self.input);
        self.label = label.to_string();
        self.input = single_line_input(label);
        self.input.insert_str(value);
        self
    }

    pub fn with_confirm_label(mut self, confirm_label: &str) -> Self {
        self.confirm_label = Some(confirm_label.to_string());
        self
    }

    pub fn effective_title(&self) -> &str {
        match (&self.title, self.mode) {
            (Some(title), _) => title,
            (None, EditorMode::Edit) => "Edit Value",
            (None, EditorMode::Add) => "Add Value",
        }
    }

    pub fn effective_confirm_label(&self) -> &str {
        match (&self.confirm_label, self.mode) {
            (Some(label), _) => label,
            (None, EditorMode::Edit) => "Save",
            (None, EditorMode::Add) => "Add",
        }
    }

    /// Trimmed current value
    pub fn value(&self) -> String {
        input_text(&self.input).trim().to_string()
    }

    pub fn can_save(&self) -> bool {
        !self.value().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<String> {
        match key.code {
            KeyCode::Esc => DialogOutcome::Cancelled,
            KeyCode::Enter if self.can_save() => DialogOutcome::Confirmed(self.value()),
            KeyCode::Enter => DialogOutcome::Pending,
            _ => {
                self.input.input(key);
                DialogOutcome::Pending
            }
        }
    }
}

pub struct StringEditorDialog<'a> {
    pub state: &'a StringEditorState,
}

impl Widget for StringEditorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let description_height = if self.state.description.is_some() { 2 } else { 0 };
        let dialog_area = centered_rect(50, 8 + description_height, area);

        Clear.render(dialog_area, buf);
        let block = Block::default()
            .title(format!(" {} ", self.state.effective_title()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::SURFACE));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let [description_area, input_area, actions_area] = Layout::vertical([
            Constraint::Length(description_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        if let Some(description) = &self.state.description {
            Paragraph::new(description.as_str())
                .wrap(Wrap { trim: true })
                .render(description_area, buf);
        }

        (&self.state.input).render(input_area, buf);

        Line::from(vec![
            Span::styled("[Esc] Cancel", theme::hint_style()),
            Span::raw("   "),
            Span::styled(
                format!("[Enter] {}", self.state.effective_confirm_label()),
                theme::primary_style(self.state.can_save()),
            ),
        ])
        .alignment(Alignment::Center)
        .render(actions_area, buf);
    }
}
