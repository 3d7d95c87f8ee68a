use ratatui::style::{Color, Modifier, Style};

use crate::signals::Severity;

pub const ACCENT: Color = Color::Rgb(255, 192, 0);
pub const SURFACE: Color = Color::Rgb(20, 20, 20);
pub const MUTED: Color = Color::DarkGray;

/// Background colour of a snackbar
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Rgb(46, 125, 50),
        Severity::Info => Color::Rgb(2, 136, 209),
        Severity::Warning => Color::Rgb(237, 108, 2),
        Severity::Error => Color::Rgb(211, 47, 47),
    }
}

pub fn title_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn hint_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn danger_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn primary_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}
