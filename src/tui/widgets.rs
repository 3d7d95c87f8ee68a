use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};

use super::import::UploadState;
use super::theme;
use crate::constants::DEFAULT_LOADING_TITLE;
use crate::signals::{LoadingSnapshot, Notification};
use crate::utils::format_bytes;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A `percent_x` wide, `height` tall rectangle centred in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x as u32 / 100) as u16;
    let width = width.max(30).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick as usize) % SPINNER.len()]
}

/// Centred spinner with a message
pub struct LoadingIndicator<'a> {
    pub message: &'a str,
    pub tick: u64,
    pub color: Color,
}

impl Widget for LoadingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let y = area.y + area.height / 2;
        let line = Line::from(vec![
            Span::styled(spinner_frame(self.tick), Style::default().fg(self.color)),
            Span::raw(" "),
            Span::styled(self.message, Style::default().fg(self.color)),
        ])
        .alignment(Alignment::Center);
        line.render(Rect { y, height: 1, ..area }, buf);
    }
}

/// Full-screen blocking overlay driven by the loading signal
pub struct LoadingOverlay<'a> {
    pub loading: &'a LoadingSnapshot,
    pub tick: u64,
}

impl Widget for LoadingOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.loading.active {
            return;
        }

        Clear.render(area, buf);
        Block::default()
            .style(Style::default().bg(Color::Black))
            .render(area, buf);

        let panel = centered_rect(40, 5, area);
        let [title_area, _, progress_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(Rect {
            y: panel.y + 1,
            height: 3,
            ..panel
        });

        let title = if self.loading.progress_title.is_empty() {
            DEFAULT_LOADING_TITLE
        } else {
            self.loading.progress_title.as_str()
        };

        match self.loading.ratio() {
            Some(ratio) => {
                Line::from(Span::styled(title, theme::title_style()))
                    .alignment(Alignment::Center)
                    .render(title_area, buf);
                Gauge::default()
                    .gauge_style(Style::default().fg(theme::ACCENT).bg(Color::DarkGray))
                    .ratio(ratio)
                    .label(format!(
                        "{} of {}",
                        self.loading.progress_current, self.loading.progress_total
                    ))
                    .render(progress_area, buf);
            }
            None => {
                LoadingIndicator {
                    message: title,
                    tick: self.tick,
                    color: Color::White,
                }
                .render(title_area, buf);
            }
        }
    }
}

/// Upload overlay; renders nothing unless an upload is running
pub struct UploadProgressWidget<'a> {
    pub upload: &'a UploadState,
}

impl UploadProgressWidget<'_> {
    /// `uploaded / total` with human readable sizes
    pub fn byte_summary(upload: &UploadState) -> String {
        let uploaded = (upload.progress as u64 * upload.file_size) / 100;
        format!(
            "{} / {}",
            format_bytes(uploaded),
            format_bytes(upload.file_size)
        )
    }
}

impl Widget for UploadProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.upload.is_uploading {
            return;
        }

        let panel = centered_rect(40, 7, area);
        Clear.render(panel, buf);
        let block = Block::default()
            .title(" Uploading File... ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .style(Style::default().bg(theme::SURFACE));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let [name_area, gauge_area, bytes_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Line::from(self.upload.file_name.as_str())
            .alignment(Alignment::Center)
            .render(name_area, buf);
        Gauge::default()
            .gauge_style(Style::default().fg(theme::ACCENT).bg(Color::DarkGray))
            .percent(self.upload.progress.min(100) as u16)
            .label(format!("{}% Complete", self.upload.progress))
            .render(gauge_area, buf);
        Line::from(Span::styled(
            Self::byte_summary(self.upload),
            theme::hint_style(),
        ))
        .alignment(Alignment::Center)
        .render(bytes_area, buf);
    }
}

/// Bottom notification bar coloured by severity
pub struct SnackbarBar<'a> {
    pub notification: &'a Notification,
}

impl Widget for SnackbarBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = theme::severity_color(self.notification.severity);
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", self.notification.severity.label().to_uppercase()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.notification.message.as_str()),
            Span::styled("  [Esc] dismiss", Style::default().fg(Color::Gray)),
        ]))
        .style(Style::default().bg(color).fg(Color::White))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Centred error alert
pub struct ErrorPanel<'a> {
    pub message: &'a str,
}

impl Widget for ErrorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = centered_rect(60, 3, area);
        Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::severity_color(
                        crate::signals::Severity::Error,
                    ))),
            )
            .render(panel, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));

        let tiny = Rect::new(0, 0, 20, 4);
        let rect = centered_rect(50, 10, tiny);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
    }

    #[test]
    fn test_upload_hidden_when_idle() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let upload = UploadState::default();
        UploadProgressWidget { upload: &upload }.render(area, &mut buf);
        assert!(buffer_text(&buf).trim().is_empty());
    }

    #[test]
    fn test_upload_byte_summary() {
        let upload = UploadState {
            is_uploading: true,
            progress: 50,
            file_size: 2_000_000,
            file_name: "video.mp4".to_string(),
        };
        assert_eq!(UploadProgressWidget::byte_summary(&upload), "1 MB / 2 MB");

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        UploadProgressWidget { upload: &upload }.render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("50% Complete"));
        assert!(text.contains("video.mp4"));
    }

    #[test]
    fn test_loading_overlay_progress_label() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        let loading = LoadingSnapshot {
            active: true,
            progress_title: "Syncing".to_string(),
            progress_total: 4,
            progress_current: 1,
        };
        LoadingOverlay {
            loading: &loading,
            tick: 0,
        }
        .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Syncing"));
        assert!(text.contains("1 of 4"));
    }

    #[test]
    fn test_loading_overlay_inactive_draws_nothing() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let loading = LoadingSnapshot::default();
        LoadingOverlay {
            loading: &loading,
            tick: 3,
        }
        .render(area, &mut buf);
        assert!(buffer_text(&buf).trim().is_empty());
    }
}
