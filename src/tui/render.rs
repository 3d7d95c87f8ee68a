use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, Dialog};
use super::dialogs::{DeleteConfirmDialog, StringEditorDialog};
use super::icons::FileKind;
use super::theme;
use super::widgets::{
    centered_rect, ErrorPanel, LoadingOverlay, SnackbarBar, UploadProgressWidget,
};
use crate::routing::Page;

/// Render the layout shell, the routed page and any overlays
pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Page
            Constraint::Length(1), // Snackbar / key hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    match app.page() {
        Page::Login => render_login(frame, chunks[1], app),
        Page::Home => render_home(frame, chunks[1], app),
        Page::Profile => render_profile(frame, chunks[1], app),
        Page::NotFound => render_not_found(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);

    match &app.dialog {
        Some(Dialog::DeleteConfirm { state, .. }) => {
            frame.render_widget(DeleteConfirmDialog { state }, frame.area())
        }
        Some(Dialog::StringEditor { state, .. }) => {
            frame.render_widget(StringEditorDialog { state }, frame.area())
        }
        None => {}
    }

    let upload = app.upload.lock().clone();
    frame.render_widget(UploadProgressWidget { upload: &upload }, frame.area());

    let loading = app.ctx.loading.snapshot();
    frame.render_widget(
        LoadingOverlay {
            loading: &loading,
            tick: app.tick,
        },
        frame.area(),
    );
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = app.ctx.router.current_route().meta.title.clone();
    let mut spans = vec![
        Span::styled("<> ", Style::default().fg(theme::ACCENT)),
        Span::styled("stack", theme::title_style()),
        Span::raw(" | "),
        Span::styled(title, Style::default().fg(Color::White)),
    ];
    if let Some(user) = app.ctx.account.user() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(user.email, Style::default().fg(Color::Gray)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme::MUTED)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let form_area = centered_rect(40, 9, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(form_area);

    frame.render_widget(app.login_form.email_input(), chunks[0]);
    frame.render_widget(app.login_form.password_input(), chunks[1]);

    let submit = Line::from(Span::styled(
        "[Enter] Log in",
        theme::primary_style(app.login_form.can_submit()),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(submit, chunks[3]);
}

fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Workspace ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::MUTED));

    if app.items.is_empty() {
        let empty = Paragraph::new("No items yet. Press [a] to add one or [i] to upload a file.")
            .style(theme::hint_style())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .items
        .iter()
        .map(|name| {
            let kind = FileKind::detect(name, false, false);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<7}", kind.label()), Style::default().fg(kind.color())),
                Span::raw(name.as_str()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_profile(frame: &mut Frame, area: Rect, app: &App) {
    let Some(user) = app.ctx.account.user() else {
        frame.render_widget(
            ErrorPanel {
                message: "No user is logged in.",
            },
            area,
        );
        return;
    };

    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(vec![Span::styled("User ID: ", label), Span::raw(user.user_id.clone())]),
        Line::from(vec![Span::styled("Email:   ", label), Span::raw(user.email.clone())]),
        Line::from(vec![Span::styled("Token:   ", label), Span::raw(user.token_preview())]),
    ];

    let profile = Paragraph::new(lines).block(
        Block::default()
            .title(" Profile ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MUTED)),
    );
    frame.render_widget(profile, centered_rect(50, 5, area));
}

fn render_not_found(frame: &mut Frame, area: Rect, app: &App) {
    let path = app
        .ctx
        .router
        .current()
        .map(|state| state.unmatched_path().unwrap_or(&state.path).to_string())
        .unwrap_or_default();
    let message = format!("Page not found: {}", path);
    frame.render_widget(ErrorPanel { message: &message }, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(notification) = app.ctx.notifier.current() {
        frame.render_widget(
            SnackbarBar {
                notification: &notification,
            },
            area,
        );
        return;
    }

    let hints = match app.page() {
        Page::Login => "[Tab] switch field  [Enter] submit  [Ctrl+C] quit",
        Page::Home => {
            "[a] add  [e] edit  [d] delete  [i] upload  [p] profile  [L] logout  [q] quit"
        }
        Page::Profile => "[Esc] back  [L] logout  [q] quit",
        Page::NotFound => "[Enter] home  [q] quit",
    };
    frame.render_widget(
        Paragraph::new(hints)
            .style(theme::hint_style())
            .alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BearerToken, MockAccountApi, User};
    use crate::app::{AppContext, Config};
    use crate::constants::{ROUTE_HOME, ROUTE_LOGIN};
    use crate::session::MemoryStorage;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

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

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_login_page_renders_shell() {
        let app = test_app();
        app.ctx.router.navigate(ROUTE_LOGIN);
        let screen = draw(&app);
        assert!(screen.contains("stack"));
        assert!(screen.contains("Login"));
        assert!(screen.contains("Email"));
        assert!(screen.contains("Password"));
    }

    #[test]
    fn test_home_lists_items_with_icons() {
        let mut app = test_app();
        app.ctx.router.set_current_user(Some(User {
            user_id: "u1".to_string(),
            email: "a@b.c".to_string(),
            token: "T".to_string(),
        }));
        app.ctx.router.navigate(ROUTE_HOME);
        app.items = vec!["report.pdf".to_string(), "photo.png".to_string()];

        let screen = draw(&app);
        assert!(screen.contains("[PDF]"));
        assert!(screen.contains("report.pdf"));
        assert!(screen.contains("[IMG]"));
    }

    #[test]
    fn test_snackbar_replaces_hints() {
        let app = test_app();
        app.ctx.router.navigate(ROUTE_LOGIN);
        app.ctx.notifier.error("Invalid credentials");
        let screen = draw(&app);
        assert!(screen.contains("Invalid credentials"));
        assert!(!screen.contains("[Tab] switch field"));
    }

    #[test]
    fn test_unknown_path_shows_not_found() {
        let app = test_app();
        app.ctx.router.navigate_path("/nowhere");
        let screen = draw(&app);
        assert!(screen.contains("Page Not Found"));
        assert!(screen.contains("Page not found: /nowhere"));
    }
}
