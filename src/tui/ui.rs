use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::app::{App, AppCommand, UiEvent};
use super::import::import_file;
use super::render::render_ui;

/// Run the terminal UI until the user quits
pub async fn run_ui(mut app: App) -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("stack requires an interactive terminal.");
        eprintln!("   Use a subcommand (login, logout, status) for scripted use.");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let (tx, mut rx) = mpsc::channel::<UiEvent>(32);

    let res = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "ui loop failed");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<UiEvent>,
    rx: &mut mpsc::Receiver<UiEvent>,
) -> Result<()> {
    let tick_rate = app.ctx.config.ui.tick_rate();

    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = app.handle_key(key) {
                        spawn_command(app, command, tx.clone());
                    }
                }
            }
        }

        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }

        app.on_tick();
    }

    info!("ui closed");
    Ok(())
}

/// Run a command on the runtime; results come back through `tx`
fn spawn_command(app: &App, command: AppCommand, tx: mpsc::Sender<UiEvent>) {
    match command {
        AppCommand::Login { email, password } => {
            let account = app.ctx.account.clone();
            tokio::spawn(async move {
                let success = account.login(&email, &password).await.is_ok();
                let _ = tx.send(UiEvent::LoginFinished { success }).await;
            });
        }
        AppCommand::Logout => {
            let account = app.ctx.account.clone();
            tokio::spawn(async move {
                account.logout().await;
            });
        }
        AppCommand::Import(path) => {
            let upload = app.upload.clone();
            tokio::spawn(async move {
                let result = import_file(&path, upload)
                    .await
                    .map_err(|e| e.user_message());
                let _ = tx.send(UiEvent::Imported(result)).await;
            });
        }
    }
}
