use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    app::{get_log_dir, load_config, AppContext, Config},
    cli::{handle_command, Cli, Commands},
    constants::ROUTE_LOGIN,
    session::SessionPhase,
    tui::{run_ui, App},
    utils::{init_file_logger, init_logger},
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = match load_config(cli.config.as_deref()) {
            Ok(cfg) => cfg,
            // A missing or broken --config is fatal; everything else falls back
            Err(e) if cli.config.is_some() => return Err(e),
            Err(e) => {
                eprintln!("{} Failed to load config: {}. Using defaults.", "[WARN]".yellow(), e);
                Config::default()
            }
        };

        if let Some(api_url) = &cli.api_url {
            config.api.base_url = api_url.clone();
        }

        Ok(Self { cli, config })
    }

    fn wants_ui(&self) -> bool {
        matches!(self.cli.command, None | Some(Commands::Ui))
    }

    fn init_logging(&self) {
        if !self.wants_ui() {
            init_logger(self.cli.verbose);
            return;
        }

        // The TUI owns stdout/stderr, so logs go to a file instead
        match get_log_dir() {
            Ok(dir) => {
                if let Err(e) = init_file_logger(self.cli.verbose, &dir) {
                    eprintln!("Failed to open log file in {}: {}", dir.display(), e);
                }
            }
            Err(e) => eprintln!("Failed to resolve log directory: {}", e),
        }
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        self.init_logging();
        debug!(api = %self.config.api.base_url, "configuration loaded");

        let ctx = Arc::new(AppContext::from_config(
            self.config.clone(),
            self.cli.ephemeral,
        )?);

        // Handle subcommands
        if let Some(command) = &self.cli.command {
            if handle_command(command, &ctx).await? {
                return Ok(());
            }
        }

        // Land on the requested route; guards apply once the session settles
        let requested = ctx.router.navigate_path(&self.cli.route);
        info!(route = %requested.name, "starting ui");

        let boot_ctx = ctx.clone();
        let route = self.cli.route.clone();
        tokio::spawn(async move {
            settle_session(&boot_ctx, &route).await;
        });

        let result = run_ui(App::new(ctx)).await;
        if let Err(e) = &result {
            warn!(error = %e, "ui exited with error");
        }
        result
    }
}

/// Restore the stored session, then retry the requested route if the login
/// gate rewrote it at boot. A request for the login page is left to the
/// account's own redirect to home.
pub async fn settle_session(ctx: &AppContext, requested_path: &str) -> SessionPhase {
    let phase = ctx.account.restore().await;
    debug!(phase = phase.display_name(), "session restored");

    let requested = ctx.router.route_for_path(requested_path).name.clone();
    if phase.is_authenticated() && requested != ROUTE_LOGIN {
        ctx.router.navigate_path(requested_path);
    }
    phase
}
