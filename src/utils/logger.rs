use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(verbose: bool) -> EnvFilter {
    // RUST_LOG wins; otherwise info, or debug with --verbose
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging to stderr, for one-shot CLI commands
pub fn init_logger(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init();
}

/// Initialize logging to a file, for when the TUI owns the terminal
pub fn init_file_logger(verbose: bool, log_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(log_dir)?;
    let file_name = format!("stack-{}.log", chrono::Local::now().format("%Y%m%d"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(file_name))?;

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
    Ok(())
}
