use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stack")]
#[command(version)]
#[command(about = "Terminal client for the stack API", long_about = None)]
pub struct Cli {
    /// API base URL (overrides configuration)
    #[arg(long, env = "STACK_API_URL")]
    pub api_url: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Route path to open in the UI
    #[arg(long, default_value = "/")]
    pub route: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Open the terminal UI (default)
    Ui,
    /// Log in and keep the session for later runs
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long, env = "STACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the stored session
    Logout,
    /// Show the stored session and whether the server still accepts it
    Status,
    /// Initialize configuration
    Init,
    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_ui() {
        let cli = Cli::try_parse_from(["stack"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.route, "/");
        assert!(!cli.ephemeral);
    }

    #[test]
    fn test_login_command() {
        let cli = Cli::try_parse_from([
            "stack",
            "--api-url",
            "http://localhost:8080/api/v1",
            "login",
            "--email",
            "a@b.com",
            "--password",
            "pw",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080/api/v1"));
        assert_eq!(
            cli.command,
            Some(Commands::Login {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
            })
        );
    }
}
