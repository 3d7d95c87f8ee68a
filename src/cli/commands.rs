use anyhow::Result;
use colored::Colorize;

use crate::app::{init_config, AppContext};

use super::Commands;

/// Handle CLI subcommands. Returns `false` when the UI should start.
pub async fn handle_command(command: &Commands, ctx: &AppContext) -> Result<bool> {
    match command {
        Commands::Ui => Ok(false),
        Commands::Login { email, password } => {
            login(ctx, email, password).await?;
            Ok(true)
        }
        Commands::Logout => {
            logout(ctx).await;
            Ok(true)
        }
        Commands::Status => {
            show_status(ctx).await;
            Ok(true)
        }
        Commands::Init => {
            println!("Initializing stack configuration...");
            let path = init_config()?;
            println!("Configuration at: {}", path.display());
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
    }
}

async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    match ctx.account.login(email, password).await {
        Ok(user) => {
            println!("  [OK] Logged in as {} ({})", user.email.green(), user.user_id);
            Ok(())
        }
        Err(e) => {
            println!("  [ERROR] {}", e.user_message().red());
            Err(e.into())
        }
    }
}

async fn logout(ctx: &AppContext) {
    ctx.account.restore().await;
    ctx.account.logout().await;
    println!("  [OK] Logged out");
}

/// Show the stored session and whether it is still valid
async fn show_status(ctx: &AppContext) {
    println!("Stack Status:");
    println!();
    println!("  API: {}", ctx.config.api.base_url);

    let phase = ctx.account.restore().await;
    match ctx.account.user() {
        Some(user) => {
            println!("  [OK] Session: {}", phase.display_name().green());
            println!("      • email: {}", user.email);
            println!("      • user id: {}", user.user_id);
            println!("      • token: {}", user.token_preview());
        }
        None => {
            println!("  [WARNING] Session: {}", phase.display_name().yellow());
        }
    }
    println!();
}

/// Show version information
pub fn show_version() {
    println!("stack v{}", env!("CARGO_PKG_VERSION"));
    println!("   Terminal client for the stack API");
}
