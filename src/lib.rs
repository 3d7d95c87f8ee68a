pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod routing;
pub mod runtime;
pub mod session;
pub mod signals;
pub mod tui;
pub mod utils;

pub use api::{AccountApi, ApiClient, BearerToken, User};
pub use app::{load_config, AppContext, Config};
pub use routing::{NavigationState, Router};
pub use session::{Account, SessionPhase};
pub use tui::run_ui;
pub use utils::StackError;
