/// Session management module - Gateway

mod account;
mod state;
mod store;

pub use account::Account;
pub use state::SessionPhase;
pub use store::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
