/// Runtime orchestrator module - Gateway

mod orchestrator;

pub use orchestrator::{settle_session, Orchestrator};
