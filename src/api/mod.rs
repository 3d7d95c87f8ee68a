// Gateway module for the stack API - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod traits;
mod types;

// Public re-exports - the ONLY way to access API functionality
pub use client::{ApiClient, BearerToken};
#[cfg(test)]
pub use traits::MockAccountApi;
pub use traits::AccountApi;
pub use types::{LoginRequest, LoginResponse, User, UserStatusResponse};
