use async_trait::async_trait;

use super::types::{LoginRequest, LoginResponse, UserStatusResponse};
use crate::utils::StackError;

/// The account endpoints of the stack API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, StackError>;

    /// Validate a token and fetch the identity behind it. The token is sent
    /// explicitly, independent of the client's default header.
    async fn user_status(&self, token: &str) -> Result<UserStatusResponse, StackError>;

    /// Terminate the server-side session for the attached token
    async fn logout(&self) -> Result<(), StackError>;
}
