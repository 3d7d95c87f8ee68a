use serde::{Deserialize, Serialize};

/// Body of `POST /user/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /user/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Response of `GET /user/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: String,
}

/// The logged-in identity, as persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

impl User {
    /// Token with everything but the first few characters hidden
    pub fn token_preview(&self) -> String {
        let visible: String = self.token.chars().take(8).collect();
        if self.token.chars().count() > 8 {
            format!("{}…", visible)
        } else {
            visible
        }
    }
}
