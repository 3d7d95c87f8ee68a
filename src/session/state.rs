/// Where the account lifecycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Initializing,
    Authenticated,
    Unauthenticated,
}

impl SessionPhase {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Uninitialized => "not started",
            Self::Initializing => "restoring session",
            Self::Authenticated => "logged in",
            Self::Unauthenticated => "logged out",
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
