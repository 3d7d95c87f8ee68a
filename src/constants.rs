/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "http://localhost/api/v1";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// API Endpoints (relative to the base URL)
pub const ENDPOINT_LOGIN: &str = "/user/login";
pub const ENDPOINT_STATUS: &str = "/user/status";
pub const ENDPOINT_LOGOUT: &str = "/user/logout";

// Session persistence
pub const SESSION_STORAGE_KEY: &str = "stack_session_info";

// Route names
pub const ROUTE_LOGIN: &str = "login";
pub const ROUTE_HOME: &str = "home";
pub const ROUTE_PROFILE: &str = "profile";
pub const ROUTE_NOT_FOUND: &str = "notfound";

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const SNACKBAR_AUTO_HIDE_MS: u64 = 6000;
pub const DEFAULT_CONFIRM_WORD: &str = "confirm";
pub const DEFAULT_LOADING_TITLE: &str = "loading...";
