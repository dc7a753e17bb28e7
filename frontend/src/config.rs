/// Prefix for API calls. Empty: the dashboard is served by the backend itself.
pub const API_BASE_URL: &str = "";

/// `localStorage` key holding the mechanic's bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// How long a toast stays on screen.
pub const TOAST_MILLIS: u32 = 3000;
