//! Request-scoped cookie access used by session operations

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "session";

/// Session lifetime: five days
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 5;

/// Cookie to be written back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub max_age_secs: i64,
    pub http_only: bool,
    pub secure: bool,
    pub path: String,
}

impl SessionCookie {
    /// The `session` cookie: HttpOnly, Secure, Path=/, five-day Max-Age
    pub fn session(value: impl Into<String>) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            value: value.into(),
            max_age_secs: SESSION_MAX_AGE_SECS,
            http_only: true,
            secure: true,
            path: "/".to_string(),
        }
    }
}

/// Cookies of the current request/response pair
pub trait CookieContext: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, cookie: SessionCookie);

    /// Remove a cookie. Removing an absent cookie is a no-op.
    fn remove(&mut self, name: &str);

    /// Write a removal cookie whether or not the request carried one
    fn expire(&mut self, name: &str);
}
