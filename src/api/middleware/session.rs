//! Session cookie access for handlers

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::account::{CookieContext, SessionCookie, SessionUser};

/// [`CookieContext`] over an axum cookie jar. Hand the jar back with
/// [`JarCookies::into_jar`] so changes reach the response.
#[derive(Debug, Clone)]
pub struct JarCookies {
    jar: CookieJar,
}

impl JarCookies {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl CookieContext for JarCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_string())
    }

    fn set(&mut self, cookie: SessionCookie) {
        let cookie = Cookie::build((cookie.name, cookie.value))
            .http_only(cookie.http_only)
            .secure(cookie.secure)
            .path(cookie.path)
            .max_age(time::Duration::seconds(cookie.max_age_secs))
            .build();

        self.jar = self.jar.clone().add(cookie);
    }

    fn remove(&mut self, name: &str) {
        if self.jar.get(name).is_some() {
            self.expire(name);
        }
    }

    fn expire(&mut self, name: &str) {
        self.jar = self.jar.clone().add(removal_cookie(name));
    }
}

/// Empty, already-expired cookie carrying the same attributes as the session
/// cookie so browsers overwrite it
fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .http_only(true)
        .secure(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// The signed-in user, if the session cookie verifies
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<SessionUser>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = state.accounts.current_user(&JarCookies::new(jar)).await;

        Ok(CurrentUser(user))
    }
}

/// Extractor that requires a valid session cookie
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionUser);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        user.map(RequireSession)
            .ok_or_else(|| ApiError::unauthorized("Not signed in."))
    }
}
