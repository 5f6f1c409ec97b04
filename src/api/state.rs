//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{AccountService, ConversionService};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub conversions: Arc<ConversionService>,
    /// Lifetime of id tokens returned by password sign-in
    pub id_token_ttl_secs: i64,
}

impl AppState {
    pub fn new(
        accounts: Arc<AccountService>,
        conversions: Arc<ConversionService>,
        id_token_ttl_secs: i64,
    ) -> Self {
        Self {
            accounts,
            conversions,
            id_token_ttl_secs,
        }
    }
}
