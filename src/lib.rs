//! Proteus
//!
//! Account lifecycle and session management for a QA tooling service:
//! - Signup with profile creation and identity rollback on failure
//! - Cookie-based sessions backed by signed tokens
//! - Profile deletion
//! - AI-assisted conversion of manual test cases to Gherkin and Gherkin to test scripts

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use crate::config::StorageBackend;
use domain::account::{IdentityProvider, ProfileStore};
use infrastructure::{
    identity::{
        Argon2Hasher, InMemoryIdentityRepository, LocalIdentityProvider,
        PostgresIdentityRepository, TokenSigner,
    },
    llm::LlmProviderFactory,
    profile::{InMemoryProfileStore, PostgresProfileStore},
    services::{AccountService, ConversionService},
    storage,
};
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state: storage backend, identity provider,
/// profile store and AI provider, wired from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.identity.uses_default_secret() {
        warn!("Using the default session secret; set APP__IDENTITY__SESSION_SECRET in production");
    }

    let signer = TokenSigner::new(&config.identity.session_secret, config.identity.issuer.clone());
    let id_token_ttl = chrono::Duration::seconds(config.identity.id_token_ttl_secs);
    let hasher = Arc::new(Argon2Hasher::new());

    info!("Storage backend: {:?}", config.storage.backend);

    let (identity, profiles): (Arc<dyn IdentityProvider>, Arc<dyn ProfileStore>) =
        match config.storage.backend {
            StorageBackend::Memory => {
                let repository = Arc::new(InMemoryIdentityRepository::new());
                (
                    Arc::new(LocalIdentityProvider::new(repository, hasher, signer, id_token_ttl)),
                    Arc::new(InMemoryProfileStore::new()),
                )
            }
            StorageBackend::Postgres => {
                let pool = storage::connect(&config.storage).await?;
                storage::run_account_migrations(&pool).await?;

                let repository = Arc::new(PostgresIdentityRepository::new(pool.clone()));
                (
                    Arc::new(LocalIdentityProvider::new(repository, hasher, signer, id_token_ttl)),
                    Arc::new(PostgresProfileStore::new(pool)),
                )
            }
        };

    let provider = LlmProviderFactory::from_config(&config.ai)?;
    let conversions = ConversionService::new(provider, config.ai.model.clone(), config.ai.temperature);
    let accounts = AccountService::new(identity, profiles);

    Ok(AppState::new(
        Arc::new(accounts),
        Arc::new(conversions),
        config.identity.id_token_ttl_secs,
    ))
}
