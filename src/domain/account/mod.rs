//! Account domain
//!
//! Identities live in an identity provider, profiles in a document store.
//! The two are paired by uid and kept consistent by the account service.

mod cookies;
mod entity;
mod identity;
mod outcome;
mod profile;
pub mod translator;

pub use cookies::{CookieContext, SessionCookie, SESSION_COOKIE_NAME, SESSION_MAX_AGE_SECS};
pub use entity::{IdentityId, SessionUser, UserIdentity, UserProfile};
pub use identity::{IdentityError, IdentityProvider};
pub use outcome::{AccountErrorKind, AccountFailure, OperationResult};
pub use profile::{ProfileStore, ProfileStoreError};
pub use translator::translate;

#[cfg(test)]
pub use cookies::mock::InMemoryCookies;
#[cfg(test)]
pub use identity::MockIdentityProvider;
#[cfg(test)]
pub use profile::MockProfileStore;
