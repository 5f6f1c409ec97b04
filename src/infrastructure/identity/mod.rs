//! Identity provider infrastructure

mod local;
mod password;
mod postgres_repository;
mod repository;
mod token;

pub use local::LocalIdentityProvider;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresIdentityRepository;
pub use repository::{IdentityRecord, IdentityRepository, InMemoryIdentityRepository};
pub use token::{TokenClaims, TokenError, TokenKind, TokenSigner};
