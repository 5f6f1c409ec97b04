//! Infrastructure layer - External service implementations

pub mod identity;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod profile;
pub mod services;
pub mod storage;
