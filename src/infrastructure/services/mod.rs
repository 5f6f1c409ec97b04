//! Application services

mod account_service;
mod conversion_service;

pub use account_service::{
    AccountService, ACCOUNT_NOT_FOUND, PROFILE_CREATION_FAILED, SESSION_CREATION_FAILED,
    STORE_FAILED,
};
pub use conversion_service::{ConversionService, AI_NOT_CONFIGURED};
