//! Domain layer - Core business logic and entities

pub mod account;
pub mod conversion;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod validation;

pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use prompt::{PromptTemplate, PromptVariable, TemplateError};
