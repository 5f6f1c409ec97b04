//! Test conversion domain: manual cases to Gherkin, Gherkin to test scripts

mod entity;
mod overload;
pub mod prompts;

pub use entity::{
    GherkinToScriptInput, GherkinToScriptOutput, ManualToGherkinInput, ManualToGherkinOutput,
};
pub use overload::{is_transient_overload, user_facing_ai_error, AI_OVERLOADED_MESSAGE};
