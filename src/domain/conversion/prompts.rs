//! Prompts and output schemas for the conversion flows

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::entity::{GherkinToScriptInput, ManualToGherkinInput};
use crate::domain::prompt::{PromptTemplate, TemplateError, TemplateValues};

pub const SYSTEM_PROMPT: &str = "You are a senior QA automation engineer. You write precise, \
idiomatic Gherkin and maintainable automated test scripts. Always answer with a single JSON \
object matching the requested schema and nothing else.";

static MANUAL_TO_GHERKIN: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(
        r#"Convert the manual test cases below into a single Gherkin feature file.
${var:featureInstruction}

Rules:
- Start with a `Feature:` line followed by a one-sentence description.
- Write one `Scenario:` per test case, or a `Scenario Outline:` with `Examples:` when cases differ only by data.
- Move steps shared by every scenario into a `Background:` section.
- Phrase steps with Given/When/Then/And from the user's point of view.
- Keep expected results as `Then` steps. Do not invent behaviour the test cases do not describe.

Manual test cases:
"""
${var:manualTestCases}
"""

Return a JSON object whose `generatedGherkin` field holds the complete feature file."#,
    )
});

static GHERKIN_TO_SCRIPT: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(
        r#"Generate an automated UI test script that implements every scenario of the Gherkin feature below.

Rules:
- Produce one self-contained script with a test per scenario and helpers for repeated steps.
- Prefer stable locators (ids, names, data attributes) over positional XPath.
- Wait explicitly for elements instead of sleeping.
- Add a short comment above each test naming the scenario it implements.
- Where a locator cannot be derived, use a clearly named placeholder.

Gherkin feature:
"""
${var:gherkinInput}
"""
${var:htmlSection:}${var:snippetSection:}
Return a JSON object whose `testScript` field holds the complete script."#,
    )
});

/// Render the manual-to-Gherkin user prompt
pub fn manual_to_gherkin_prompt(input: &ManualToGherkinInput) -> Result<String, TemplateError> {
    let feature_instruction = match input.feature_name.as_deref() {
        Some(name) => format!("Name the feature \"{}\".", name.trim()),
        None => "Derive a concise feature name from the test cases.".to_string(),
    };

    let mut values = TemplateValues::new();
    values.insert("featureInstruction".to_string(), feature_instruction);
    values.insert("manualTestCases".to_string(), input.manual_test_cases.clone());

    MANUAL_TO_GHERKIN.render(&values)
}

/// Render the Gherkin-to-script user prompt. Optional context is only
/// included when present.
pub fn gherkin_to_script_prompt(input: &GherkinToScriptInput) -> Result<String, TemplateError> {
    let mut values = TemplateValues::new();
    values.insert("gherkinInput".to_string(), input.gherkin_input.clone());

    if let Some(html) = input.html_context.as_deref() {
        values.insert(
            "htmlSection".to_string(),
            format!(
                "\nHTML of the page under test. Derive locators from it:\n\"\"\"\n{}\n\"\"\"\n",
                html
            ),
        );
    }

    if let Some(snippets) = input.code_snippets.as_deref() {
        let language = input.snippet_language.as_deref().unwrap_or("the same language");
        values.insert(
            "snippetSection".to_string(),
            format!(
                "\nExisting code to follow for style, framework and helpers. \
                 Write the script in {}:\n\"\"\"\n{}\n\"\"\"\n",
                language, snippets
            ),
        );
    }

    GHERKIN_TO_SCRIPT.render(&values)
}

pub fn manual_to_gherkin_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "generatedGherkin": {
                "type": "string",
                "description": "The complete Gherkin feature file"
            }
        },
        "required": ["generatedGherkin"]
    })
}

pub fn gherkin_to_script_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "testScript": {
                "type": "string",
                "description": "The complete automated test script"
            }
        },
        "required": ["testScript"]
    })
}
