//! Typed inputs and outputs of the conversion flows

use serde::{Deserialize, Serialize};

use crate::domain::validation::{check_non_empty, FieldReader, RawFields, RequestSchema, ValidationResult};

/// Manual test cases to be rewritten as Gherkin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualToGherkinInput {
    pub manual_test_cases: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
}

impl RequestSchema for ManualToGherkinInput {
    fn validate(fields: &RawFields) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(fields);
        let manual_test_cases = reader.required("manualTestCases");
        let feature_name = reader.optional("featureName");

        if let Some(value) = manual_test_cases {
            check_non_empty(
                reader.errors_mut(),
                "manualTestCases",
                value,
                "Manual test cases input cannot be empty.",
            );
        }

        ValidationResult::from_errors(reader.finish(), || {
            Some(Self {
                manual_test_cases: manual_test_cases?.to_string(),
                feature_name,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualToGherkinOutput {
    pub generated_gherkin: String,
}

/// Gherkin plus optional page and code context for script generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinToScriptInput {
    pub gherkin_input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippets: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_language: Option<String>,
}

impl RequestSchema for GherkinToScriptInput {
    fn validate(fields: &RawFields) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(fields);
        let gherkin_input = reader.required("gherkinInput");
        let html_context = reader.optional("htmlContext");
        let code_snippets = reader.optional("codeSnippets");
        let snippet_language = reader.optional("snippetLanguage");

        if let Some(value) = gherkin_input {
            check_non_empty(
                reader.errors_mut(),
                "gherkinInput",
                value,
                "Gherkin input cannot be empty.",
            );
        }

        ValidationResult::from_errors(reader.finish(), || {
            Some(Self {
                gherkin_input: gherkin_input?.to_string(),
                html_context,
                code_snippets,
                snippet_language,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinToScriptOutput {
    pub test_script: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::validate;

    fn fields(pairs: &[(&str, &str)]) -> RawFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_manual_input_rejects_empty() {
        let result = validate::<ManualToGherkinInput>(&fields(&[("manualTestCases", "")]));

        match result {
            ValidationResult::Invalid(errors) => assert_eq!(
                errors.field("manualTestCases"),
                ["Manual test cases input cannot be empty."]
            ),
            ValidationResult::Valid(_) => panic!("empty input accepted"),
        }
    }

    #[test]
    fn test_manual_input_blank_feature_name_is_absent() {
        let result = validate::<ManualToGherkinInput>(&fields(&[
            ("manualTestCases", "1. Open login page"),
            ("featureName", ""),
        ]));

        assert_eq!(
            result,
            ValidationResult::Valid(ManualToGherkinInput {
                manual_test_cases: "1. Open login page".to_string(),
                feature_name: None,
            })
        );
    }

    #[test]
    fn test_gherkin_input_rejects_empty() {
        let result = validate::<GherkinToScriptInput>(&fields(&[("gherkinInput", "")]));

        match result {
            ValidationResult::Invalid(errors) => {
                assert_eq!(errors.field("gherkinInput"), ["Gherkin input cannot be empty."])
            }
            ValidationResult::Valid(_) => panic!("empty input accepted"),
        }
    }

    #[test]
    fn test_gherkin_input_with_context() {
        let result = validate::<GherkinToScriptInput>(&fields(&[
            ("gherkinInput", "Feature: Login"),
            ("htmlContext", "<form id=\"login\"></form>"),
            ("codeSnippets", "driver.get(url)"),
            ("snippetLanguage", "python"),
        ]));

        let input = result.into_result().unwrap();
        assert_eq!(input.snippet_language.as_deref(), Some("python"));
        assert!(input.html_context.is_some());
    }
}
