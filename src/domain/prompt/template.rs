//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:name}` and `${var:name:default}`.
//! Rendering is a single pass over the template, so placeholder syntax inside
//! substituted values is emitted verbatim and never expanded.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z][a-zA-Z0-9_-]*)(?::([^}]*))?\}")
        .expect("variable pattern is a valid regex")
});

/// Values substituted into a template
pub type TemplateValues = HashMap<String, String>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template has no variables named {name}")]
    UnknownVariable { name: String },
}

/// A variable declared by a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

impl PromptVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut seen = HashSet::new();
        let mut variables = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();
            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Render with the given values. Every variable without a default must be
    /// supplied, and every supplied value must name a declared variable.
    pub fn render(&self, values: &TemplateValues) -> Result<String, TemplateError> {
        for var in &self.variables {
            if var.is_required() && !values.contains_key(&var.name) {
                return Err(TemplateError::MissingVariable {
                    name: var.name.clone(),
                });
            }
        }

        if let Some(name) = values
            .keys()
            .find(|name| !self.variables.iter().any(|v| &v.name == *name))
        {
            return Err(TemplateError::UnknownVariable { name: name.clone() });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            values
                .get(&cap[1])
                .cloned()
                .or_else(|| cap.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}
