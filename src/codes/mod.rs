//! Error code definitions and message template rendering.

pub mod common;
pub mod registry;

use std::collections::BTreeMap;
use std::fmt;

use crate::builder::BuildError;
use crate::enums::ErrorSeverity;
use crate::validator;

/// Named parameters substituted into a message template.
///
/// Keys iterate in a stable (sorted) order, and lookups for absent keys are
/// tolerated by the renderer rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParams {
    params: BTreeMap<String, String>,
}

impl MessageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, chainable.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One category of failure: a unique `FUNxxyyzzz` code, a severity class,
/// and a human message template.
///
/// Instances are immutable; identity is the code string. Construction
/// validates the code format, so an `ErrorCode` value always carries a
/// well-formed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode {
    code: String,
    severity: ErrorSeverity,
    message_template: String,
}

impl ErrorCode {
    /// Create an error code, rejecting anything that does not match
    /// `FUN` + nine digits.
    pub fn new(
        code: impl Into<String>,
        severity: ErrorSeverity,
        message_template: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let code = code.into();
        if !validator::validate_error_code(&code) {
            return Err(BuildError::InvalidErrorCode(code));
        }
        Ok(Self {
            code,
            severity,
            message_template: message_template.into(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn message_template(&self) -> &str {
        &self.message_template
    }

    /// Render the message template with the given parameters.
    ///
    /// Placeholders are `{name}`; `{{` and `}}` produce literal braces.
    /// This never fails: a missing parameter yields the raw template
    /// followed by ` (missing template parameter: <key>)`, and a malformed
    /// template (an unterminated placeholder) yields the raw template
    /// unchanged.
    pub fn render_message(&self, params: &MessageParams) -> String {
        render_template(&self.message_template, params)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.code, self.severity)
    }
}

fn render_template(template: &str, params: &MessageParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut iter = template.chars().peekable();

    while let Some(ch) = iter.next() {
        match ch {
            '{' => {
                if iter.peek() == Some(&'{') {
                    iter.next();
                    out.push('{');
                    continue;
                }
                let mut key = String::new();
                let mut closed = false;
                for c in iter.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    key.push(c);
                }
                if !closed {
                    // Malformed template, fall back to the raw text
                    return template.to_string();
                }
                match params.get(&key) {
                    Some(value) => out.push_str(value),
                    None => {
                        return format!("{template} (missing template parameter: {key})");
                    }
                }
            }
            '}' => {
                // Collapse }} to a literal; a lone } is kept as-is
                if iter.peek() == Some(&'}') {
                    iter.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    out
}
