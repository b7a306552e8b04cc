//! Domain failures and their conversion into response envelopes.
//!
//! A closed set of failure kinds, each bound to one builtin error code.
//! Boundary handlers catch an [`ApiFailure`], call
//! [`to_response_payload`](ApiFailure::to_response_payload) and serialize
//! the result at the caller's [`UserLevel`](crate::enums::UserLevel); any
//! error type the boundary does not recognize is first forced through
//! [`ApiFailure::wrap`] so no raw failure text ever reaches the wire.

use std::backtrace::Backtrace;
use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::builder::ResponsePayloadBuilder;
use crate::codes::{common, ErrorCode, MessageParams};
use crate::payload::ResponsePayload;

/// Fallback text when an unknown failure carries no message of its own.
const UNKNOWN_FAILURE_MESSAGE: &str = "An unexpected error occurred";

/// The closed set of domain failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Validation,
    EntityNotFound,
    Api,
    Network,
    IllegalOperation,
    Unknown,
}

impl FailureKind {
    /// The builtin error code this kind is bound to.
    pub fn error_code(&self) -> &'static ErrorCode {
        match self {
            Self::Validation => &common::VALIDATION_ERROR,
            Self::EntityNotFound => &common::ENTITY_NOT_FOUND,
            Self::Api => &common::API_ERROR,
            Self::Network => &common::NETWORK_ERROR,
            Self::IllegalOperation => &common::ILLEGAL_OPERATION,
            Self::Unknown => &common::UNKNOWN_ERROR,
        }
    }

    /// Infrastructure-style failures record the current backtrace by
    /// default; validation-style ones do not.
    fn captures_trace_by_default(&self) -> bool {
        matches!(self, Self::Api | Self::Network | Self::Unknown)
    }
}

/// A business-logic failure carrying an error code, the parameters its
/// message was rendered from, optional data, and an optional trace.
///
/// The human message is rendered once at construction and doubles as the
/// `Display` text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiFailure {
    kind: FailureKind,
    message: String,
    message_params: MessageParams,
    data: Option<Value>,
    stack_trace: Option<String>,
}

impl ApiFailure {
    fn new(kind: FailureKind, message_params: MessageParams) -> Self {
        let message = kind.error_code().render_message(&message_params);
        let stack_trace = kind
            .captures_trace_by_default()
            .then(|| Backtrace::force_capture().to_string());

        debug!(
            code = kind.error_code().code(),
            kind = ?kind,
            %message,
            "constructed api failure"
        );

        Self {
            kind,
            message,
            message_params,
            data: None,
            stack_trace,
        }
    }

    /// Input validation failure; no trace by default.
    pub fn validation(reason: impl ToString) -> Self {
        Self::new(
            FailureKind::Validation,
            MessageParams::new().with("reason", reason),
        )
    }

    /// Lookup failure for a named entity; no trace by default.
    pub fn entity_not_found(entity_name: impl ToString, identifier: impl ToString) -> Self {
        Self::new(
            FailureKind::EntityNotFound,
            MessageParams::new()
                .with("entity_name", entity_name)
                .with("identifier", identifier),
        )
    }

    /// Downstream API call failure; captures a trace by default.
    pub fn api(message: impl ToString) -> Self {
        Self::new(FailureKind::Api, MessageParams::new().with("message", message))
    }

    /// Network failure; captures a trace by default.
    pub fn network(message: impl ToString) -> Self {
        Self::new(
            FailureKind::Network,
            MessageParams::new().with("message", message),
        )
    }

    /// Operation not permitted in the current state; no trace by default.
    pub fn illegal_operation(reason: impl ToString) -> Self {
        Self::new(
            FailureKind::IllegalOperation,
            MessageParams::new().with("reason", reason),
        )
    }

    /// Catch-all failure; captures a trace by default and substitutes a
    /// generic message when none is given.
    pub fn unknown(message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| UNKNOWN_FAILURE_MESSAGE.to_string());
        Self::new(
            FailureKind::Unknown,
            MessageParams::new().with("message", message),
        )
    }

    /// Wrap an arbitrary error at the process boundary. Everything the
    /// closed set does not recognize must pass through here before a
    /// payload is produced.
    pub fn wrap(source: impl fmt::Display) -> Self {
        Self::unknown(Some(source.to_string()))
    }

    /// Attach response data, chainable.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Override the recorded trace.
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Drop any recorded trace.
    pub fn without_stack_trace(mut self) -> Self {
        self.stack_trace = None;
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn error_code(&self) -> &'static ErrorCode {
        self.kind.error_code()
    }

    /// The message rendered at construction.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn message_params(&self) -> &MessageParams {
        &self.message_params
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    /// Convert into the standardized envelope. All failure kinds share this
    /// one conversion path.
    pub fn to_response_payload(&self) -> ResponsePayload {
        ResponsePayloadBuilder::from_failure(self)
            .build()
            .expect("from_failure seeds the required code and description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{ErrorSeverity, UserLevel};
    use serde_json::json;

    #[test]
    fn test_validation_failure_message() {
        let failure = ApiFailure::validation("username required");
        assert_eq!(failure.message(), "Validation failed: username required");
        assert_eq!(failure.to_string(), "Validation failed: username required");
        assert_eq!(failure.error_code().code(), "FUN999999993");
    }

    #[test]
    fn test_entity_not_found_message() {
        let failure = ApiFailure::entity_not_found("user", 42);
        assert_eq!(
            failure.message(),
            "Entity not found: user with identifier 42"
        );
        assert_eq!(failure.message_params().get("identifier"), Some("42"));
    }

    #[test]
    fn test_default_trace_policy() {
        assert!(ApiFailure::validation("x").stack_trace().is_none());
        assert!(ApiFailure::entity_not_found("user", 1).stack_trace().is_none());
        assert!(ApiFailure::illegal_operation("x").stack_trace().is_none());

        assert!(ApiFailure::api("timeout").stack_trace().is_some());
        assert!(ApiFailure::network("refused").stack_trace().is_some());
        assert!(ApiFailure::unknown(None).stack_trace().is_some());
    }

    #[test]
    fn test_trace_policy_overrides() {
        let traced = ApiFailure::validation("x").with_stack_trace("manual trace");
        assert_eq!(traced.stack_trace(), Some("manual trace"));

        let silent = ApiFailure::api("timeout").without_stack_trace();
        assert!(silent.stack_trace().is_none());
    }

    #[test]
    fn test_unknown_default_message() {
        let failure = ApiFailure::unknown(None);
        assert_eq!(
            failure.message(),
            "Unknown error: An unexpected error occurred"
        );
        assert_eq!(failure.error_code().severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn test_wrap_arbitrary_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let failure = ApiFailure::wrap(io_err);
        assert_eq!(failure.kind(), FailureKind::Unknown);
        assert_eq!(failure.error_code().code(), "FUN999999999");
        assert_eq!(failure.message(), "Unknown error: disk on fire");
        assert!(failure.stack_trace().is_some());
    }

    #[test]
    fn test_to_response_payload_copies_fields() {
        let failure = ApiFailure::validation("username required")
            .with_data(json!({"field": "username"}))
            .with_stack_trace("trace here");
        let payload = failure.to_response_payload();

        assert_eq!(payload.error_code(), "FUN999999993");
        assert_eq!(payload.error_desc(), "Validation failed: username required");
        assert_eq!(payload.data(), Some(&json!({"field": "username"})));
        assert_eq!(payload.stack_trace(), Some("trace here"));
    }

    #[test]
    fn test_payload_redacts_trace_below_developer() {
        let payload = ApiFailure::network("connection refused").to_response_payload();

        let general = payload.to_value(UserLevel::GeneralUser);
        assert!(!general.as_object().unwrap().contains_key("stackTrace"));

        let developer = payload.to_value(UserLevel::Developer);
        assert!(developer.as_object().unwrap().contains_key("stackTrace"));
    }

    #[test]
    fn test_failure_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ApiFailure::validation("x"));
    }
}
