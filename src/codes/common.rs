//! Builtin error codes shared by every service using this envelope.
//!
//! Code literals are known-good, so construction cannot fail; the
//! `unwrap` here runs once per process inside the lazy initializer.

use lazy_static::lazy_static;

use super::registry::{CodeRegistry, RegistryError};
use super::ErrorCode;
use crate::enums::ErrorSeverity;

lazy_static! {
    /// Successful operation
    pub static ref SUCCESS: ErrorCode = ErrorCode::new(
        "FUN006600001",
        ErrorSeverity::Info,
        "Operation successful",
    )
    .unwrap();

    /// Requested entity does not exist
    pub static ref ENTITY_NOT_FOUND: ErrorCode = ErrorCode::new(
        "FUN999800001",
        ErrorSeverity::Warning,
        "Entity not found: {entity_name} with identifier {identifier}",
    )
    .unwrap();

    /// Input validation failed
    pub static ref VALIDATION_ERROR: ErrorCode = ErrorCode::new(
        "FUN999999993",
        ErrorSeverity::Warning,
        "Validation failed: {reason}",
    )
    .unwrap();

    /// Downstream API call failed
    pub static ref API_ERROR: ErrorCode = ErrorCode::new(
        "FUN999999994",
        ErrorSeverity::Error,
        "API call failed: {message}",
    )
    .unwrap();

    /// Network connectivity failure
    pub static ref NETWORK_ERROR: ErrorCode = ErrorCode::new(
        "FUN999999995",
        ErrorSeverity::Error,
        "Network connection failed: {message}",
    )
    .unwrap();

    /// Operation not permitted in the current state
    pub static ref ILLEGAL_OPERATION: ErrorCode = ErrorCode::new(
        "FUN999900001",
        ErrorSeverity::Error,
        "Illegal operation: {reason}",
    )
    .unwrap();

    /// Catch-all for anything not otherwise classified
    pub static ref UNKNOWN_ERROR: ErrorCode = ErrorCode::new(
        "FUN999999999",
        ErrorSeverity::Fatal,
        "Unknown error: {message}",
    )
    .unwrap();
}

/// All builtin codes, in registration order.
pub fn builtin_codes() -> Vec<ErrorCode> {
    vec![
        SUCCESS.clone(),
        ENTITY_NOT_FOUND.clone(),
        VALIDATION_ERROR.clone(),
        API_ERROR.clone(),
        NETWORK_ERROR.clone(),
        ILLEGAL_OPERATION.clone(),
        UNKNOWN_ERROR.clone(),
    ]
}

/// Register every builtin code into the given registry.
///
/// Call this before request handling begins; the global registry does so
/// in its initializer.
pub fn register_builtin_codes(registry: &CodeRegistry) -> Result<(), RegistryError> {
    for code in builtin_codes() {
        registry.register(code)?;
    }
    Ok(())
}
