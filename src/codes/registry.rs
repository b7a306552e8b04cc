//! Process-wide error code registry.
//!
//! The registry is an explicitly owned object rather than hidden module
//! state: libraries and services create their own, or share the lazily
//! initialized global one (which registers every builtin code before it is
//! first read).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;
use thiserror::Error;
use tracing::{debug, warn};

use super::common;
use super::ErrorCode;

/// What `register` does when a code string is already mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Last write wins; the prior entry is replaced and returned.
    #[default]
    Overwrite,
    /// Duplicates are rejected and the registry is left unchanged.
    Reject,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("error code {0} is already registered")]
    DuplicateCode(String),
}

/// Concurrency-safe mapping from code string to [`ErrorCode`].
///
/// Insert, lookup and enumeration are all safe under concurrent access;
/// enumeration returns snapshots that stay valid while registration
/// continues elsewhere.
#[derive(Debug, Default)]
pub struct CodeRegistry {
    codes: RwLock<HashMap<String, ErrorCode>>,
    duplicate_policy: DuplicatePolicy,
}

impl CodeRegistry {
    /// Empty registry with the default (overwrite) duplicate policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            codes: RwLock::new(HashMap::new()),
            duplicate_policy,
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Register an error code under its code string.
    ///
    /// Under [`DuplicatePolicy::Overwrite`] this never fails and returns the
    /// replaced entry, if any. Under [`DuplicatePolicy::Reject`] a duplicate
    /// code is an error.
    pub fn register(&self, code: ErrorCode) -> Result<Option<ErrorCode>, RegistryError> {
        let mut codes = self.write();

        if codes.contains_key(code.code()) {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::DuplicateCode(code.code().to_string()));
                }
                DuplicatePolicy::Overwrite => {
                    warn!(code = code.code(), "replacing previously registered error code");
                }
            }
        }

        debug!(
            code = code.code(),
            severity = %code.severity(),
            "registered error code"
        );
        Ok(codes.insert(code.code().to_string(), code))
    }

    /// O(1) lookup; an unknown code is `None`, never an error.
    pub fn get(&self, code: &str) -> Option<ErrorCode> {
        self.read().get(code).cloned()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.read().contains_key(code)
    }

    /// Snapshot of all registered codes.
    pub fn all(&self) -> Vec<ErrorCode> {
        self.read().values().cloned().collect()
    }

    /// Snapshot of the full mapping.
    pub fn snapshot(&self) -> HashMap<String, ErrorCode> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ErrorCode>> {
        self.codes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ErrorCode>> {
        self.codes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: CodeRegistry = {
        let registry = CodeRegistry::new();
        common::register_builtin_codes(&registry)
            .expect("builtin error codes register cleanly");
        registry
    };
}

/// The process-wide registry.
///
/// Initialized on first access with every builtin code already registered,
/// so lookups never observe a partially populated registry.
pub fn registry() -> &'static CodeRegistry {
    &GLOBAL_REGISTRY
}
