//! Standardized API response envelopes with FUN-prefixed error codes.
//!
//! Every endpoint emits the same envelope: message id, offset-carrying
//! timestamp, error code, human description, optional data, optional
//! pagination. Diagnostic traces are recorded internally and revealed only
//! to developer-tier callers at serialization time.
//!
//! ```
//! use funapis_response::{ApiFailure, ResponsePayloadBuilder, UserLevel};
//! use serde_json::json;
//!
//! // Success envelope
//! let ok = ResponsePayloadBuilder::success(Some(json!({"id": 1})))
//!     .build()
//!     .unwrap();
//! assert_eq!(ok.to_value(UserLevel::GeneralUser)["errorCode"], "FUN006600001");
//!
//! // Failure envelope via the typed failure set
//! let payload = ApiFailure::validation("username required").to_response_payload();
//! assert_eq!(
//!     payload.to_value(UserLevel::GeneralUser)["errorDesc"],
//!     "Validation failed: username required"
//! );
//! ```

pub mod builder;
pub mod codes;
pub mod enums;
pub mod failure;
pub mod payload;
pub mod validator;

pub use builder::{
    BuildError, OrderingPayloadBuilder, PagingPayloadBuilder, ResponsePayloadBuilder,
};
pub use codes::registry::{registry, CodeRegistry, DuplicatePolicy, RegistryError};
pub use codes::{common, ErrorCode, MessageParams};
pub use enums::{ErrorSeverity, SortDirection, UserLevel};
pub use failure::{ApiFailure, FailureKind};
pub use payload::{OrderingPayload, PagingPayload, ResponsePayload};
