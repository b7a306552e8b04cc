//! Immutable value objects making up the response envelope.

pub mod response;
pub mod types;

pub use response::ResponsePayload;
pub use types::{OrderingPayload, PagingPayload};
