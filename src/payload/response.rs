use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::types::PagingPayload;
use crate::enums::UserLevel;

/// The standardized envelope returned for every API call.
///
/// Immutable once built; construct through
/// [`ResponsePayloadBuilder`](crate::builder::ResponsePayloadBuilder) or by
/// converting an [`ApiFailure`](crate::failure::ApiFailure). The recorded
/// stack trace never appears on the wire unless the requester is serialized
/// at [`UserLevel::Developer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    message_id: Uuid,
    message_datetime: DateTime<FixedOffset>,
    error_code: String,
    error_desc: String,
    data: Option<Value>,
    paging: Option<PagingPayload>,
    stack_trace: Option<String>,
}

impl ResponsePayload {
    pub(crate) fn new(
        message_id: Uuid,
        message_datetime: DateTime<FixedOffset>,
        error_code: String,
        error_desc: String,
        data: Option<Value>,
        paging: Option<PagingPayload>,
        stack_trace: Option<String>,
    ) -> Self {
        Self {
            message_id,
            message_datetime,
            error_code,
            error_desc,
            data,
            paging,
            stack_trace,
        }
    }

    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    pub fn message_datetime(&self) -> DateTime<FixedOffset> {
        self.message_datetime
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    pub fn error_desc(&self) -> &str {
        &self.error_desc
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn paging(&self) -> Option<&PagingPayload> {
        self.paging.as_ref()
    }

    /// The recorded trace, regardless of level. Internal use only; wire
    /// output goes through [`to_value`](Self::to_value).
    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    /// Wire representation for the given requester level.
    ///
    /// `data` and `paging` appear only when present. `stackTrace` appears
    /// only when a trace was recorded and the level is exactly
    /// `Developer` (no "at least"): operators and admins see the same
    /// redacted envelope as general users.
    pub fn to_value(&self, user_level: UserLevel) -> Value {
        let mut result = Map::new();
        result.insert(
            "messageId".to_string(),
            Value::String(self.message_id.to_string()),
        );
        result.insert(
            "messageDatetime".to_string(),
            Value::String(self.message_datetime.to_rfc3339()),
        );
        result.insert(
            "errorCode".to_string(),
            Value::String(self.error_code.clone()),
        );
        result.insert(
            "errorDesc".to_string(),
            Value::String(self.error_desc.clone()),
        );

        if let Some(data) = &self.data {
            result.insert("data".to_string(), data.clone());
        }

        if let Some(paging) = &self.paging {
            result.insert("paging".to_string(), paging.to_value());
        }

        if let Some(trace) = &self.stack_trace {
            if user_level == UserLevel::Developer {
                result.insert("stackTrace".to_string(), Value::String(trace.clone()));
            }
        }

        Value::Object(result)
    }

    /// JSON string form of [`to_value`](Self::to_value).
    pub fn to_json(&self, user_level: UserLevel) -> String {
        self.to_value(user_level).to_string()
    }
}
