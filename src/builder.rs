//! Staged builders for the payload value objects.
//!
//! Builders are single-use: setters consume and return the builder so
//! construction chains, with `?` surfacing any locally violated constraint
//! at the call site. Cross-field constraints are checked once, in `build`.

use chrono::{DateTime, FixedOffset, Utc};
use lazy_static::lazy_static;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::codes::common;
use crate::codes::{ErrorCode, MessageParams};
use crate::enums::SortDirection;
use crate::failure::ApiFailure;
use crate::payload::{OrderingPayload, PagingPayload, ResponsePayload};
use crate::validator;

lazy_static! {
    /// Offset stamped on responses when the caller does not supply one.
    pub static ref DEFAULT_OFFSET: FixedOffset = FixedOffset::east_opt(8 * 3600).unwrap();
}

/// Construction-time errors. These indicate a bug at the call site and are
/// never converted into response envelopes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid error code format: {0} (expected FUN followed by nine digits)")]
    InvalidErrorCode(String),

    #[error("ordering property must be set")]
    MissingProperty,

    #[error("ordering property cannot be empty")]
    EmptyProperty,

    #[error("page number cannot be negative: {0}")]
    NegativePage(i64),

    #[error("page size must be positive: {0}")]
    NonPositivePageSize(i64),

    #[error("total elements cannot be negative: {0}")]
    NegativeTotalElements(i64),

    #[error("total pages cannot be negative: {0}")]
    NegativeTotalPages(i64),

    #[error("all paging fields must be set: page, pageSize, totalElements, totalPages")]
    IncompletePaging,

    #[error("page {page} must be less than total pages {total_pages}")]
    PageOutOfRange { page: i64, total_pages: i64 },

    #[error(
        "invalid paging parameters: page={page}, pageSize={page_size}, \
         totalElements={total_elements}, totalPages={total_pages}"
    )]
    InvalidPaging {
        page: i64,
        page_size: i64,
        total_elements: i64,
        total_pages: i64,
    },

    #[error("error code and description are required")]
    MissingErrorFields,
}

/// Builder for [`OrderingPayload`].
#[derive(Debug, Default)]
pub struct OrderingPayloadBuilder {
    property: Option<String>,
    direction: SortDirection,
}

impl OrderingPayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the property to sort by. Rejects empty names at the call site.
    pub fn with_property(mut self, property: impl Into<String>) -> Result<Self, BuildError> {
        let property = property.into();
        if property.is_empty() {
            return Err(BuildError::EmptyProperty);
        }
        self.property = Some(property);
        Ok(self)
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn build(self) -> Result<OrderingPayload, BuildError> {
        let property = self.property.ok_or(BuildError::MissingProperty)?;
        Ok(OrderingPayload::new(property, self.direction))
    }
}

/// Builder for [`PagingPayload`].
///
/// Each scalar setter enforces its local bound immediately; `build` then
/// requires all four scalars and re-validates them together, which also
/// catches the page / totalPages relation no single setter can see.
#[derive(Debug, Default)]
pub struct PagingPayloadBuilder {
    page: Option<i64>,
    page_size: Option<i64>,
    total_elements: Option<i64>,
    total_pages: Option<i64>,
    orders: Vec<OrderingPayload>,
}

impl PagingPayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based page number.
    pub fn with_page(mut self, page: i64) -> Result<Self, BuildError> {
        if page < 0 {
            return Err(BuildError::NegativePage(page));
        }
        self.page = Some(page);
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: i64) -> Result<Self, BuildError> {
        if page_size <= 0 {
            return Err(BuildError::NonPositivePageSize(page_size));
        }
        self.page_size = Some(page_size);
        Ok(self)
    }

    pub fn with_total_elements(mut self, total_elements: i64) -> Result<Self, BuildError> {
        if total_elements < 0 {
            return Err(BuildError::NegativeTotalElements(total_elements));
        }
        self.total_elements = Some(total_elements);
        Ok(self)
    }

    pub fn with_total_pages(mut self, total_pages: i64) -> Result<Self, BuildError> {
        if total_pages < 0 {
            return Err(BuildError::NegativeTotalPages(total_pages));
        }
        self.total_pages = Some(total_pages);
        Ok(self)
    }

    /// Replace the accumulated orderings.
    pub fn with_orders(mut self, orders: Vec<OrderingPayload>) -> Self {
        self.orders = orders;
        self
    }

    /// Append one ordering.
    pub fn add_order(mut self, order: OrderingPayload) -> Self {
        self.orders.push(order);
        self
    }

    pub fn build(self) -> Result<PagingPayload, BuildError> {
        let (Some(page), Some(page_size), Some(total_elements), Some(total_pages)) = (
            self.page,
            self.page_size,
            self.total_elements,
            self.total_pages,
        ) else {
            return Err(BuildError::IncompletePaging);
        };

        let params = json!({
            "page": page,
            "pageSize": page_size,
            "totalElements": total_elements,
            "totalPages": total_pages,
        });
        if !validator::validate_paging(&params) {
            // Setters already bounded the individual fields, so the only
            // cross-field constraint left is the page / totalPages relation.
            if total_pages > 0 && page >= total_pages {
                return Err(BuildError::PageOutOfRange { page, total_pages });
            }
            return Err(BuildError::InvalidPaging {
                page,
                page_size,
                total_elements,
                total_pages,
            });
        }

        Ok(PagingPayload::new(
            page,
            page_size,
            total_elements,
            total_pages,
            self.orders,
        ))
    }
}

/// Builder for [`ResponsePayload`].
///
/// `messageId` and `messageDatetime` are seeded with a fresh v4 UUID and
/// the current time at [`struct@DEFAULT_OFFSET`], so only the error code and
/// description are required.
#[derive(Debug)]
pub struct ResponsePayloadBuilder {
    message_id: Uuid,
    message_datetime: DateTime<FixedOffset>,
    error_code: Option<String>,
    error_desc: Option<String>,
    data: Option<Value>,
    paging: Option<PagingPayload>,
    stack_trace: Option<String>,
}

impl Default for ResponsePayloadBuilder {
    fn default() -> Self {
        Self {
            message_id: Uuid::new_v4(),
            message_datetime: Utc::now().with_timezone(&*DEFAULT_OFFSET),
            error_code: None,
            error_desc: None,
            data: None,
            paging: None,
            stack_trace: None,
        }
    }
}

impl ResponsePayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Success envelope: the builtin success code and description, with
    /// optional data, in one call.
    pub fn success(data: Option<Value>) -> Self {
        let mut builder = Self::new().from_error(&common::SUCCESS, &MessageParams::new());
        builder.data = data;
        builder
    }

    /// Set code and description from an [`ErrorCode`] and its rendered
    /// template in one call. The code was validated at construction, so no
    /// re-validation is needed here.
    pub fn from_error(mut self, error_code: &ErrorCode, params: &MessageParams) -> Self {
        self.error_code = Some(error_code.code().to_string());
        self.error_desc = Some(error_code.render_message(params));
        self
    }

    /// Seed a builder from a domain failure: code, rendered message, data
    /// and trace are copied across.
    pub fn from_failure(failure: &ApiFailure) -> Self {
        let mut builder = Self::new();
        builder.error_code = Some(failure.error_code().code().to_string());
        builder.error_desc = Some(failure.message().to_string());
        builder.data = failure.data().cloned();
        builder.stack_trace = failure.stack_trace().map(str::to_string);
        builder
    }

    pub fn with_message_id(mut self, message_id: Uuid) -> Self {
        self.message_id = message_id;
        self
    }

    /// Set the timestamp. `DateTime<FixedOffset>` always carries an
    /// explicit offset, so offset-awareness holds by construction.
    pub fn with_message_datetime(mut self, message_datetime: DateTime<FixedOffset>) -> Self {
        self.message_datetime = message_datetime;
        self
    }

    /// Set the error code string, re-validating the FUN pattern.
    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Result<Self, BuildError> {
        let error_code = error_code.into();
        if !validator::validate_error_code(&error_code) {
            return Err(BuildError::InvalidErrorCode(error_code));
        }
        self.error_code = Some(error_code);
        Ok(self)
    }

    pub fn with_error_desc(mut self, error_desc: impl Into<String>) -> Self {
        self.error_desc = Some(error_desc.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_paging(mut self, paging: PagingPayload) -> Self {
        self.paging = Some(paging);
        self
    }

    /// Record a trace. Serialization reveals it only to the developer tier.
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn build(self) -> Result<ResponsePayload, BuildError> {
        let (Some(error_code), Some(error_desc)) = (self.error_code, self.error_desc) else {
            return Err(BuildError::MissingErrorFields);
        };

        Ok(ResponsePayload::new(
            self.message_id,
            self.message_datetime,
            error_code,
            error_desc,
            self.data,
            self.paging,
            self.stack_trace,
        ))
    }
}
