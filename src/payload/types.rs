use serde::Serialize;
use serde_json::{json, Value};

use crate::enums::SortDirection;

/// One sort criterion: a property name and a direction.
///
/// Immutable once built; construct through
/// [`OrderingPayloadBuilder`](crate::builder::OrderingPayloadBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderingPayload {
    property: String,
    direction: SortDirection,
}

impl OrderingPayload {
    pub(crate) fn new(property: String, direction: SortDirection) -> Self {
        Self { property, direction }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn to_value(&self) -> Value {
        json!({
            "property": self.property,
            "direction": self.direction.as_str(),
        })
    }
}

/// Pagination metadata embedded in a response envelope.
///
/// Immutable once built; construct through
/// [`PagingPayloadBuilder`](crate::builder::PagingPayloadBuilder), which
/// enforces the cross-field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingPayload {
    page: i64,
    page_size: i64,
    total_elements: i64,
    total_pages: i64,
    orders: Vec<OrderingPayload>,
}

impl PagingPayload {
    pub(crate) fn new(
        page: i64,
        page_size: i64,
        total_elements: i64,
        total_pages: i64,
        orders: Vec<OrderingPayload>,
    ) -> Self {
        Self {
            page,
            page_size,
            total_elements,
            total_pages,
            orders,
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn total_elements(&self) -> i64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn orders(&self) -> &[OrderingPayload] {
        &self.orders
    }

    /// Wire representation; `orders` keeps insertion order.
    pub fn to_value(&self) -> Value {
        json!({
            "page": self.page,
            "pageSize": self.page_size,
            "totalElements": self.total_elements,
            "totalPages": self.total_pages,
            "orders": self.orders.iter().map(OrderingPayload::to_value).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_to_value() {
        let order = OrderingPayload::new("createdAt".into(), SortDirection::Desc);
        assert_eq!(
            order.to_value(),
            json!({"property": "createdAt", "direction": "DESC"})
        );
    }

    #[test]
    fn test_paging_to_value_preserves_order_sequence() {
        let paging = PagingPayload::new(
            1,
            20,
            55,
            3,
            vec![
                OrderingPayload::new("name".into(), SortDirection::Asc),
                OrderingPayload::new("id".into(), SortDirection::Desc),
            ],
        );
        let value = paging.to_value();
        assert_eq!(value["page"], 1);
        assert_eq!(value["pageSize"], 20);
        assert_eq!(value["totalElements"], 55);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["orders"][0]["property"], "name");
        assert_eq!(value["orders"][1]["property"], "id");
    }

    #[test]
    fn test_serde_matches_to_value() {
        let paging = PagingPayload::new(0, 10, 0, 0, vec![]);
        let via_serde = serde_json::to_value(&paging).unwrap();
        assert_eq!(via_serde, paging.to_value());
    }
}
