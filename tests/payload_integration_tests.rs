use anyhow::Result;
use serde_json::{json, Value};

use funapis_response::{
    common, registry, ApiFailure, BuildError, CodeRegistry, ErrorCode, ErrorSeverity,
    MessageParams, OrderingPayloadBuilder, PagingPayloadBuilder, ResponsePayloadBuilder,
    SortDirection, UserLevel,
};

// Helper: serialize a payload and hand back the JSON object
fn serialize(payload: &funapis_response::ResponsePayload, level: UserLevel) -> Value {
    let value = payload.to_value(level);
    assert!(value.is_object());
    value
}

#[test]
fn success_envelope_carries_data_and_success_code() -> Result<()> {
    let payload = ResponsePayloadBuilder::success(Some(json!({"id": 1}))).build()?;

    let value = serialize(&payload, UserLevel::GeneralUser);
    assert_eq!(value["errorCode"], common::SUCCESS.code());
    assert_eq!(value["data"], json!({"id": 1}));
    assert_eq!(value["errorDesc"], "Operation successful");
    Ok(())
}

#[test]
fn validation_failure_renders_reason_into_envelope() {
    let payload = ApiFailure::validation("username required").to_response_payload();

    let value = serialize(&payload, UserLevel::GeneralUser);
    assert_eq!(value["errorCode"], "FUN999999993");
    assert_eq!(value["errorDesc"], "Validation failed: username required");
}

#[test]
fn pagination_rejects_page_equal_to_total_pages() {
    let result = PagingPayloadBuilder::new()
        .with_page(5)
        .and_then(|b| b.with_page_size(10))
        .and_then(|b| b.with_total_elements(50))
        .and_then(|b| b.with_total_pages(5))
        .and_then(|b| b.build());

    let err = result.unwrap_err();
    assert_eq!(
        err,
        BuildError::PageOutOfRange {
            page: 5,
            total_pages: 5
        }
    );
}

#[test]
fn stack_trace_visible_to_developer_tier_only() -> Result<()> {
    let payload = ResponsePayloadBuilder::new()
        .with_error_code("FUN999999994")?
        .with_error_desc("API call failed: upstream timeout")
        .with_stack_trace("at handler::fetch\nat runtime::poll")
        .build()?;

    let general = serialize(&payload, UserLevel::GeneralUser);
    assert!(!general.as_object().unwrap().contains_key("stackTrace"));

    let operator = serialize(&payload, UserLevel::Operator);
    assert!(!operator.as_object().unwrap().contains_key("stackTrace"));

    let admin = serialize(&payload, UserLevel::Admin);
    assert!(!admin.as_object().unwrap().contains_key("stackTrace"));

    let developer = serialize(&payload, UserLevel::Developer);
    assert_eq!(
        developer["stackTrace"],
        "at handler::fetch\nat runtime::poll"
    );
    Ok(())
}

#[test]
fn malformed_code_never_reaches_a_registry() {
    let err = ErrorCode::new("INVALID", ErrorSeverity::Error, "whatever").unwrap_err();
    assert_eq!(err, BuildError::InvalidErrorCode("INVALID".to_string()));
    assert!(registry().get("INVALID").is_none());
}

#[test]
fn full_envelope_with_paging_and_orders() -> Result<()> {
    let paging = PagingPayloadBuilder::new()
        .with_page(2)?
        .with_page_size(25)?
        .with_total_elements(120)?
        .with_total_pages(5)?
        .add_order(
            OrderingPayloadBuilder::new()
                .with_property("createdAt")?
                .with_direction(SortDirection::Desc)
                .build()?,
        )
        .add_order(
            OrderingPayloadBuilder::new()
                .with_property("name")?
                .build()?,
        )
        .build()?;

    let payload = ResponsePayloadBuilder::success(Some(json!([{"id": 7}])))
        .with_paging(paging)
        .build()?;

    let value = serialize(&payload, UserLevel::GeneralUser);
    assert_eq!(value["paging"]["page"], 2);
    assert_eq!(value["paging"]["pageSize"], 25);
    assert_eq!(value["paging"]["totalElements"], 120);
    assert_eq!(value["paging"]["totalPages"], 5);

    let orders = value["paging"]["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0], json!({"property": "createdAt", "direction": "DESC"}));
    assert_eq!(orders[1], json!({"property": "name", "direction": "ASC"}));
    Ok(())
}

#[test]
fn envelope_wire_shape_is_stable() -> Result<()> {
    let payload = ResponsePayloadBuilder::success(None).build()?;
    let value = serialize(&payload, UserLevel::GeneralUser);
    let obj = value.as_object().unwrap();

    // Required keys, nothing optional without content
    assert_eq!(obj.len(), 4);
    let message_id = obj["messageId"].as_str().unwrap();
    assert_eq!(uuid::Uuid::parse_str(message_id)?.get_version_num(), 4);

    let datetime = obj["messageDatetime"].as_str().unwrap();
    assert!(funapis_response::validator::validate_datetime(datetime));

    let code = obj["errorCode"].as_str().unwrap();
    assert!(funapis_response::validator::validate_error_code(code));
    Ok(())
}

#[test]
fn boundary_wraps_unrecognized_errors_as_unknown() {
    // What a boundary handler does with an error the core does not know
    let raw = std::fmt::Error;
    let failure = ApiFailure::wrap(raw);
    let payload = failure.to_response_payload();

    assert_eq!(payload.error_code(), common::UNKNOWN_ERROR.code());
    assert_eq!(failure.error_code().severity(), ErrorSeverity::Fatal);

    // A general user sees a structured envelope, never a raw trace
    let value = serialize(&payload, UserLevel::GeneralUser);
    assert!(value["errorDesc"].as_str().unwrap().starts_with("Unknown error:"));
    assert!(!value.as_object().unwrap().contains_key("stackTrace"));

    // The developer tier still gets the captured trace
    let developer = serialize(&payload, UserLevel::Developer);
    assert!(developer.as_object().unwrap().contains_key("stackTrace"));
}

#[test]
fn custom_codes_registered_alongside_builtins() -> Result<()> {
    let registry = CodeRegistry::new();
    common::register_builtin_codes(&registry)?;

    let custom = ErrorCode::new(
        "FUN100200300",
        ErrorSeverity::Warning,
        "Quota exceeded for {user}",
    )?;
    registry.register(custom.clone())?;

    let found = registry.get("FUN100200300").unwrap();
    assert_eq!(found, custom);

    let payload = ResponsePayloadBuilder::new()
        .from_error(&found, &MessageParams::new().with("user", "alice"))
        .build()?;
    assert_eq!(payload.error_desc(), "Quota exceeded for alice");
    Ok(())
}

#[test]
fn failure_data_survives_conversion_and_serialization() {
    let payload = ApiFailure::entity_not_found("order", "ord-123")
        .with_data(json!({"orderId": "ord-123"}))
        .to_response_payload();

    let value = serialize(&payload, UserLevel::GeneralUser);
    assert_eq!(
        value["errorDesc"],
        "Entity not found: order with identifier ord-123"
    );
    assert_eq!(value["data"], json!({"orderId": "ord-123"}));
}
