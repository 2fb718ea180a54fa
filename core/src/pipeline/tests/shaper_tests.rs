//! Tests for `ResponseShaper`

use chrono::{TimeZone, Utc};
use ft_shared::types::DEFAULT_SUCCESS_MESSAGE;
use serde_json::{json, Value};

use crate::pipeline::ResponseShaper;

#[test]
fn test_shape_wraps_data_untouched() {
    let shaper = ResponseShaper::new();
    let data = json!({"id": 1, "name": "Groceries", "tags": ["food"]});

    let response = shaper.shape(data.clone(), "/api/v1/categories/1");

    assert!(response.success);
    assert_eq!(response.data, data);
    assert_eq!(response.message, DEFAULT_SUCCESS_MESSAGE);
    assert_eq!(response.path, "/api/v1/categories/1");
}

#[test]
fn test_shape_wire_shape() {
    let shaper = ResponseShaper::new();
    let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    let response = shaper.shape_at(json!([1, 2]), "/api/v1/items?page=2", timestamp);

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "success": true,
            "data": [1, 2],
            "message": "Operation successful",
            "timestamp": "2026-03-01T12:00:00Z",
            "path": "/api/v1/items?page=2"
        })
    );
}

const JSON: Option<&str> = Some("application/json");
const TEXT: Option<&str> = Some("text/plain; charset=utf-8");

#[test]
fn test_empty_body_becomes_null() {
    let response = ResponseShaper::new().shape_body(b"", None, "/logout");
    assert_eq!(response.data, Value::Null);
    assert_eq!(ResponseShaper::body_value(b"", TEXT), Value::Null);
    assert_eq!(ResponseShaper::body_value(b"  \n", JSON), Value::Null);
}

#[test]
fn test_json_body_is_decoded() {
    assert_eq!(ResponseShaper::body_value(br#"{"ok":true}"#, JSON), json!({"ok": true}));
    assert_eq!(ResponseShaper::body_value(b"42", JSON), json!(42));
    assert_eq!(ResponseShaper::body_value(b"null", JSON), Value::Null);
    assert_eq!(
        ResponseShaper::body_value(b"[1]", Some("application/vnd.fintrack+json")),
        json!([1])
    );
}

#[test]
fn test_text_body_is_kept_as_string() {
    assert_eq!(ResponseShaper::body_value(b"pong", TEXT), json!("pong"));
    assert_eq!(ResponseShaper::body_value(b"42", TEXT), json!("42"));
    assert_eq!(ResponseShaper::body_value(b"true", None), json!("true"));
    assert_eq!(ResponseShaper::body_value(b"   ", TEXT), json!("   "));
}

#[test]
fn test_malformed_json_body_is_kept_as_string() {
    assert_eq!(ResponseShaper::body_value(b"{oops", JSON), json!("{oops"));
}

#[test]
fn test_json_media_type_detection() {
    use crate::pipeline::shaper::is_json_media_type;

    assert!(is_json_media_type("application/json"));
    assert!(is_json_media_type("Application/JSON; charset=utf-8"));
    assert!(is_json_media_type("application/problem+json"));
    assert!(!is_json_media_type("text/plain"));
    assert!(!is_json_media_type("application/jsonp"));
}
