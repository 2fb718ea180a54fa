//! End-to-end tests for the request pipeline: validation gate, success
//! envelope and exception filter.

use std::sync::Arc;

use actix_web::{test, web, App, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use ft_api::error::ApiError;
use ft_api::extract::Validated;
use ft_api::middleware::{ExceptionFilter, ResponseEnvelope};
use ft_core::errors::FailureDescriptor;
use ft_core::pipeline::{ExceptionNormalizer, LogLevel, MemoryFailureLogger, NO_TRACE_PLACEHOLDER};
use ft_core::validation::{
    Constraint, FieldSpec, ObjectSchema, RequestSchema, Rule, Schema, ValidationGate,
};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    #[allow(dead_code)]
    password: String,
}

impl RequestSchema for LoginRequest {
    fn schema() -> Schema {
        ObjectSchema::new()
            .field(
                FieldSpec::string("email")
                    .rule(Constraint::new(Rule::IsEmail).with_message("Email must be valid")),
            )
            .field(FieldSpec::string("password").rule(Rule::IsNotEmpty))
            .into()
    }
}

async fn login(body: Validated<LoginRequest>) -> HttpResponse {
    HttpResponse::Ok().json(json!({"email": body.email}))
}

async fn get_item() -> HttpResponse {
    HttpResponse::Ok().json(json!({"id": 1, "name": "Groceries"}))
}

async fn delete_item() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn plain_text() -> &'static str {
    "pong"
}

async fn text_number() -> &'static str {
    "42"
}

async fn text_boolean() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("true")
}

async fn text_blank() -> &'static str {
    "   "
}

async fn echo(body: Validated<Value>) -> HttpResponse {
    HttpResponse::Ok().json(body.into_inner())
}

async fn admin() -> Result<HttpResponse, ApiError> {
    Err(FailureDescriptor::forbidden("Forbidden resource").into())
}

async fn reports() -> Result<HttpResponse, ApiError> {
    Err(anyhow::anyhow!("connection to ledger database reset").into())
}

async fn misreported() -> Result<HttpResponse, ApiError> {
    Err(FailureDescriptor::new(302, "moved somewhere").into())
}

async fn crash() -> HttpResponse {
    panic!("ledger index out of bounds")
}

async fn teapot() -> HttpResponse {
    HttpResponse::ImATeapot().finish()
}

macro_rules! pipeline_app {
    ($logger:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(ValidationGate::default()))
                .wrap(ResponseEnvelope::new())
                .wrap(ExceptionFilter::new(ExceptionNormalizer::new($logger.clone())))
                .route("/auth/login", web::post().to(login))
                .route("/items/1", web::get().to(get_item))
                .route("/items/1", web::delete().to(delete_item))
                .route("/ping", web::get().to(plain_text))
                .route("/text/number", web::get().to(text_number))
                .route("/text/boolean", web::get().to(text_boolean))
                .route("/text/blank", web::get().to(text_blank))
                .route("/echo", web::post().to(echo))
                .route("/admin", web::get().to(admin))
                .route("/reports", web::get().to(reports))
                .route("/misreported", web::get().to(misreported))
                .route("/crash", web::get().to(crash))
                .route("/teapot", web::get().to(teapot))
                .default_service(web::route().to(|| async {
                    Err::<HttpResponse, _>(ApiError::not_found("Route not found"))
                })),
        )
        .await
    };
}

#[actix_web::test]
async fn test_invalid_email_is_rejected_with_field_errors() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "not-an-email", "password": "ab"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    assert_eq!(body["error"]["message"], "Validation failed");
    assert_eq!(body["error"]["statusCode"], 400);
    assert_eq!(body["error"]["path"], "/auth/login");
    assert_eq!(body["error"]["method"], "POST");
    assert_eq!(
        body["error"]["errors"],
        json!([{
            "property": "email",
            "value": "not-an-email",
            "constraints": {"isEmail": "Email must be valid"}
        }])
    );

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Info);
}

#[actix_web::test]
async fn test_valid_login_reaches_handler() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "jane@example.com", "password": "ab"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({"email": "jane@example.com"}));
    assert!(logger.is_empty());
}

#[actix_web::test]
async fn test_unknown_property_is_rejected() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "jane@example.com", "password": "secret1", "hacked": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    let errors = body["error"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["property"], "hacked");
    assert_eq!(
        errors[0]["constraints"]["whitelistValidation"],
        "property hacked should not exist"
    );
}

#[actix_web::test]
async fn test_success_envelope_wraps_handler_data() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let req = test::TestRequest::get().uri("/items/1?expand=tags").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({"id": 1, "name": "Groceries"}));
    assert_eq!(body["message"], "Operation successful");
    assert_eq!(body["path"], "/items/1?expand=tags");
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[actix_web::test]
async fn test_empty_and_text_bodies_are_enveloped() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::delete().uri("/items/1").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], Value::Null);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], "pong");
}

#[actix_web::test]
async fn test_text_bodies_keep_their_type() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    for (uri, expected) in [
        ("/text/number", json!("42")),
        ("/text/boolean", json!("true")),
        ("/text/blank", json!("   ")),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], expected, "{}", uri);
    }
}

#[actix_web::test]
async fn test_untyped_body_skips_validation() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let payload = json!([{"anything": true}, 3, "x"]);
    let req = test::TestRequest::post().uri("/echo").set_json(&payload).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"], payload);
}

#[actix_web::test]
async fn test_forbidden_descriptor_derives_code() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
    assert_eq!(resp.status(), 403);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "AUTH_FORBIDDEN");
    assert_eq!(body["error"]["message"], "Forbidden resource");
    assert_eq!(body["error"]["method"], "GET");
    assert!(body["error"].get("errors").is_none());

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Warn);
}

#[actix_web::test]
async fn test_unrecognized_fault_is_masked() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/reports").to_request()).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["error"]["message"], "Internal server error");
    assert!(!body.to_string().contains("ledger database"));

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Error);
    assert!(records[0].message.contains("connection to ledger database reset"));
    assert!(records[0].context.trace.is_some());
}

#[actix_web::test]
async fn test_malformed_descriptor_becomes_500() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/misreported").to_request()).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["error"]["message"], "Internal server error");
}

#[actix_web::test]
async fn test_handler_panic_is_normalized() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/crash").to_request()).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].message.contains("ledger index out of bounds"));
    assert_eq!(records[0].context.trace.as_deref(), Some(NO_TRACE_PLACEHOLDER));
}

#[actix_web::test]
async fn test_bare_error_status_is_enveloped() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/teapot").to_request()).await;
    assert_eq!(resp.status(), 418);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["statusCode"], 418);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"].as_str().unwrap().starts_with("Malformed JSON body"));
}

#[actix_web::test]
async fn test_empty_body_reports_required_fields() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let req = test::TestRequest::post().uri("/auth/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    let properties: Vec<&str> = body["error"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["property"].as_str().unwrap())
        .collect();
    assert_eq!(properties, vec!["email", "password"]);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found_envelope() {
    let logger = Arc::new(MemoryFailureLogger::new());
    let app = pipeline_app!(logger);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["path"], "/nowhere");
}
