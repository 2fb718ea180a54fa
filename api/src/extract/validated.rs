//! Extractor running the validation gate on JSON request bodies.

use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use ft_core::validation::{RequestSchema, Schema, ValidationGate};

use crate::error::ApiError;

/// Body decoded as JSON, validated and coerced against `T::schema()`, then
/// deserialized into `T`.
///
/// Rejections are `ApiError`s, so they reach the exception filter like any
/// handler failure.
#[derive(Debug)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for Validated<T>
where
    T: RequestSchema + DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let gate = req
            .app_data::<web::Data<ValidationGate>>()
            .cloned()
            .unwrap_or_else(|| web::Data::new(ValidationGate::default()));
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = body.await?;
            let schema = T::schema();
            let raw = decode_body(&bytes, &schema)?;

            let coerced = gate.validate(&raw, &schema).map_err(ApiError::from)?;
            let value = serde_json::from_value(coerced)
                .map_err(|err| ApiError::bad_request(format!("Invalid request body: {}", err)))?;
            Ok(Validated(value))
        })
    }
}

/// Decode the raw body; an empty body is an empty object for object schemas
fn decode_body(bytes: &[u8], schema: &Schema) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(match schema {
            Schema::Object(_) => Value::Object(Default::default()),
            Schema::Primitive(_) => Value::Null,
        });
    }

    serde_json::from_slice(bytes)
        .map_err(|err| ApiError::bad_request(format!("Malformed JSON body: {}", err)))
}
