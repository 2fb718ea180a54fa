//! Request body validation gate.
//!
//! Interprets a [`Schema`] against a decoded JSON body and either returns the
//! coerced body (declared fields only) or a `VALIDATION_FAILED` descriptor
//! listing every invalid field.

use ft_shared::config::{ValidationConfig, REDACTED_VALUE};
use ft_shared::errors::FieldError;
use serde_json::{Map, Value};

use super::constraints::{check, coerce, matches_type, normalize};
use super::schema::{FieldSpec, FieldType, ObjectSchema, Schema};
use crate::errors::FailureDescriptor;

/// Property path reported when the body itself has the wrong shape
pub const ROOT_PROPERTY: &str = "$";

/// Rule name reported for undeclared properties
pub const WHITELIST_RULE: &str = "whitelistValidation";

/// Stateless validator; one instance is shared by every request
#[derive(Debug, Clone, Default)]
pub struct ValidationGate {
    config: ValidationConfig,
}

impl ValidationGate {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate `raw` against `schema`.
    ///
    /// Primitive schemas return the raw value unchanged.
    pub fn validate(&self, raw: &Value, schema: &Schema) -> Result<Value, FailureDescriptor> {
        let object_schema = match schema {
            Schema::Primitive(_) => return Ok(raw.clone()),
            Schema::Object(object_schema) => object_schema,
        };

        let Some(input) = raw.as_object() else {
            let error = FieldError::new(ROOT_PROPERTY, self.redact(raw.clone()))
                .with_constraint("isObject", "request body must be an object");
            return Err(FailureDescriptor::validation_failed(vec![error]));
        };

        let mut errors = Vec::new();
        let output = self.validate_object(input, object_schema, "", &mut errors);

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            tracing::debug!(invalid_fields = errors.len(), "request body failed validation");
            Err(FailureDescriptor::validation_failed(errors))
        }
    }

    fn validate_object(
        &self,
        input: &Map<String, Value>,
        schema: &ObjectSchema,
        prefix: &str,
        errors: &mut Vec<FieldError>,
    ) -> Map<String, Value> {
        let mut output = Map::new();

        for spec in schema.fields() {
            let raw = input.get(&spec.name);
            if spec.optional && raw.map_or(true, Value::is_null) {
                continue;
            }

            let path = join_path(prefix, &spec.name);
            let raw = raw.cloned().unwrap_or(Value::Null);
            let mut field_error = FieldError::new(path.clone(), self.reported_value(spec, &raw));

            let value = if self.config.implicit_conversion {
                coerce(&spec.field_type, raw)
            } else {
                raw
            };
            let checked = self.check_field(spec, value, &path, &mut field_error);

            if field_error.is_empty() {
                output.insert(spec.name.clone(), checked);
            } else {
                errors.push(field_error);
            }
        }

        if self.config.forbid_unknown_fields {
            for (key, value) in input {
                if schema.get(key).is_none() {
                    let error = FieldError::new(join_path(prefix, key), self.redact_field(key, value))
                        .with_constraint(WHITELIST_RULE, format!("property {} should not exist", key));
                    errors.push(error);
                }
            }
        }

        output
    }

    /// Run the type check, nested validation and declared constraints for
    /// one field, returning the normalized value
    fn check_field(
        &self,
        spec: &FieldSpec,
        value: Value,
        path: &str,
        field_error: &mut FieldError,
    ) -> Value {
        for constraint in &spec.constraints {
            if !check(&constraint.rule, &value) {
                field_error.add_constraint(constraint.name(), constraint.message_for(&spec.name));
            }
        }

        if !matches_type(&spec.field_type, &value) {
            if let Some((rule, tail)) = spec.field_type.type_rule() {
                field_error.add_constraint(rule, format!("{} {}", spec.name, tail));
            }
            return value;
        }

        match (&spec.field_type, value) {
            (FieldType::Object(schema), Value::Object(map)) => {
                let mut children = Vec::new();
                let output = self.validate_object(&map, schema, path, &mut children);
                field_error.children = children;
                Value::Object(output)
            }
            (FieldType::Array(item_type), Value::Array(items)) => {
                self.check_items(&spec.name, item_type, items, path, field_error)
            }
            (field_type, value) => normalize(field_type, value),
        }
    }

    fn check_items(
        &self,
        name: &str,
        item_type: &FieldType,
        items: Vec<Value>,
        path: &str,
        field_error: &mut FieldError,
    ) -> Value {
        let mut output = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let item_path = format!("{}[{}]", path, index);
            match item_type {
                FieldType::Object(schema) => match item {
                    Value::Object(map) => {
                        let mut nested = Vec::new();
                        let normalized = self.validate_object(&map, schema, &item_path, &mut nested);
                        if nested.is_empty() {
                            output.push(Value::Object(normalized));
                        } else {
                            let rejected = self.redact(Value::Object(map));
                            field_error
                                .children
                                .push(FieldError::new(item_path, rejected).with_children(nested));
                        }
                    }
                    other => {
                        field_error.children.push(
                            FieldError::new(item_path, self.redact(other)).with_constraint(
                                "isObject",
                                format!("each value in {} must be an object", name),
                            ),
                        );
                    }
                },
                _ if matches_type(item_type, &item) => output.push(normalize(item_type, item)),
                _ => {
                    if let Some((rule, tail)) = item_type.type_rule() {
                        field_error.add_constraint(rule, format!("each value in {} {}", name, tail));
                    }
                }
            }
        }

        Value::Array(output)
    }

    fn reported_value(&self, spec: &FieldSpec, raw: &Value) -> Value {
        if spec.sensitive || self.config.is_sensitive(&spec.name) {
            Value::String(REDACTED_VALUE.to_string())
        } else {
            self.redact(raw.clone())
        }
    }

    fn redact_field(&self, name: &str, value: &Value) -> Value {
        if self.config.is_sensitive(name) {
            Value::String(REDACTED_VALUE.to_string())
        } else {
            self.redact(value.clone())
        }
    }

    /// Replace sensitive properties anywhere inside a rejected value
    fn redact(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, nested)| {
                        let nested = self.redact_field(&key, &nested);
                        (key, nested)
                    })
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.redact(item)).collect())
            }
            other => other,
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
