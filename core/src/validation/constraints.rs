//! Rule evaluation and type checks over decoded JSON values.

use chrono::{DateTime, NaiveDate};
use serde_json::{Number, Value};
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

use super::schema::{FieldType, Rule};

/// Evaluate a rule; values of the wrong JSON type never satisfy it
pub fn check(rule: &Rule, value: &Value) -> bool {
    match rule {
        Rule::IsNotEmpty => !matches!(value, Value::Null) && value.as_str() != Some(""),
        Rule::IsEmail => value.as_str().is_some_and(|s| s.validate_email()),
        Rule::IsUrl => value.as_str().is_some_and(|s| s.validate_url()),
        Rule::IsUuid => value.as_str().is_some_and(|s| Uuid::parse_str(s).is_ok()),
        Rule::IsDateString => value.as_str().is_some_and(is_iso_date),
        Rule::MinLength(min) => char_len(value).is_some_and(|len| len >= *min),
        Rule::MaxLength(max) => char_len(value).is_some_and(|len| len <= *max),
        Rule::Length { min, max } => char_len(value).is_some_and(|len| len >= *min && len <= *max),
        Rule::Min(min) => value.as_f64().is_some_and(|n| n >= *min),
        Rule::Max(max) => value.as_f64().is_some_and(|n| n <= *max),
        Rule::IsPositive => value.as_f64().is_some_and(|n| n > 0.0),
        Rule::IsIn(allowed) => value
            .as_str()
            .is_some_and(|s| allowed.iter().any(|candidate| candidate == s)),
        Rule::Matches(pattern) => value.as_str().is_some_and(|s| pattern.is_match(s)),
        Rule::ArrayMinSize(min) => value.as_array().is_some_and(|items| items.len() >= *min),
        Rule::ArrayMaxSize(max) => value.as_array().is_some_and(|items| items.len() <= *max),
    }
}

/// Whether `value` has the JSON shape `field_type` declares
pub fn matches_type(field_type: &FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Integer => is_integer(value),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Object(_) => value.is_object(),
        FieldType::Array(_) => value.is_array(),
        FieldType::Any => true,
    }
}

/// Implicit conversion of string inputs into the declared scalar type.
///
/// Values that cannot be converted are returned untouched so the type
/// check reports them.
pub fn coerce(field_type: &FieldType, value: Value) -> Value {
    match (field_type, value) {
        (FieldType::Number, Value::String(s)) => parse_number(&s).unwrap_or(Value::String(s)),
        (FieldType::Integer, Value::String(s)) => {
            let parsed = s.trim().parse::<i64>();
            parsed.map(Value::from).unwrap_or(Value::String(s))
        }
        (FieldType::Boolean, Value::String(s)) => {
            let parsed = parse_bool(&s);
            parsed.map(Value::Bool).unwrap_or(Value::String(s))
        }
        (FieldType::Array(item), Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .map(|element| coerce(item, element))
                .collect(),
        ),
        (_, value) => value,
    }
}

/// Canonical form of a value that already passed the type check.
///
/// Integral floats such as `3.0` satisfy `Integer` fields and are emitted as
/// integers so they deserialize into integer targets.
pub fn normalize(field_type: &FieldType, value: Value) -> Value {
    match (field_type, value) {
        (FieldType::Integer, Value::Number(n)) if !n.is_i64() && !n.is_u64() => {
            match n.as_f64() {
                Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Value::from(f as i64),
                _ => Value::Number(n),
            }
        }
        (_, value) => value,
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::from(n));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

fn char_len(value: &Value) -> Option<usize> {
    value.as_str().map(|s| s.chars().count())
}

fn is_iso_date(raw: &str) -> bool {
    DateTime::parse_from_rfc3339(raw).is_ok() || NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    #[test]
    fn test_not_empty() {
        assert!(check(&Rule::IsNotEmpty, &json!("x")));
        assert!(check(&Rule::IsNotEmpty, &json!(0)));
        assert!(!check(&Rule::IsNotEmpty, &json!("")));
        assert!(!check(&Rule::IsNotEmpty, &Value::Null));
    }

    #[test]
    fn test_email_and_url() {
        assert!(check(&Rule::IsEmail, &json!("jane@example.com")));
        assert!(!check(&Rule::IsEmail, &json!("not-an-email")));
        assert!(!check(&Rule::IsEmail, &json!(12)));
        assert!(check(&Rule::IsUrl, &json!("https://fintrack.dev/icons/food.svg")));
        assert!(!check(&Rule::IsUrl, &json!("food icon")));
    }

    #[test]
    fn test_lengths_count_characters() {
        assert!(check(&Rule::MinLength(2), &json!("€€")));
        assert!(!check(&Rule::MaxLength(1), &json!("€€")));
        assert!(check(&Rule::Length { min: 1, max: 3 }, &json!("abc")));
        assert!(!check(&Rule::MinLength(1), &json!(["a"])));
    }

    #[test]
    fn test_numeric_rules() {
        assert!(check(&Rule::Min(0.0), &json!(0)));
        assert!(!check(&Rule::Max(10.0), &json!(10.5)));
        assert!(check(&Rule::IsPositive, &json!(0.01)));
        assert!(!check(&Rule::IsPositive, &json!(0)));
        assert!(!check(&Rule::IsPositive, &json!("5")));
    }

    #[test]
    fn test_membership_pattern_and_dates() {
        let kinds = Rule::IsIn(vec!["income".to_string(), "expense".to_string()]);
        assert!(check(&kinds, &json!("income")));
        assert!(!check(&kinds, &json!("transfer")));

        let hex = Rule::Matches(Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());
        assert!(check(&hex, &json!("#ff8800")));
        assert!(!check(&hex, &json!("orange")));

        assert!(check(&Rule::IsDateString, &json!("2026-03-01")));
        assert!(check(&Rule::IsDateString, &json!("2026-03-01T10:00:00Z")));
        assert!(!check(&Rule::IsDateString, &json!("yesterday")));

        assert!(check(&Rule::IsUuid, &json!("6f1c1f7e-2a4b-4d55-9b1a-3c0e2f9d7a10")));
        assert!(!check(&Rule::IsUuid, &json!("42")));
    }

    #[test]
    fn test_array_sizes() {
        assert!(check(&Rule::ArrayMinSize(1), &json!(["a"])));
        assert!(!check(&Rule::ArrayMaxSize(1), &json!(["a", "b"])));
        assert!(!check(&Rule::ArrayMinSize(0), &json!("a")));
    }

    #[test]
    fn test_type_checks() {
        assert!(matches_type(&FieldType::Integer, &json!(3)));
        assert!(matches_type(&FieldType::Integer, &json!(3.0)));
        assert!(!matches_type(&FieldType::Integer, &json!(3.5)));
        assert!(!matches_type(&FieldType::String, &Value::Null));
        assert!(matches_type(&FieldType::Any, &Value::Null));
    }

    #[test]
    fn test_integral_floats_normalize_to_integers() {
        let normalized = normalize(&FieldType::Integer, json!(3.0));
        assert_eq!(normalized, json!(3));
        assert!(normalized.is_i64());
        assert_eq!(normalize(&FieldType::Integer, json!(-2.0)), json!(-2));
        assert_eq!(normalize(&FieldType::Integer, json!(7)), json!(7));
        assert_eq!(normalize(&FieldType::Number, json!(3.0)), json!(3.0));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce(&FieldType::Number, json!("12")), json!(12));
        assert_eq!(coerce(&FieldType::Number, json!(" 12.5 ")), json!(12.5));
        assert_eq!(coerce(&FieldType::Number, json!("abc")), json!("abc"));
        assert_eq!(coerce(&FieldType::Number, json!("")), json!(""));
        assert_eq!(coerce(&FieldType::Integer, json!("7")), json!(7));
        assert_eq!(coerce(&FieldType::Integer, json!("7.5")), json!("7.5"));
        assert_eq!(coerce(&FieldType::Boolean, json!("false")), json!(false));
        assert_eq!(coerce(&FieldType::String, json!(5)), json!(5));
        assert_eq!(
            coerce(&FieldType::array_of(FieldType::Number), json!(["1", 2, "x"])),
            json!([1, 2, "x"])
        );
    }
}
