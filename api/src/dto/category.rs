//! Category DTOs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use ft_core::domain::entities::{CategoryKind, NewCategory};
use ft_core::validation::{Constraint, FieldSpec, ObjectSchema, RequestSchema, Rule, Schema};

/// `#rrggbb`
static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

/// Body of `POST /api/v1/categories`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub kind: CategoryKind,
    pub color: Option<String>,
}

impl RequestSchema for CreateCategoryRequest {
    fn schema() -> Schema {
        let kinds = CategoryKind::ALL.iter().map(|k| k.to_string()).collect();

        ObjectSchema::new()
            .field(
                FieldSpec::string("name")
                    .rule(Rule::IsNotEmpty)
                    .rule(Rule::MaxLength(50)),
            )
            .field(FieldSpec::string("kind").rule(Rule::IsIn(kinds)))
            .field(
                FieldSpec::string("color").optional().rule(
                    Constraint::new(Rule::Matches(HEX_COLOR_REGEX.clone()))
                        .with_message("color must be a hex colour such as #ff8800"),
                ),
            )
            .into()
    }
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            name: request.name,
            kind: request.kind,
            color: request.color,
        }
    }
}
