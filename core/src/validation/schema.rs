//! Data-level schema descriptions interpreted by the validation gate.

use regex::Regex;

/// Untyped body shapes that bypass validation entirely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Any,
}

/// Target shape of a request body
#[derive(Debug, Clone)]
pub enum Schema {
    /// Escape hatch for untyped routes: the raw value is passed through
    Primitive(Primitive),
    /// Declared fields with per-field constraints
    Object(ObjectSchema),
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

/// Ordered list of declared fields
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// Declared type of a field
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object(ObjectSchema),
    Array(Box<FieldType>),
    Any,
}

impl FieldType {
    pub fn array_of(item: FieldType) -> Self {
        FieldType::Array(Box::new(item))
    }

    /// Rule name and message tail of the implicit type check
    pub(crate) fn type_rule(&self) -> Option<(&'static str, &'static str)> {
        match self {
            FieldType::String => Some(("isString", "must be a string")),
            FieldType::Number => Some((
                "isNumber",
                "must be a number conforming to the specified constraints",
            )),
            FieldType::Integer => Some(("isInt", "must be an integer number")),
            FieldType::Boolean => Some(("isBoolean", "must be a boolean value")),
            FieldType::Object(_) => Some(("isObject", "must be an object")),
            FieldType::Array(_) => Some(("isArray", "must be an array")),
            FieldType::Any => None,
        }
    }
}

/// A declared field with its constraints
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    /// Absent or null values are accepted and skipped
    pub optional: bool,
    /// Rejected values are redacted in error reports
    pub sensitive: bool,
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: false,
            sensitive: false,
            constraints: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn object(name: impl Into<String>, schema: ObjectSchema) -> Self {
        Self::new(name, FieldType::Object(schema))
    }

    pub fn array(name: impl Into<String>, item: FieldType) -> Self {
        Self::new(name, FieldType::array_of(item))
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Attach a constraint
    pub fn rule(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }
}

/// Built-in validation rules
#[derive(Debug, Clone)]
pub enum Rule {
    IsNotEmpty,
    IsEmail,
    IsUrl,
    IsUuid,
    IsDateString,
    MinLength(usize),
    MaxLength(usize),
    Length { min: usize, max: usize },
    Min(f64),
    Max(f64),
    IsPositive,
    IsIn(Vec<String>),
    Matches(Regex),
    ArrayMinSize(usize),
    ArrayMaxSize(usize),
}

impl Rule {
    /// Rule name reported in `constraints`
    pub fn name(&self) -> &'static str {
        match self {
            Rule::IsNotEmpty => "isNotEmpty",
            Rule::IsEmail => "isEmail",
            Rule::IsUrl => "isUrl",
            Rule::IsUuid => "isUuid",
            Rule::IsDateString => "isDateString",
            Rule::MinLength(_) => "minLength",
            Rule::MaxLength(_) => "maxLength",
            Rule::Length { .. } => "isLength",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::IsPositive => "isPositive",
            Rule::IsIn(_) => "isIn",
            Rule::Matches(_) => "matches",
            Rule::ArrayMinSize(_) => "arrayMinSize",
            Rule::ArrayMaxSize(_) => "arrayMaxSize",
        }
    }

    fn default_message(&self, property: &str) -> String {
        match self {
            Rule::IsNotEmpty => format!("{} should not be empty", property),
            Rule::IsEmail => format!("{} must be an email", property),
            Rule::IsUrl => format!("{} must be a URL address", property),
            Rule::IsUuid => format!("{} must be a UUID", property),
            Rule::IsDateString => format!("{} must be a valid ISO 8601 date string", property),
            Rule::MinLength(min) => format!(
                "{} must be longer than or equal to {} characters",
                property, min
            ),
            Rule::MaxLength(max) => format!(
                "{} must be shorter than or equal to {} characters",
                property, max
            ),
            Rule::Length { min, max } => format!(
                "{} must be between {} and {} characters",
                property, min, max
            ),
            Rule::Min(min) => format!("{} must not be less than {}", property, min),
            Rule::Max(max) => format!("{} must not be greater than {}", property, max),
            Rule::IsPositive => format!("{} must be a positive number", property),
            Rule::IsIn(allowed) => format!(
                "{} must be one of the following values: {}",
                property,
                allowed.join(", ")
            ),
            Rule::Matches(pattern) => format!(
                "{} must match {} regular expression",
                property,
                pattern.as_str()
            ),
            Rule::ArrayMinSize(min) => {
                format!("{} must contain at least {} elements", property, min)
            }
            Rule::ArrayMaxSize(max) => {
                format!("{} must contain no more than {} elements", property, max)
            }
        }
    }
}

/// A rule with an optional client-facing message override
#[derive(Debug, Clone)]
pub struct Constraint {
    pub rule: Rule,
    pub message: Option<String>,
}

impl Constraint {
    pub fn new(rule: Rule) -> Self {
        Self { rule, message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    /// Message reported when the rule fails for `property`
    pub fn message_for(&self, property: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.rule.default_message(property))
    }
}

impl From<Rule> for Constraint {
    fn from(rule: Rule) -> Self {
        Constraint::new(rule)
    }
}

/// Body types that declare how they are validated
pub trait RequestSchema {
    fn schema() -> Schema;
}

impl RequestSchema for serde_json::Value {
    fn schema() -> Schema {
        Schema::Primitive(Primitive::Any)
    }
}

impl RequestSchema for serde_json::Map<String, serde_json::Value> {
    fn schema() -> Schema {
        Schema::Primitive(Primitive::Object)
    }
}

impl RequestSchema for Vec<serde_json::Value> {
    fn schema() -> Schema {
        Schema::Primitive(Primitive::Array)
    }
}

impl RequestSchema for String {
    fn schema() -> Schema {
        Schema::Primitive(Primitive::String)
    }
}

impl RequestSchema for f64 {
    fn schema() -> Schema {
        Schema::Primitive(Primitive::Number)
    }
}

impl RequestSchema for bool {
    fn schema() -> Schema {
        Schema::Primitive(Primitive::Boolean)
    }
}
