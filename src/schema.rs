// Copyright 2025 Cowboy AI, LLC.

//! Declarative field validation
//!
//! A [`Schema`] is an ordered list of [`Field`]s, each carrying the rules
//! that apply to one key of a JSON object. Checking folds every field's
//! rules over the input and collects all violations; nothing stops at the
//! first failure except that a value of the wrong type skips the remaining
//! rules of that one field.
//!
//! ```rust
//! use scheduler_domain::schema::{Field, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new(vec![
//!     Field::required("name").string().non_empty_with("Name is required"),
//!     Field::required("size").integer().positive(),
//! ]);
//!
//! let errors = schema.check(&json!({"name": "", "size": 0}));
//! let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     messages,
//!     vec!["name: Name is required", "size: Number must be greater than 0"]
//! );
//! ```

use crate::identifiers::is_valid_record_id;
use crate::results::OperationResult;
use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Message returned when a schema accepts its input
pub const VALIDATION_SUCCESSFUL: &str = "Validation successful";

/// One violated rule, located by its dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path to the offending value, e.g. `posts.0.title`
    pub path: String,
    /// What was wrong
    pub message: String,
}

impl FieldViolation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All violations found in one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaErrors(Vec<FieldViolation>);

impl SchemaErrors {
    /// The individual violations
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Violations rendered as `"<field>: <message>"`
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for SchemaErrors {}

/// Whether a rule lets the fold continue with the same field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Abort,
}

#[derive(Debug, Clone)]
enum Rule {
    IsString,
    IsNumber,
    IsInteger,
    IsTimestamp,
    IsArray(Vec<Rule>),
    IsObject(Schema),
    NonEmpty(String),
    Uuid(String),
    Min(f64, String),
    Max(f64, String),
    Positive(String),
    OneOf(Vec<String>),
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn mismatch(expected: &str, value: &Value, path: &str, out: &mut Vec<FieldViolation>) -> Flow {
    out.push(FieldViolation::new(
        path,
        format!("Expected {expected}, received {}", type_name(value)),
    ));
    Flow::Abort
}

fn fold(rules: &[Rule], value: &Value, path: &str, out: &mut Vec<FieldViolation>) {
    for rule in rules {
        if rule.apply(value, path, out) == Flow::Abort {
            break;
        }
    }
}

impl Rule {
    fn apply(&self, value: &Value, path: &str, out: &mut Vec<FieldViolation>) -> Flow {
        match self {
            Rule::IsString => match value {
                Value::String(_) => Flow::Continue,
                other => mismatch("string", other, path, out),
            },
            Rule::IsNumber => match value {
                Value::Number(_) => Flow::Continue,
                other => mismatch("number", other, path, out),
            },
            Rule::IsInteger => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Flow::Continue,
                Value::Number(_) => {
                    out.push(FieldViolation::new(path, "Expected integer, received float"));
                    Flow::Abort
                }
                other => mismatch("number", other, path, out),
            },
            Rule::IsTimestamp => match value {
                Value::String(s) if DateTime::parse_from_rfc3339(s).is_ok() => Flow::Continue,
                Value::String(_) => {
                    out.push(FieldViolation::new(path, "Invalid date"));
                    Flow::Abort
                }
                other => mismatch("date", other, path, out),
            },
            Rule::IsArray(element_rules) => match value {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        fold(element_rules, item, &child_path(path, &index.to_string()), out);
                    }
                    Flow::Continue
                }
                other => mismatch("array", other, path, out),
            },
            Rule::IsObject(schema) => match value {
                Value::Object(_) => {
                    schema.check_at(value, path, out);
                    Flow::Continue
                }
                other => mismatch("object", other, path, out),
            },
            Rule::NonEmpty(message) => {
                if value.as_str().is_some_and(str::is_empty) {
                    out.push(FieldViolation::new(path, message.clone()));
                }
                Flow::Continue
            }
            Rule::Uuid(message) => {
                if value.as_str().is_some_and(|s| !is_valid_record_id(s)) {
                    out.push(FieldViolation::new(path, message.clone()));
                }
                Flow::Continue
            }
            Rule::Min(bound, message) => {
                if value.as_f64().is_some_and(|n| n < *bound) {
                    out.push(FieldViolation::new(path, message.clone()));
                }
                Flow::Continue
            }
            Rule::Max(bound, message) => {
                if value.as_f64().is_some_and(|n| n > *bound) {
                    out.push(FieldViolation::new(path, message.clone()));
                }
                Flow::Continue
            }
            Rule::Positive(message) => {
                if value.as_f64().is_some_and(|n| n <= 0.0) {
                    out.push(FieldViolation::new(path, message.clone()));
                }
                Flow::Continue
            }
            Rule::OneOf(options) => {
                if let Some(s) = value.as_str() {
                    if !options.iter().any(|option| option == s) {
                        let expected = options
                            .iter()
                            .map(|option| format!("'{option}'"))
                            .collect::<Vec<_>>()
                            .join(" | ");
                        out.push(FieldViolation::new(
                            path,
                            format!("Invalid enum value. Expected {expected}, received '{s}'"),
                        ));
                    }
                }
                Flow::Continue
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
    Nullable,
}

/// Rules for one key of an object, or for one array element
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    presence: Presence,
    rules: Vec<Rule>,
}

impl Field {
    fn with_presence(name: impl Into<String>, presence: Presence) -> Self {
        Self {
            name: name.into(),
            presence,
            rules: Vec::new(),
        }
    }

    /// Key that must be present
    pub fn required(name: impl Into<String>) -> Self {
        Self::with_presence(name, Presence::Required)
    }

    /// Key that may be absent
    pub fn optional(name: impl Into<String>) -> Self {
        Self::with_presence(name, Presence::Optional)
    }

    /// Key that may be absent or `null`
    pub fn nullable(name: impl Into<String>) -> Self {
        Self::with_presence(name, Presence::Nullable)
    }

    /// Rules applied to each element of an array
    pub fn element() -> Self {
        Self::required("")
    }

    fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Value must be a string
    pub fn string(self) -> Self {
        self.rule(Rule::IsString)
    }

    /// Value must be a number
    pub fn number(self) -> Self {
        self.rule(Rule::IsNumber)
    }

    /// Value must be an integral number
    pub fn integer(self) -> Self {
        self.rule(Rule::IsInteger)
    }

    /// Value must be an RFC 3339 timestamp string
    pub fn timestamp(self) -> Self {
        self.rule(Rule::IsTimestamp)
    }

    /// Value must be an array whose elements satisfy `element`
    pub fn array_of(self, element: Field) -> Self {
        self.rule(Rule::IsArray(element.rules))
    }

    /// Value must be an object satisfying `schema`
    pub fn object(self, schema: Schema) -> Self {
        self.rule(Rule::IsObject(schema))
    }

    /// String must not be empty
    pub fn non_empty(self) -> Self {
        self.non_empty_with("String must contain at least 1 character(s)")
    }

    /// String must not be empty, reported with `message`
    pub fn non_empty_with(self, message: impl Into<String>) -> Self {
        self.rule(Rule::NonEmpty(message.into()))
    }

    /// String must be a hyphenated UUID
    pub fn uuid(self) -> Self {
        self.rule(Rule::Uuid("Invalid uuid".to_string()))
    }

    /// Number must be at least `bound`
    pub fn min(self, bound: f64) -> Self {
        self.min_with(bound, format!("Number must be greater than or equal to {bound}"))
    }

    /// Number must be at least `bound`, reported with `message`
    pub fn min_with(self, bound: f64, message: impl Into<String>) -> Self {
        self.rule(Rule::Min(bound, message.into()))
    }

    /// Number must be at most `bound`
    pub fn max(self, bound: f64) -> Self {
        self.max_with(bound, format!("Number must be less than or equal to {bound}"))
    }

    /// Number must be at most `bound`, reported with `message`
    pub fn max_with(self, bound: f64, message: impl Into<String>) -> Self {
        self.rule(Rule::Max(bound, message.into()))
    }

    /// Number must be greater than zero
    pub fn positive(self) -> Self {
        self.rule(Rule::Positive("Number must be greater than 0".to_string()))
    }

    /// String must be one of `options`
    pub fn one_of(self, options: &[&str]) -> Self {
        self.rule(Rule::OneOf(options.iter().map(ToString::to_string).collect()))
    }

    fn check_in(&self, object: &serde_json::Map<String, Value>, parent: &str, out: &mut Vec<FieldViolation>) {
        let path = child_path(parent, &self.name);
        match (object.get(&self.name), self.presence) {
            (None, Presence::Required) => out.push(FieldViolation::new(&path, "Required")),
            (None, _) | (Some(Value::Null), Presence::Nullable) => {}
            (Some(value), _) => fold(&self.rules, value, &path, out),
        }
    }
}

/// Ordered field rules for one object shape
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Build a schema from its fields
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Copy of this schema with extra fields appended
    pub fn extend(&self, fields: Vec<Field>) -> Self {
        let mut extended = self.clone();
        extended.fields.extend(fields);
        extended
    }

    /// Names of the declared fields
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    fn check_at(&self, input: &Value, path: &str, out: &mut Vec<FieldViolation>) {
        match input {
            Value::Object(object) => {
                for field in &self.fields {
                    field.check_in(object, path, out);
                }
            }
            other => {
                mismatch("object", other, path, out);
            }
        }
    }

    /// Every violation in `input`, in declaration order
    pub fn check(&self, input: &Value) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        self.check_at(input, "", &mut violations);
        violations
    }

    /// Check `input` and decode it into typed data
    pub fn parse<D: DeserializeOwned>(&self, input: &Value) -> Result<D, SchemaErrors> {
        let violations = self.check(input);
        if !violations.is_empty() {
            return Err(SchemaErrors(violations));
        }
        serde_json::from_value(input.clone())
            .map_err(|err| SchemaErrors(vec![FieldViolation::new("", err.to_string())]))
    }

    /// Check a typed value through its serialized form
    pub fn validate<T: Serialize>(&self, value: &T) -> OperationResult {
        let violations = match serde_json::to_value(value) {
            Ok(json) => self.check(&json),
            Err(err) => vec![FieldViolation::new("", err.to_string())],
        };
        if violations.is_empty() {
            OperationResult::ok(VALIDATION_SUCCESSFUL)
        } else {
            OperationResult::fail(violations.iter().map(ToString::to_string).collect())
        }
    }
}
