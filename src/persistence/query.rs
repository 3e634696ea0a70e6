// Copyright 2025 Cowboy AI, LLC.

//! Field filters evaluated against entity-shaped JSON

use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison applied by [`FieldFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum QueryOperator {
    /// Field equals the operand
    #[serde(rename = "==")]
    Equal,
    /// Field is present and differs from the operand
    #[serde(rename = "!=")]
    NotEqual,
    /// Field sorts before the operand
    #[serde(rename = "<")]
    LessThan,
    /// Field sorts before or equal to the operand
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// Field sorts after the operand
    #[serde(rename = ">")]
    GreaterThan,
    /// Field sorts after or equal to the operand
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    /// Array field holds the operand
    #[serde(rename = "array-contains")]
    ArrayContains,
    /// Array field holds any element of the operand array
    #[serde(rename = "array-contains-any")]
    ArrayContainsAny,
    /// Field equals an element of the operand array
    #[serde(rename = "in")]
    In,
    /// Field is present and equals no element of the operand array
    #[serde(rename = "not-in")]
    NotIn,
}

impl QueryOperator {
    /// Every operator
    pub const ALL: [QueryOperator; 10] = [
        QueryOperator::Equal,
        QueryOperator::NotEqual,
        QueryOperator::LessThan,
        QueryOperator::LessThanOrEqual,
        QueryOperator::GreaterThan,
        QueryOperator::GreaterThanOrEqual,
        QueryOperator::ArrayContains,
        QueryOperator::ArrayContainsAny,
        QueryOperator::In,
        QueryOperator::NotIn,
    ];

    /// Wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            QueryOperator::Equal => "==",
            QueryOperator::NotEqual => "!=",
            QueryOperator::LessThan => "<",
            QueryOperator::LessThanOrEqual => "<=",
            QueryOperator::GreaterThan => ">",
            QueryOperator::GreaterThanOrEqual => ">=",
            QueryOperator::ArrayContains => "array-contains",
            QueryOperator::ArrayContainsAny => "array-contains-any",
            QueryOperator::In => "in",
            QueryOperator::NotIn => "not-in",
        }
    }

    /// Whether a field value satisfies this operator against `operand`
    ///
    /// A missing field never matches.
    pub fn matches(self, field: Option<&Value>, operand: &Value) -> bool {
        let Some(field) = field else {
            return false;
        };
        match self {
            QueryOperator::Equal => same(field, operand),
            QueryOperator::NotEqual => !same(field, operand),
            QueryOperator::LessThan => compare(field, operand) == Some(Ordering::Less),
            QueryOperator::LessThanOrEqual => matches!(
                compare(field, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            QueryOperator::GreaterThan => compare(field, operand) == Some(Ordering::Greater),
            QueryOperator::GreaterThanOrEqual => matches!(
                compare(field, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            QueryOperator::ArrayContains => field
                .as_array()
                .is_some_and(|items| items.iter().any(|item| same(item, operand))),
            QueryOperator::ArrayContainsAny => match (field.as_array(), operand.as_array()) {
                (Some(items), Some(wanted)) => items
                    .iter()
                    .any(|item| wanted.iter().any(|w| same(item, w))),
                _ => false,
            },
            QueryOperator::In => operand
                .as_array()
                .is_some_and(|options| options.iter().any(|o| same(field, o))),
            QueryOperator::NotIn => operand
                .as_array()
                .is_some_and(|options| !options.iter().any(|o| same(field, o))),
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown query operator: {s}"))
    }
}

fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::String(x), Value::String(y)) => match (instant(x), instant(y)) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Timestamps carry a variable-length fraction, so they order by instant
fn instant(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => match (instant(x), instant(y)) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => Some(x.cmp(y)),
        },
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// A single `field operator value` condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldFilter {
    /// Dotted path into the record, e.g. `owner` or `posts.0.status`
    pub field: String,
    /// Comparison to apply
    pub operator: QueryOperator,
    /// Right-hand side
    pub value: Value,
}

impl FieldFilter {
    /// New filter
    pub fn new(field: impl Into<String>, operator: QueryOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Whether `record` satisfies the filter
    pub fn matches(&self, record: &Value) -> bool {
        self.operator.matches(lookup(record, &self.field), &self.value)
    }
}

fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn record() -> Value {
        json!({
            "owner": "alice",
            "priority": 3,
            "hashtags": ["launch", "news"],
            "posts": [{"status": "draft"}],
            "createdAt": "2025-01-01T00:00:00.500Z"
        })
    }

    #[test_case("owner", QueryOperator::Equal, json!("alice"), true)]
    #[test_case("owner", QueryOperator::NotEqual, json!("alice"), false)]
    #[test_case("priority", QueryOperator::Equal, json!(3.0), true ; "integer equals float")]
    #[test_case("priority", QueryOperator::LessThan, json!(4), true)]
    #[test_case("priority", QueryOperator::LessThanOrEqual, json!(3), true)]
    #[test_case("priority", QueryOperator::GreaterThan, json!(3), false)]
    #[test_case("priority", QueryOperator::GreaterThanOrEqual, json!(3), true)]
    #[test_case("priority", QueryOperator::GreaterThan, json!("2"), false ; "mixed types never order")]
    #[test_case("hashtags", QueryOperator::ArrayContains, json!("news"), true)]
    #[test_case("hashtags", QueryOperator::ArrayContainsAny, json!(["x", "launch"]), true)]
    #[test_case("hashtags", QueryOperator::ArrayContainsAny, json!(["x"]), false)]
    #[test_case("owner", QueryOperator::In, json!(["bob", "alice"]), true)]
    #[test_case("owner", QueryOperator::NotIn, json!(["bob", "alice"]), false)]
    #[test_case("owner", QueryOperator::NotIn, json!(["bob"]), true)]
    #[test_case("posts.0.status", QueryOperator::Equal, json!("draft"), true ; "nested path")]
    #[test_case("missing", QueryOperator::NotEqual, json!("x"), false ; "missing field never matches")]
    #[test_case("missing", QueryOperator::NotIn, json!(["x"]), false ; "missing field excluded from not in")]
    #[test_case("createdAt", QueryOperator::GreaterThan, json!("2025-01-01T00:00:00Z"), true ; "fractional timestamp after whole second")]
    #[test_case("createdAt", QueryOperator::LessThan, json!("2025-01-01T00:00:01Z"), true ; "timestamp before next second")]
    #[test_case("createdAt", QueryOperator::Equal, json!("2025-01-01T00:00:00.500000000Z"), true ; "timestamp equality ignores precision")]
    #[test_case("owner", QueryOperator::LessThan, json!("bob"), true ; "plain strings order lexically")]
    fn test_filter(field: &str, operator: QueryOperator, value: Value, expected: bool) {
        let filter = FieldFilter::new(field, operator, value);
        assert_eq!(filter.matches(&record()), expected);
    }

    #[test]
    fn test_operator_spelling() {
        for op in QueryOperator::ALL {
            assert_eq!(op.as_str().parse::<QueryOperator>(), Ok(op));
            assert_eq!(
                serde_json::to_value(op).unwrap(),
                Value::String(op.to_string())
            );
        }
        assert!("like".parse::<QueryOperator>().is_err());
    }
}
