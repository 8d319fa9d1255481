//! # Documents, queries and field updates
//!
//! The document store speaks in untyped JSON objects. This module defines the
//! vocabulary every [`crate::DocumentStore`] implementation understands:
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Document`] | An id plus its [`Fields`]. Decodes into a model with [`Document::decode`]. |
//! | [`Filter`] | Equality, membership (`in`, at most [`MAX_IN_VALUES`] values) and array-contains predicates. |
//! | [`Query`] | A collection path, filters, an optional ordering and limit. |
//! | [`Updates`] | A partial write: plain sets plus array-union / array-remove / increment transforms. |
//!
//! Filtering on [`DOCUMENT_ID`] matches against the document id instead of a field.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StoreError};

/// JSON object holding a document's fields.
pub type Fields = serde_json::Map<String, Value>;

/// Pseudo-field addressing the document id in filters.
pub const DOCUMENT_ID: &str = "__name__";

/// Maximum number of values a single `in` filter may carry.
pub const MAX_IN_VALUES: usize = 10;

/// A stored document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Value of `field`, or the id when `field` is [`DOCUMENT_ID`].
    pub fn value(&self, field: &str) -> Option<Value> {
        if field == DOCUMENT_ID {
            Some(Value::String(self.id.clone()))
        } else {
            self.fields.get(field).cloned()
        }
    }

    /// Deserialize into a model. The id is exposed to the model as an `id` field.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Serialize a model into document fields.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Serialization(serde::ser::Error::custom(
            format!("expected an object, got {other}"),
        ))),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    In(String, Vec<Value>),
    ArrayContains(String, Value),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn is_in<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains(field.into(), value.into())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Eq(field, expected) => doc.value(field).as_ref() == Some(expected),
            Self::In(field, values) => doc
                .value(field)
                .is_some_and(|value| values.contains(&value)),
            Self::ArrayContains(field, expected) => matches!(
                doc.value(field),
                Some(Value::Array(items)) if items.contains(expected)
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A read over one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject queries the backend would refuse.
    pub fn validate(&self) -> Result<()> {
        for filter in &self.filters {
            if let Filter::In(_, values) = filter {
                if values.len() > MAX_IN_VALUES {
                    return Err(StoreError::TooManyValues {
                        limit: MAX_IN_VALUES,
                        got: values.len(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Filter, order and truncate `docs` according to this query.
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut out: Vec<Document> = docs.into_iter().filter(|d| self.matches(d)).collect();

        if let Some(order) = &self.order_by {
            out.sort_by(|a, b| {
                let (a, b) = (a.value(&order.field), b.value(&order.field));
                match (a, b) {
                    // Documents without the ordering field sort last either way.
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(a), Some(b)) => match order.direction {
                        Direction::Ascending => compare_values(&a, &b),
                        Direction::Descending => compare_values(&b, &a),
                    },
                }
            });
        }

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Total order over JSON values. Strings that both parse as RFC 3339
/// timestamps compare chronologically.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => match (parse_timestamp(a), parse_timestamp(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a.cmp(b),
        },
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldUpdate {
    Set(Value),
    /// Append each value not already present.
    ArrayUnion(Vec<Value>),
    /// Remove every occurrence of each value.
    ArrayRemove(Vec<Value>),
    Increment(i64),
    Delete,
}

/// A partial write, applied field by field in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Updates(Vec<(String, FieldUpdate)>);

impl Updates {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: impl Into<String>, update: FieldUpdate) -> Self {
        self.0.push((field.into(), update));
        self
    }

    pub fn set(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, FieldUpdate::Set(value.into()))
    }

    pub fn array_union<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push(field, FieldUpdate::ArrayUnion(values))
    }

    pub fn array_remove<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push(field, FieldUpdate::ArrayRemove(values))
    }

    pub fn increment(self, field: impl Into<String>, by: i64) -> Self {
        self.push(field, FieldUpdate::Increment(by))
    }

    pub fn delete(self, field: impl Into<String>) -> Self {
        self.push(field, FieldUpdate::Delete)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldUpdate)> {
        self.0.iter()
    }

    /// Apply every update to `fields` in place.
    pub fn apply(&self, fields: &mut Fields) {
        for (field, update) in &self.0 {
            match update {
                FieldUpdate::Set(value) => {
                    fields.insert(field.clone(), value.clone());
                }
                FieldUpdate::ArrayUnion(values) => {
                    let mut items = take_array(fields, field);
                    for value in values {
                        if !items.contains(value) {
                            items.push(value.clone());
                        }
                    }
                    fields.insert(field.clone(), Value::Array(items));
                }
                FieldUpdate::ArrayRemove(values) => {
                    let mut items = take_array(fields, field);
                    items.retain(|item| !values.contains(item));
                    fields.insert(field.clone(), Value::Array(items));
                }
                FieldUpdate::Increment(by) => {
                    let current = fields.get(field).and_then(Value::as_i64).unwrap_or(0);
                    fields.insert(field.clone(), Value::from(current.saturating_add(*by)));
                }
                FieldUpdate::Delete => {
                    fields.remove(field);
                }
            }
        }
    }
}

/// Remove and return the array stored at `field`; anything else counts as `[]`.
fn take_array(fields: &mut Fields, field: &str) -> Vec<Value> {
    match fields.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(fields) => Document::new(id, fields),
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn test_filters() {
        let d = doc("p1", json!({ "uid": "u1", "likedBy": ["u2", "u3"] }));

        assert!(Filter::eq("uid", "u1").matches(&d));
        assert!(!Filter::eq("uid", "u2").matches(&d));
        assert!(Filter::is_in("uid", ["u0", "u1"]).matches(&d));
        assert!(Filter::is_in(DOCUMENT_ID, ["p1"]).matches(&d));
        assert!(!Filter::is_in("missing", ["u1"]).matches(&d));
        assert!(Filter::array_contains("likedBy", "u3").matches(&d));
        assert!(!Filter::array_contains("uid", "u1").matches(&d));
    }

    #[test]
    fn test_query_rejects_large_in_filter() {
        let ids: Vec<String> = (0..11).map(|i| format!("u{i}")).collect();
        let query = Query::new("proyectos").filter(Filter::is_in("uid", ids));
        assert!(matches!(
            query.validate(),
            Err(StoreError::TooManyValues { limit: 10, got: 11 })
        ));

        let ids: Vec<String> = (0..10).map(|i| format!("u{i}")).collect();
        assert!(Query::new("proyectos")
            .filter(Filter::is_in("uid", ids))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_ordering_by_timestamp() {
        let docs = vec![
            doc("a", json!({ "createdAt": "2024-01-01T00:00:01Z" })),
            doc("b", json!({ "createdAt": "2024-01-01T00:00:00.500Z" })),
            doc("c", json!({})),
            doc("d", json!({ "createdAt": "2024-01-01T00:00:02Z" })),
        ];

        let asc = Query::new("x").order_by("createdAt", Direction::Ascending).apply(docs.clone());
        let ids: Vec<&str> = asc.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "d", "c"]);

        let desc = Query::new("x")
            .order_by("createdAt", Direction::Descending)
            .limit(2)
            .apply(docs);
        let ids: Vec<&str> = desc.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d", "a"]);
    }

    #[test]
    fn test_updates_apply() {
        let mut fields = match json!({ "likedBy": ["u1"], "points": 2, "name": "x" }) {
            Value::Object(f) => f,
            _ => unreachable!(),
        };

        Updates::new()
            .array_union("likedBy", ["u1", "u2"])
            .array_remove("following", ["nobody"])
            .increment("points", 3)
            .set("email", "a@b.c")
            .delete("name")
            .apply(&mut fields);

        assert_eq!(fields["likedBy"], json!(["u1", "u2"]));
        assert_eq!(fields["following"], json!([]));
        assert_eq!(fields["points"], json!(5));
        assert_eq!(fields["email"], json!("a@b.c"));
        assert!(!fields.contains_key("name"));

        Updates::new().array_remove("likedBy", ["u1"]).apply(&mut fields);
        assert_eq!(fields["likedBy"], json!(["u2"]));
    }

    #[test]
    fn test_increment_saturates() {
        let mut fields = match json!({ "points": i64::MAX }) {
            Value::Object(f) => f,
            _ => unreachable!(),
        };
        Updates::new().increment("points", 1).apply(&mut fields);
        assert_eq!(fields["points"], json!(i64::MAX));

        Updates::new().increment("points", i64::MIN).increment("points", i64::MIN).apply(&mut fields);
        assert_eq!(fields["points"], json!(i64::MIN));
    }

    #[test]
    fn test_decode_exposes_id() {
        #[derive(serde::Deserialize)]
        struct Named {
            id: String,
            name: String,
        }

        let named: Named = doc("g1", json!({ "name": "Rust" })).decode().unwrap();
        assert_eq!(named.id, "g1");
        assert_eq!(named.name, "Rust");
    }
}
