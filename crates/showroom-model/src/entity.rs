//! Record trait: identity, display and schema-driven field access.

use std::cmp::Ordering;

use crate::EntitySchema;

/// Typed value of a single record field, as returned by the accessor
/// table. String payloads are borrowed from the record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Text field.
    Str(&'a str),
    /// Integer field.
    Int(i64),
    /// Float field.
    Float(f64),
}

impl FieldValue<'_> {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Str(_) => None,
            #[allow(clippy::cast_precision_loss)]
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
        }
    }

    /// Compare two field values for sorting. Strings compare
    /// case-insensitively, numbers numerically; mismatched kinds are
    /// treated as equal so a bad sort key degrades to natural order.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Str(a), FieldValue::Str(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
        }
    }
}

/// A record belonging to one entity kind.
///
/// Identity is an opaque numeric id assigned by the collection on
/// insert; `id == None` means "not yet persisted".
pub trait Entity: Clone + Send + Sync + 'static {
    /// Static schema of this entity kind.
    const SCHEMA: &'static EntitySchema;

    /// Collection-assigned id, if persisted.
    fn id(&self) -> Option<i64>;

    /// Called by the collection when the record is inserted.
    fn assign_id(&mut self, id: i64);

    /// Resolve a field by name. Returns `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Short human-readable label for mutation summaries
    /// ("Jane Doe", "Toyota Camry").
    fn display_name(&self) -> String;

    /// Schema-level uniqueness constraint, if any, as
    /// `(field name, this record's key value)`. Checked by the mutation
    /// service after field validation passes.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}
