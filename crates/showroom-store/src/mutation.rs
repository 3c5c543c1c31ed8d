//! Raw-input decoding and the mutation error taxonomy.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use showroom_model::{Entity, FieldError, FieldKind};
use thiserror::Error;

/// Raw form input: field name to raw string, as submitted by the UI.
pub type RawInput = BTreeMap<String, String>;

/// Why a create/update/delete was rejected. Every failure is returned to
/// the caller; nothing here aborts the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    /// Field-level validation failed; no mutation occurred.
    #[error("{primary}")]
    Validation {
        /// Every field error, in schema field order.
        errors: Vec<FieldError>,
        /// First error encountered, for single-line display.
        primary: String,
    },
    /// A schema-level uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),
    /// The target id does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl MutationError {
    pub(crate) fn from_field_errors(errors: Vec<FieldError>) -> Self {
        let primary = errors
            .first()
            .map_or_else(|| "Validation failed".to_string(), |e| e.message.clone());
        Self::Validation { errors, primary }
    }
}

/// Successful mutation result.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome<R> {
    /// The committed record (with its id).
    pub record: R,
    /// Human-readable confirmation ("Car Toyota Camry has been added.").
    pub message: String,
}

/// Capitalized entity name for messages ("customer" -> "Customer").
pub(crate) fn entity_label<R: Entity>() -> String {
    let name = R::SCHEMA.entity_name;
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Decode raw form strings into a typed record using the entity schema.
///
/// Missing fields default to empty/zero so that field validation reports
/// them; numeric fields are parsed strictly here because CRUD form
/// fields are strict, unlike the lenient filter inputs.
///
/// # Errors
/// One [`FieldError`] per unparsable numeric field, in schema order.
pub fn decode_raw<R>(raw: &RawInput) -> Result<R, Vec<FieldError>>
where
    R: Entity + DeserializeOwned,
{
    let mut object = Map::new();
    let mut errors = Vec::new();

    for def in R::SCHEMA.fields {
        let input = raw.get(def.name).map(String::as_str).unwrap_or_default();
        let value = match def.kind {
            FieldKind::Str => Value::from(input),
            FieldKind::Int => match parse_number::<i64>(input, 0) {
                Ok(n) => Value::from(n),
                Err(()) => {
                    errors.push(FieldError::new(
                        def.name,
                        format!("{} must be a valid number", def.name),
                    ));
                    continue;
                }
            },
            FieldKind::Float => match parse_number::<f64>(input, 0.0) {
                Ok(n) => Value::from(n),
                Err(()) => {
                    errors.push(FieldError::new(
                        def.name,
                        format!("{} must be a valid number", def.name),
                    ));
                    continue;
                }
            },
        };
        object.insert(def.name.to_string(), value);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| {
        vec![FieldError::new(
            R::SCHEMA.entity_name,
            format!("invalid {} input: {e}", R::SCHEMA.entity_name),
        )]
    })
}

fn parse_number<T: std::str::FromStr>(input: &str, default: T) -> Result<T, ()> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse::<T>().map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_model::Car;

    fn raw(entries: &[(&str, &str)]) -> RawInput {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn decode_fills_missing_fields_with_defaults() {
        let car: Car = decode_raw(&raw(&[("make", "Toyota")])).expect("decodes");
        assert_eq!(car.make, "Toyota");
        assert_eq!(car.year, 0);
        assert!(car.id.is_none());
    }

    #[test]
    fn unparsable_numbers_are_field_errors() {
        let errors = match decode_raw::<Car>(&raw(&[("year", "soon"), ("price", "cheap")])) {
            Ok(_) => panic!("expected decode failure"),
            Err(errors) => errors,
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["year", "price"]);
    }
}
