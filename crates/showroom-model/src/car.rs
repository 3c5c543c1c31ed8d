//! Car record.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldValue};
use crate::schema::{EntitySchema, FieldDef, FieldKind};
use crate::validate::{required_text, FieldError, Validate};

/// Newest model year accepted by validation (next calendar year).
pub const MAX_MODEL_YEAR: i64 = 2026;

const CAR_FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "make",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "model",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "version",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "year",
        kind: FieldKind::Int,
        searchable: false,
        sortable: true,
    },
    FieldDef {
        name: "price",
        kind: FieldKind::Int,
        searchable: false,
        sortable: true,
    },
];

const CAR_SCHEMA: EntitySchema = EntitySchema {
    entity_name: "car",
    fields: CAR_FIELDS,
    facet_field: Some("make"),
};

/// A car in the dealership inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Collection-assigned id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Manufacturer ("Toyota").
    pub make: String,
    /// Model name ("Camry").
    pub model: String,
    /// Trim level ("Sport").
    pub version: String,
    /// Model year.
    pub year: i64,
    /// Asking price in whole currency units.
    pub price: i64,
}

impl Entity for Car {
    const SCHEMA: &'static EntitySchema = &CAR_SCHEMA;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "make" => Some(FieldValue::Str(&self.make)),
            "model" => Some(FieldValue::Str(&self.model)),
            "version" => Some(FieldValue::Str(&self.version)),
            "year" => Some(FieldValue::Int(self.year)),
            "price" => Some(FieldValue::Int(self.price)),
            _ => None,
        }
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

impl Validate for Car {
    fn validated(mut self) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        match required_text(&self.make, "Make", 2) {
            Ok(v) => self.make = v,
            Err(msg) => errors.push(FieldError::new("make", msg)),
        }

        match required_text(&self.model, "Model", 2) {
            Ok(v) => self.model = v,
            Err(msg) => errors.push(FieldError::new("model", msg)),
        }

        match required_text(&self.version, "Version", 1) {
            Ok(v) => self.version = v,
            Err(msg) => errors.push(FieldError::new("version", msg)),
        }

        if !(1900..=MAX_MODEL_YEAR).contains(&self.year) {
            errors.push(FieldError::new(
                "year",
                format!("Year must be between 1900 and {MAX_MODEL_YEAR}"),
            ));
        }

        if self.price < 0 {
            errors.push(FieldError::new("price", "Price must be a positive number"));
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_make_and_model() {
        let car = Car {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            ..Car::default()
        };
        assert_eq!(car.display_name(), "Toyota Camry");
    }

    #[test]
    fn year_outside_range_fails() {
        let car = Car {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            version: "LE".to_string(),
            year: 1899,
            price: 5000,
            ..Car::default()
        };
        let errors = match car.validated() {
            Ok(_) => panic!("expected validation failure"),
            Err(errors) => errors,
        };
        assert_eq!(errors[0].field, "year");
    }

    #[test]
    fn field_accessor_resolves_by_name() {
        let car = Car {
            make: "BMW".to_string(),
            year: 2021,
            ..Car::default()
        };
        assert_eq!(car.field("make"), Some(FieldValue::Str("BMW")));
        assert_eq!(car.field("year"), Some(FieldValue::Int(2021)));
        assert_eq!(car.field("doors"), None);
    }
}
