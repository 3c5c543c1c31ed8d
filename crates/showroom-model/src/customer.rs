//! Customer record.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldValue};
use crate::schema::{EntitySchema, FieldDef, FieldKind};
use crate::validate::{required_text, FieldError, Validate};

const CUSTOMER_FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "customer_name",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "email",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "age",
        kind: FieldKind::Int,
        searchable: false,
        sortable: true,
    },
    FieldDef {
        name: "gender",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "location",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "job",
        kind: FieldKind::Str,
        searchable: true,
        sortable: true,
    },
    FieldDef {
        name: "salary",
        kind: FieldKind::Int,
        searchable: false,
        sortable: true,
    },
];

const CUSTOMER_SCHEMA: EntitySchema = EntitySchema {
    entity_name: "customer",
    fields: CUSTOMER_FIELDS,
    facet_field: None,
};

/// A customer of the dealership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Collection-assigned id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Full name.
    pub customer_name: String,
    /// Contact email, unique per customer, stored lower-cased.
    pub email: String,
    /// Age in years.
    pub age: i64,
    /// One of "Male", "Female", "Other".
    pub gender: String,
    /// City or region.
    pub location: String,
    /// Occupation.
    pub job: String,
    /// Yearly salary.
    pub salary: i64,
}

impl Entity for Customer {
    const SCHEMA: &'static EntitySchema = &CUSTOMER_SCHEMA;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "customer_name" => Some(FieldValue::Str(&self.customer_name)),
            "email" => Some(FieldValue::Str(&self.email)),
            "age" => Some(FieldValue::Int(self.age)),
            "gender" => Some(FieldValue::Str(&self.gender)),
            "location" => Some(FieldValue::Str(&self.location)),
            "job" => Some(FieldValue::Str(&self.job)),
            "salary" => Some(FieldValue::Int(self.salary)),
            _ => None,
        }
    }

    fn display_name(&self) -> String {
        self.customer_name.clone()
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("email", self.email.clone()))
    }
}

impl Validate for Customer {
    fn validated(mut self) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        match required_text(&self.customer_name, "Customer name", 2) {
            Ok(v) => self.customer_name = v,
            Err(msg) => errors.push(FieldError::new("customer_name", msg)),
        }

        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_plausible_email(&email) {
            errors.push(FieldError::new("email", "Invalid email format"));
        } else {
            self.email = email;
        }

        if !(18..=120).contains(&self.age) {
            errors.push(FieldError::new("age", "Age must be between 18 and 120"));
        }

        if !matches!(self.gender.as_str(), "Male" | "Female" | "Other") {
            errors.push(FieldError::new(
                "gender",
                "Gender must be Male, Female, or Other",
            ));
        }

        match required_text(&self.location, "Location", 2) {
            Ok(v) => self.location = v,
            Err(msg) => errors.push(FieldError::new("location", msg)),
        }

        match required_text(&self.job, "Job", 2) {
            Ok(v) => self.job = v,
            Err(msg) => errors.push(FieldError::new("job", msg)),
        }

        if self.salary < 0 {
            errors.push(FieldError::new("salary", "Salary must be a positive number"));
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }
}

/// Minimal shape check: an `@` plus a dot in the domain part.
fn is_plausible_email(value: &str) -> bool {
    match value.rsplit_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_customer() -> Customer {
        Customer {
            id: None,
            customer_name: "  Jane Doe ".to_string(),
            email: "Jane.Doe@Example.COM".to_string(),
            age: 34,
            gender: "Female".to_string(),
            location: "Lisbon".to_string(),
            job: "Engineer".to_string(),
            salary: 72_000,
        }
    }

    #[test]
    fn validation_normalizes_name_and_email() {
        let customer = valid_customer().validated().expect("should validate");
        assert_eq!(customer.customer_name, "Jane Doe");
        assert_eq!(customer.email, "jane.doe@example.com");
    }

    #[test]
    fn bad_email_is_a_field_error() {
        let mut customer = valid_customer();
        customer.email = "BAD".to_string();
        let errors = valid_err(customer);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Invalid email format");
    }

    #[test]
    fn errors_come_back_in_schema_field_order() {
        let mut customer = valid_customer();
        customer.customer_name = String::new();
        customer.age = 9;
        customer.salary = -1;
        let errors = valid_err(customer);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["customer_name", "age", "salary"]);
    }

    #[test]
    fn gender_must_be_one_of_three() {
        let mut customer = valid_customer();
        customer.gender = "unknown".to_string();
        let errors = valid_err(customer);
        assert_eq!(errors[0].field, "gender");
    }

    fn valid_err(customer: Customer) -> Vec<FieldError> {
        match customer.validated() {
            Ok(_) => panic!("expected validation failure"),
            Err(errors) => errors,
        }
    }
}
