//! Static field-level description of a record type.

/// Primitive kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 text.
    Str,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
}

/// One field of an entity: name, kind and query capabilities.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Field name as used by filters and sort selectors.
    pub name: &'static str,
    /// Primitive kind.
    pub kind: FieldKind,
    /// Whether free-text search scans this field.
    pub searchable: bool,
    /// Whether the field may be used as a sort key.
    pub sortable: bool,
}

/// Ordered, immutable description of an entity kind. Defined once per
/// record type and shared as a `&'static` value.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Human-readable entity name ("customer", "car").
    pub entity_name: &'static str,
    /// Fields in declaration order. Error reporting and "primary error"
    /// selection follow this order.
    pub fields: &'static [FieldDef],
    /// Field whose distinct values populate a filter dropdown, if any.
    pub facet_field: Option<&'static str>,
}

impl EntitySchema {
    /// Look up a field by name. Unknown names are not an error; callers
    /// treat `None` as "unconstrained".
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all searchable fields, in schema order.
    #[must_use]
    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.name)
    }

    /// True when `name` refers to a sortable field.
    #[must_use]
    pub fn is_sortable(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.sortable)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Car, Customer, Entity};

    #[test]
    fn unknown_field_lookup_is_none() {
        assert!(Car::SCHEMA.field("horsepower").is_none());
        assert!(Customer::SCHEMA.field("nickname").is_none());
    }

    #[test]
    fn facet_field_is_declared_on_cars_only() {
        assert_eq!(Car::SCHEMA.facet_field, Some("make"));
        assert_eq!(Customer::SCHEMA.facet_field, None);
    }

    #[test]
    fn schemas_expose_searchable_fields_in_order() {
        let fields: Vec<_> = Car::SCHEMA.searchable_fields().collect();
        assert_eq!(fields, vec!["make", "model", "version"]);
    }
}
