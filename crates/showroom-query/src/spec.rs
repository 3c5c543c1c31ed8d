//! User-controlled query parameters and their event-driven mutators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use showroom_model::{EntitySchema, FieldKind};

/// Sentinel accepted by equality filters meaning "unconstrained".
pub const FILTER_ALL: &str = "all";

/// Constraint on one field. Absence of an entry means the field is
/// unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Exact match (enumeration-style selectors, e.g. car make).
    Equals(String),
    /// Case-insensitive substring match.
    Contains(String),
    /// Inclusive numeric range; open bounds are `None`.
    Range {
        /// Lower bound, inclusive.
        min: Option<f64>,
        /// Upper bound, inclusive.
        max: Option<f64>,
    },
}

/// The full set of user-controlled parameters governing which subset,
/// order and page of a collection is shown. One instance per entity
/// kind per UI session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Free-text search over searchable fields; empty = no filtering.
    pub search_term: String,
    /// Per-field constraints, keyed by schema field name.
    pub field_filters: BTreeMap<String, FilterValue>,
    /// Sort key, if any.
    pub sort_field: Option<String>,
    /// Descending order when set.
    pub sort_descending: bool,
    /// Current page, 1-based. Clamped into `[1, last_page_count]`.
    pub page: usize,
    /// Page size, always > 0.
    pub page_size: usize,
    /// Page count computed by the most recent execution; `go_to_page`
    /// clamps against this value.
    pub last_page_count: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            field_filters: BTreeMap::new(),
            sort_field: None,
            sort_descending: false,
            page: 1,
            page_size: 10,
            last_page_count: 1,
        }
    }
}

impl QuerySpec {
    /// Set the free-text search term. Search always restarts paging.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Set an equality filter on `field` from raw selector input.
    ///
    /// The `"all"` sentinel and empty input clear the constraint. On a
    /// numeric field the target is parsed best-effort; unparsable input
    /// falls back to "no constraint". Unknown fields are ignored.
    pub fn set_equality_filter(&mut self, schema: &EntitySchema, field: &str, raw: &str) {
        let Some(def) = schema.field(field) else {
            tracing::debug!(field, "equality filter on unknown field ignored");
            return;
        };
        if raw.is_empty() || raw == FILTER_ALL {
            self.field_filters.remove(field);
            return;
        }
        match def.kind {
            FieldKind::Str => {
                self.field_filters
                    .insert(field.to_string(), FilterValue::Equals(raw.to_string()));
            }
            FieldKind::Int | FieldKind::Float => {
                // Lenient parse: malformed numeric input means no constraint.
                match raw.trim().parse::<f64>() {
                    Ok(n) => {
                        self.field_filters.insert(
                            field.to_string(),
                            FilterValue::Range {
                                min: Some(n),
                                max: Some(n),
                            },
                        );
                    }
                    Err(_) => {
                        self.field_filters.remove(field);
                    }
                }
            }
        }
    }

    /// Set a substring filter on a string field. Empty input clears it.
    pub fn set_contains_filter(&mut self, schema: &EntitySchema, field: &str, raw: &str) {
        if schema.field(field).is_none() {
            tracing::debug!(field, "contains filter on unknown field ignored");
            return;
        }
        if raw.is_empty() {
            self.field_filters.remove(field);
        } else {
            self.field_filters
                .insert(field.to_string(), FilterValue::Contains(raw.to_string()));
        }
    }

    /// Set an inclusive range filter on a numeric field from raw min/max
    /// strings. Each bound is parsed best-effort; an unparsable or empty
    /// bound is open. When both bounds end up open the constraint is
    /// removed entirely.
    pub fn set_range_filter(
        &mut self,
        schema: &EntitySchema,
        field: &str,
        min_raw: &str,
        max_raw: &str,
    ) {
        let numeric = schema
            .field(field)
            .is_some_and(|def| matches!(def.kind, FieldKind::Int | FieldKind::Float));
        if !numeric {
            tracing::debug!(field, "range filter on non-numeric field ignored");
            return;
        }
        let min = min_raw.trim().parse::<f64>().ok();
        let max = max_raw.trim().parse::<f64>().ok();
        if min.is_none() && max.is_none() {
            self.field_filters.remove(field);
        } else {
            self.field_filters
                .insert(field.to_string(), FilterValue::Range { min, max });
        }
    }

    /// Select the sort field. Non-sortable or unknown fields clear the
    /// sort. Does not reset paging.
    pub fn set_sort(&mut self, schema: &EntitySchema, field: &str) {
        if schema.is_sortable(field) {
            self.sort_field = Some(field.to_string());
        } else {
            tracing::debug!(field, "sort on non-sortable field cleared");
            self.sort_field = None;
        }
    }

    /// Flip ascending/descending. Does not reset paging.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_descending = !self.sort_descending;
    }

    /// Change the page size and restart paging. Zero is ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.page_size = size;
        self.page = 1;
    }

    /// Jump to `page`, clamped into `[1, last_page_count]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.last_page_count.max(1));
    }

    /// Clear all field filters and restart paging. The search term and
    /// sort are independent dimensions and stay untouched.
    pub fn reset_filters(&mut self) {
        self.field_filters.clear();
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_model::{Car, Entity};

    #[test]
    fn search_term_resets_page() {
        let mut spec = QuerySpec {
            page: 4,
            last_page_count: 9,
            ..QuerySpec::default()
        };
        spec.set_search_term("camry");
        assert_eq!(spec.page, 1);
        assert_eq!(spec.search_term, "camry");
    }

    #[test]
    fn all_sentinel_clears_equality_filter() {
        let mut spec = QuerySpec::default();
        spec.set_equality_filter(Car::SCHEMA, "make", "Toyota");
        assert!(spec.field_filters.contains_key("make"));
        spec.set_equality_filter(Car::SCHEMA, "make", "all");
        assert!(spec.field_filters.is_empty());
    }

    #[test]
    fn contains_filter_sets_and_empty_input_clears() {
        let mut spec = QuerySpec::default();
        spec.set_contains_filter(Car::SCHEMA, "model", "cam");
        assert_eq!(
            spec.field_filters.get("model"),
            Some(&FilterValue::Contains("cam".to_string()))
        );
        spec.set_contains_filter(Car::SCHEMA, "model", "");
        assert!(spec.field_filters.is_empty());
    }

    #[test]
    fn malformed_numeric_bounds_are_no_constraint() {
        let mut spec = QuerySpec::default();
        spec.set_range_filter(Car::SCHEMA, "year", "not-a-year", "2020");
        assert_eq!(
            spec.field_filters.get("year"),
            Some(&FilterValue::Range {
                min: None,
                max: Some(2020.0)
            })
        );
        spec.set_range_filter(Car::SCHEMA, "year", "abc", "");
        assert!(!spec.field_filters.contains_key("year"));
    }

    #[test]
    fn range_filter_on_string_field_is_ignored() {
        let mut spec = QuerySpec::default();
        spec.set_range_filter(Car::SCHEMA, "make", "1", "2");
        assert!(spec.field_filters.is_empty());
    }

    #[test]
    fn go_to_page_clamps_against_last_page_count() {
        let mut spec = QuerySpec {
            last_page_count: 3,
            ..QuerySpec::default()
        };
        spec.go_to_page(5);
        assert_eq!(spec.page, 3);
        spec.go_to_page(0);
        assert_eq!(spec.page, 1);
    }

    #[test]
    fn reset_filters_keeps_search_and_sort() {
        let mut spec = QuerySpec::default();
        spec.set_search_term("v8");
        spec.set_sort(Car::SCHEMA, "price");
        spec.set_equality_filter(Car::SCHEMA, "make", "BMW");
        spec.page = 2;
        spec.reset_filters();
        assert!(spec.field_filters.is_empty());
        assert_eq!(spec.page, 1);
        assert_eq!(spec.search_term, "v8");
        assert_eq!(spec.sort_field.as_deref(), Some("price"));
    }
}
