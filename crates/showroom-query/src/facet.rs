//! Cached distinct-value sets for filter dropdowns.

use showroom_model::{Collection, Entity};

/// Distinct sorted values of the schema's facet field, computed from the
/// unfiltered collection and cached until explicitly invalidated.
///
/// The set of distinct values changes only on insert/delete, so
/// recomputing per keystroke would be wasted work.
#[derive(Debug, Default)]
pub struct FacetCache {
    values: Option<Vec<String>>,
}

impl FacetCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct sorted facet values, recomputing on a cold cache. An
    /// entity kind without a facet field yields an empty slice.
    pub fn values<R, C>(&mut self, collection: &C) -> &[String]
    where
        R: Entity,
        C: Collection<R>,
    {
        if self.values.is_none() {
            let computed = match R::SCHEMA.facet_field {
                Some(field) => {
                    let mut distinct = collection.distinct_values(field);
                    distinct.sort();
                    distinct.dedup();
                    tracing::debug!(
                        entity = R::SCHEMA.entity_name,
                        field,
                        count = distinct.len(),
                        "facet values recomputed"
                    );
                    distinct
                }
                None => Vec::new(),
            };
            self.values = Some(computed);
        }
        self.values.as_deref().unwrap_or_default()
    }

    /// Drop the cached set; next read recomputes. Called after any
    /// insert or delete.
    pub fn invalidate(&mut self) {
        self.values = None;
    }
}
