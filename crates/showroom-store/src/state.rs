//! Per-session entity state: collection + query spec + visible page.

use serde::de::DeserializeOwned;
use showroom_model::{Collection, Entity, EntitySchema, FieldValue, Validate};
use showroom_query::{execute, FacetCache, Page, QuerySpec};

use crate::memory::MemoryCollection;
use crate::mutation::{decode_raw, entity_label, MutationError, MutationOutcome, RawInput};

/// Session-owned state for one entity kind.
///
/// All access to the collection goes through this facade; UI-triggered
/// operations are serialized by `&mut self`, matching the one-writer
/// model of a single UI session. Every spec change and every committed
/// mutation re-derives the visible page, and the current page index is
/// re-clamped into `[1, page_count]` after each derivation.
#[derive(Debug)]
pub struct EntityState<R: Entity> {
    collection: MemoryCollection<R>,
    spec: QuerySpec,
    facets: FacetCache,
    page: Page<R>,
}

impl<R> Default for EntityState<R>
where
    R: Entity + Validate + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> EntityState<R>
where
    R: Entity + Validate + DeserializeOwned,
{
    /// Empty state with a default spec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collection: MemoryCollection::new(),
            spec: QuerySpec::default(),
            facets: FacetCache::new(),
            page: Page::default(),
        }
    }

    /// State over an existing collection, with a default spec.
    #[must_use]
    pub fn from_collection(collection: MemoryCollection<R>) -> Self {
        let mut state = Self {
            collection,
            spec: QuerySpec::default(),
            facets: FacetCache::new(),
            page: Page::default(),
        };
        state.refresh();
        state
    }

    /// The entity schema driving filters and sorting.
    #[must_use]
    pub fn schema(&self) -> &'static EntitySchema {
        R::SCHEMA
    }

    /// Read-only view of the current spec.
    #[must_use]
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// The most recently derived page.
    #[must_use]
    pub fn page(&self) -> &Page<R> {
        &self.page
    }

    /// Underlying collection (read-only).
    #[must_use]
    pub fn collection(&self) -> &MemoryCollection<R> {
        &self.collection
    }

    /// Distinct facet values for the filter dropdown, cached.
    pub fn facet_values(&mut self) -> Vec<String> {
        self.facets.values(&self.collection).to_vec()
    }

    /// Re-derive the visible page from the current spec and collection.
    pub fn refresh(&mut self) {
        self.page = execute(&self.collection, &self.spec);
        self.spec.last_page_count = self.page.page_count;
        if self.spec.page > self.page.page_count {
            self.spec.page = self.page.page_count;
            self.page = execute(&self.collection, &self.spec);
        }
    }

    /// Set the search term and refresh.
    pub fn search(&mut self, term: impl Into<String>) {
        self.spec.set_search_term(term);
        self.refresh();
    }

    /// Set an equality filter (e.g. make selector) and refresh. Applying
    /// a filter restarts paging.
    pub fn set_equality_filter(&mut self, field: &str, raw: &str) {
        self.spec.set_equality_filter(R::SCHEMA, field, raw);
        self.spec.page = 1;
        self.refresh();
    }

    /// Set a substring filter on a string field and refresh. Applying a
    /// filter restarts paging.
    pub fn set_contains_filter(&mut self, field: &str, raw: &str) {
        self.spec.set_contains_filter(R::SCHEMA, field, raw);
        self.spec.page = 1;
        self.refresh();
    }

    /// Set a numeric range filter from raw min/max input and refresh.
    /// Applying a filter restarts paging.
    pub fn set_range_filter(&mut self, field: &str, min_raw: &str, max_raw: &str) {
        self.spec.set_range_filter(R::SCHEMA, field, min_raw, max_raw);
        self.spec.page = 1;
        self.refresh();
    }

    /// Clear all field filters (search and sort stay) and refresh.
    pub fn reset_filters(&mut self) {
        self.spec.reset_filters();
        self.refresh();
    }

    /// Select the sort field and refresh.
    pub fn sort_by(&mut self, field: &str) {
        self.spec.set_sort(R::SCHEMA, field);
        self.refresh();
    }

    /// Flip the sort direction and refresh.
    pub fn toggle_sort_direction(&mut self) {
        self.spec.toggle_sort_direction();
        self.refresh();
    }

    /// Change the page size and refresh.
    pub fn set_page_size(&mut self, size: usize) {
        self.spec.set_page_size(size);
        self.refresh();
    }

    /// Jump to a page (clamped) and refresh.
    pub fn go_to_page(&mut self, page: usize) {
        self.spec.go_to_page(page);
        self.refresh();
    }

    /// Record with the given id, if present.
    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<R> {
        self.collection.find_by_id(id)
    }

    /// Validate and insert a new record from raw form input.
    ///
    /// # Errors
    /// [`MutationError::Validation`] when decoding or field validation
    /// fails (no mutation occurs), [`MutationError::Conflict`] when a
    /// uniqueness constraint is violated.
    pub fn create(&mut self, raw: &RawInput) -> Result<MutationOutcome<R>, MutationError> {
        let record: R = decode_raw(raw).map_err(MutationError::from_field_errors)?;
        let record = record.validated().map_err(MutationError::from_field_errors)?;

        self.check_unique(&record, None)?;

        // Commit before refresh so the refreshed page reflects the change.
        let stored = self.collection.insert(record);
        self.facets.invalidate();
        self.refresh();

        let message = format!(
            "{} {} has been added.",
            entity_label::<R>(),
            stored.display_name()
        );
        tracing::info!(
            entity = R::SCHEMA.entity_name,
            id = stored.id(),
            "record created"
        );
        Ok(MutationOutcome {
            record: stored,
            message,
        })
    }

    /// Validate and replace the record with `id` from raw form input.
    ///
    /// # Errors
    /// [`MutationError::NotFound`] when `id` does not exist, plus the
    /// same validation/conflict cases as [`EntityState::create`].
    pub fn update(
        &mut self,
        id: i64,
        raw: &RawInput,
    ) -> Result<MutationOutcome<R>, MutationError> {
        let record: R = decode_raw(raw).map_err(MutationError::from_field_errors)?;
        let record = record.validated().map_err(MutationError::from_field_errors)?;

        if self.collection.find_by_id(id).is_none() {
            return Err(MutationError::NotFound(entity_label::<R>()));
        }
        self.check_unique(&record, Some(id))?;

        let mut stored = record;
        stored.assign_id(id);
        self.collection.update(id, stored.clone());
        self.facets.invalidate();
        self.refresh();

        let message = format!(
            "{} {} has been modified.",
            entity_label::<R>(),
            stored.display_name()
        );
        tracing::info!(entity = R::SCHEMA.entity_name, id, "record updated");
        Ok(MutationOutcome {
            record: stored,
            message,
        })
    }

    /// Remove the record with `id`.
    ///
    /// # Errors
    /// [`MutationError::NotFound`] when `id` does not exist.
    pub fn delete(&mut self, id: i64) -> Result<MutationOutcome<R>, MutationError> {
        let Some(record) = self.collection.find_by_id(id) else {
            return Err(MutationError::NotFound(entity_label::<R>()));
        };

        self.collection.delete(id);
        self.facets.invalidate();
        self.refresh();

        let message = format!(
            "{} {} has been deleted.",
            entity_label::<R>(),
            record.display_name()
        );
        tracing::info!(entity = R::SCHEMA.entity_name, id, "record deleted");
        Ok(MutationOutcome { record, message })
    }

    /// Whole-record uniqueness check, run after field validation. On
    /// update, the record being replaced is excluded from the scan.
    fn check_unique(&self, record: &R, exclude_id: Option<i64>) -> Result<(), MutationError> {
        let Some((field, key)) = record.unique_key() else {
            return Ok(());
        };
        let duplicate = self.collection.scan().into_iter().any(|existing| {
            if exclude_id.is_some() && existing.id() == exclude_id {
                return false;
            }
            matches!(existing.field(field), Some(FieldValue::Str(s)) if s == key)
        });
        if duplicate {
            return Err(MutationError::Conflict(format!(
                "{} with this {field} already exists",
                entity_label::<R>()
            )));
        }
        Ok(())
    }
}
