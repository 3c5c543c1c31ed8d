//! Record-store capability consumed by the query and mutation layers.

use crate::Entity;

/// Abstract tabular collection of one entity kind.
///
/// The store exposes natural (insertion/id) order through [`scan`];
/// filtering, sorting and pagination are owned by the query executor,
/// which keeps the store a thin persistence seam.
///
/// [`scan`]: Collection::scan
pub trait Collection<R: Entity> {
    /// All records in natural order.
    fn scan(&self) -> Vec<R>;

    /// Number of records.
    fn len(&self) -> usize;

    /// True when the collection holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record with the given id, if present.
    fn find_by_id(&self, id: i64) -> Option<R>;

    /// Insert a record, assigning a fresh id. Returns the stored record.
    fn insert(&mut self, record: R) -> R;

    /// Replace the record with `id`. Returns false when no such record
    /// exists; the collection is unchanged in that case.
    fn update(&mut self, id: i64, record: R) -> bool;

    /// Remove the record with `id`. Returns false when absent.
    fn delete(&mut self, id: i64) -> bool;

    /// Distinct values of one string field, unsorted. Unknown field
    /// names yield an empty set.
    fn distinct_values(&self, field: &str) -> Vec<String>;
}
