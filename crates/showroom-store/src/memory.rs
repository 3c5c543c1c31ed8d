//! In-memory collection with monotonic id assignment.

use showroom_model::{Collection, Entity, FieldValue};

/// Insertion-ordered in-memory collection of one entity kind.
///
/// Natural order is insertion order, which the executor relies on for
/// stable tie-breaking; ids are never reused.
#[derive(Debug, Clone)]
pub struct MemoryCollection<R> {
    rows: Vec<R>,
    next_id: i64,
}

impl<R> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<R: Entity> MemoryCollection<R> {
    /// Empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection over previously stored rows. Rows without an id get
    /// one assigned; the id counter resumes past the largest seen.
    #[must_use]
    pub fn from_rows(rows: Vec<R>) -> Self {
        let mut next_id = rows
            .iter()
            .filter_map(Entity::id)
            .max()
            .unwrap_or_default()
            + 1;
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.id().is_none() {
                    row.assign_id(next_id);
                    next_id += 1;
                }
                row
            })
            .collect();
        Self { rows, next_id }
    }
}

impl<R: Entity> Collection<R> for MemoryCollection<R> {
    fn scan(&self) -> Vec<R> {
        self.rows.clone()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn find_by_id(&self, id: i64) -> Option<R> {
        self.rows.iter().find(|r| r.id() == Some(id)).cloned()
    }

    fn insert(&mut self, mut record: R) -> R {
        record.assign_id(self.next_id);
        self.next_id += 1;
        self.rows.push(record.clone());
        record
    }

    fn update(&mut self, id: i64, mut record: R) -> bool {
        match self.rows.iter_mut().find(|r| r.id() == Some(id)) {
            Some(slot) => {
                record.assign_id(id);
                *slot = record;
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, id: i64) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id() != Some(id));
        self.rows.len() != before
    }

    fn distinct_values(&self, field: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if let Some(FieldValue::Str(s)) = row.field(field) {
                if !seen.iter().any(|v| v == s) {
                    seen.push(s.to_string());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_model::Car;

    fn car(make: &str) -> Car {
        Car {
            make: make.to_string(),
            model: "M".to_string(),
            version: "Base".to_string(),
            year: 2020,
            price: 10_000,
            ..Car::default()
        }
    }

    #[test]
    fn insert_assigns_monotonic_ids() {
        let mut coll = MemoryCollection::new();
        let a = coll.insert(car("Toyota"));
        let b = coll.insert(car("Honda"));
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut coll = MemoryCollection::new();
        let a = coll.insert(car("Toyota"));
        assert!(coll.delete(a.id.unwrap_or_default()));
        let b = coll.insert(car("Honda"));
        assert_eq!(b.id, Some(2));
    }

    #[test]
    fn from_rows_resumes_the_id_counter() {
        let mut stored = car("Toyota");
        stored.id = Some(7);
        let mut coll = MemoryCollection::from_rows(vec![stored, car("Honda")]);
        // The id-less row is assigned past the largest stored id.
        assert_eq!(coll.scan()[1].id, Some(8));
        let next = coll.insert(car("Mazda"));
        assert_eq!(next.id, Some(9));
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let mut coll = MemoryCollection::new();
        coll.insert(car("Toyota"));
        coll.insert(car("Honda"));
        coll.insert(car("Toyota"));
        assert_eq!(coll.distinct_values("make"), vec!["Toyota", "Honda"]);
        assert!(coll.distinct_values("nope").is_empty());
    }
}
