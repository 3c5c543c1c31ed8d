//! Staged query execution: search, field filters, count, sort, paginate.

use showroom_model::{Collection, Entity, FieldValue};

use crate::{FilterValue, Page, QuerySpec};

/// Derive a [`Page`] from `spec` over `collection`.
///
/// A pure function of its inputs: the same spec over the same collection
/// always yields the same page. `spec.page` is expected to be already
/// clamped by the caller ([`QuerySpec::go_to_page`]); out-of-range pages
/// simply produce an empty item list.
pub fn execute<R, C>(collection: &C, spec: &QuerySpec) -> Page<R>
where
    R: Entity,
    C: Collection<R>,
{
    let mut rows: Vec<R> = collection.scan();

    // Search stage: any searchable field contains the term, case-insensitively.
    let term = spec.search_term.trim().to_lowercase();
    if !term.is_empty() {
        rows.retain(|row| {
            R::SCHEMA.searchable_fields().any(|name| {
                matches!(
                    row.field(name),
                    Some(FieldValue::Str(s)) if s.to_lowercase().contains(&term)
                )
            })
        });
    }

    // Field-filter stage. Filter order is irrelevant: stages commute.
    for (field, filter) in &spec.field_filters {
        rows.retain(|row| matches_filter(row, field, filter));
    }

    // Count before pagination.
    let total_count = rows.len();
    let page_count = Page::<R>::count_pages(total_count, spec.page_size);

    // Sort stage: stable sort keeps natural order on ties, so repeated
    // queries with the same spec paginate identically.
    if let Some(sort_field) = spec.sort_field.as_deref() {
        rows.sort_by(|a, b| {
            let ord = match (a.field(sort_field), b.field(sort_field)) {
                (Some(x), Some(y)) => x.sort_cmp(&y),
                _ => std::cmp::Ordering::Equal,
            };
            if spec.sort_descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    // Paginate stage.
    let start = (spec.page.max(1) - 1) * spec.page_size;
    let items: Vec<R> = rows.into_iter().skip(start).take(spec.page_size).collect();

    tracing::debug!(
        entity = R::SCHEMA.entity_name,
        total_count,
        page_count,
        page = spec.page,
        returned = items.len(),
        "query executed"
    );

    Page {
        items,
        total_count,
        page_count,
    }
}

/// True when `row` satisfies `filter` on `field`.
///
/// Defensive by policy: an unknown field, a filter kind that does not
/// apply to the field's type, or an unparsable equality target all
/// degrade to "unconstrained" and keep the record.
fn matches_filter<R: Entity>(row: &R, field: &str, filter: &FilterValue) -> bool {
    let Some(value) = row.field(field) else {
        return true;
    };
    match filter {
        FilterValue::Equals(target) => match value {
            FieldValue::Str(s) => s == target,
            other => match target.trim().parse::<f64>() {
                Ok(n) => other.as_number() == Some(n),
                Err(_) => true,
            },
        },
        FilterValue::Contains(target) => match value {
            FieldValue::Str(s) => s.to_lowercase().contains(&target.to_lowercase()),
            _ => true,
        },
        FilterValue::Range { min, max } => match value.as_number() {
            Some(n) => min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi),
            None => true,
        },
    }
}
