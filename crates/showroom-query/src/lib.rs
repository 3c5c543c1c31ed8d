//! showroom-query: turns a mutable set of search/filter/sort/pagination
//! parameters into a deterministic, paginated result set over an entity
//! collection.
//!
//! The [`QuerySpec`] is pure session state mutated by UI events; the
//! executor re-derives a [`Page`] from it on every change. Malformed
//! numeric filter input is treated as "no constraint" rather than an
//! error, favoring forgiving search UX over strict validation.

mod executor;
mod facet;
mod page;
mod spec;

pub use executor::execute;
pub use facet::FacetCache;
pub use page::Page;
pub use spec::{FilterValue, QuerySpec};
