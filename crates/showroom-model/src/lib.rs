//! showroom-model: entity schemas, records and validation.
//!
//! Record types (`Customer`, `Car`) expose their fields through a
//! schema-driven accessor table instead of runtime reflection, so the
//! query layer can resolve sort/filter fields by name without faulting
//! on unknown names.

mod car;
mod collection;
mod customer;
mod entity;
mod schema;
mod validate;

pub use car::Car;
pub use collection::Collection;
pub use customer::Customer;
pub use entity::{Entity, FieldValue};
pub use schema::{EntitySchema, FieldDef, FieldKind};
pub use validate::{FieldError, Validate};
