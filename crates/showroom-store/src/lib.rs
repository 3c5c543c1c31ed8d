//! showroom-store: persistence glue for the CRM core.
//!
//! [`MemoryCollection`] is the reference implementation of the
//! `Collection` capability; [`EntityState`] owns one collection plus its
//! query spec and keeps the visible page consistent after every spec
//! change or committed mutation.

mod memory;
mod mutation;
mod state;

pub use memory::MemoryCollection;
pub use mutation::{decode_raw, MutationError, MutationOutcome, RawInput};
pub use state::EntityState;
