//! Object store and reference resolution for pbxgraph.
//!
//! A project document is a graph of objects that point at each other by
//! identifier. This crate owns that graph:
//!
//! - [`ObjectStore`] -- the arena that owns every object, keyed by
//!   [`Identifier`](pbx_types::Identifier)
//! - [`Reference`] -- a non-owning key into the store, resolved on demand
//! - [`ReferenceRepository`] -- interns raw document tokens so each
//!   identifier maps to exactly one handle per document
//!
//! # Design Rules
//!
//! 1. The store is the only owner of objects. References never own memory, so
//!    shared children and cycles need no special lifetime handling.
//! 2. Resolution is retried on every call. A reference that does not resolve
//!    today may resolve after the target is inserted.
//! 3. New identifiers are minted only by the store.
//! 4. Iteration is in identifier order, so anything derived from the store is
//!    deterministic.
//! 5. A store and its repository live and die with one document. There is no
//!    global state.

pub mod error;
pub mod reference;
pub mod repository;
pub mod store;
pub mod traits;

#[cfg(test)]
mod test_support;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use reference::Reference;
pub use repository::ReferenceRepository;
pub use store::ObjectStore;
pub use traits::{Narrow, StoreObject};
