//! Foundation types for pbxgraph.
//!
//! Every object in a project document is addressed by an opaque token that is
//! unique within that document. This crate provides the token type and the
//! hasher used to mint fresh tokens for objects created in memory. Every other
//! pbxgraph crate depends on `pbx-types`.
//!
//! # Key Types
//!
//! - [`Identifier`] -- Opaque, cheap-to-clone object identifier
//! - [`IdentifierHasher`] -- Domain-separated BLAKE3 minting of new identifiers
//! - [`TypeError`] -- Parse failures for identifiers

pub mod error;
pub mod hasher;
pub mod identifier;

pub use error::TypeError;
pub use hasher::IdentifierHasher;
pub use identifier::Identifier;
