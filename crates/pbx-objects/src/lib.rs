//! Project object model for pbxgraph.
//!
//! This crate turns the generic plist tree of a project document into typed
//! objects, lets callers edit the object graph, and projects it back into a
//! plist tree with the comments and key order the build tool writes.
//!
//! # Object Kinds
//!
//! - [`Group`] (`PBXGroup`) -- ordered children, the navigator hierarchy
//! - [`VariantGroup`] (`PBXVariantGroup`) -- localized variants of one resource
//! - [`VersionGroup`] (`XCVersionGroup`) -- versioned bundles such as data models
//! - [`FileReference`] (`PBXFileReference`) -- a file on disk
//! - [`UnknownObject`] -- every other kind, carried through untouched
//!
//! All kinds are variants of the closed sum type [`PbxObject`]. References
//! between objects are [`Reference`](pbx_store::Reference) keys into the
//! document's [`ObjectStore`](pbx_store::ObjectStore), resolved on demand.
//!
//! # Flow
//!
//! 1. [`PbxProj::decode`] reads each object with an explicit
//!    [`DecodeContext`]. Child tokens become references through the
//!    document's [`ReferenceRepository`](pbx_store::ReferenceRepository);
//!    children are never decoded recursively, so forward references and
//!    cycles need no ordering.
//! 2. Editing operations ([`PbxProj::add_group`], [`PbxProj::add_file`])
//!    mutate the graph in place.
//! 3. [`PbxProj::to_plist`] and [`ProjectEncoder`] project every object back,
//!    annotating references with the target's display label.

pub mod config;
pub mod decode;
pub mod editing;
pub mod element;
pub mod encoder;
pub mod error;
pub mod file_reference;
pub mod filetype;
pub mod group;
pub mod object;
pub mod paths;
pub mod project;
pub mod projection;
pub mod source_tree;
pub mod unknown;

#[cfg(test)]
mod test_support;

pub use config::EncoderConfig;
pub use decode::{DecodeContext, Fields};
pub use editing::GroupAddingOptions;
pub use element::FileElement;
pub use encoder::ProjectEncoder;
pub use error::{ObjectsError, ObjectsResult};
pub use file_reference::FileReference;
pub use group::{Group, VariantGroup, VersionGroup};
pub use object::PbxObject;
pub use project::PbxProj;
pub use source_tree::SourceTree;
pub use unknown::UnknownObject;
