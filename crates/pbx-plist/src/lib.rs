//! Generic plist value model for pbxgraph.
//!
//! Project documents are property lists made of only three shapes: strings,
//! arrays, and dictionaries. Strings may carry an advisory comment that the
//! text form writes as `/* ... */` next to the value. Comments never take part
//! in equality or hashing; they exist only to make the written document
//! readable.
//!
//! Tokenizing plist text is not done here. Trees enter through the serde
//! bridge (JSON-shaped data, e.g. the output of `plutil -convert json`) or are
//! built in memory, and leave through [`PlistWriter`].
//!
//! # Modules
//!
//! - [`error`] -- Shape errors
//! - [`value`] -- [`CommentedString`], [`PlistValue`], [`PlistDictionary`]
//! - [`writer`] -- [`PlistWriter`], the OpenStep text writer

pub mod error;
pub mod value;
pub mod writer;

pub use error::{PlistError, PlistResult};
pub use value::{CommentedString, PlistDictionary, PlistValue};
pub use writer::{Layout, PlistWriter};
