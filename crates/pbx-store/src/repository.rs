//! Get-or-create cache from raw document tokens to [`Reference`] handles.
//!
//! While a document is decoded, objects mention each other by raw token in
//! any order: a group may list a child that is decoded later, or a child that
//! lists the group back. The repository makes that order irrelevant. Every
//! sighting of a token returns the same interned handle, whether or not the
//! target has been inserted into the store yet.

use std::collections::HashMap;

use pbx_types::Identifier;
use tracing::trace;

use crate::error::StoreResult;
use crate::reference::Reference;
use crate::store::ObjectStore;
use crate::traits::StoreObject;

/// Interning table for references of one document.
#[derive(Debug, Default)]
pub struct ReferenceRepository {
    references: HashMap<Identifier, Reference>,
}

impl ReferenceRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct identifiers seen.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Returns `true` if no identifier has been seen.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Returns `true` if `raw` has been seen before.
    pub fn contains(&self, raw: &str) -> bool {
        self.references.contains_key(raw)
    }

    /// Return the handle for `raw`, creating it on first sighting.
    ///
    /// Repeated calls with the same token return handles sharing one token
    /// allocation. On first sighting the store's own key is reused when the
    /// object is already materialized; otherwise the mapping is recorded and
    /// the object is expected to be inserted later. Resolution failures are
    /// not detected here: they surface when the handle is dereferenced.
    ///
    /// The only error is a token that is not a valid identifier (empty or
    /// containing whitespace).
    pub fn get_or_create<O: StoreObject>(
        &mut self,
        raw: &str,
        objects: &ObjectStore<O>,
    ) -> StoreResult<Reference> {
        if let Some(existing) = self.references.get(raw) {
            return Ok(existing.clone());
        }
        let id = match objects.identifier(raw) {
            Some(stored) => stored.clone(),
            None => Identifier::parse(raw)?,
        };
        trace!(id = %id, materialized = objects.contains(raw), "new reference");
        let reference = Reference::new(id.clone());
        self.references.insert(id, reference.clone());
        Ok(reference)
    }

    /// Record a handle minted elsewhere (e.g. by [`ObjectStore::add_object`]).
    ///
    /// Later `get_or_create` calls for the same token return this handle. An
    /// existing entry wins, so handles already given out stay canonical.
    pub fn register(&mut self, reference: &Reference) -> Reference {
        self.references
            .entry(reference.id().clone())
            .or_insert_with(|| reference.clone())
            .clone()
    }
}
