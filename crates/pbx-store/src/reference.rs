use std::fmt;

use pbx_types::Identifier;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::store::ObjectStore;
use crate::traits::{Narrow, StoreObject};

/// A non-owning handle to an object in an [`ObjectStore`].
///
/// A reference is only a key. It never caches the target, so resolving it is
/// always a fresh lookup: a reference decoded before its target was inserted
/// resolves as soon as the target is there.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference {
    id: Identifier,
}

impl Reference {
    /// Create a reference to `id`.
    pub fn new(id: Identifier) -> Self {
        Self { id }
    }

    /// The identifier this reference points at.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// The raw token, as written in the document.
    pub fn value(&self) -> &str {
        self.id.as_str()
    }

    /// Returns `true` if both references were handed out for the same
    /// interned token (see [`ReferenceRepository`](crate::ReferenceRepository)).
    pub fn same_handle(&self, other: &Self) -> bool {
        self.id.shares_allocation(&other.id)
    }

    /// Resolve to the stored object.
    pub fn resolve<'s, O: StoreObject>(&self, store: &'s ObjectStore<O>) -> StoreResult<&'s O> {
        store.object(self)
    }

    /// Resolve and narrow to the variant `T`.
    ///
    /// Fails with [`StoreError::NotFound`] when nothing is stored under the
    /// identifier and [`StoreError::TypeMismatch`] when the stored object is
    /// another variant. Never mutates the store.
    pub fn object<'s, T, O>(&self, store: &'s ObjectStore<O>) -> StoreResult<&'s T>
    where
        O: StoreObject,
        T: Narrow<O>,
    {
        let object = store.object(self)?;
        T::narrow(object).ok_or_else(|| StoreError::TypeMismatch {
            id: self.id.clone(),
            expected: T::ISA,
            found: object.isa().to_string(),
        })
    }

    /// Resolve and narrow to a mutable `T`.
    pub fn object_mut<'s, T, O>(&self, store: &'s mut ObjectStore<O>) -> StoreResult<&'s mut T>
    where
        O: StoreObject,
        T: Narrow<O>,
    {
        let object = store.object_mut(self)?;
        let found = object.isa().to_string();
        T::narrow_mut(object).ok_or_else(|| StoreError::TypeMismatch {
            id: self.id.clone(),
            expected: T::ISA,
            found,
        })
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference({})", self.id)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl From<Identifier> for Reference {
    fn from(id: Identifier) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Branch, Leaf, Node};

    #[test]
    fn object_narrows_to_variant() {
        let mut store = ObjectStore::new();
        let reference = store.add_object(Node::Leaf(Leaf::named("a")));
        let leaf: &Leaf = reference.object(&store).unwrap();
        assert_eq!(leaf.name, "a");
    }

    #[test]
    fn object_reports_type_mismatch() {
        let mut store = ObjectStore::new();
        let reference = store.add_object(Node::Leaf(Leaf::named("a")));
        let err = reference.object::<Branch, _>(&store).unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                id: reference.id().clone(),
                expected: "Branch",
                found: "Leaf".into(),
            }
        );
    }

    #[test]
    fn object_reports_not_found() {
        let store: ObjectStore<Node> = ObjectStore::new();
        let reference = Reference::new(Identifier::parse("MISSING").unwrap());
        let err = reference.object::<Leaf, _>(&store).unwrap_err();
        assert_eq!(err, StoreError::NotFound(reference.id().clone()));
    }

    #[test]
    fn resolution_is_retried_after_insert() {
        let mut store = ObjectStore::new();
        let id = Identifier::parse("LATER").unwrap();
        let reference = Reference::new(id.clone());
        assert!(reference.object::<Leaf, _>(&store).is_err());

        store.insert(id, Node::Leaf(Leaf::named("late")));
        assert_eq!(reference.object::<Leaf, _>(&store).unwrap().name, "late");
    }

    #[test]
    fn object_mut_updates_in_place() {
        let mut store = ObjectStore::new();
        let reference = store.add_object(Node::Leaf(Leaf::named("a")));
        reference.object_mut::<Leaf, _>(&mut store).unwrap().name = "b".into();
        assert_eq!(reference.object::<Leaf, _>(&store).unwrap().name, "b");
    }

    #[test]
    fn serializes_as_token() {
        let reference = Reference::new(Identifier::parse("ABC").unwrap());
        assert_eq!(serde_json::to_string(&reference).unwrap(), "\"ABC\"");
        assert_eq!(format!("{reference}"), "ABC");
        assert_eq!(format!("{reference:?}"), "Reference(ABC)");
    }
}
