use std::collections::BTreeMap;

use pbx_types::{Identifier, IdentifierHasher};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::reference::Reference;
use crate::traits::{Narrow, StoreObject};

/// The arena that owns every object of one document.
///
/// Objects are keyed by [`Identifier`] in a `BTreeMap`, so every iteration
/// (and everything derived from it, such as typed views or serialization)
/// happens in identifier order. Identifiers are unique within a store.
#[derive(Clone, Debug)]
pub struct ObjectStore<O> {
    objects: BTreeMap<Identifier, O>,
}

impl<O> Default for ObjectStore<O> {
    fn default() -> Self {
        Self {
            objects: BTreeMap::new(),
        }
    }
}

impl<O: StoreObject> ObjectStore<O> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns `true` if an object is stored under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// The store's own key for `id`, if present.
    ///
    /// Handing out the stored key lets callers share its allocation.
    pub fn identifier(&self, id: &str) -> Option<&Identifier> {
        self.objects.get_key_value(id).map(|(key, _)| key)
    }

    /// Insert an object created in memory under a freshly minted identifier.
    ///
    /// The identifier is derived from the object's `isa` and seed, retrying
    /// until it is unused in this store. Children of `object` are not
    /// visited, so this is safe while the rest of the graph is half built.
    pub fn add_object(&mut self, object: O) -> Reference {
        let id = self.mint(&object);
        debug!(id = %id, isa = object.isa(), "minted object");
        self.objects.insert(id.clone(), object);
        Reference::new(id)
    }

    /// Insert an object under an identifier it already carries.
    ///
    /// An existing object under the same identifier is replaced; a later
    /// lookup returns `object`.
    pub fn insert(&mut self, id: Identifier, object: O) -> Reference {
        if self.objects.insert(id.clone(), object).is_some() {
            debug!(id = %id, "replaced object");
        }
        Reference::new(id)
    }

    /// Look up the object a reference points at.
    pub fn object(&self, reference: &Reference) -> StoreResult<&O> {
        self.objects
            .get(reference.value())
            .ok_or_else(|| StoreError::NotFound(reference.id().clone()))
    }

    /// Mutable lookup of the object a reference points at.
    pub fn object_mut(&mut self, reference: &Reference) -> StoreResult<&mut O> {
        self.objects
            .get_mut(reference.value())
            .ok_or_else(|| StoreError::NotFound(reference.id().clone()))
    }

    /// Look up by raw identifier.
    pub fn get(&self, id: &str) -> Option<&O> {
        self.objects.get(id)
    }

    /// All objects in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &O)> {
        self.objects.iter()
    }

    /// References to all objects, in identifier order.
    pub fn references(&self) -> Vec<Reference> {
        self.objects.keys().cloned().map(Reference::new).collect()
    }

    /// All objects of variant `T`, in identifier order.
    ///
    /// This is computed from the store on every call; it is never a cached
    /// snapshot.
    pub fn iter_of<'a, T: Narrow<O> + 'a>(&'a self) -> impl Iterator<Item = (Reference, &'a T)> {
        self.objects.iter().filter_map(|(id, object)| {
            T::narrow(object).map(|typed| (Reference::new(id.clone()), typed))
        })
    }

    fn mint(&self, object: &O) -> Identifier {
        let seed = object.identifier_seed();
        let mut attempt = 0u64;
        loop {
            let id = IdentifierHasher::OBJECT.mint(object.isa(), &seed, attempt);
            if !self.objects.contains_key(id.as_str()) {
                return id;
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Branch, Leaf, Node};

    // -----------------------------------------------------------------------
    // Insertion and lookup
    // -----------------------------------------------------------------------

    #[test]
    fn add_then_lookup_returns_same_object() {
        let mut store = ObjectStore::new();
        let leaf = Node::Leaf(Leaf::named("main.swift"));
        let reference = store.add_object(leaf.clone());
        assert_eq!(store.object(&reference).unwrap(), &leaf);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn minted_identifiers_are_unique() {
        let mut store = ObjectStore::new();
        let a = store.add_object(Node::Leaf(Leaf::named("same")));
        let b = store.add_object(Node::Leaf(Leaf::named("same")));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn minting_is_deterministic_across_stores() {
        let mut first = ObjectStore::new();
        let mut second = ObjectStore::new();
        let a = first.add_object(Node::Leaf(Leaf::named("x")));
        let b = second.add_object(Node::Leaf(Leaf::named("x")));
        assert_eq!(a, b);
    }

    #[test]
    fn minted_identifier_shape() {
        let mut store = ObjectStore::new();
        let reference = store.add_object(Node::Leaf(Leaf::named("x")));
        assert_eq!(reference.value().len(), 24);
    }

    #[test]
    fn insert_under_carried_identifier() {
        let mut store = ObjectStore::new();
        let id = Identifier::parse("OBJ_1").unwrap();
        let reference = store.insert(id.clone(), Node::Leaf(Leaf::named("a")));
        assert_eq!(reference.id(), &id);
        assert!(store.contains("OBJ_1"));
    }

    #[test]
    fn insert_overwrites() {
        let mut store = ObjectStore::new();
        let id = Identifier::parse("OBJ_1").unwrap();
        store.insert(id.clone(), Node::Leaf(Leaf::named("first")));
        let reference = store.insert(id, Node::Leaf(Leaf::named("second")));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.object(&reference).unwrap(),
            &Node::Leaf(Leaf::named("second"))
        );
    }

    #[test]
    fn missing_object_is_not_found() {
        let store: ObjectStore<Node> = ObjectStore::new();
        let reference = Reference::new(Identifier::parse("NOPE").unwrap());
        assert_eq!(
            store.object(&reference),
            Err(StoreError::NotFound(reference.id().clone()))
        );
        assert!(store.get("NOPE").is_none());
    }

    #[test]
    fn identifier_returns_stored_key() {
        let mut store = ObjectStore::new();
        let reference = store.add_object(Node::Leaf(Leaf::named("a")));
        let key = store.identifier(reference.value()).unwrap();
        assert!(key.shares_allocation(reference.id()));
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    #[test]
    fn iter_is_in_identifier_order() {
        let mut store = ObjectStore::new();
        for raw in ["C", "A", "B"] {
            store.insert(Identifier::parse(raw).unwrap(), Node::Leaf(Leaf::named(raw)));
        }
        let ids: Vec<&str> = store.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        let refs: Vec<String> = store.references().iter().map(|r| r.value().to_string()).collect();
        assert_eq!(refs, vec!["A", "B", "C"]);
    }

    #[test]
    fn typed_view_reflects_current_contents() {
        let mut store = ObjectStore::new();
        store.add_object(Node::Leaf(Leaf::named("a")));
        store.add_object(Node::Branch(Branch::default()));
        assert_eq!(store.iter_of::<Leaf>().count(), 1);

        store.add_object(Node::Leaf(Leaf::named("b")));
        let names: Vec<&str> = store
            .iter_of::<Leaf>()
            .map(|(_, leaf)| leaf.name.as_str())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a") && names.contains(&"b"));
        assert_eq!(store.iter_of::<Branch>().count(), 1);
    }

    #[test]
    fn adding_does_not_require_children_to_exist() {
        let mut store = ObjectStore::new();
        let dangling = Reference::new(Identifier::parse("NOT_YET").unwrap());
        let branch = store.add_object(Node::Branch(Branch {
            children: vec![dangling.clone()],
        }));
        let stored: &Branch = branch.object(&store).unwrap();
        assert_eq!(stored.children, vec![dangling]);
    }

    proptest::proptest! {
        #[test]
        fn lookup_after_add_roundtrips(names in proptest::collection::vec("[a-z]{0,8}", 1..24)) {
            let mut store = ObjectStore::new();
            let mut added = Vec::new();
            for name in &names {
                let node = Node::Leaf(Leaf::named(name));
                added.push((store.add_object(node.clone()), node));
            }
            proptest::prop_assert_eq!(store.len(), names.len());
            for (reference, node) in &added {
                proptest::prop_assert_eq!(store.object(reference).unwrap(), node);
            }
        }
    }
}
