/// An object that can live in an [`ObjectStore`](crate::ObjectStore).
///
/// Stores hold one closed sum type of objects. The store only needs to know
/// each object's discriminator and a seed used when minting identifiers.
pub trait StoreObject {
    /// Discriminator naming the variant (the `isa` tag on the wire).
    fn isa(&self) -> &str;

    /// Text mixed into minted identifiers, e.g. the object's name.
    ///
    /// Identical seeds are fine; the store retries until the token is unused.
    fn identifier_seed(&self) -> String {
        String::new()
    }
}

/// Checked narrowing from a store's object type `O` to one of its variants.
///
/// This replaces runtime downcasting: a reference resolves to an `O`, and the
/// caller asks for a specific view of it. A failed narrowing is reported as a
/// type mismatch, distinct from "not found".
pub trait Narrow<O>: Sized {
    /// Discriminator reported in type-mismatch errors.
    const ISA: &'static str;

    /// View `object` as `Self`, if it is one.
    fn narrow(object: &O) -> Option<&Self>;

    /// Mutable view of `object` as `Self`, if it is one.
    fn narrow_mut(object: &mut O) -> Option<&mut Self>;
}
