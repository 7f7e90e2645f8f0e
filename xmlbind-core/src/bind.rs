//! The capability traits that make a type bindable.

use crate::{Peek, Poke, Shape, StructType};

/// A type that can be encoded to and decoded from an XML node tree.
///
/// Implemented for the std scalars, `String`, `Vec<T>`, `Option<T>`,
/// `Box<T>`, [`Dynamic`](crate::Dynamic) and [`QName`](crate::QName); user
/// structs get it from `#[derive(Bind)]`.
///
/// The trait is object safe: `shape` is only available on sized types, the
/// views are available through `&dyn Bind`.
pub trait Bind {
    /// The structural description of the type.
    fn shape() -> Shape
    where
        Self: Sized;

    /// Read-only view of the value.
    fn peek(&self) -> Peek<'_>;

    /// Mutable view of the value.
    fn poke(&mut self) -> Poke<'_>;
}

/// Field-level access to a struct.
pub trait StructBind {
    /// The struct description, for sized implementors.
    fn describe() -> StructType
    where
        Self: Sized;

    /// The struct description, through a trait object.
    fn struct_type(&self) -> StructType;

    /// View of the field at `index`, in declaration order.
    fn field(&self, index: usize) -> Option<Peek<'_>>;

    /// Mutable view of the field at `index`, in declaration order.
    fn field_mut(&mut self, index: usize) -> Option<Poke<'_>>;
}

/// Access to a homogeneous sequence.
pub trait ListBind {
    /// Shape of one item.
    fn item_shape(&self) -> Shape;

    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the sequence has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View of the item at `index`.
    fn item(&self, index: usize) -> Option<Peek<'_>>;

    /// Append a default-initialized item and return a view of it.
    fn push_default(&mut self) -> Poke<'_>;

    /// The items as raw bytes, when this is a byte sequence.
    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    /// Replace the items with `bytes`, when this is a byte sequence.
    ///
    /// Returns `false` (and leaves the sequence alone) for any other item type.
    fn set_bytes(&mut self, bytes: &[u8]) -> bool {
        let _ = bytes;
        false
    }
}

/// Access to a pointer-like holder (`Option<T>`, `Box<T>`).
pub trait PointerBind {
    /// Shape of the pointee.
    fn pointee_shape(&self) -> Shape;

    /// Whether the pointer currently holds nothing.
    fn is_null(&self) -> bool;

    /// View of the pointee, allocating a default one first if the pointer is
    /// null.
    fn get_or_allocate(&mut self) -> Poke<'_>;
}
