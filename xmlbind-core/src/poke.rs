//! Mutable views of bindable values.

use std::borrow::Cow;

use crate::{Dynamic, ListBind, PointerBind, QName, ScalarMut, StructBind};

/// A mutable view of a value, as seen by the decoder.
pub enum Poke<'a> {
    /// A scalar slot.
    Scalar(ScalarMut<'a>),
    /// A struct.
    Struct(&'a mut dyn StructBind),
    /// A sequence that items can be appended to.
    List(&'a mut dyn ListBind),
    /// An `Option<T>` or `Box<T>`.
    Pointer(&'a mut dyn PointerBind),
    /// A [`Dynamic`] holder.
    Dynamic(&'a mut Dynamic),
    /// A qualified element name.
    Name(&'a mut QName),
    /// A slot of a type with no XML representation.
    Unsupported(&'static str),
}

impl Poke<'_> {
    /// Reborrow the view for a shorter lifetime, so it can be written to more
    /// than once.
    pub fn reborrow(&mut self) -> Poke<'_> {
        match self {
            Poke::Scalar(scalar) => Poke::Scalar(scalar.reborrow()),
            Poke::Struct(value) => Poke::Struct(&mut **value),
            Poke::List(list) => Poke::List(&mut **list),
            Poke::Pointer(pointer) => Poke::Pointer(&mut **pointer),
            Poke::Dynamic(dynamic) => Poke::Dynamic(dynamic),
            Poke::Name(name) => Poke::Name(name),
            Poke::Unsupported(name) => Poke::Unsupported(name),
        }
    }

    /// Name of the slot's type, for diagnostics.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Poke::Scalar(scalar) => Cow::Borrowed(scalar.scalar_type().name()),
            Poke::Struct(value) => Cow::Borrowed(value.struct_type().name),
            Poke::List(list) => Cow::Owned(format!("Vec<{}>", list.item_shape().type_name)),
            Poke::Pointer(pointer) => pointer.pointee_shape().type_name,
            Poke::Dynamic(_) => Cow::Borrowed("Dynamic"),
            Poke::Name(_) => Cow::Borrowed("QName"),
            Poke::Unsupported(name) => Cow::Borrowed(name),
        }
    }
}

impl core::fmt::Debug for Poke<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Poke<{}>", self.type_name())
    }
}
