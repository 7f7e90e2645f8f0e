//! Read-only views of bindable values.

use std::borrow::Cow;

use crate::{Bind, ListBind, QName, ScalarRef, StructBind};

/// A read-only view of a value, as seen by the encoder.
#[derive(Clone, Copy)]
pub enum Peek<'a> {
    /// A scalar value.
    Scalar(ScalarRef<'a>),
    /// A struct.
    Struct(&'a dyn StructBind),
    /// A sequence of items.
    List(&'a dyn ListBind),
    /// An `Option<T>` or `Box<T>`; `None` when the pointer is null.
    Pointer(Option<&'a dyn Bind>),
    /// A [`Dynamic`](crate::Dynamic); `None` when it holds no value.
    Dynamic(Option<&'a dyn Bind>),
    /// A qualified element name.
    Name(&'a QName),
    /// A value of a type with no XML representation.
    Unsupported(&'static str),
}

impl<'a> Peek<'a> {
    /// Follow pointers and dynamic holders down to a concrete value.
    ///
    /// Returns `None` as soon as a null pointer or an empty dynamic holder is
    /// reached.
    pub fn deref(self) -> Option<Peek<'a>> {
        let mut current = self;
        loop {
            current = match current {
                Peek::Pointer(Some(inner)) | Peek::Dynamic(Some(inner)) => inner.peek(),
                Peek::Pointer(None) | Peek::Dynamic(None) => return None,
                other => return Some(other),
            };
        }
    }

    /// Whether the value equals its type's zero value.
    ///
    /// Null pointers and empty dynamic holders are zero; a non-null pointer
    /// never is, whatever it points to. Structs are zero when every field is.
    pub fn is_zero(&self) -> bool {
        match self {
            Peek::Scalar(scalar) => scalar.is_zero(),
            Peek::Struct(value) => (0..)
                .map_while(|index| value.field(index))
                .all(|field| field.is_zero()),
            Peek::List(list) => list.is_empty(),
            Peek::Pointer(inner) | Peek::Dynamic(inner) => inner.is_none(),
            Peek::Name(name) => name.is_empty(),
            Peek::Unsupported(_) => false,
        }
    }

    /// Name of the value's type, for diagnostics and name fallback.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Peek::Scalar(scalar) => Cow::Borrowed(scalar.scalar_type().name()),
            Peek::Struct(value) => Cow::Borrowed(value.struct_type().name),
            Peek::List(list) => Cow::Owned(format!("Vec<{}>", list.item_shape().type_name)),
            Peek::Pointer(Some(inner)) => inner.peek().type_name(),
            Peek::Pointer(None) => Cow::Borrowed("Option"),
            Peek::Dynamic(_) => Cow::Borrowed("Dynamic"),
            Peek::Name(_) => Cow::Borrowed("QName"),
            Peek::Unsupported(name) => Cow::Borrowed(name),
        }
    }
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Peek::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Peek::Name(name) => f.debug_tuple("Name").field(name).finish(),
            other => write!(f, "Peek<{}>", other.type_name()),
        }
    }
}
