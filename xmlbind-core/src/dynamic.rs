//! Polymorphic value holder.

use std::any::Any;
use std::fmt;

use crate::{Bind, Def, Peek, Poke, Shape};

/// Object-safe companion of [`Bind`] for values stored in a [`Dynamic`].
///
/// Blanket-implemented for every `Bind + Any + Clone + PartialEq + Default +
/// Debug` type, so it never needs to be written by hand.
pub trait DynBind: Any + fmt::Debug {
    /// Shape of the concrete type.
    fn dyn_shape(&self) -> Shape;

    /// The value as a plain [`Bind`] object.
    fn as_bind(&self) -> &dyn Bind;

    /// The value as a mutable [`Bind`] object.
    fn as_bind_mut(&mut self) -> &mut dyn Bind;

    /// The value as [`Any`], for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The value as mutable [`Any`], for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// A boxed copy of the value.
    fn clone_boxed(&self) -> Box<dyn DynBind>;

    /// A default value of the same concrete type.
    fn fresh(&self) -> Box<dyn DynBind>;

    /// Equality against another dynamic value; values of different concrete
    /// types are never equal.
    fn dyn_eq(&self, other: &dyn DynBind) -> bool;
}

impl<T> DynBind for T
where
    T: Bind + Any + Clone + PartialEq + Default + fmt::Debug,
{
    fn dyn_shape(&self) -> Shape {
        T::shape()
    }

    fn as_bind(&self) -> &dyn Bind {
        self
    }

    fn as_bind_mut(&mut self) -> &mut dyn Bind {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn DynBind> {
        Box::new(self.clone())
    }

    fn fresh(&self) -> Box<dyn DynBind> {
        Box::new(T::default())
    }

    fn dyn_eq(&self, other: &dyn DynBind) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A holder for a value whose concrete type is chosen at runtime.
///
/// The encoder follows the held value's own shape. The decoder never infers a
/// type from the document: an empty holder is left untouched, and a filled one
/// is replaced by a freshly decoded value of the same concrete type.
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn DynBind>>);

impl Dynamic {
    /// A holder containing `value`.
    pub fn new<T: DynBind>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// An empty holder.
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Whether the holder contains no value.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Shape of the held value's concrete type.
    pub fn held_shape(&self) -> Option<Shape> {
        self.0.as_deref().map(DynBind::dyn_shape)
    }

    /// The held value, as a plain [`Bind`] object.
    pub fn get(&self) -> Option<&dyn Bind> {
        self.0.as_deref().map(DynBind::as_bind)
    }

    /// The held value, mutably.
    pub fn get_mut(&mut self) -> Option<&mut dyn Bind> {
        self.0.as_deref_mut().map(DynBind::as_bind_mut)
    }

    /// Replace the held value by a default value of the same concrete type and
    /// return a view of it. Returns `None` for an empty holder.
    pub fn reset(&mut self) -> Option<Poke<'_>> {
        let held = self.0.as_mut()?;
        *held = (**held).fresh();
        Some((**held).as_bind_mut().poke())
    }

    /// Downcast the held value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref()?.as_any().downcast_ref()
    }

    /// Downcast the held value mutably.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_deref_mut()?.as_any_mut().downcast_mut()
    }

    /// Take the held value out, leaving the holder empty.
    pub fn take(&mut self) -> Option<Box<dyn DynBind>> {
        self.0.take()
    }
}

impl Clone for Dynamic {
    fn clone(&self) -> Self {
        Self(self.0.as_deref().map(DynBind::clone_boxed))
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self.0.as_deref(), other.0.as_deref()) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => lhs.dyn_eq(rhs),
            _ => false,
        }
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => f.debug_tuple("Dynamic").field(value).finish(),
            None => f.write_str("Dynamic(<empty>)"),
        }
    }
}

impl Bind for Dynamic {
    fn shape() -> Shape {
        Shape::new("Dynamic", Def::Dynamic)
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Dynamic(self.get())
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Dynamic(self)
    }
}
