//! Structural descriptions of bindable types.

use std::borrow::Cow;
use std::fmt;

use crate::ScalarType;

/// Identifier of the field that names a struct's own element.
///
/// The annotation on this field supplies the element name and namespace used
/// when the struct is the document root. The field is never encoded as a child,
/// and when it is a [`QName`](crate::QName) the decoder fills it with the name
/// of the element it was read from.
pub const ROOT_IDENTITY_FIELD: &str = "xml_name";

/// The shape of a type: its name and its structural definition.
///
/// Shapes are produced by [`Bind::shape`](crate::Bind::shape) whenever a
/// traversal needs them; they are cheap to build and are not cached.
#[derive(Clone)]
pub struct Shape {
    /// Short Rust name of the type, e.g. `Person`, `u32`, `Vec<Item>`.
    pub type_name: Cow<'static, str>,
    /// What the type is made of.
    pub def: Def,
}

impl Shape {
    /// Create a shape from its parts.
    pub fn new(type_name: impl Into<Cow<'static, str>>, def: Def) -> Self {
        Self {
            type_name: type_name.into(),
            def,
        }
    }

    /// Shape of a scalar type.
    pub fn scalar(scalar: ScalarType) -> Self {
        Self::new(scalar.name(), Def::Scalar(scalar))
    }

    /// Shape of a struct type.
    pub fn structure(ty: StructType) -> Self {
        Self::new(ty.name, Def::Struct(ty))
    }

    /// Whether this shape is a sequence of items.
    pub fn is_list(&self) -> bool {
        matches!(self.def, Def::List(_))
    }

    /// Whether this shape is an optional or boxed pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self.def, Def::Pointer(_))
    }

    /// The scalar type, if this shape is a scalar.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.def {
            Def::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Whether this shape is a sequence of bytes (`Vec<u8>`), which binds as
    /// text rather than as repeated elements when used as character data.
    pub fn is_bytes(&self) -> bool {
        match self.def {
            Def::List(item) => item().scalar_type() == Some(ScalarType::U8),
            _ => false,
        }
    }

    /// Strip one level of pointer, returning the pointee's shape.
    pub fn deref_once(self) -> Shape {
        match self.def {
            Def::Pointer(pointee) => pointee(),
            _ => self,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_name", &self.type_name)
            .field("def", &self.def)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

/// The structural definition of a shape.
#[derive(Clone)]
pub enum Def {
    /// A single value rendered as text.
    Scalar(ScalarType),
    /// A struct with named (or positional) fields.
    Struct(StructType),
    /// A homogeneous sequence, e.g. `Vec<T>`. Holds the item shape.
    List(fn() -> Shape),
    /// An optional or owning pointer, e.g. `Option<T>`, `Box<T>`. Holds the
    /// pointee shape.
    Pointer(fn() -> Shape),
    /// A polymorphic holder whose concrete type is only known at runtime.
    Dynamic,
    /// A qualified element name, see [`QName`](crate::QName).
    Name,
    /// A type that has no text representation, such as a map.
    Unsupported,
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Def::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Def::Struct(ty) => f.debug_tuple("Struct").field(&ty.name).finish(),
            Def::List(item) => f.debug_tuple("List").field(&item().type_name).finish(),
            Def::Pointer(pointee) => f
                .debug_tuple("Pointer")
                .field(&pointee().type_name)
                .finish(),
            Def::Dynamic => f.write_str("Dynamic"),
            Def::Name => f.write_str("Name"),
            Def::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Describes a struct: its name and its fields in declaration order.
#[derive(Clone, Debug)]
pub struct StructType {
    /// Short name of the struct.
    pub name: &'static str,
    /// Fields in declaration order. Positional fields have an empty name.
    pub fields: Vec<Field>,
}

impl StructType {
    /// Create a struct description.
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    /// Index of the root identity field, if the struct declares one.
    pub fn root_identity(&self) -> Option<usize> {
        self.fields.iter().position(Field::is_root_identity)
    }
}

/// Describes one field of a struct.
#[derive(Clone, Copy)]
pub struct Field {
    /// The field identifier; empty for tuple-struct positions.
    pub name: &'static str,
    /// The raw `#[xml("...")]` annotation, if any.
    pub tag: Option<&'static str>,
    /// The declared type of the field, built on demand.
    pub shape: fn() -> Shape,
}

impl Field {
    /// Create a field description.
    pub const fn new(name: &'static str, tag: Option<&'static str>, shape: fn() -> Shape) -> Self {
        Self { name, tag, shape }
    }

    /// The declared shape of the field.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Whether this is the reserved field naming the struct's own element.
    pub fn is_root_identity(&self) -> bool {
        self.name == ROOT_IDENTITY_FIELD
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("shape", &self.shape().type_name)
            .finish()
    }
}
