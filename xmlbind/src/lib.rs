#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Lets `#[derive(Bind)]` refer to `::xmlbind` from inside this crate's tests.
extern crate self as xmlbind;

mod tracing_macros;

mod annotation;
mod deserialize;
mod error;
mod literal;
mod naming;
mod options;
mod serialize;

pub use annotation::FieldSpec;
pub use deserialize::{
    from_element, from_element_into, from_slice, from_slice_into, from_slice_with, from_str,
    from_str_into,
};
pub use error::{ErrorKind, XmlBindError};
pub use naming::{XmlName, resolve};
pub use options::{DEFAULT_MAX_DEPTH, DecodeOptions, EncodeOptions};
pub use serialize::{to_document, to_string, to_string_pretty, to_string_with, to_string_with_options};

pub use xmlbind_core::{
    Bind, Def, DynBind, Dynamic, Field, ListBind, Peek, PointerBind, Poke, QName,
    ROOT_IDENTITY_FIELD, ScalarMut, ScalarRef, ScalarType, Shape, StructBind, StructType,
};
pub use xmlbind_macros::Bind;
pub use xmlbind_tree::{
    Attribute, Document, Element, NamespaceDecl, Node, ParseOptions, QuickXml, SerializeOptions,
    TreeError, TreeProvider,
};
