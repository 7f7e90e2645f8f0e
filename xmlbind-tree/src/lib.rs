//! Generic XML node tree for xmlbind.
//!
//! This crate holds everything the binding engine needs from an XML
//! implementation:
//! - [`Element`], [`Node`], [`Attribute`] and [`NamespaceDecl`]: an owned,
//!   mutable tree with construction and inspection methods,
//! - [`TreeProvider`]: parse, serialize and namespace normalization at the
//!   document level,
//! - [`QuickXml`]: the default provider, on top of `quick-xml`.
//!
//! ```
//! use xmlbind_tree::{Element, ParseOptions, QuickXml, SerializeOptions, TreeProvider};
//!
//! let doc = QuickXml
//!     .parse(br#"<greeting lang="en">hello</greeting>"#, ParseOptions::STRICT)
//!     .unwrap();
//! assert_eq!(doc.root().attribute("lang"), Some("en"));
//!
//! let doc = QuickXml.create_document(Element::new("empty"));
//! let xml = QuickXml.serialize(&doc, &SerializeOptions::default()).unwrap();
//! assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<empty/>\n");
//! ```

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod tracing_macros;

mod element;
mod error;
mod escaping;
mod normalize;
mod options;
mod parser;
mod provider;
mod serializer;

pub use element::*;
pub use error::*;
pub use escaping::{EscapingWriter, write_cdata};
pub use options::*;
pub use provider::*;
