//! The seam between the binding engine and an XML implementation.

use crate::normalize::normalize_element;
use crate::parser::parse_document;
use crate::serializer::document_to_string;
use crate::{Document, Element, ParseOptions, SerializeOptions, TreeError};

/// Document-level operations the binding engine needs from an XML backend.
///
/// Node construction and inspection are plain methods on [`Element`]; a
/// provider only owns the text boundary (parse and serialize) and namespace
/// reconciliation.
pub trait TreeProvider {
    /// Wrap a root element in a new document.
    fn create_document(&self, root: Element) -> Document {
        Document::new(root)
    }

    /// Parse XML text into a document.
    fn parse(&self, input: &[u8], options: ParseOptions) -> Result<Document, TreeError>;

    /// Serialize a document to XML text.
    fn serialize(
        &self,
        document: &Document,
        options: &SerializeOptions,
    ) -> Result<String, TreeError>;

    /// Drop namespace declarations that repeat a binding in scope and add the
    /// ones that are missing.
    fn normalize_namespaces(&self, document: Document) -> Document;
}

/// The default provider, built on quick-xml.
///
/// Parsing never fetches DTDs or external entities. Predefined and numeric
/// character references are resolved; other entities are kept literally when
/// recovering and rejected otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXml;

impl TreeProvider for QuickXml {
    fn parse(&self, input: &[u8], options: ParseOptions) -> Result<Document, TreeError> {
        parse_document(input, options)
    }

    fn serialize(
        &self,
        document: &Document,
        options: &SerializeOptions,
    ) -> Result<String, TreeError> {
        document_to_string(document, options)
    }

    fn normalize_namespaces(&self, mut document: Document) -> Document {
        normalize_element(document.root_mut());
        document
    }
}
