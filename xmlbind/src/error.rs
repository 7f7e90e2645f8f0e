//! Error types for encoding and decoding.

use std::error::Error;
use std::fmt::{self, Display};

use xmlbind_tree::TreeError;

/// Error returned by every encode and decode entry point.
#[derive(Debug)]
pub struct XmlBindError {
    /// The specific kind of error
    pub(crate) kind: ErrorKind,
    /// Dotted path of the field being processed, e.g. `items[1].id`
    pub(crate) path: Option<String>,
}

impl XmlBindError {
    /// Returns a reference to the error kind for detailed error inspection.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The field path where the error occurred, when it happened below the
    /// root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns an error code for this error.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Create a new error with the given kind.
    pub(crate) fn new(kind: impl Into<ErrorKind>) -> Self {
        XmlBindError {
            kind: kind.into(),
            path: None,
        }
    }

    /// Attach a field path to this error.
    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !path.is_empty() {
            self.path = Some(path);
        }
        self
    }
}

impl Display for XmlBindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} (at `{path}`)", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Error for XmlBindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ErrorKind::MalformedDocument(e) => Some(e),
            _ => None,
        }
    }
}

impl<K: Into<ErrorKind>> From<K> for XmlBindError {
    fn from(value: K) -> Self {
        XmlBindError::new(value)
    }
}

/// Detailed classification of binding errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The value to encode, or the decode target, does not resolve to a
    /// struct with at least one field.
    InvalidTarget {
        /// Name of the offending type.
        type_name: String,
    },
    /// The root struct has no `xml_name` field to name its element.
    MissingRootName {
        /// Name of the root struct.
        type_name: String,
    },
    /// A value of this type has no text or element representation.
    UnsupportedType {
        /// Name of the offending type.
        type_name: String,
    },
    /// Text could not be parsed as the field's scalar type.
    ParseFailure {
        /// The text that was read.
        text: String,
        /// The expected scalar type.
        expected: &'static str,
    },
    /// A numeric literal does not fit the field's type.
    NumericOverflow {
        /// The text that was read.
        text: String,
        /// The destination type.
        target: &'static str,
    },
    /// A required attribute is absent from the element.
    MissingAttribute {
        /// Local name of the attribute.
        name: String,
    },
    /// The input is not a usable XML document.
    MalformedDocument(TreeError),
    /// Comment text that cannot be written as an XML comment.
    InvalidComment {
        /// The offending text.
        text: String,
    },
    /// The value or document nests deeper than the configured limit.
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl ErrorKind {
    /// Returns an error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidTarget { .. } => "xmlbind::invalid_target",
            ErrorKind::MissingRootName { .. } => "xmlbind::missing_root_name",
            ErrorKind::UnsupportedType { .. } => "xmlbind::unsupported_type",
            ErrorKind::ParseFailure { .. } => "xmlbind::parse_failure",
            ErrorKind::NumericOverflow { .. } => "xmlbind::numeric_overflow",
            ErrorKind::MissingAttribute { .. } => "xmlbind::missing_attribute",
            ErrorKind::MalformedDocument(_) => "xmlbind::malformed_document",
            ErrorKind::InvalidComment { .. } => "xmlbind::invalid_comment",
            ErrorKind::DepthLimitExceeded { .. } => "xmlbind::depth_limit_exceeded",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidTarget { type_name } => {
                write!(f, "`{type_name}` is not a struct with at least one field")
            }
            ErrorKind::MissingRootName { type_name } => {
                write!(f, "root struct `{type_name}` has no `xml_name` field")
            }
            ErrorKind::UnsupportedType { type_name } => {
                write!(f, "type `{type_name}` has no XML representation")
            }
            ErrorKind::ParseFailure { text, expected } => {
                write!(f, "cannot parse '{text}' as {expected}")
            }
            ErrorKind::NumericOverflow { text, target } => {
                write!(f, "'{text}' is out of range for {target}")
            }
            ErrorKind::MissingAttribute { name } => {
                write!(f, "missing required attribute '{name}'")
            }
            ErrorKind::MalformedDocument(e) => write!(f, "malformed document: {e}"),
            ErrorKind::InvalidComment { text } => {
                write!(f, "comment text '{text}' contains \"--\"")
            }
            ErrorKind::DepthLimitExceeded { limit } => {
                write!(f, "nesting deeper than the limit of {limit} levels")
            }
        }
    }
}

impl From<TreeError> for ErrorKind {
    fn from(value: TreeError) -> Self {
        Self::MalformedDocument(value)
    }
}

/// Position of the value being processed, rendered as `items[1].id`.
#[derive(Debug, Default)]
pub(crate) struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Debug)]
enum Segment {
    Field(&'static str, usize),
    Index(usize),
}

impl FieldPath {
    /// Enter a struct field. Positional fields are named by their index.
    pub(crate) fn push_field(&mut self, name: &'static str, index: usize) {
        self.segments.push(Segment::Field(name, index));
    }

    /// Enter a sequence item.
    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    /// Wrap `kind` in an error located at the current position.
    pub(crate) fn error(&self, kind: impl Into<ErrorKind>) -> XmlBindError {
        XmlBindError::new(kind).with_path(self.to_string())
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name, index) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    if name.is_empty() {
                        write!(f, "{index}")?;
                    } else {
                        f.write_str(name)?;
                    }
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Diagnostic Implementation
// ============================================================================

impl miette::Diagnostic for XmlBindError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match &self.kind {
            ErrorKind::MissingRootName { .. } => Some(Box::new(
                "add an `xml_name: xmlbind::QName` field annotated with #[xml(\"element-name\")]",
            )),
            ErrorKind::MissingAttribute { .. } => Some(Box::new(
                "mark the field `omitempty` or make it an `Option` to accept documents without it",
            )),
            ErrorKind::UnsupportedType { .. } => Some(Box::new(
                "only scalars, strings, structs, `Vec`, `Option`, `Box` and `Dynamic` can be bound",
            )),
            ErrorKind::DepthLimitExceeded { .. } => Some(Box::new(
                "raise `max_depth` in the encode or decode options if the nesting is intended",
            )),
            _ => None,
        }
    }
}
