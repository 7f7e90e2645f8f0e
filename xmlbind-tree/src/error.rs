//! Tree provider errors.

use std::fmt;

/// Error raised while parsing or serializing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// Error reported by quick-xml.
    Parse(String),
    /// The input ended inside an element.
    UnexpectedEof {
        /// Name of the innermost unclosed element.
        open: String,
    },
    /// The input contains no root element.
    NoRoot,
    /// Content after the root element, or text outside it.
    TrailingContent(String),
    /// Invalid UTF-8 in a name or in character data.
    InvalidUtf8(std::str::Utf8Error),
    /// An entity reference that is neither predefined nor a character reference.
    UnknownEntity(String),
    /// Writing the output failed.
    Io(String),
}

impl TreeError {
    /// Returns an error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            TreeError::Parse(_) => "xmlbind_tree::parse",
            TreeError::UnexpectedEof { .. } => "xmlbind_tree::unexpected_eof",
            TreeError::NoRoot => "xmlbind_tree::no_root",
            TreeError::TrailingContent(_) => "xmlbind_tree::trailing_content",
            TreeError::InvalidUtf8(_) => "xmlbind_tree::invalid_utf8",
            TreeError::UnknownEntity(_) => "xmlbind_tree::unknown_entity",
            TreeError::Io(_) => "xmlbind_tree::io",
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Parse(msg) => write!(f, "XML parse error: {msg}"),
            TreeError::UnexpectedEof { open } => {
                write!(f, "unexpected end of XML inside <{open}>")
            }
            TreeError::NoRoot => write!(f, "document has no root element"),
            TreeError::TrailingContent(what) => {
                write!(f, "unexpected {what} outside the root element")
            }
            TreeError::InvalidUtf8(e) => write!(f, "invalid UTF-8 in XML: {e}"),
            TreeError::UnknownEntity(name) => write!(f, "unknown entity &{name};"),
            TreeError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::str::Utf8Error> for TreeError {
    fn from(value: std::str::Utf8Error) -> Self {
        TreeError::InvalidUtf8(value)
    }
}

impl From<fmt::Error> for TreeError {
    fn from(value: fmt::Error) -> Self {
        TreeError::Io(value.to_string())
    }
}
