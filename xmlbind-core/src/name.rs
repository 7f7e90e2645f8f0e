use std::fmt;

use crate::{Bind, Def, Peek, Poke, Shape};

/// A namespace-qualified element name.
///
/// Used as the type of the root identity field (`xml_name`): decoding stores
/// the name of the element a struct was read from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, empty when the element has none.
    pub space: String,
    /// Local element name, without any prefix.
    pub local: String,
}

impl QName {
    /// Create a qualified name.
    pub fn new(space: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            local: local.into(),
        }
    }

    /// A name with no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self::new(String::new(), local)
    }

    /// Whether both parts are empty.
    pub fn is_empty(&self) -> bool {
        self.space.is_empty() && self.local.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.space.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{{{}}}{}", self.space, self.local)
        }
    }
}

impl Bind for QName {
    fn shape() -> Shape {
        Shape::new("QName", Def::Name)
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Name(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_clark_notation() {
        assert_eq!(QName::local("item").to_string(), "item");
        assert_eq!(
            QName::new("urn:example", "item").to_string(),
            "{urn:example}item"
        );
    }

    #[test]
    fn empty_name_is_zero() {
        assert!(QName::default().peek().is_zero());
        assert!(!QName::local("a").peek().is_zero());
    }
}
