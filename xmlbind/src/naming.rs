//! Resolution of the XML name a field binds to.

use xmlbind_core::Field;
use xmlbind_tree::Element;

use crate::FieldSpec;

/// The resolved name of a field's node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlName {
    /// Namespace URI, empty when none applies.
    pub namespace: String,
    /// Prefix written in front of the local name, if the name had one.
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local: String,
}

impl XmlName {
    /// Build a name from `prefix:local` text and a namespace URI.
    pub fn parse(text: &str, namespace: &str) -> Self {
        let (prefix, local) = split_prefix(text);
        Self {
            namespace: namespace.to_owned(),
            prefix: prefix.map(str::to_owned),
            local: local.to_owned(),
        }
    }

    /// Whether `element` carries this name. Prefixes never take part; the
    /// namespace does only when this name has one.
    pub fn matches(&self, element: &Element) -> bool {
        element.local_name() == self.local
            && (self.namespace.is_empty() || element.namespace() == Some(self.namespace.as_str()))
    }

    /// Create an element with this name, declaring its namespace if any.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(self.local.clone());
        if !self.namespace.is_empty() {
            element.set_namespace(self.prefix.as_deref(), &self.namespace);
        }
        element
    }
}

/// Resolve the name `field` binds to.
///
/// The annotation's tag name wins; otherwise the field identifier is used, and
/// failing that (tuple-struct positions) the name of the field's type with one
/// level of `Option`/`Box` removed.
pub fn resolve(field: &Field, spec: Option<&FieldSpec>) -> XmlName {
    if let Some(spec) = spec
        && !spec.tag_name.is_empty()
    {
        return XmlName::parse(&spec.tag_name, &spec.namespace);
    }
    if !field.name.is_empty() {
        return XmlName::parse(field.name, "");
    }
    XmlName::parse(&field.shape().deref_once().type_name, "")
}

/// Split `prefix:local` at the last colon.
pub(crate) fn split_prefix(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once(':') {
        Some((prefix, local)) if !prefix.is_empty() => (Some(prefix), local),
        Some((_, local)) => (None, local),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bind, QName};

    fn field(name: &'static str, tag: Option<&'static str>, shape: fn() -> xmlbind_core::Shape) -> Field {
        Field::new(name, tag, shape)
    }

    #[test]
    fn tag_name_wins() {
        let f = field("title", Some("urn:a heading"), String::shape);
        let spec = FieldSpec::parse(f.tag.unwrap());
        let name = resolve(&f, spec.as_ref());
        assert_eq!(name.local, "heading");
        assert_eq!(name.namespace, "urn:a");
        assert_eq!(name.prefix, None);
    }

    #[test]
    fn flags_only_falls_back_to_identifier() {
        let f = field("id", Some(",attr"), u32::shape);
        let spec = FieldSpec::parse(f.tag.unwrap());
        assert_eq!(resolve(&f, spec.as_ref()).local, "id");
        assert_eq!(resolve(&f, None).local, "id");
    }

    #[test]
    fn positional_field_uses_type_name_through_pointer() {
        let f = field("", None, Option::<QName>::shape);
        assert_eq!(resolve(&f, None).local, "QName");
        let f = field("", None, Box::<bool>::shape);
        assert_eq!(resolve(&f, None).local, "bool");
    }

    #[test]
    fn splits_at_last_colon() {
        assert_eq!(split_prefix("a:b:c"), (Some("a:b"), "c"));
        assert_eq!(split_prefix("plain"), (None, "plain"));
        assert_eq!(split_prefix(":odd"), (None, "odd"));

        let name = XmlName::parse("atom:link", "http://www.w3.org/2005/Atom");
        assert_eq!(name.prefix.as_deref(), Some("atom"));
        assert_eq!(name.local, "link");
    }

    #[test]
    fn matching_ignores_prefix_and_optional_namespace() {
        let element = Element::new("item").with_namespace(Some("p"), "urn:x");
        assert!(XmlName::parse("item", "").matches(&element));
        assert!(XmlName::parse("q:item", "urn:x").matches(&element));
        assert!(!XmlName::parse("item", "urn:y").matches(&element));
        assert!(!XmlName::parse("other", "").matches(&element));
    }

    #[test]
    fn element_carries_prefixed_namespace() {
        let element = XmlName::parse("x:entry", "urn:x").to_element();
        assert_eq!(element.to_xml(), r#"<x:entry xmlns:x="urn:x"/>"#);
        let element = XmlName::parse("x:entry", "").to_element();
        assert_eq!(element.to_xml(), "<entry/>");
    }
}
