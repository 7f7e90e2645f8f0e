//! The generic node tree.

use std::borrow::Cow;

use crate::serializer::write_element;

/// A parsed or constructed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap a root element in a document.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The root element, mutably.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Consume the document, returning its root element.
    pub fn into_root(self) -> Element {
        self.root
    }
}

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A child element.
    Element(Element),
    /// Character data, unescaped.
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment, without its delimiters.
    Comment(String),
    /// A processing instruction.
    ProcessingInstruction {
        /// The PI target, e.g. `xml-stylesheet`.
        target: String,
        /// Everything after the target.
        data: String,
    },
}

impl Node {
    /// Returns `Some(&Element)` if this is an element.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the character data of a text or CDATA node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) | Node::CData(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_owned())
    }
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Prefix as written, if any.
    pub prefix: Option<String>,
    /// Namespace URI the prefix resolves to, if any.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    /// Unescaped value.
    pub value: String,
}

impl Attribute {
    /// An unqualified attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: None,
            namespace: None,
            name: name.into(),
            value: value.into(),
        }
    }

    /// `prefix:name`, or just `name`.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        qualify(self.prefix.as_deref(), &self.name)
    }
}

/// An `xmlns` / `xmlns:prefix` declaration carried by an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Declared prefix; `None` for the default namespace.
    pub prefix: Option<String>,
    /// Namespace URI; empty undeclares the default namespace.
    pub uri: String,
}

/// An XML element: name, namespace declarations, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    local: String,
    prefix: Option<String>,
    namespace: Option<String>,
    namespaces: Vec<NamespaceDecl>,
    attributes: Vec<Attribute>,
    nodes: Vec<Node>,
}

impl Element {
    /// Create an element with a local name and nothing else.
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            ..Self::default()
        }
    }

    /// Put the element in namespace `uri`, written with `prefix` (or as the
    /// default namespace), and declare that binding on the element.
    ///
    /// An empty `uri` clears the namespace.
    pub fn set_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        if uri.is_empty() {
            self.prefix = None;
            self.namespace = None;
            return;
        }
        let prefix = prefix.filter(|p| !p.is_empty()).map(str::to_owned);
        self.declare_namespace(prefix.clone(), uri);
        self.prefix = prefix;
        self.namespace = Some(uri.to_owned());
    }

    /// Add a namespace declaration, replacing any existing one for the same
    /// prefix.
    pub fn declare_namespace(&mut self, prefix: Option<String>, uri: impl Into<String>) {
        let uri = uri.into();
        match self.namespaces.iter_mut().find(|d| d.prefix == prefix) {
            Some(decl) => decl.uri = uri,
            None => self.namespaces.push(NamespaceDecl { prefix, uri }),
        }
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: Element) {
        self.nodes.push(Node::Element(child));
    }

    /// Append any node. Adjacent text is merged into one text node.
    pub fn add_node(&mut self, node: Node) {
        if let Node::Text(more) = &node
            && let Some(Node::Text(last)) = self.nodes.last_mut()
        {
            last.push_str(more);
            return;
        }
        self.nodes.push(node);
    }

    /// Append character data, merging with a preceding text node.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_node(Node::Text(text.into()));
    }

    /// Set an unqualified attribute, replacing an existing one of the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.prefix.is_none() && a.name == name)
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Append an attribute as-is.
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Replace the element's direct character data with `text`.
    ///
    /// Child elements, comments and processing instructions are kept.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.nodes.retain(|n| n.as_text().is_none());
        self.nodes.push(Node::Text(text.into()));
    }

    /// Like [`Element::set_content`], but written as a CDATA section.
    pub fn set_cdata(&mut self, text: impl Into<String>) {
        self.nodes.retain(|n| n.as_text().is_none());
        self.nodes.push(Node::CData(text.into()));
    }

    /// Append a comment.
    pub fn add_comment(&mut self, text: impl Into<String>) {
        self.nodes.push(Node::Comment(text.into()));
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Element::add_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form of [`Element::add_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    /// Builder form of [`Element::set_namespace`].
    pub fn with_namespace(mut self, prefix: Option<&str>, uri: &str) -> Self {
        self.set_namespace(prefix, uri);
        self
    }

    /// Local name, without prefix.
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Namespace URI, if the element is in a namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Prefix as written, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// `prefix:local`, or just `local`.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        qualify(self.prefix.as_deref(), &self.local)
    }

    pub(crate) fn set_parsed_name(&mut self, prefix: Option<String>, namespace: Option<String>) {
        self.prefix = prefix;
        self.namespace = namespace;
    }

    /// Namespace declarations carried by this element.
    pub fn namespace_decls(&self) -> &[NamespaceDecl] {
        &self.namespaces
    }

    pub(crate) fn namespace_decls_mut(&mut self) -> &mut Vec<NamespaceDecl> {
        &mut self.namespaces
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the first attribute with local name `name`, in any namespace.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Value of the attribute `name` in namespace `namespace`.
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    /// All child nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    /// Child elements in document order, skipping other nodes.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(Node::as_element)
    }

    /// Concatenated character data of this element and all its descendants.
    pub fn content(&self) -> String {
        let mut out = String::new();
        self.collect_content(&mut out);
        out
    }

    fn collect_content(&self, out: &mut String) {
        for node in &self.nodes {
            match node {
                Node::Text(t) | Node::CData(t) => out.push_str(t),
                Node::Element(e) => e.collect_content(out),
                Node::Comment(_) | Node::ProcessingInstruction { .. } => {}
            }
        }
    }

    /// Concatenated character data of this element's direct text and CDATA
    /// children.
    pub fn text(&self) -> String {
        self.nodes.iter().filter_map(Node::as_text).collect()
    }

    /// Concatenated text of this element's direct comment children.
    pub fn comments(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Comment(c) => Some(c.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Outer markup of this element, without an XML declaration.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_element(&mut out, self, 0, None);
        out
    }
}

pub(crate) fn qualify<'a>(prefix: Option<&str>, local: &'a str) -> Cow<'a, str> {
    match prefix {
        Some(prefix) if !prefix.is_empty() => Cow::Owned(format!("{prefix}:{local}")),
        _ => Cow::Borrowed(local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_builder_api() {
        let elem = Element::new("root")
            .with_attribute("id", "123")
            .with_child(Element::new("child").with_text("hello world"));

        assert_eq!(elem.local_name(), "root");
        assert_eq!(elem.attribute("id"), Some("123"));
        assert_eq!(elem.nodes().len(), 1);

        let child = elem.children().next().unwrap();
        assert_eq!(child.local_name(), "child");
        assert_eq!(child.content(), "hello world");
    }

    #[test]
    fn adjacent_text_is_merged() {
        let mut elem = Element::new("p");
        elem.add_text("a ");
        elem.add_text("&");
        elem.add_text(" b");
        assert_eq!(elem.nodes(), &[Node::Text("a & b".into())]);
    }

    #[test]
    fn content_is_recursive_text_is_direct() {
        let elem = Element::new("p")
            .with_text("Hello ")
            .with_child(Element::new("b").with_text("world"))
            .with_text("!");
        assert_eq!(elem.content(), "Hello world!");
        assert_eq!(elem.text(), "Hello !");
    }

    #[test]
    fn set_content_keeps_children() {
        let mut elem = Element::new("p")
            .with_text("old")
            .with_child(Element::new("b"));
        elem.add_comment("note");
        elem.set_cdata("new");
        assert_eq!(elem.text(), "new");
        assert_eq!(elem.children().count(), 1);
        assert_eq!(elem.comments(), "note");
        assert!(matches!(elem.nodes().last(), Some(Node::CData(_))));
    }

    #[test]
    fn set_attribute_replaces() {
        let mut elem = Element::new("a");
        elem.set_attribute("id", "1");
        elem.set_attribute("id", "2");
        assert_eq!(elem.attributes().len(), 1);
        assert_eq!(elem.attribute("id"), Some("2"));
    }

    #[test]
    fn set_namespace_declares_binding() {
        let elem = Element::new("feed").with_namespace(Some("a"), "urn:atom");
        assert_eq!(elem.qualified_name(), "a:feed");
        assert_eq!(elem.namespace(), Some("urn:atom"));
        assert_eq!(
            elem.namespace_decls(),
            &[NamespaceDecl {
                prefix: Some("a".into()),
                uri: "urn:atom".into()
            }]
        );
    }

    #[test]
    fn to_xml_writes_outer_markup() {
        let elem = Element::new("item")
            .with_attribute("id", "1")
            .with_text("a<b");
        assert_eq!(elem.to_xml(), r#"<item id="1">a&lt;b</item>"#);
    }
}
