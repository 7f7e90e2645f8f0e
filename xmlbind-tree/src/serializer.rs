//! Writing a node tree back to XML text.

use std::fmt::{self, Write};

use crate::escaping::{EscapingWriter, write_cdata};
use crate::{Document, Element, Node, SerializeOptions, TreeError};

pub(crate) const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize a whole document: optional declaration, root, trailing newline.
pub(crate) fn document_to_string(
    document: &Document,
    options: &SerializeOptions,
) -> Result<String, TreeError> {
    let mut out = String::new();
    if options.declaration {
        out.push_str(DECLARATION);
        out.push('\n');
    }
    write_element(&mut out, document.root(), 0, options.indent_str())?;
    out.push('\n');
    Ok(out)
}

/// Write one element and its subtree.
///
/// With an indent, element-only content goes on indented lines. Elements with
/// direct character data are written compactly so their text is unchanged.
pub(crate) fn write_element(
    out: &mut String,
    element: &Element,
    depth: usize,
    indent: Option<&str>,
) -> fmt::Result {
    let name = element.qualified_name();
    write!(out, "<{name}")?;

    for decl in element.namespace_decls() {
        match &decl.prefix {
            Some(prefix) => write!(out, " xmlns:{prefix}=\"")?,
            None => out.push_str(" xmlns=\""),
        }
        EscapingWriter::attribute(out).write_str(&decl.uri)?;
        out.push('"');
    }

    for attr in element.attributes() {
        write!(out, " {}=\"", attr.qualified_name())?;
        EscapingWriter::attribute(out).write_str(&attr.value)?;
        out.push('"');
    }

    if element.nodes().is_empty() {
        out.push_str("/>");
        return Ok(());
    }
    out.push('>');

    let indent = indent.filter(|_| element.nodes().iter().all(|n| n.as_text().is_none()));
    for node in element.nodes() {
        if let Some(indent) = indent {
            newline(out, indent, depth + 1);
        }
        write_node(out, node, depth + 1, indent)?;
    }
    if let Some(indent) = indent {
        newline(out, indent, depth);
    }

    write!(out, "</{name}>")
}

fn write_node(out: &mut String, node: &Node, depth: usize, indent: Option<&str>) -> fmt::Result {
    match node {
        Node::Element(element) => write_element(out, element, depth, indent),
        Node::Text(text) => EscapingWriter::text(out).write_str(text),
        Node::CData(text) => write_cdata(out, text),
        Node::Comment(text) => write!(out, "<!--{text}-->"),
        Node::ProcessingInstruction { target, data } if data.is_empty() => {
            write!(out, "<?{target}?>")
        }
        Node::ProcessingInstruction { target, data } => write!(out, "<?{target} {data}?>"),
    }
}

fn newline(out: &mut String, indent: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut root = Element::new("list").with_namespace(None, "urn:x");
        root.add_comment(" items ");
        root.add_child(Element::new("item").with_attribute("n", "a\"b"));
        root.add_child(Element::new("item").with_text("x & y"));
        Document::new(root)
    }

    #[test]
    fn compact_output() {
        let out = document_to_string(&sample(), &SerializeOptions::default()).unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <list xmlns=\"urn:x\"><!-- items --><item n=\"a&quot;b\"/><item>x &amp; y</item></list>\n"
        );
    }

    #[test]
    fn pretty_output_keeps_text_inline() {
        let options = SerializeOptions::new().declaration(false).pretty();
        let out = document_to_string(&sample(), &options).unwrap();
        insta::assert_snapshot!(out, @r#"
        <list xmlns="urn:x">
          <!-- items -->
          <item n="a&quot;b"/>
          <item>x &amp; y</item>
        </list>
        "#);
    }

    #[test]
    fn processing_instructions_and_cdata() {
        let mut root = Element::new("r");
        root.add_node(Node::ProcessingInstruction {
            target: "pi".into(),
            data: String::new(),
        });
        root.set_cdata("<raw>");
        assert_eq!(root.to_xml(), "<r><?pi?><![CDATA[<raw>]]></r>");
    }
}
