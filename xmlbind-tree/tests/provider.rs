use indoc::indoc;
use xmlbind_testhelpers::setup;
use xmlbind_tree::{
    Element, Node, ParseOptions, QuickXml, SerializeOptions, TreeError, TreeProvider,
};

#[test]
fn parse_then_serialize_preserves_markup() {
    setup();
    let input = indoc! {r#"
        <?xml version="1.0"?>
        <catalog xmlns="urn:books" xmlns:x="urn:extra"><book x:id="7">Dune &amp; more</book><!--end--></catalog>
    "#};
    let doc = QuickXml.parse(input.as_bytes(), ParseOptions::STRICT).unwrap();
    let out = QuickXml
        .serialize(&doc, &SerializeOptions::default())
        .unwrap();
    insta::assert_snapshot!(out, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <catalog xmlns="urn:books" xmlns:x="urn:extra"><book x:id="7">Dune &amp; more</book><!--end--></catalog>
    "#);
}

#[test]
fn pretty_printing_indents_element_content() {
    setup();
    let root = Element::new("config")
        .with_child(Element::new("name").with_text("demo"))
        .with_child(Element::new("flags").with_child(Element::new("debug")));
    let doc = QuickXml.create_document(root);
    let out = QuickXml
        .serialize(&doc, &SerializeOptions::new().indent("    "))
        .unwrap();
    insta::assert_snapshot!(out, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <config>
        <name>demo</name>
        <flags>
            <debug/>
        </flags>
    </config>
    "#);
}

#[test]
fn normalize_removes_repeated_bindings() {
    setup();
    let root = Element::new("feed")
        .with_namespace(None, "urn:atom")
        .with_child(Element::new("entry").with_namespace(None, "urn:atom"))
        .with_child(Element::new("meta").with_namespace(Some("x"), "urn:x"));
    let doc = QuickXml.normalize_namespaces(QuickXml.create_document(root));
    let out = QuickXml
        .serialize(&doc, &SerializeOptions::new().declaration(false))
        .unwrap();
    assert_eq!(
        out,
        "<feed xmlns=\"urn:atom\"><entry/><x:meta xmlns:x=\"urn:x\"/></feed>\n"
    );
}

#[test]
fn attribute_values_round_trip_whitespace() {
    setup();
    let root = Element::new("a").with_attribute("v", "line1\nline2\t\"q\"");
    let xml = QuickXml
        .serialize(&QuickXml.create_document(root), &SerializeOptions::default())
        .unwrap();
    let doc = QuickXml.parse(xml.as_bytes(), ParseOptions::STRICT).unwrap();
    assert_eq!(doc.root().attribute("v"), Some("line1\nline2\t\"q\""));
}

#[test]
fn recovery_is_opt_in() {
    setup();
    let broken = b"<root><item>1</item><item>2</root>";
    assert!(QuickXml.parse(broken, ParseOptions::STRICT).is_err());

    let doc = QuickXml.parse(broken, ParseOptions::LENIENT).unwrap();
    assert_eq!(doc.root().local_name(), "root");
    assert_eq!(doc.root().content(), "12");
}

#[test]
fn comments_and_text_are_distinguished() {
    setup();
    let doc = QuickXml
        .parse(b"<n>a<!--note-->b<![CDATA[c]]></n>", ParseOptions::STRICT)
        .unwrap();
    let root = doc.root();
    assert_eq!(root.text(), "abc");
    assert_eq!(root.comments(), "note");
    assert!(matches!(root.nodes()[1], Node::Comment(_)));
}

#[test]
fn empty_input_has_no_root() {
    setup();
    assert_eq!(
        QuickXml.parse(b"", ParseOptions::LENIENT),
        Err(TreeError::NoRoot)
    );
}
