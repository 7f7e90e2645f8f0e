//! Encode-then-decode behavior of whole documents.

use indoc::indoc;
use xmlbind::{Bind, Dynamic, EncodeOptions, QName, SerializeOptions};
use xmlbind_testhelpers::setup;

#[derive(Bind, Default, Debug, Clone, PartialEq)]
struct Item {
    xml_name: QName,
    #[xml("sku,attr")]
    sku: String,
    #[xml(",chardata")]
    label: String,
}

impl Item {
    fn new(sku: &str, label: &str) -> Self {
        Item {
            xml_name: QName::local("item"),
            sku: sku.into(),
            label: label.into(),
        }
    }
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Order {
    #[xml("order")]
    xml_name: QName,
    #[xml("id,attr")]
    id: u64,
    customer: String,
    #[xml("item")]
    items: Vec<Item>,
    #[xml("note,omitempty")]
    note: Option<String>,
    paid: bool,
    total: f64,
}

fn sample_order() -> Order {
    Order {
        xml_name: QName::local("order"),
        id: 42,
        customer: "Ada".into(),
        items: vec![
            Item::new("a", "Apple"),
            Item::new("b", "Bread"),
            Item::new("c", "Cheese"),
        ],
        note: None,
        paid: true,
        total: 12.5,
    }
}

fn compact<T: Bind>(value: &T) -> String {
    let options = EncodeOptions::new().serialize(SerializeOptions::new().declaration(false));
    xmlbind::to_string_with_options(value, &options).unwrap()
}

#[test]
fn order_round_trips() {
    setup();
    let order = sample_order();
    let xml = xmlbind::to_string(&order).unwrap();
    assert_eq!(
        xml,
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<order id=\"42\"><customer>Ada</customer>",
            "<item sku=\"a\">Apple</item><item sku=\"b\">Bread</item><item sku=\"c\">Cheese</item>",
            "<paid>true</paid><total>12.5</total></order>\n",
        )
    );

    let back: Order = xmlbind::from_str(&xml).unwrap();
    assert_eq!(back, order);
}

#[test]
fn pretty_output_round_trips() {
    setup();
    let order = sample_order();
    let xml = xmlbind::to_string_pretty(&order).unwrap();
    insta::assert_snapshot!(xml, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <order id="42">
      <customer>Ada</customer>
      <item sku="a">Apple</item>
      <item sku="b">Bread</item>
      <item sku="c">Cheese</item>
      <paid>true</paid>
      <total>12.5</total>
    </order>
    "#);

    let back: Order = xmlbind::from_str(&xml).unwrap();
    assert_eq!(back, order);
}

#[test]
fn sequence_keeps_document_order() {
    setup();
    let xml = indoc! {r#"
        <order id="1">
            <item sku="z">last letter</item>
            <customer>Bob</customer>
            <item sku="m">middle</item>
            <item sku="a">first letter</item>
        </order>
    "#};
    let order: Order = xmlbind::from_str(xml).unwrap();
    let skus: Vec<&str> = order.items.iter().map(|i| i.sku.as_str()).collect();
    assert_eq!(skus, ["z", "m", "a"]);
    assert_eq!(order.customer, "Bob");
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Profile {
    #[xml("profile")]
    xml_name: QName,
    #[xml("nick,omitempty")]
    nick: Option<String>,
    #[xml("age,omitempty")]
    age: u32,
    #[xml("tag,omitempty")]
    tags: Vec<String>,
    #[xml("home,omitempty")]
    home: Address,
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Address {
    xml_name: QName,
    city: String,
}

#[test]
fn omitempty_skips_zero_values() {
    setup();
    assert_eq!(compact(&Profile::default()), "<profile/>\n");

    let profile = Profile {
        nick: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(compact(&profile), "<profile><nick></nick></profile>\n");

    let profile = Profile {
        age: 30,
        tags: vec!["a".into(), "b".into()],
        home: Address {
            city: "Oslo".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(
        compact(&profile),
        "<profile><age>30</age><tag>a</tag><tag>b</tag><home><city>Oslo</city></home></profile>\n"
    );
}

#[test]
fn some_empty_string_survives_the_round_trip() {
    setup();
    let profile = Profile {
        xml_name: QName::local("profile"),
        nick: Some(String::new()),
        ..Default::default()
    };
    let back: Profile = xmlbind::from_str(&compact(&profile)).unwrap();
    assert_eq!(back, profile);

    let back: Profile = xmlbind::from_str("<profile/>").unwrap();
    assert_eq!(back.nick, None);
}

#[derive(Bind, Default, Debug, Clone, PartialEq)]
struct Circle {
    xml_name: QName,
    #[xml("r,attr")]
    radius: f32,
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Drawing {
    #[xml("drawing")]
    xml_name: QName,
    shape: Dynamic,
}

#[test]
fn dynamic_value_round_trips() {
    setup();
    let drawing = Drawing {
        shape: Dynamic::new(Circle {
            radius: 1.5,
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = compact(&drawing);
    assert_eq!(xml, "<drawing><shape r=\"1.5\"/></drawing>\n");

    let mut back = Drawing {
        shape: Dynamic::new(Circle::default()),
        ..Default::default()
    };
    xmlbind::from_str_into(&xml, &mut back).unwrap();
    let circle = back.shape.downcast_ref::<Circle>().unwrap();
    assert_eq!(circle.radius, 1.5);
    assert_eq!(circle.xml_name, QName::local("shape"));

    // An empty holder has no concrete type to decode into.
    let back: Drawing = xmlbind::from_str(&xml).unwrap();
    assert!(back.shape.is_empty());
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Tree {
    #[xml("node")]
    xml_name: QName,
    #[xml("label,attr,omitempty")]
    label: String,
    #[xml("node,omitempty")]
    child: Option<Box<Tree>>,
}

fn chain(depth: usize) -> Tree {
    let mut tree = Tree {
        xml_name: QName::local("node"),
        label: depth.to_string(),
        child: None,
    };
    for level in (1..depth).rev() {
        tree = Tree {
            xml_name: QName::local("node"),
            label: level.to_string(),
            child: Some(Box::new(tree)),
        };
    }
    tree
}

#[test]
fn recursive_types_round_trip() {
    setup();
    let tree = chain(4);
    let xml = compact(&tree);
    assert_eq!(
        xml,
        "<node label=\"1\"><node label=\"2\"><node label=\"3\"><node label=\"4\"/></node></node></node>\n"
    );
    let back: Tree = xmlbind::from_str(&xml).unwrap();
    assert_eq!(back, tree);
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Resident {
    #[xml("resident")]
    xml_name: QName,
    home: Address,
}

#[test]
fn nested_xml_name_does_not_rename_the_field() {
    setup();
    let resident = Resident {
        home: Address {
            xml_name: QName::local("address"),
            city: "Oslo".into(),
        },
        ..Default::default()
    };
    let xml = compact(&resident);
    assert_eq!(xml, "<resident><home><city>Oslo</city></home></resident>\n");

    let back: Resident = xmlbind::from_str(&xml).unwrap();
    assert_eq!(back.home.city, "Oslo");
    assert_eq!(back.home.xml_name, QName::local("home"));
}
