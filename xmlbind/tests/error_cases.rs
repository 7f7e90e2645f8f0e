//! Failures, and the errors they produce.

use std::collections::HashMap;

use miette::Diagnostic;
use xmlbind::{
    Bind, DecodeOptions, EncodeOptions, ErrorKind, QName, QuickXml, TreeError, XmlBindError,
};
use xmlbind_testhelpers::setup;

#[derive(Bind, Default, Debug, PartialEq)]
struct Tagged {
    #[xml("tagged")]
    xml_name: QName,
    #[xml("id,attr")]
    id: i32,
}

#[test]
fn attribute_round_trip_and_bad_literal() {
    setup();
    let xml = xmlbind::to_string(&Tagged {
        id: 42,
        ..Default::default()
    })
    .unwrap();
    assert!(xml.contains(r#"<tagged id="42"/>"#), "{xml}");

    let back: Tagged = xmlbind::from_str(&xml).unwrap();
    assert_eq!(back.id, 42);

    let err = xmlbind::from_str::<Tagged>(r#"<tagged id="abc"/>"#).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::ParseFailure {
            text: "abc".into(),
            expected: "i32"
        }
    );
    assert_eq!(err.path(), Some("id"));
    assert_eq!(err.to_string(), "cannot parse 'abc' as i32 (at `id`)");
}

#[test]
fn missing_required_attribute() {
    setup();
    let err = xmlbind::from_str::<Tagged>("<tagged/>").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MissingAttribute { name: "id".into() });
    assert!(err.help().is_some());
}

#[derive(Bind, Default, Debug)]
struct Small {
    #[xml("small")]
    xml_name: QName,
    level: i8,
    count: u16,
}

#[test]
fn numeric_overflow() {
    setup();
    let err = xmlbind::from_str::<Small>("<small><level>200</level></small>").unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::NumericOverflow {
            text: "200".into(),
            target: "i8"
        }
    );
    assert_eq!(err.code(), "xmlbind::numeric_overflow");

    let small: Small =
        xmlbind::from_str("<small><level>-0x80</level><count>0b1_0000</count></small>").unwrap();
    assert_eq!(small.level, -128);
    assert_eq!(small.count, 16);
}

#[derive(Bind, Default, Debug)]
struct Anonymous {
    value: i32,
}

#[test]
fn root_without_identity_field() {
    setup();
    let err = xmlbind::to_string(&Anonymous { value: 1 }).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MissingRootName { type_name } if type_name == "Anonymous"));
    assert_eq!(err.code(), "xmlbind::missing_root_name");
    assert!(err.help().is_some());
}

#[test]
fn malformed_documents() {
    setup();
    let err = xmlbind::from_str::<Tagged>("").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedDocument(TreeError::NoRoot));

    let mut tagged = Tagged::default();
    let err = xmlbind::from_slice_with(
        br#"<tagged id="1"><a></b></tagged>"#,
        &mut tagged,
        &QuickXml,
        &DecodeOptions::new().strict(),
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedDocument(_)), "{err}");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn lenient_parsing_recovers() {
    setup();
    let tagged: Tagged = xmlbind::from_str(r#"<tagged id="5"><open></tagged>"#).unwrap();
    assert_eq!(tagged.id, 5);
}

#[derive(Bind, Default, Debug)]
struct WithMap {
    #[xml("m")]
    xml_name: QName,
    map: HashMap<String, String>,
}

#[test]
fn maps_are_unsupported() {
    setup();
    let err = xmlbind::to_string(&WithMap::default()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedType { type_name } if type_name == "HashMap"));
    assert_eq!(err.path(), Some("map"));

    let err = xmlbind::from_str::<WithMap>("<m><map>x</map></m>").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedType { .. }));
}

#[derive(Bind, Default, Debug)]
struct Nest {
    #[xml("nest")]
    xml_name: QName,
    #[xml("nest,omitempty")]
    inner: Option<Box<Nest>>,
}

fn nest(levels: usize) -> Nest {
    let mut value = Nest::default();
    for _ in 1..levels {
        value = Nest {
            inner: Some(Box::new(value)),
            ..Default::default()
        };
    }
    value
}

#[test]
fn depth_limit_applies_to_encoding() {
    setup();
    let options = EncodeOptions::new().max_depth(3);
    assert!(xmlbind::to_string_with_options(&nest(3), &options).is_ok());

    let err: XmlBindError = xmlbind::to_string_with_options(&nest(5), &options).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded { limit: 3 });
    assert_eq!(err.path(), Some("inner.inner.inner"));
}

#[test]
fn depth_limit_applies_to_decoding() {
    setup();
    let xml = "<nest><nest><nest><nest/></nest></nest></nest>";
    let mut value = Nest::default();
    let err = xmlbind::from_slice_with(
        xml.as_bytes(),
        &mut value,
        &QuickXml,
        &DecodeOptions::new().max_depth(2),
    )
    .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded { limit: 2 });

    let value: Nest = xmlbind::from_str(xml).unwrap();
    let third = value
        .inner
        .as_deref()
        .and_then(|n| n.inner.as_deref())
        .and_then(|n| n.inner.as_deref());
    assert!(third.is_some());
}

#[test]
fn invalid_targets() {
    setup();
    let err = xmlbind::to_string(&"text".to_string()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidTarget { type_name } if type_name == "String"));

    let mut numbers: Vec<u32> = Vec::new();
    let err = xmlbind::from_str_into("<a/>", &mut numbers).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidTarget { .. }));
    assert!(numbers.is_empty());
}

#[derive(Bind, Default, Debug)]
struct Grid {
    #[xml("grid")]
    xml_name: QName,
    #[xml("row")]
    rows: Vec<Vec<u32>>,
    #[xml("cell,omitempty")]
    cells: Option<Vec<u32>>,
}

#[test]
fn sequences_of_sequences_are_unsupported() {
    setup();
    let grid = Grid {
        rows: vec![vec![1, 2], vec![3]],
        ..Default::default()
    };
    let err = xmlbind::to_string(&grid).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedType { type_name } if type_name == "Vec<u32>"));
    assert_eq!(err.path(), Some("rows[0]"));

    let grid = Grid {
        cells: Some(vec![1]),
        ..Default::default()
    };
    let err = xmlbind::to_string(&grid).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedType { .. }));
    assert_eq!(err.path(), Some("cells"));

    let err = xmlbind::from_str::<Grid>("<grid><row>1</row><row>2</row></grid>").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedType { type_name } if type_name == "Vec<u32>"));
    assert_eq!(err.path(), Some("rows[0]"));

    let err = xmlbind::from_str::<Grid>("<grid><cell>1</cell></grid>").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedType { .. }));
    assert_eq!(err.path(), Some("cells"));
}
