//! Parsing of `#[xml("...")]` field annotations.
//!
//! An annotation is a comma-separated list. The first segment names the node,
//! either as `name` or as `namespace-uri name`; the remaining segments are
//! flags:
//!
//! | flag        | meaning                                                   |
//! |-------------|-----------------------------------------------------------|
//! | `attr`      | bind to an attribute of the element instead of a child    |
//! | `chardata`  | bind to the element's own character data                  |
//! | `cdata`     | like `chardata`, written as a CDATA section               |
//! | `innerxml`  | receive the element's raw markup when decoding            |
//! | `comment`   | bind to a comment inside the element                      |
//! | `any`       | collect child elements no other field claims              |
//! | `omitempty` | skip zero values when encoding, tolerate absence decoding |
//!
//! Flags are case-insensitive; spaces inside them are ignored, unknown ones
//! are ignored, and repeating one has no further effect.

/// The structured form of a field annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    /// Namespace URI, empty when none was given.
    pub namespace: String,
    /// Node name, possibly `prefix:local`; empty when only flags were given.
    pub tag_name: String,
    /// `attr`
    pub is_attribute: bool,
    /// `chardata`
    pub is_char_data: bool,
    /// `innerxml`
    pub is_inner_xml: bool,
    /// `cdata`
    pub is_cdata: bool,
    /// `comment`
    pub is_comment: bool,
    /// `any`
    pub is_any: bool,
    /// `omitempty`
    pub omit_empty: bool,
}

impl FieldSpec {
    /// Parse an annotation string. Returns `None` for an empty annotation.
    ///
    /// ```
    /// use xmlbind::FieldSpec;
    ///
    /// let spec = FieldSpec::parse("urn:example item,omitempty").unwrap();
    /// assert_eq!(spec.namespace, "urn:example");
    /// assert_eq!(spec.tag_name, "item");
    /// assert!(spec.omit_empty);
    /// ```
    pub fn parse(annotation: &str) -> Option<FieldSpec> {
        if annotation.is_empty() {
            return None;
        }

        let mut spec = FieldSpec::default();
        let (head, flags) = match annotation.split_once(',') {
            Some((head, flags)) => (head, Some(flags)),
            None => (annotation, None),
        };

        match head.split_once(' ') {
            Some((namespace, name)) => {
                spec.namespace = namespace.to_owned();
                spec.tag_name = name.chars().filter(|c| *c != ' ').collect();
            }
            None => spec.namespace = head.to_owned(),
        }

        for flag in flags.into_iter().flat_map(|flags| flags.split(',')) {
            let flag: String = flag.chars().filter(|c| *c != ' ').collect();
            match flag.to_lowercase().as_str() {
                "omitempty" => spec.omit_empty = true,
                "attr" => spec.is_attribute = true,
                "chardata" => spec.is_char_data = true,
                "comment" => spec.is_comment = true,
                "any" => spec.is_any = true,
                "innerxml" => spec.is_inner_xml = true,
                "cdata" => spec.is_cdata = true,
                _ => {}
            }
        }

        // A lone name lands in the namespace slot first.
        if spec.tag_name.is_empty() && !spec.namespace.is_empty() {
            spec.tag_name = std::mem::take(&mut spec.namespace);
        }

        Some(spec)
    }

    /// Whether the field binds to the element's own character data.
    pub fn is_text(&self) -> bool {
        self.is_char_data || self.is_cdata
    }

    /// Whether the field binds to child elements (as opposed to an attribute,
    /// text, comment or raw markup).
    pub fn is_element(&self) -> bool {
        !(self.is_attribute || self.is_text() || self.is_comment || self.is_inner_xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotation_is_absent() {
        assert_eq!(FieldSpec::parse(""), None);
    }

    #[test]
    fn lone_name() {
        let spec = FieldSpec::parse("person").unwrap();
        assert_eq!(spec.tag_name, "person");
        assert_eq!(spec.namespace, "");
        assert!(spec.is_element());
    }

    #[test]
    fn namespace_and_name() {
        let spec = FieldSpec::parse("http://www.w3.org/2005/Atom feed").unwrap();
        assert_eq!(spec.namespace, "http://www.w3.org/2005/Atom");
        assert_eq!(spec.tag_name, "feed");
    }

    #[test]
    fn further_spaces_in_head_are_dropped() {
        let spec = FieldSpec::parse("urn:x a b  c").unwrap();
        assert_eq!(spec.namespace, "urn:x");
        assert_eq!(spec.tag_name, "abc");
    }

    #[test]
    fn flags_are_case_insensitive_and_spaced() {
        let spec = FieldSpec::parse("id, ATTR ,omit empty,OmitEmpty").unwrap();
        assert_eq!(spec.tag_name, "id");
        assert!(spec.is_attribute);
        assert!(spec.omit_empty);
        assert!(!spec.is_element());
    }

    #[test]
    fn flags_only() {
        let spec = FieldSpec::parse(",chardata").unwrap();
        assert_eq!(spec.tag_name, "");
        assert!(spec.is_char_data);
        assert!(spec.is_text());

        let spec = FieldSpec::parse(",cdata").unwrap();
        assert!(spec.is_cdata);
        assert!(spec.is_text());
    }

    #[test]
    fn every_flag() {
        let spec = FieldSpec::parse("x,omitempty,attr,chardata,comment,any,innerxml,cdata").unwrap();
        assert_eq!(
            spec,
            FieldSpec {
                namespace: String::new(),
                tag_name: "x".into(),
                is_attribute: true,
                is_char_data: true,
                is_inner_xml: true,
                is_cdata: true,
                is_comment: true,
                is_any: true,
                omit_empty: true,
            }
        );
    }

    #[test]
    fn unknown_and_duplicate_flags() {
        let once = FieldSpec::parse("n,attr,bogus").unwrap();
        let twice = FieldSpec::parse("n,attr,attr").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn parsing_is_idempotent() {
        let annotation = "urn:a item,attr,omitempty";
        assert_eq!(FieldSpec::parse(annotation), FieldSpec::parse(annotation));
    }
}
