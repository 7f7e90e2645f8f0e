//! Building a node tree from XML text with quick-xml.

use std::fmt;
use std::io::Cursor;

use quick_xml::NsReader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::normalize::normalize_element;
use crate::tracing_macros::{debug, error, trace, warning};
use crate::{Attribute, Document, Element, Node, ParseOptions, TreeError};

type Reader<'a> = NsReader<Cursor<&'a [u8]>>;

/// Parse `input` into a document.
pub(crate) fn parse_document(input: &[u8], options: ParseOptions) -> Result<Document, TreeError> {
    debug!(input_len = input.len(), recover = options.recover, "parsing XML document");

    let mut reader = NsReader::from_reader(Cursor::new(input));
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = !options.recover;
    config.allow_unmatched_ends = options.recover;

    let mut builder = TreeBuilder::new(options);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (resolve, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(next) => next,
            Err(e) if options.recover => {
                builder.recovered_error(format_args!("stopping at malformed input: {e}"));
                break;
            }
            Err(e) => return Err(TreeError::Parse(e.to_string())),
        };

        // Resolve element namespace upfront
        let element_ns = resolve_namespace(resolve);

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let element = start_element(&reader, e, element_ns, options)?;
                trace!(name = %element.qualified_name(), "element start");
                if matches!(event, Event::Empty(_)) {
                    builder.close(element)?;
                } else {
                    builder.open(element);
                }
            }
            Event::End(_) => builder.end()?,
            Event::Text(e) => {
                let text = e.decode().map_err(|e| TreeError::Parse(e.to_string()))?;
                builder.node(Node::Text(text.into_owned()))?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?;
                builder.node(Node::CData(text.to_owned()))?;
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(e.as_ref())?;
                builder.node(Node::Comment(text.to_owned()))?;
            }
            Event::PI(e) => {
                let content = std::str::from_utf8(e.as_ref())?;
                let (target, data) = content
                    .split_once(char::is_whitespace)
                    .unwrap_or((content, ""));
                builder.node(Node::ProcessingInstruction {
                    target: target.to_owned(),
                    data: data.trim().to_owned(),
                })?;
            }
            Event::Decl(_) | Event::DocType(_) => {
                // The declaration is regenerated on output and DTDs are never
                // processed.
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|e| TreeError::Parse(e.to_string()))?;
                let resolved = builder.resolve_entity(&raw)?;
                builder.node(Node::Text(resolved))?;
            }
            Event::Eof => break,
        }
    }

    let mut document = builder.finish()?;
    if options.ns_clean {
        normalize_element(document.root_mut());
    }
    Ok(document)
}

/// Collects elements on a stack while events stream in.
struct TreeBuilder {
    options: ParseOptions,
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            root: None,
        }
    }

    fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    /// Attach a finished element to its parent, or make it the root.
    fn close(&mut self, element: Element) -> Result<(), TreeError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.add_child(element);
            return Ok(());
        }
        if self.root.is_none() {
            self.root = Some(element);
            return Ok(());
        }
        if self.options.recover {
            self.recovered_error(format_args!(
                "dropping extra root element <{}>",
                element.qualified_name()
            ));
            return Ok(());
        }
        Err(TreeError::TrailingContent(format!(
            "element <{}>",
            element.qualified_name()
        )))
    }

    fn end(&mut self) -> Result<(), TreeError> {
        match self.stack.pop() {
            Some(element) => self.close(element),
            None => {
                // Only reachable with `allow_unmatched_ends`, i.e. in recover mode.
                self.recovered_error(format_args!("ignoring unmatched end tag"));
                Ok(())
            }
        }
    }

    fn node(&mut self, node: Node) -> Result<(), TreeError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.add_node(node);
            return Ok(());
        }
        // Outside the root: whitespace, comments and PIs are allowed and
        // discarded.
        match node {
            Node::Text(text) if text.trim().is_empty() => Ok(()),
            Node::Comment(_) | Node::ProcessingInstruction { .. } => Ok(()),
            _ if self.options.recover => {
                self.recovered_warning(format_args!("ignoring text outside the root element"));
                Ok(())
            }
            _ => Err(TreeError::TrailingContent("text".to_owned())),
        }
    }

    fn resolve_entity(&self, raw: &str) -> Result<String, TreeError> {
        if let Some(resolved) = resolve_xml_entity(raw) {
            return Ok(resolved.into());
        }

        if let Some(rest) = raw.strip_prefix('#') {
            let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16)
                    .map_err(|_| TreeError::Parse(format!("invalid hex character reference: #{rest}")))?
            } else {
                rest.parse::<u32>().map_err(|_| {
                    TreeError::Parse(format!("invalid decimal character reference: #{rest}"))
                })?
            };

            let ch = char::from_u32(code)
                .ok_or_else(|| TreeError::Parse(format!("invalid Unicode scalar: {code}")))?;
            return Ok(ch.to_string());
        }

        if self.options.recover {
            self.recovered_warning(format_args!("keeping unknown entity &{raw}; literally"));
            return Ok(format!("&{raw};"));
        }
        Err(TreeError::UnknownEntity(raw.to_owned()))
    }

    fn finish(mut self) -> Result<Document, TreeError> {
        if let Some(open) = self.stack.last() {
            if !self.options.recover {
                return Err(TreeError::UnexpectedEof {
                    open: open.qualified_name().into_owned(),
                });
            }
            self.recovered_error(format_args!(
                "closing {} unclosed element(s) at end of input",
                self.stack.len()
            ));
            while let Some(element) = self.stack.pop() {
                self.close(element)?;
            }
        }
        self.root.map(Document::new).ok_or(TreeError::NoRoot)
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn recovered_error(&self, message: fmt::Arguments<'_>) {
        if !self.options.suppress_errors {
            error!("recovered: {message}");
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn recovered_warning(&self, message: fmt::Arguments<'_>) {
        if !self.options.suppress_warnings {
            warning!("recovered: {message}");
        }
    }
}

/// Build an element (name, namespace declarations, attributes) from a start tag.
fn start_element(
    reader: &Reader<'_>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
    options: ParseOptions,
) -> Result<Element, TreeError> {
    let local_name = start.local_name();
    let local = std::str::from_utf8(local_name.as_ref())?;
    let mut element = Element::new(local);

    let name = start.name();
    let prefix = match name.prefix() {
        Some(prefix) => Some(std::str::from_utf8(prefix.as_ref())?.to_owned()),
        None => None,
    };
    element.set_parsed_name(prefix, namespace);

    for attr in start.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(e) if options.recover => {
                if !options.suppress_warnings {
                    warning!("recovered: skipping malformed attribute: {e}");
                }
                continue;
            }
            Err(e) => return Err(TreeError::Parse(e.to_string())),
        };

        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) if options.recover => String::from_utf8_lossy(&attr.value).into_owned(),
            Err(e) => return Err(TreeError::Parse(e.to_string())),
        };

        // Namespace declarations are kept apart from ordinary attributes.
        let key = attr.key;
        if key.as_ref() == b"xmlns" {
            element.declare_namespace(None, value);
            continue;
        }
        let key_local_name = key.local_name();
        let key_local = std::str::from_utf8(key_local_name.as_ref())?;
        let key_prefix = match key.prefix() {
            Some(prefix) => Some(std::str::from_utf8(prefix.as_ref())?.to_owned()),
            None => None,
        };
        if key_prefix.as_deref() == Some("xmlns") {
            element.declare_namespace(Some(key_local.to_owned()), value);
            continue;
        }

        let (attr_resolve, _) = reader.resolver().resolve_attribute(key);
        element.push_attribute(Attribute {
            prefix: key_prefix,
            namespace: resolve_namespace(attr_resolve),
            name: key_local.to_owned(),
            value,
        });
    }

    Ok(element)
}

/// Resolve a namespace from quick-xml's ResolveResult.
fn resolve_namespace(resolve: ResolveResult<'_>) -> Option<String> {
    match resolve {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}
