//! Encoding bindable values to XML.

use xmlbind_core::{Bind, Peek, QName, StructBind, StructType};
use xmlbind_tree::{Attribute, Document, Element, QuickXml, TreeProvider};

use crate::error::FieldPath;
use crate::literal::format_scalar;
use crate::naming::{self, XmlName};
use crate::tracing_macros::{debug, trace, trace_span};
use crate::{EncodeOptions, ErrorKind, FieldSpec, XmlBindError};

/// Serialize a value to an XML string with the default options.
///
/// # Example
///
/// ```
/// use xmlbind::{Bind, QName};
///
/// #[derive(Bind, Default)]
/// struct Person {
///     #[xml("person")]
///     xml_name: QName,
///     #[xml("id,attr")]
///     id: u32,
///     name: String,
/// }
///
/// let xml = xmlbind::to_string(&Person { id: 7, name: "Ada".into(), ..Default::default() }).unwrap();
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<person id=\"7\"><name>Ada</name></person>\n"
/// );
/// ```
pub fn to_string<T: Bind + ?Sized>(value: &T) -> Result<String, XmlBindError> {
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize a value to a pretty-printed XML string.
pub fn to_string_pretty<T: Bind + ?Sized>(value: &T) -> Result<String, XmlBindError> {
    to_string_with_options(value, &EncodeOptions::default().pretty())
}

/// Serialize a value to an XML string with custom options.
pub fn to_string_with_options<T: Bind + ?Sized>(
    value: &T,
    options: &EncodeOptions,
) -> Result<String, XmlBindError> {
    to_string_with(value, &QuickXml, options)
}

/// Serialize a value through a specific tree provider.
///
/// The tree is built in full, reconciled with
/// [`TreeProvider::normalize_namespaces`] when the cleanup options ask for it,
/// and only then written out; on error nothing is produced.
pub fn to_string_with<T, P>(
    value: &T,
    provider: &P,
    options: &EncodeOptions,
) -> Result<String, XmlBindError>
where
    T: Bind + ?Sized,
    P: TreeProvider + ?Sized,
{
    let mut document = to_document(value, provider, options)?;
    if options.cleanup.ns_clean {
        document = provider.normalize_namespaces(document);
    }
    let xml = provider.serialize(&document, &options.serialize)?;
    debug!(bytes = xml.len(), "encoded document");
    Ok(xml)
}

/// Build the node tree for a value without normalizing or serializing it.
pub fn to_document<T, P>(
    value: &T,
    provider: &P,
    options: &EncodeOptions,
) -> Result<Document, XmlBindError>
where
    T: Bind + ?Sized,
    P: TreeProvider + ?Sized,
{
    let mut encoder = Encoder::new(options);
    let root = encoder.encode_root(value.peek())?;
    Ok(provider.create_document(root))
}

struct Encoder<'o> {
    options: &'o EncodeOptions,
    path: FieldPath,
    depth: usize,
}

impl<'o> Encoder<'o> {
    fn new(options: &'o EncodeOptions) -> Self {
        Self {
            options,
            path: FieldPath::default(),
            depth: 0,
        }
    }

    fn encode_root(&mut self, value: Peek<'_>) -> Result<Element, XmlBindError> {
        let invalid = || ErrorKind::InvalidTarget {
            type_name: value.type_name().into_owned(),
        };
        let Some(Peek::Struct(root)) = value.deref() else {
            return Err(invalid().into());
        };
        let ty = root.struct_type();
        if ty.fields.is_empty() {
            return Err(invalid().into());
        }
        if ty.root_identity().is_none() {
            return Err(ErrorKind::MissingRootName {
                type_name: ty.name.to_owned(),
            }
            .into());
        }
        debug!(root = ty.name, "encoding");

        let mut element = root_name(root, &ty).to_element();
        let default_namespace = default_namespace_in(&element, "");
        self.encode_struct(root, &ty, &mut element, &default_namespace)?;
        Ok(element)
    }

    fn enter(&mut self) -> Result<(), XmlBindError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.path.error(ErrorKind::DepthLimitExceeded {
                limit: self.options.max_depth,
            }));
        }
        Ok(())
    }

    /// Run the field loop of `value` into `element`. `default_namespace` is the
    /// default namespace in scope inside `element`.
    fn encode_struct(
        &mut self,
        value: &dyn StructBind,
        ty: &StructType,
        element: &mut Element,
        default_namespace: &str,
    ) -> Result<(), XmlBindError> {
        self.enter()?;
        trace_span!("struct", name = ty.name);

        for (index, field) in ty.fields.iter().enumerate() {
            if field.is_root_identity() {
                continue;
            }
            let Some(peek) = value.field(index) else {
                continue;
            };
            let spec = field.tag.and_then(FieldSpec::parse).unwrap_or_default();
            let name = naming::resolve(field, Some(&spec));

            self.path.push_field(field.name, index);
            let result = self.encode_field(&spec, &name, peek, element, default_namespace);
            self.path.pop();
            result?;
        }

        self.depth -= 1;
        Ok(())
    }

    fn encode_field(
        &mut self,
        spec: &FieldSpec,
        name: &XmlName,
        value: Peek<'_>,
        element: &mut Element,
        default_namespace: &str,
    ) -> Result<(), XmlBindError> {
        if spec.omit_empty && value.is_zero() {
            trace!(field = %name.local, "skipping empty field");
            return Ok(());
        }
        if spec.is_inner_xml {
            return Ok(());
        }

        if spec.is_attribute {
            let Some(text) = self.text_of(value)? else {
                return Ok(());
            };
            trace!(attribute = %name.local, value = %text, "attribute");
            match &name.prefix {
                Some(prefix) if !name.namespace.is_empty() => element.push_attribute(Attribute {
                    prefix: Some(prefix.clone()),
                    namespace: Some(name.namespace.clone()),
                    name: name.local.clone(),
                    value: text,
                }),
                _ => element.set_attribute(name.local.clone(), text),
            }
            return Ok(());
        }

        if spec.is_text() {
            // A struct as character data contributes its fields to this element.
            if let Some(Peek::Struct(inner)) = value.deref() {
                let ty = inner.struct_type();
                return self.encode_struct(inner, &ty, element, default_namespace);
            }
            if let Some(text) = self.text_of(value)? {
                trace!(text = %text, "character data");
                if spec.is_cdata {
                    element.set_cdata(text);
                } else {
                    element.set_content(text);
                }
            }
            return Ok(());
        }

        if spec.is_comment {
            let Some(mut text) = self.text_of(value)? else {
                return Ok(());
            };
            if text.is_empty() {
                return Ok(());
            }
            if text.contains("--") {
                return Err(self.path.error(ErrorKind::InvalidComment { text }));
            }
            if text.ends_with('-') {
                text.push(' ');
            }
            element.add_comment(text);
            return Ok(());
        }

        self.encode_value(spec, name, value, element, default_namespace, false)
    }

    /// Emit `value` as child element(s) of `parent`. `nested` is set once a
    /// pointer, dynamic holder or sequence has been stepped through; a
    /// sequence found there has no element form.
    fn encode_value(
        &mut self,
        spec: &FieldSpec,
        name: &XmlName,
        value: Peek<'_>,
        parent: &mut Element,
        default_namespace: &str,
        nested: bool,
    ) -> Result<(), XmlBindError> {
        match value {
            Peek::Pointer(None) | Peek::Dynamic(None) => Ok(()),
            Peek::Pointer(Some(inner)) | Peek::Dynamic(Some(inner)) => {
                self.encode_value(spec, name, inner.peek(), parent, default_namespace, true)
            }
            Peek::List(list) if list.as_bytes().is_none() => {
                if nested {
                    return Err(self.path.error(ErrorKind::UnsupportedType {
                        type_name: value.type_name().into_owned(),
                    }));
                }
                for index in 0..list.len() {
                    let Some(item) = list.item(index) else {
                        break;
                    };
                    self.path.push_index(index);
                    let result =
                        self.encode_value(spec, name, item, parent, default_namespace, true);
                    self.path.pop();
                    result?;
                }
                Ok(())
            }
            Peek::Struct(inner) => {
                let ty = inner.struct_type();
                let own_name = if spec.is_any {
                    identity_value(inner, &ty)
                } else {
                    None
                };
                let name = own_name.as_ref().unwrap_or(name);
                let mut child = child_element(name, default_namespace);
                let inner_default = default_namespace_in(&child, default_namespace);
                self.encode_struct(inner, &ty, &mut child, &inner_default)?;
                parent.add_child(child);
                Ok(())
            }
            Peek::Name(qname) => {
                let own_name;
                let name = if spec.is_any && !qname.is_empty() {
                    own_name = qname_to_name(qname);
                    &own_name
                } else {
                    name
                };
                parent.add_child(child_element(name, default_namespace));
                Ok(())
            }
            Peek::Scalar(_) | Peek::List(_) => {
                let mut child = child_element(name, default_namespace);
                if let Some(text) = self.text_of(value)? {
                    child.set_content(text);
                }
                parent.add_child(child);
                Ok(())
            }
            Peek::Unsupported(type_name) => Err(self.path.error(ErrorKind::UnsupportedType {
                type_name: type_name.to_owned(),
            })),
        }
    }

    /// The text form of a leaf value; `None` for a null pointer or an empty
    /// dynamic holder.
    fn text_of(&self, value: Peek<'_>) -> Result<Option<String>, XmlBindError> {
        let Some(value) = value.deref() else {
            return Ok(None);
        };
        match value {
            Peek::Scalar(scalar) => Ok(Some(format_scalar(scalar))),
            Peek::List(list) => match list.as_bytes() {
                Some(bytes) => Ok(Some(String::from_utf8_lossy(bytes).into_owned())),
                None => Err(self.path.error(ErrorKind::UnsupportedType {
                    type_name: value.type_name().into_owned(),
                })),
            },
            other => Err(self.path.error(ErrorKind::UnsupportedType {
                type_name: other.type_name().into_owned(),
            })),
        }
    }
}

/// Name of the root element: the identity annotation, else the identity value,
/// else the type name.
fn root_name(root: &dyn StructBind, ty: &StructType) -> XmlName {
    let annotated = ty
        .root_identity()
        .and_then(|identity| ty.fields[identity].tag)
        .and_then(FieldSpec::parse)
        .filter(|spec| !spec.tag_name.is_empty());
    if let Some(spec) = annotated {
        return XmlName::parse(&spec.tag_name, &spec.namespace);
    }
    identity_value(root, ty).unwrap_or_else(|| XmlName::parse(ty.name, ""))
}

/// The non-empty `QName` held in a struct's `xml_name` field.
fn identity_value(value: &dyn StructBind, ty: &StructType) -> Option<XmlName> {
    match value.field(ty.root_identity()?)? {
        Peek::Name(qname) if !qname.is_empty() => Some(qname_to_name(qname)),
        _ => None,
    }
}

fn qname_to_name(qname: &QName) -> XmlName {
    XmlName {
        namespace: qname.space.clone(),
        prefix: None,
        local: qname.local.clone(),
    }
}

/// Create a child element. An unqualified child of an element with a default
/// namespace stays in that namespace, as a reader would see it.
fn child_element(name: &XmlName, default_namespace: &str) -> Element {
    let mut child = name.to_element();
    if name.namespace.is_empty() && !default_namespace.is_empty() {
        child.set_namespace(None, default_namespace);
    }
    child
}

/// The default namespace in scope inside `element`, given the one in scope
/// around it.
fn default_namespace_in(element: &Element, outer: &str) -> String {
    match (element.prefix(), element.namespace()) {
        (None, Some(uri)) => uri.to_owned(),
        (None, None) => String::new(),
        (Some(_), _) => outer.to_owned(),
    }
}
