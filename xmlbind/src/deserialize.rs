//! Decoding XML into bindable values.

use xmlbind_core::{Bind, Field, Poke, QName, StructBind};
use xmlbind_tree::{Element, QuickXml, TreeProvider};

use crate::error::FieldPath;
use crate::literal::parse_into;
use crate::naming::{self, XmlName};
use crate::tracing_macros::{debug, trace, trace_span};
use crate::{DecodeOptions, ErrorKind, FieldSpec, XmlBindError};

/// Deserialize a value from an XML string.
///
/// # Example
///
/// ```
/// use xmlbind::{Bind, QName};
///
/// #[derive(Bind, Default, Debug, PartialEq)]
/// struct Person {
///     #[xml("person")]
///     xml_name: QName,
///     #[xml("id,attr")]
///     id: u32,
///     name: String,
/// }
///
/// let person: Person = xmlbind::from_str(r#"<person id="7"><name>Ada</name></person>"#).unwrap();
/// assert_eq!(person.id, 7);
/// assert_eq!(person.name, "Ada");
/// assert_eq!(person.xml_name, QName::local("person"));
/// ```
pub fn from_str<T: Bind + Default>(input: &str) -> Result<T, XmlBindError> {
    from_slice(input.as_bytes())
}

/// Deserialize a value from XML bytes.
pub fn from_slice<T: Bind + Default>(input: &[u8]) -> Result<T, XmlBindError> {
    let mut value = T::default();
    from_slice_into(input, &mut value)?;
    Ok(value)
}

/// Populate an existing value from an XML string.
pub fn from_str_into<T: Bind + ?Sized>(input: &str, target: &mut T) -> Result<(), XmlBindError> {
    from_slice_into(input.as_bytes(), target)
}

/// Populate an existing value from XML bytes.
pub fn from_slice_into<T: Bind + ?Sized>(
    input: &[u8],
    target: &mut T,
) -> Result<(), XmlBindError> {
    from_slice_with(input, target, &QuickXml, &DecodeOptions::default())
}

/// Populate an existing value from XML bytes through a specific tree provider.
///
/// The target is checked before the input is parsed. Decoding stops at the
/// first error, which carries the path of the field being filled; fields
/// written before that point keep their new values.
pub fn from_slice_with<T, P>(
    input: &[u8],
    target: &mut T,
    provider: &P,
    options: &DecodeOptions,
) -> Result<(), XmlBindError>
where
    T: Bind + ?Sized,
    P: TreeProvider + ?Sized,
{
    let root = resolve_target(target.poke())?;
    debug!(bytes = input.len(), root = root.struct_type().name, "decoding");
    let document = provider.parse(input, options.parse)?;
    Decoder::new(options).decode_struct(document.root(), root)
}

/// Deserialize a value from an already built element.
pub fn from_element<T: Bind + Default>(element: &Element) -> Result<T, XmlBindError> {
    let mut value = T::default();
    from_element_into(element, &mut value)?;
    Ok(value)
}

/// Populate an existing value from an already built element.
pub fn from_element_into<T: Bind + ?Sized>(
    element: &Element,
    target: &mut T,
) -> Result<(), XmlBindError> {
    let root = resolve_target(target.poke())?;
    Decoder::new(&DecodeOptions::default()).decode_struct(element, root)
}

/// Follow pointers and dynamic holders down to the struct being decoded into,
/// allocating along the way.
fn resolve_target(target: Poke<'_>) -> Result<&mut dyn StructBind, XmlBindError> {
    let invalid = |type_name: String| ErrorKind::InvalidTarget { type_name };
    match target {
        Poke::Struct(value) if value.struct_type().fields.is_empty() => {
            Err(invalid(value.struct_type().name.to_owned()).into())
        }
        Poke::Struct(value) => Ok(value),
        Poke::Pointer(pointer) => resolve_target(pointer.get_or_allocate()),
        Poke::Dynamic(dynamic) => match dynamic.reset() {
            Some(inner) => resolve_target(inner),
            None => Err(invalid("Dynamic".to_owned()).into()),
        },
        other => Err(invalid(other.type_name().into_owned()).into()),
    }
}

fn qname_of(element: &Element) -> QName {
    QName::new(element.namespace().unwrap_or(""), element.local_name())
}

struct Decoder<'o> {
    options: &'o DecodeOptions,
    path: FieldPath,
    depth: usize,
}

impl<'o> Decoder<'o> {
    fn new(options: &'o DecodeOptions) -> Self {
        Self {
            options,
            path: FieldPath::default(),
            depth: 0,
        }
    }

    fn fail(&self, kind: impl Into<ErrorKind>) -> XmlBindError {
        self.path.error(kind)
    }

    fn decode_struct(
        &mut self,
        element: &Element,
        target: &mut dyn StructBind,
    ) -> Result<(), XmlBindError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.fail(ErrorKind::DepthLimitExceeded {
                limit: self.options.max_depth,
            }));
        }

        let ty = target.struct_type();
        trace_span!("struct", name = ty.name, element = element.local_name());

        let specs: Vec<FieldSpec> = ty
            .fields
            .iter()
            .map(|field| field.tag.and_then(FieldSpec::parse).unwrap_or_default())
            .collect();
        let names: Vec<XmlName> = ty
            .fields
            .iter()
            .zip(&specs)
            .map(|(field, spec)| naming::resolve(field, Some(spec)))
            .collect();
        // Local names claimed by element fields, which `any` fields skip.
        let claimed: Vec<&str> = ty
            .fields
            .iter()
            .zip(specs.iter().zip(&names))
            .filter(|(field, (spec, _))| {
                !field.is_root_identity() && spec.is_element() && !spec.is_any
            })
            .map(|(_, (_, name))| name.local.as_str())
            .collect();

        for (index, field) in ty.fields.iter().enumerate() {
            let Some(slot) = target.field_mut(index) else {
                continue;
            };
            self.path.push_field(field.name, index);
            let result =
                self.decode_field(element, field, &specs[index], &names[index], slot, &claimed);
            self.path.pop();
            result?;
        }

        self.depth -= 1;
        Ok(())
    }

    fn decode_field(
        &mut self,
        element: &Element,
        field: &Field,
        spec: &FieldSpec,
        name: &XmlName,
        mut slot: Poke<'_>,
        claimed: &[&str],
    ) -> Result<(), XmlBindError> {
        if field.is_root_identity() {
            if let Poke::Name(qname) = slot {
                *qname = qname_of(element);
            }
            return Ok(());
        }

        if spec.is_inner_xml {
            return self.decode_text(slot, &element.to_xml());
        }

        if spec.is_attribute {
            let value = if name.namespace.is_empty() {
                element.attribute(&name.local)
            } else {
                element.attribute_ns(&name.namespace, &name.local)
            };
            return match value {
                Some(text) => self.decode_text(slot, text),
                None if spec.omit_empty || matches!(slot, Poke::Pointer(_)) => {
                    trace!(attribute = %name.local, "optional attribute absent");
                    Ok(())
                }
                None => Err(self.fail(ErrorKind::MissingAttribute {
                    name: name.local.clone(),
                })),
            };
        }

        if spec.is_text() {
            return self.decode_char_data(element, slot);
        }

        if spec.is_comment {
            return self.decode_text(slot, &element.comments());
        }

        let matches = element.children().filter(|child| {
            if spec.is_any {
                !claimed.contains(&child.local_name())
            } else {
                name.matches(child)
            }
        });
        for child in matches {
            trace!(element = child.local_name(), "matched child");
            self.decode_element(child, slot.reborrow(), false)?;
        }
        Ok(())
    }

    /// Decode a matched child element into `slot`. Sequences grow by one item;
    /// anything else is overwritten. `nested` is set below a pointer, dynamic
    /// holder or sequence, where a further sequence cannot be filled.
    fn decode_element(
        &mut self,
        element: &Element,
        slot: Poke<'_>,
        nested: bool,
    ) -> Result<(), XmlBindError> {
        match slot {
            Poke::List(list) => {
                if list.as_bytes().is_some() {
                    list.set_bytes(element.content().as_bytes());
                    return Ok(());
                }
                if nested {
                    return Err(self.fail(ErrorKind::UnsupportedType {
                        type_name: format!("Vec<{}>", list.item_shape().type_name),
                    }));
                }
                let index = list.len();
                self.path.push_index(index);
                let result = self.decode_element(element, list.push_default(), true);
                self.path.pop();
                result
            }
            Poke::Pointer(pointer) => {
                self.decode_element(element, pointer.get_or_allocate(), true)
            }
            Poke::Dynamic(dynamic) => match dynamic.reset() {
                Some(inner) => self.decode_element(element, inner, true),
                None => Ok(()),
            },
            Poke::Struct(value) => self.decode_struct(element, value),
            Poke::Name(qname) => {
                *qname = qname_of(element);
                Ok(())
            }
            Poke::Scalar(scalar) => {
                parse_into(scalar, &element.content()).map_err(|kind| self.fail(kind))
            }
            Poke::Unsupported(type_name) => Err(self.fail(ErrorKind::UnsupportedType {
                type_name: type_name.to_owned(),
            })),
        }
    }

    /// Fill a character data field. A struct there is decoded from the
    /// current element itself.
    fn decode_char_data(&mut self, element: &Element, slot: Poke<'_>) -> Result<(), XmlBindError> {
        match slot {
            Poke::Struct(value) => self.decode_struct(element, value),
            Poke::Pointer(pointer) => self.decode_char_data(element, pointer.get_or_allocate()),
            Poke::Dynamic(dynamic) => match dynamic.reset() {
                Some(inner) => self.decode_char_data(element, inner),
                None => Ok(()),
            },
            other => self.decode_text(other, &element.text()),
        }
    }

    /// Store text (an attribute value, character data, a comment or raw
    /// markup) into a leaf slot.
    fn decode_text(&mut self, slot: Poke<'_>, text: &str) -> Result<(), XmlBindError> {
        let type_name = slot.type_name();
        match slot {
            Poke::Scalar(scalar) => parse_into(scalar, text).map_err(|kind| self.fail(kind)),
            Poke::List(list) => {
                if list.set_bytes(text.as_bytes()) {
                    Ok(())
                } else {
                    Err(self.fail(ErrorKind::UnsupportedType {
                        type_name: type_name.into_owned(),
                    }))
                }
            }
            Poke::Pointer(pointer) => self.decode_text(pointer.get_or_allocate(), text),
            Poke::Dynamic(dynamic) => match dynamic.reset() {
                Some(inner) => self.decode_text(inner, text),
                None => Ok(()),
            },
            _ => Err(self.fail(ErrorKind::UnsupportedType {
                type_name: type_name.into_owned(),
            })),
        }
    }
}
