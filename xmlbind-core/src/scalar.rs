//! Scalar type identification for shapes.

/// All scalar types supported out of the box by xmlbind.
///
/// A scalar is rendered as a single piece of text: an attribute value or the
/// text content of an element.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ScalarType {
    /// Primitive type `bool`.
    Bool,
    /// Primitive type `char`.
    Char,
    /// `std::string::String`.
    String,
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
    /// Primitive type `u8`.
    U8,
    /// Primitive type `u16`.
    U16,
    /// Primitive type `u32`.
    U32,
    /// Primitive type `u64`.
    U64,
    /// Primitive type `usize`.
    USize,
    /// Primitive type `i8`.
    I8,
    /// Primitive type `i16`.
    I16,
    /// Primitive type `i32`.
    I32,
    /// Primitive type `i64`.
    I64,
    /// Primitive type `isize`.
    ISize,
}

impl ScalarType {
    /// The Rust spelling of the type, used as a fallback element name and in
    /// error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Char => "char",
            ScalarType::String => "String",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::USize => "usize",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::ISize => "isize",
        }
    }

    /// Width in bits for numeric types, `None` otherwise.
    pub const fn bits(self) -> Option<u32> {
        match self {
            ScalarType::U8 | ScalarType::I8 => Some(8),
            ScalarType::U16 | ScalarType::I16 => Some(16),
            ScalarType::U32 | ScalarType::I32 | ScalarType::F32 => Some(32),
            ScalarType::U64 | ScalarType::I64 | ScalarType::F64 => Some(64),
            ScalarType::USize | ScalarType::ISize => Some(usize::BITS),
            ScalarType::Bool | ScalarType::Char | ScalarType::String => None,
        }
    }

    /// Whether this is one of the integer types.
    pub const fn is_integer(self) -> bool {
        !matches!(
            self,
            ScalarType::Bool
                | ScalarType::Char
                | ScalarType::String
                | ScalarType::F32
                | ScalarType::F64
        )
    }
}

impl core::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed scalar value, read side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarRef<'a> {
    /// `bool`
    Bool(bool),
    /// `char`
    Char(char),
    /// `String`
    String(&'a str),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `usize`
    USize(usize),
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `isize`
    ISize(isize),
}

impl ScalarRef<'_> {
    /// The scalar type of this value.
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarRef::Bool(_) => ScalarType::Bool,
            ScalarRef::Char(_) => ScalarType::Char,
            ScalarRef::String(_) => ScalarType::String,
            ScalarRef::F32(_) => ScalarType::F32,
            ScalarRef::F64(_) => ScalarType::F64,
            ScalarRef::U8(_) => ScalarType::U8,
            ScalarRef::U16(_) => ScalarType::U16,
            ScalarRef::U32(_) => ScalarType::U32,
            ScalarRef::U64(_) => ScalarType::U64,
            ScalarRef::USize(_) => ScalarType::USize,
            ScalarRef::I8(_) => ScalarType::I8,
            ScalarRef::I16(_) => ScalarType::I16,
            ScalarRef::I32(_) => ScalarType::I32,
            ScalarRef::I64(_) => ScalarType::I64,
            ScalarRef::ISize(_) => ScalarType::ISize,
        }
    }

    /// Whether the value equals its type's zero value.
    pub fn is_zero(&self) -> bool {
        match *self {
            ScalarRef::Bool(v) => !v,
            ScalarRef::Char(v) => v == '\0',
            ScalarRef::String(v) => v.is_empty(),
            ScalarRef::F32(v) => v == 0.0,
            ScalarRef::F64(v) => v == 0.0,
            ScalarRef::U8(v) => v == 0,
            ScalarRef::U16(v) => v == 0,
            ScalarRef::U32(v) => v == 0,
            ScalarRef::U64(v) => v == 0,
            ScalarRef::USize(v) => v == 0,
            ScalarRef::I8(v) => v == 0,
            ScalarRef::I16(v) => v == 0,
            ScalarRef::I32(v) => v == 0,
            ScalarRef::I64(v) => v == 0,
            ScalarRef::ISize(v) => v == 0,
        }
    }
}

/// A borrowed scalar slot, write side.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    /// `bool`
    Bool(&'a mut bool),
    /// `char`
    Char(&'a mut char),
    /// `String`
    String(&'a mut String),
    /// `f32`
    F32(&'a mut f32),
    /// `f64`
    F64(&'a mut f64),
    /// `u8`
    U8(&'a mut u8),
    /// `u16`
    U16(&'a mut u16),
    /// `u32`
    U32(&'a mut u32),
    /// `u64`
    U64(&'a mut u64),
    /// `usize`
    USize(&'a mut usize),
    /// `i8`
    I8(&'a mut i8),
    /// `i16`
    I16(&'a mut i16),
    /// `i32`
    I32(&'a mut i32),
    /// `i64`
    I64(&'a mut i64),
    /// `isize`
    ISize(&'a mut isize),
}

impl ScalarMut<'_> {
    /// The scalar type of this slot.
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarMut::Bool(_) => ScalarType::Bool,
            ScalarMut::Char(_) => ScalarType::Char,
            ScalarMut::String(_) => ScalarType::String,
            ScalarMut::F32(_) => ScalarType::F32,
            ScalarMut::F64(_) => ScalarType::F64,
            ScalarMut::U8(_) => ScalarType::U8,
            ScalarMut::U16(_) => ScalarType::U16,
            ScalarMut::U32(_) => ScalarType::U32,
            ScalarMut::U64(_) => ScalarType::U64,
            ScalarMut::USize(_) => ScalarType::USize,
            ScalarMut::I8(_) => ScalarType::I8,
            ScalarMut::I16(_) => ScalarType::I16,
            ScalarMut::I32(_) => ScalarType::I32,
            ScalarMut::I64(_) => ScalarType::I64,
            ScalarMut::ISize(_) => ScalarType::ISize,
        }
    }

    /// Reborrow the slot for a shorter lifetime.
    pub fn reborrow(&mut self) -> ScalarMut<'_> {
        match self {
            ScalarMut::Bool(v) => ScalarMut::Bool(v),
            ScalarMut::Char(v) => ScalarMut::Char(v),
            ScalarMut::String(v) => ScalarMut::String(v),
            ScalarMut::F32(v) => ScalarMut::F32(v),
            ScalarMut::F64(v) => ScalarMut::F64(v),
            ScalarMut::U8(v) => ScalarMut::U8(v),
            ScalarMut::U16(v) => ScalarMut::U16(v),
            ScalarMut::U32(v) => ScalarMut::U32(v),
            ScalarMut::U64(v) => ScalarMut::U64(v),
            ScalarMut::USize(v) => ScalarMut::USize(v),
            ScalarMut::I8(v) => ScalarMut::I8(v),
            ScalarMut::I16(v) => ScalarMut::I16(v),
            ScalarMut::I32(v) => ScalarMut::I32(v),
            ScalarMut::I64(v) => ScalarMut::I64(v),
            ScalarMut::ISize(v) => ScalarMut::ISize(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_follow_declared_width() {
        assert_eq!(ScalarType::I8.bits(), Some(8));
        assert_eq!(ScalarType::F32.bits(), Some(32));
        assert_eq!(ScalarType::U64.bits(), Some(64));
        assert_eq!(ScalarType::String.bits(), None);
    }

    #[test]
    fn zero_values() {
        assert!(ScalarRef::I32(0).is_zero());
        assert!(!ScalarRef::I32(-1).is_zero());
        assert!(ScalarRef::F64(-0.0).is_zero());
        assert!(!ScalarRef::F64(f64::NAN).is_zero());
        assert!(ScalarRef::String("").is_zero());
        assert!(ScalarRef::Bool(false).is_zero());
        assert!(ScalarRef::Char('\0').is_zero());
    }

    #[test]
    fn integer_classification() {
        assert!(ScalarType::USize.is_integer());
        assert!(!ScalarType::F64.is_integer());
        assert!(!ScalarType::Char.is_integer());
    }
}
