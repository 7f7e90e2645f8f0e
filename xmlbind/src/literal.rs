//! Conversion between scalar values and their text form.

use xmlbind_core::{ScalarMut, ScalarRef};

use crate::ErrorKind;

/// Render a scalar as text.
///
/// Floats use the shortest text that reads back to the same value at their
/// declared width, never an exponent; non-finite values are `NaN`, `+Inf` and
/// `-Inf`.
pub(crate) fn format_scalar(value: ScalarRef<'_>) -> String {
    match value {
        ScalarRef::Bool(v) => v.to_string(),
        ScalarRef::Char(v) => v.to_string(),
        ScalarRef::String(v) => v.to_owned(),
        ScalarRef::F32(v) => format_float(v.is_nan(), v.is_infinite(), v.is_sign_negative(), v),
        ScalarRef::F64(v) => format_float(v.is_nan(), v.is_infinite(), v.is_sign_negative(), v),
        ScalarRef::U8(v) => v.to_string(),
        ScalarRef::U16(v) => v.to_string(),
        ScalarRef::U32(v) => v.to_string(),
        ScalarRef::U64(v) => v.to_string(),
        ScalarRef::USize(v) => v.to_string(),
        ScalarRef::I8(v) => v.to_string(),
        ScalarRef::I16(v) => v.to_string(),
        ScalarRef::I32(v) => v.to_string(),
        ScalarRef::I64(v) => v.to_string(),
        ScalarRef::ISize(v) => v.to_string(),
    }
}

fn format_float(nan: bool, infinite: bool, negative: bool, value: impl ToString) -> String {
    match (nan, infinite, negative) {
        (true, _, _) => "NaN".to_owned(),
        (_, true, false) => "+Inf".to_owned(),
        (_, true, true) => "-Inf".to_owned(),
        _ => value.to_string(),
    }
}

/// Parse `text` into the scalar slot.
pub(crate) fn parse_into(slot: ScalarMut<'_>, text: &str) -> Result<(), ErrorKind> {
    match slot {
        ScalarMut::Bool(v) => *v = parse_bool(text)?,
        ScalarMut::Char(v) => {
            let mut chars = text.chars();
            *v = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(failure(text, "char")),
            };
        }
        ScalarMut::String(v) => {
            v.clear();
            v.push_str(text);
        }
        ScalarMut::F32(v) => *v = parse_float::<f32>(text, "f32")?,
        ScalarMut::F64(v) => *v = parse_float::<f64>(text, "f64")?,
        ScalarMut::U8(v) => *v = narrow(parse_unsigned(text, "u8")?, text, "u8")?,
        ScalarMut::U16(v) => *v = narrow(parse_unsigned(text, "u16")?, text, "u16")?,
        ScalarMut::U32(v) => *v = narrow(parse_unsigned(text, "u32")?, text, "u32")?,
        ScalarMut::U64(v) => *v = parse_unsigned(text, "u64")?,
        ScalarMut::USize(v) => *v = narrow(parse_unsigned(text, "usize")?, text, "usize")?,
        ScalarMut::I8(v) => *v = narrow(parse_signed(text, "i8")?, text, "i8")?,
        ScalarMut::I16(v) => *v = narrow(parse_signed(text, "i16")?, text, "i16")?,
        ScalarMut::I32(v) => *v = narrow(parse_signed(text, "i32")?, text, "i32")?,
        ScalarMut::I64(v) => *v = parse_signed(text, "i64")?,
        ScalarMut::ISize(v) => *v = narrow(parse_signed(text, "isize")?, text, "isize")?,
    }
    Ok(())
}

fn failure(text: &str, expected: &'static str) -> ErrorKind {
    ErrorKind::ParseFailure {
        text: text.to_owned(),
        expected,
    }
}

fn overflow(text: &str, target: &'static str) -> ErrorKind {
    ErrorKind::NumericOverflow {
        text: text.to_owned(),
        target,
    }
}

fn narrow<W, N: TryFrom<W>>(wide: W, text: &str, target: &'static str) -> Result<N, ErrorKind> {
    N::try_from(wide).map_err(|_| overflow(text, target))
}

fn parse_bool(text: &str) -> Result<bool, ErrorKind> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(failure(text, "bool")),
    }
}

fn parse_float<F>(text: &str, target: &'static str) -> Result<F, ErrorKind>
where
    F: std::str::FromStr + Into<f64> + Copy,
{
    let value: F = text.parse().map_err(|_| failure(text, target))?;
    if value.into().is_infinite() && !names_infinity(text) {
        return Err(overflow(text, target));
    }
    Ok(value)
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

enum IntError {
    Syntax,
    Range,
}

fn parse_signed(text: &str, target: &'static str) -> Result<i64, ErrorKind> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = parse_magnitude(digits).map_err(|e| match e {
        IntError::Syntax => failure(text, target),
        IntError::Range => overflow(text, target),
    })?;
    if !underscores_ok(text) {
        return Err(failure(text, target));
    }
    let limit = 1_u64 << 63;
    match (negative, magnitude) {
        (false, m) if m < limit => Ok(m as i64),
        (true, m) if m <= limit => Ok((m as i64).wrapping_neg()),
        _ => Err(overflow(text, target)),
    }
}

/// Unsigned targets take no sign at all.
fn parse_unsigned(text: &str, target: &'static str) -> Result<u64, ErrorKind> {
    let value = parse_magnitude(text).map_err(|e| match e {
        IntError::Syntax => failure(text, target),
        IntError::Range => overflow(text, target),
    })?;
    if !underscores_ok(text) {
        return Err(failure(text, target));
    }
    Ok(value)
}

/// Digits with an optional base prefix (`0x`, `0o`, `0b`, or a bare leading
/// `0` for octal), accumulated into a `u64`.
fn parse_magnitude(text: &str) -> Result<u64, IntError> {
    if text.is_empty() {
        return Err(IntError::Syntax);
    }
    let bytes = text.as_bytes();
    let (radix, digits) = if bytes[0] == b'0' && bytes.len() >= 3 {
        match bytes[1].to_ascii_lowercase() {
            b'x' => (16, &bytes[2..]),
            b'o' => (8, &bytes[2..]),
            b'b' => (2, &bytes[2..]),
            _ => (8, &bytes[1..]),
        }
    } else if bytes[0] == b'0' {
        (8, &bytes[1..])
    } else {
        (10, bytes)
    };

    let mut value: u64 = 0;
    let mut range_error = false;
    for &byte in digits {
        if byte == b'_' {
            continue;
        }
        let digit = match (byte as char).to_digit(radix) {
            Some(digit) => u64::from(digit),
            None => return Err(IntError::Syntax),
        };
        if range_error {
            continue;
        }
        match value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(digit))
        {
            Some(next) => value = next,
            None => range_error = true,
        }
    }
    if range_error {
        Err(IntError::Range)
    } else {
        Ok(value)
    }
}

/// Underscores may only separate digits, or follow a base prefix.
fn underscores_ok(text: &str) -> bool {
    if !text.contains('_') {
        return true;
    }
    let bytes = text.strip_prefix(['+', '-']).unwrap_or(text).as_bytes();

    #[derive(PartialEq)]
    enum Saw {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let mut saw = Saw::Start;
    let mut index = 0;
    let mut hex = false;
    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'b' | b'o' | b'x')
    {
        index = 2;
        saw = Saw::Digit;
        hex = bytes[1].to_ascii_lowercase() == b'x';
    }
    for &byte in &bytes[index..] {
        if byte.is_ascii_digit() || (hex && byte.is_ascii_hexdigit()) {
            saw = Saw::Digit;
            continue;
        }
        if byte == b'_' {
            if saw != Saw::Digit {
                return false;
            }
            saw = Saw::Underscore;
            continue;
        }
        if saw == Saw::Underscore {
            return false;
        }
        saw = Saw::Other;
    }
    saw != Saw::Underscore
}
