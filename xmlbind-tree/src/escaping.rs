//! XML escaping utilities.

use std::fmt::{self, Write};

/// Wraps a `fmt::Write` and escapes XML special characters as text passes
/// through.
pub struct EscapingWriter<'a> {
    inner: &'a mut dyn Write,
    attribute: bool,
}

impl<'a> EscapingWriter<'a> {
    /// Create an escaping writer for text content.
    /// Escapes: `&` `<` `>`
    pub fn text(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            attribute: false,
        }
    }

    /// Create an escaping writer for attribute values.
    /// Escapes: `&` `<` `>` `"`, and tab, newline and carriage return as
    /// character references so they survive attribute-value normalization.
    pub fn attribute(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            attribute: true,
        }
    }
}

impl Write for EscapingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut start = 0;
        for (i, c) in s.char_indices() {
            let escaped = match c {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' if self.attribute => "&quot;",
                '\n' if self.attribute => "&#10;",
                '\r' if self.attribute => "&#13;",
                '\t' if self.attribute => "&#9;",
                _ => continue,
            };
            self.inner.write_str(&s[start..i])?;
            self.inner.write_str(escaped)?;
            start = i + c.len_utf8();
        }
        self.inner.write_str(&s[start..])
    }
}

/// Write `text` as one or more CDATA sections; a `]]>` inside the text is
/// split across two sections.
pub fn write_cdata(out: &mut dyn Write, text: &str) -> fmt::Result {
    out.write_str("<![CDATA[")?;
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        out.write_str(&rest[..pos + 2])?;
        out.write_str("]]><![CDATA[")?;
        rest = &rest[pos + 2..];
    }
    out.write_str(rest)?;
    out.write_str("]]>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> String {
        let mut buf = String::new();
        EscapingWriter::text(&mut buf).write_str(s).unwrap();
        buf
    }

    fn attribute(s: &str) -> String {
        let mut buf = String::new();
        EscapingWriter::attribute(&mut buf).write_str(s).unwrap();
        buf
    }

    #[test]
    fn text_escapes_markup() {
        assert_eq!(text("a & b < c > d"), "a &amp; b &lt; c &gt; d");
    }

    #[test]
    fn text_does_not_escape_quotes_or_whitespace() {
        assert_eq!(text("a \"quoted\"\n\tb"), "a \"quoted\"\n\tb");
    }

    #[test]
    fn attribute_escapes_quotes_and_whitespace() {
        assert_eq!(
            attribute("<a & \"b\">\n\r\t"),
            "&lt;a &amp; &quot;b&quot;&gt;&#10;&#13;&#9;"
        );
    }

    #[test]
    fn passthrough_normal_chars() {
        assert_eq!(attribute("héllo wörld 123"), "héllo wörld 123");
    }

    #[test]
    fn multiple_writes() {
        let mut buf = String::new();
        let mut writer = EscapingWriter::attribute(&mut buf);
        writer.write_str("a < ").unwrap();
        writer.write_str("b & ").unwrap();
        writer.write_str("c").unwrap();
        assert_eq!(buf, "a &lt; b &amp; c");
    }

    #[test]
    fn cdata_splits_terminator() {
        let mut buf = String::new();
        write_cdata(&mut buf, "x]]>y").unwrap();
        assert_eq!(buf, "<![CDATA[x]]]]><![CDATA[>y]]>");
    }
}
