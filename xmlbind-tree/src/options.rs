//! Parser and serializer configuration.

/// How tolerant the parser is, and what it reports.
///
/// The parser never touches the network and never loads external DTDs or
/// entities, whatever the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recover from malformed input instead of failing: unclosed elements are
    /// closed at end of input, mismatched end tags are accepted, extra root
    /// elements are dropped and unknown entities are kept literally.
    pub recover: bool,
    /// Do not log the structural errors the parser recovered from.
    pub suppress_errors: bool,
    /// Do not log recovery warnings.
    pub suppress_warnings: bool,
    /// Drop namespace declarations that repeat a binding already in scope.
    pub ns_clean: bool,
}

impl ParseOptions {
    /// Reject anything that is not well-formed.
    pub const STRICT: Self = Self {
        recover: false,
        suppress_errors: false,
        suppress_warnings: false,
        ns_clean: false,
    };

    /// Recover silently. The default for decoding.
    pub const LENIENT: Self = Self {
        recover: true,
        suppress_errors: true,
        suppress_warnings: true,
        ns_clean: false,
    };

    /// [`ParseOptions::LENIENT`] plus namespace cleanup. Used for the cleanup
    /// pass after encoding.
    pub const NS_CLEAN: Self = Self {
        ns_clean: true,
        ..Self::LENIENT
    };

    /// Set [`ParseOptions::recover`].
    pub const fn recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Set [`ParseOptions::suppress_errors`].
    pub const fn suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    /// Set [`ParseOptions::suppress_warnings`].
    pub const fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.suppress_warnings = suppress;
        self
    }

    /// Set [`ParseOptions::ns_clean`].
    pub const fn ns_clean(mut self, clean: bool) -> Self {
        self.ns_clean = clean;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::LENIENT
    }
}

/// Options for XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root.
    pub declaration: bool,
    /// Put child elements on their own indented lines.
    pub pretty: bool,
    /// Indentation string for pretty printing.
    pub indent: &'static str,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            pretty: false,
            indent: "  ",
        }
    }
}

impl SerializeOptions {
    /// Create new default options (compact, with declaration).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty-printing.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set a custom indentation string (implies pretty-printing).
    pub fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self.pretty = true;
        self
    }

    /// Enable or disable the XML declaration.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub(crate) fn indent_str(&self) -> Option<&'static str> {
        self.pretty.then_some(self.indent)
    }
}
