//! Encode and decode configuration.

use xmlbind_tree::{ParseOptions, SerializeOptions};

/// Default nesting ceiling for both directions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// How the finished tree is written out.
    pub serialize: SerializeOptions,
    /// The namespace cleanup pass run on the built tree. Only
    /// [`ParseOptions::ns_clean`] matters: the tree is well-formed by
    /// construction, so there is nothing to recover from.
    pub cleanup: ParseOptions,
    /// Maximum nesting depth of the value being encoded.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            serialize: SerializeOptions::default(),
            cleanup: ParseOptions::NS_CLEAN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Create new default options (compact output, namespace cleanup on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty-printing with default indentation.
    pub fn pretty(mut self) -> Self {
        self.serialize = self.serialize.pretty();
        self
    }

    /// Replace the serializer options.
    pub fn serialize(mut self, serialize: SerializeOptions) -> Self {
        self.serialize = serialize;
        self
    }

    /// Replace the cleanup pass options.
    pub fn cleanup(mut self, cleanup: ParseOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set the nesting ceiling.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// How the input is parsed. Lenient by default.
    pub parse: ParseOptions,
    /// Maximum element nesting the decoder descends into.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Lenient parsing, default depth ceiling.
    pub const fn new() -> Self {
        Self {
            parse: ParseOptions::LENIENT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the parser options.
    pub const fn parse(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Reject malformed input instead of recovering.
    pub const fn strict(self) -> Self {
        self.parse(ParseOptions::STRICT)
    }

    /// Set the nesting ceiling.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
