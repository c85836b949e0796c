//! Configuration options for TOON encoding and decoding.
//!
//! This module provides the option types consumed by [`crate::encode_with_options`]
//! and [`crate::decode_with_options`]:
//!
//! - [`EncodeOptions`]: indentation, delimiter, key folding
//! - [`DecodeOptions`]: indentation, strictness, path expansion, depth bound
//! - [`Delimiter`]: the inline separator (comma, tab, or pipe)
//!
//! ## Examples
//!
//! ```rust
//! use toon::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let value = toon!({ "tags": ["a", "b"] });
//!
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! let text = encode_with_options(&value, options).unwrap();
//! assert_eq!(text, "tags[2|]: a|b");
//! ```

/// Delimiter used between inline array values, tabular fields, and row cells.
///
/// The delimiter is announced on the wire: tab and pipe append their byte to
/// the array length inside the header brackets (`[3\t]`, `[3|]`), while the
/// default comma leaves the header bare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The separator byte itself.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The suffix written after the length inside `[N…]` headers.
    ///
    /// Comma is the implicit default and contributes nothing.
    #[must_use]
    pub const fn header_suffix(self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Maps a header suffix byte back to its delimiter.
    #[must_use]
    pub(crate) const fn from_suffix(byte: u8) -> Option<Self> {
        match byte {
            b'\t' => Some(Delimiter::Tab),
            b'|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Dotted-key folding applied while encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyFolding {
    /// No folding; every object level emits its own line.
    #[default]
    Off,
    /// Fold single-key object chains into one dotted key when every segment
    /// is an identifier and the folded key collides with no sibling.
    Safe,
}

/// Dotted-key expansion applied after decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PathExpansion {
    /// Keys are taken literally.
    #[default]
    Off,
    /// Keys whose dot-separated segments are all identifiers are exploded
    /// into nested objects.
    Safe,
}

/// Configuration for [`crate::encode_with_options`].
///
/// # Examples
///
/// ```rust
/// use toon::{Delimiter, EncodeOptions, KeyFolding};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_key_folding(KeyFolding::Safe);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Spaces per indentation level (default 2).
    pub indent: usize,
    /// Inline separator (default comma).
    pub delimiter: Delimiter,
    /// Dotted-key folding mode (default off).
    pub key_folding: KeyFolding,
    /// Maximum number of segments in a folded key (default unbounded).
    pub flatten_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            key_folding: KeyFolding::default(),
            flatten_depth: usize::MAX,
        }
    }
}

impl EncodeOptions {
    /// Creates the default options (2-space indent, comma delimiter, no
    /// folding).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the inline delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the key-folding mode.
    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    /// Caps the number of segments a folded key may contain.
    #[must_use]
    pub fn with_flatten_depth(mut self, flatten_depth: usize) -> Self {
        self.flatten_depth = flatten_depth;
        self
    }
}

/// Configuration for [`crate::decode_with_options`].
///
/// # Examples
///
/// ```rust
/// use toon::{decode_with_options, DecodeOptions, PathExpansion};
///
/// let options = DecodeOptions::new()
///     .with_strict(false)
///     .with_expand_paths(PathExpansion::Safe);
/// let value = decode_with_options("user.name: Alice", options).unwrap();
/// assert!(value.as_object().unwrap().get("user").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Spaces per indentation level (default 2).
    pub indent: usize,
    /// Enables every length, width, indentation, and blank-line check
    /// (default true).
    pub strict: bool,
    /// Post-decode dotted-key expansion (default off).
    pub expand_paths: PathExpansion,
    /// Upper bound on nesting depth (default 128).
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent: 2,
            strict: true,
            expand_paths: PathExpansion::default(),
            max_depth: 128,
        }
    }
}

impl DecodeOptions {
    /// Creates the default options (2-space indent, strict, no expansion).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Enables or disables strict mode.
    ///
    /// With `strict` off, shape errors degrade to best effort: unexpected
    /// lines are skipped, short rows are padded with `null`, and declared
    /// lengths yield to the actual element count.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the path-expansion mode.
    #[must_use]
    pub fn with_expand_paths(mut self, expand_paths: PathExpansion) -> Self {
        self.expand_paths = expand_paths;
        self
    }

    /// Sets the nesting depth bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }
}
