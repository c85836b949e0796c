//! # toon
//!
//! An encoder and decoder for TOON (Token-Oriented Object Notation) v3.0.
//!
//! ## What is TOON?
//!
//! TOON is a compact, line-oriented data format designed for efficient
//! communication with Large Language Models. It keeps the JSON data model but
//! drops most of the syntax: objects become indented `key: value` lines,
//! arrays announce their length once in a `[N]` header, and arrays of
//! uniform objects collapse into a single field list plus one row per
//! object.
//!
//! ## Key Features
//!
//! - **Tabular arrays**: homogeneous object arrays serialize as compact
//!   tables with a shared header
//! - **Canonical output**: numbers carry no exponents, no leading zeros, no
//!   trailing fractional zeros; strings are quoted only when they must be
//! - **Tight round trip**: `decode(encode(v))` equals `v`, and re-encoding a
//!   decoded document reproduces it byte for byte
//! - **Strict validation**: declared lengths, row widths, indentation, and
//!   blank lines are all checked (and all checks can be relaxed)
//! - **Serde compatible**: works with `#[derive(Serialize, Deserialize)]`
//!   through [`to_string`] and [`from_str`]
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! toon = "0.3"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic encoding and decoding
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Tabular arrays
//!
//! Arrays of objects sharing one primitive-valued key set serialize as
//! tables:
//!
//! ```rust
//! use serde::Serialize;
//! use toon::to_string;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//! }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string() },
//!     Product { id: 2, name: "Gadget".to_string() },
//! ];
//!
//! assert_eq!(
//!     to_string(&products).unwrap(),
//!     "[2]{id,name}:\n  1,Widget\n  2,Gadget"
//! );
//! ```
//!
//! ### Working with dynamic values
//!
//! ```rust
//! use toon::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "tags": ["rust", "toon"]
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "name: Alice\ntags[2]: rust,toon");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! ## Options
//!
//! [`EncodeOptions`] selects the indent width, the delimiter (comma, tab, or
//! pipe), and safe key folding. [`DecodeOptions`] selects the indent width,
//! strictness, safe path expansion, and the nesting bound. See the
//! [`options`] module for details.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All indexing is bounds-checked
//! - Errors are reported through `Result`; decoding failures carry the
//!   offending line number

pub mod de;
pub mod error;
pub mod map;
mod macros;
pub mod options;
pub mod ser;
pub mod value;

mod decode;
mod encode;
mod escape;
mod form;
mod number;
mod paths;
mod quote;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::Map;
pub use options::{DecodeOptions, Delimiter, EncodeOptions, KeyFolding, PathExpansion};
pub use ser::ValueSerializer;
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encodes a value as a TOON document with default options.
///
/// # Examples
///
/// ```rust
/// use toon::{encode, toon};
///
/// let value = toon!({ "tags": ["a", "b", "c"] });
/// assert_eq!(encode(&value).unwrap(), "tags[3]: a,b,c");
/// ```
///
/// # Errors
///
/// Encoding itself cannot fail for any `Value` tree; the `Result` return
/// keeps the signature stable alongside [`decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, EncodeOptions::default())
}

/// Encodes a value as a TOON document with custom options.
///
/// # Examples
///
/// ```rust
/// use toon::{encode_with_options, toon, Delimiter, EncodeOptions};
///
/// let value = toon!({ "tags": ["a", "b"] });
/// let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
/// assert_eq!(encode_with_options(&value, options).unwrap(), "tags[2\t]: a\tb");
/// ```
///
/// # Errors
///
/// See [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: EncodeOptions) -> Result<String> {
    Ok(encode::render(value, &options))
}

/// Decodes a TOON document into a [`Value`] with default options (strict).
///
/// # Examples
///
/// ```rust
/// use toon::{decode, Value};
///
/// let value = decode("n: 05").unwrap();
/// // Leading zeros disqualify a number; the token stays a string.
/// assert_eq!(
///     value.as_object().unwrap().get("n"),
///     Some(&Value::Str("05".to_string()))
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the input is not well-formed TOON, with the failing
/// line number attached.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(input: &str) -> Result<Value> {
    decode_with_options(input, DecodeOptions::default())
}

/// Decodes a TOON document into a [`Value`] with custom options.
///
/// # Examples
///
/// ```rust
/// use toon::{decode_with_options, DecodeOptions};
///
/// // Lenient decoding accepts a row count that disagrees with the header.
/// let options = DecodeOptions::new().with_strict(false);
/// let value = decode_with_options("tags[3]: a,b", options).unwrap();
/// assert_eq!(
///     value.as_object().unwrap().get("tags").unwrap().as_array().unwrap().len(),
///     2
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the input violates the format, or (in strict mode)
/// any length, width, indentation, or blank-line rule.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(input: &str, options: DecodeOptions) -> Result<Value> {
    decode::parse(input, &options)
}

/// Serializes any `T: Serialize` to a TOON string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g. a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = ser::to_value(value)?;
    encode_with_options(&value, options)
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_object().unwrap().get("y"), Some(&Value::Int(2)));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

/// Serializes any `T: Serialize` to a writer in TOON format.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a writer in TOON format with custom
/// options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::Message(e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from a string of TOON text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be
/// deserialized into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(s)?)
}

/// Deserializes an instance of type `T` from TOON bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or
/// cannot be deserialized into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::InvalidInput(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of type `T` from an I/O stream of TOON.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOON, or the
/// data cannot be deserialized into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::Message(e.to_string()))?;
    from_str(&string)
}

/// Deserializes an instance of type `T` from an already-decoded [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon::{from_value, toon};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(toon!({ "x": 1, "y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be deserialized into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    de::from_value(value)
}
