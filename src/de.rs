//! Value-to-serde bridging.
//!
//! This module provides [`ValueDeserializer`], a `serde::Deserializer` driven
//! by a decoded [`Value`] tree. It is the back half of the high-level
//! [`crate::from_str`] pipeline: the decoder produces a `Value`, and this
//! deserializer feeds it into any `T: Deserialize`.
//!
//! Sequences and maps ride serde's own [`de::value`] adapters; because
//! `Value` implements [`IntoDeserializer`], an iterator of values (or of
//! `(String, Value)` pairs) is already a complete seq or map access. Only
//! the externally-tagged enum shape needs hand-written access types.
//!
//! ## Usage
//!
//! Most users should use [`crate::from_str`] or [`crate::from_value`]:
//!
//! ```rust
//! use serde::Deserialize;
//! use toon::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("x: 1\ny: 2").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

use crate::{Error, Result, Value};
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializes a `T` out of an already-decoded [`Value`].
pub(crate) fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// A deserializer over an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    /// Wraps a value for deserialization.
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

/// The one way this module reports a shape that does not fit the target
/// type.
fn unexpected(expected: &'static str, found: &Value) -> Error {
    Error::Message(format!("expected {expected}, found {found:?}"))
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Str(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr.into_iter())),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj.into_iter())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Str(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) => {
                let mut entries = obj.into_iter();
                let (variant, payload) = match entries.next() {
                    Some(entry) => entry,
                    None => {
                        return Err(Error::Message(
                            "expected enum variant, found empty object".to_string(),
                        ))
                    }
                };
                if entries.next().is_some() {
                    return Err(Error::Message(
                        "expected a single-key object for an enum variant".to_string(),
                    ));
                }
                visitor.visit_enum(VariantAccess {
                    variant,
                    payload: Some(payload),
                })
            }
            other => Err(unexpected("enum", &other)),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

/// Externally-tagged enum access: the single key names the variant, its
/// value is the payload.
struct VariantAccess {
    variant: String,
    payload: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for VariantAccess {
    type Error = Error;
    type Variant = PayloadAccess;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, PayloadAccess)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let tag = seed.deserialize(self.variant.into_deserializer())?;
        Ok((
            tag,
            PayloadAccess {
                payload: self.payload,
            },
        ))
    }
}

struct PayloadAccess {
    payload: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for PayloadAccess {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.payload {
            None | Some(Value::Null) => Ok(()),
            Some(other) => Err(unexpected("unit variant", &other)),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.payload {
            Some(value) => seed.deserialize(value.into_deserializer()),
            None => Err(unexpected("newtype variant payload", &Value::Null)),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.payload {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr.into_iter())),
            Some(other) => Err(unexpected("tuple variant payload", &other)),
            None => Err(unexpected("tuple variant payload", &Value::Null)),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.payload {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj.into_iter())),
            Some(other) => Err(unexpected("struct variant payload", &other)),
            None => Err(unexpected("struct variant payload", &Value::Null)),
        }
    }
}
