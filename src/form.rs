//! Array form detection.
//!
//! A non-empty array renders in one of four shapes, decided by a single pass
//! over its elements. The tabular form is the one worth working for: an array
//! of objects sharing one primitive-valued key set collapses into a header
//! plus one row per object.

use crate::Value;

/// How an array body is rendered.
#[derive(Debug, PartialEq)]
pub(crate) enum ArrayForm<'a> {
    /// Every element is a primitive; values go inline on the header line.
    Inline,
    /// Every element is an object with the same key set and only primitive
    /// values. Column order is the first object's insertion order.
    Tabular(Vec<&'a str>),
    /// Every element is an array of primitives; one `- [M]:` line each.
    NestedArrays,
    /// Anything else; one expanded list item per element.
    Expanded,
}

/// Whether a value renders as a single token.
pub(crate) fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
    )
}

/// Classifies a non-empty array.
pub(crate) fn detect(items: &[Value]) -> ArrayForm<'_> {
    if items.iter().all(is_primitive) {
        return ArrayForm::Inline;
    }

    if items
        .iter()
        .all(|item| matches!(item, Value::Array(inner) if inner.iter().all(is_primitive)))
    {
        return ArrayForm::NestedArrays;
    }

    if let Some(fields) = tabular_fields(items) {
        return ArrayForm::Tabular(fields);
    }

    ArrayForm::Expanded
}

/// Returns the column names when every element is an object with the first
/// object's exact key set and primitive values throughout.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = match items.first() {
        Some(Value::Object(obj)) if !obj.is_empty() => obj,
        _ => return None,
    };
    let fields: Vec<&str> = first.iter().map(|(key, _)| key.as_str()).collect();

    for item in items {
        let obj = match item {
            Value::Object(obj) => obj,
            _ => return None,
        };
        if obj.len() != fields.len() {
            return None;
        }
        for field in &fields {
            match obj.get(field) {
                Some(value) if is_primitive(value) => {}
                _ => return None,
            }
        }
    }
    Some(fields)
}
