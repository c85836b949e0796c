//! Dotted-key path expansion and its encoder-side inverse, key folding.
//!
//! Expansion runs after decoding when [`PathExpansion::Safe`] is selected: an
//! object key like `user.name` whose dot-separated segments are all
//! identifiers is exploded into nested objects. Folding runs before encoding
//! when [`KeyFolding::Safe`] is selected and collapses single-key object
//! chains back into one dotted key, so the two options invert each other.
//!
//! [`PathExpansion::Safe`]: crate::PathExpansion::Safe
//! [`KeyFolding::Safe`]: crate::KeyFolding::Safe

use crate::{Error, Map, Result, Value};

/// A path segment usable in expansion and folding: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier_segment(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Splits a key on `.` when every segment qualifies for expansion.
fn expansion_segments(key: &str) -> Option<Vec<&str>> {
    if !key.contains('.') {
        return None;
    }
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().all(|seg| is_identifier_segment(seg)) {
        Some(segments)
    } else {
        None
    }
}

/// Recursively expands dotted keys throughout a decoded value.
pub(crate) fn expand_value(value: Value, strict: bool) -> Result<Value> {
    match value {
        Value::Array(items) => {
            let mut expanded = Vec::with_capacity(items.len());
            for item in items {
                expanded.push(expand_value(item, strict)?);
            }
            Ok(Value::Array(expanded))
        }
        Value::Object(obj) => {
            let mut out = Map::new();
            for (key, val) in obj {
                let val = expand_value(val, strict)?;
                match expansion_segments(&key) {
                    Some(segments) => insert_path(&mut out, &segments, val, strict, &key)?,
                    None => out.merge(key, val, strict)?,
                }
            }
            Ok(Value::Object(out))
        }
        other => Ok(other),
    }
}

/// Descends the segment chain, creating objects as needed, and merges the
/// value at the leaf.
fn insert_path(
    map: &mut Map,
    segments: &[&str],
    value: Value,
    strict: bool,
    full_key: &str,
) -> Result<()> {
    let (first, rest) = match segments.split_first() {
        Some(parts) => parts,
        None => return Ok(()),
    };
    if rest.is_empty() {
        return map.merge((*first).to_string(), value, strict);
    }

    match map.get(first) {
        None => {
            map.insert((*first).to_string(), Value::Object(Map::new()));
        }
        Some(Value::Object(_)) => {}
        Some(_) => {
            // An existing non-object blocks the descent.
            if strict {
                return Err(Error::ExpansionConflict {
                    key: full_key.to_string(),
                });
            }
            map.insert((*first).to_string(), Value::Object(Map::new()));
        }
    }

    match map.get_mut(first) {
        Some(Value::Object(inner)) => insert_path(inner, rest, value, strict, full_key),
        _ => Err(Error::ExpansionConflict {
            key: full_key.to_string(),
        }),
    }
}

/// Recursively folds single-key object chains into dotted keys.
///
/// A chain folds only when every key along it is an identifier segment, the
/// folded key stays within `flatten_depth` segments, and it collides with no
/// sibling (original or already folded). Anything else is left as-is.
pub(crate) fn fold_value(value: &Value, flatten_depth: usize) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| fold_value(item, flatten_depth))
                .collect(),
        ),
        Value::Object(obj) => {
            let mut out = Map::new();
            for (key, val) in obj.iter() {
                let (folded_key, leaf) = fold_chain(key, val, flatten_depth);
                if folded_key != *key
                    && (obj.contains_key(&folded_key) || out.contains_key(&folded_key))
                {
                    out.insert(key.clone(), fold_value(val, flatten_depth));
                } else {
                    out.insert(folded_key, fold_value(leaf, flatten_depth));
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Follows single-key object links from `key`, returning the dotted key and
/// the value the chain ends at.
fn fold_chain<'a>(key: &str, value: &'a Value, flatten_depth: usize) -> (String, &'a Value) {
    if !is_identifier_segment(key) {
        return (key.to_string(), value);
    }
    let mut folded = key.to_string();
    let mut segments = 1;
    let mut leaf = value;
    while segments < flatten_depth {
        let inner = match leaf {
            Value::Object(obj) if obj.len() == 1 => obj.iter().next(),
            _ => None,
        };
        match inner {
            Some((k, v)) if is_identifier_segment(k) => {
                folded.push('.');
                folded.push_str(k);
                segments += 1;
                leaf = v;
            }
            _ => break,
        }
    }
    (folded, leaf)
}
