//! TOON encoding.
//!
//! The encoder walks a [`Value`] tree and emits indented lines. Objects put
//! one `key: value` pair per line; arrays announce their length in a `[N]`
//! header and then pick the tightest body their elements allow: inline
//! values, a tabular field list with one row per object, or expanded `- `
//! list items. The output never carries a trailing newline and never puts a
//! blank line inside an array body.
//!
//! ## Usage
//!
//! Most users should use [`crate::encode`] or [`crate::encode_with_options`]:
//!
//! ```rust
//! use toon::{encode, toon};
//!
//! let value = toon!({
//!     "users": [
//!         { "id": 1, "name": "Alice" },
//!         { "id": 2, "name": "Bob" }
//!     ]
//! });
//! assert_eq!(encode(&value).unwrap(), "users[2]{id,name}:\n  1,Alice\n  2,Bob");
//! ```

use crate::form::{self, ArrayForm};
use crate::{number, paths, quote, EncodeOptions, KeyFolding, Map, Value};

/// Renders a value as a TOON document.
pub(crate) fn render(value: &Value, options: &EncodeOptions) -> String {
    let folded;
    let value = if options.key_folding == KeyFolding::Safe {
        folded = paths::fold_value(value, options.flatten_depth);
        &folded
    } else {
        value
    };

    let mut encoder = Encoder {
        out: String::with_capacity(256),
        options,
    };
    encoder.document(value);
    encoder.out
}

struct Encoder<'a> {
    out: String,
    options: &'a EncodeOptions,
}

impl Encoder<'_> {
    fn document(&mut self, value: &Value) {
        match value {
            Value::Object(obj) => {
                // A root empty object is the empty document.
                if !obj.is_empty() {
                    self.object(obj, 0);
                }
            }
            Value::Array(items) => self.array(items, 0),
            primitive => self.primitive(primitive),
        }
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth * self.options.indent {
            self.out.push(' ');
        }
    }

    fn primitive(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Int(int) => self.out.push_str(&number::format_int(*int)),
            Value::Float(float) => self.out.push_str(&number::format_float(*float)),
            Value::Str(s) => quote::write_string(&mut self.out, s, self.options.delimiter),
            Value::Array(_) | Value::Object(_) => {
                unreachable!("aggregate value in primitive position")
            }
        }
    }

    fn object(&mut self, obj: &Map, depth: usize) {
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.indent(depth);
            self.entry(key, value, depth);
        }
    }

    /// One `key: value` pair, indentation already written. Nested bodies
    /// land at `depth + 1`.
    fn entry(&mut self, key: &str, value: &Value, depth: usize) {
        quote::write_key(&mut self.out, key);
        match value {
            Value::Array(items) => self.array(items, depth),
            Value::Object(obj) if obj.is_empty() => self.out.push(':'),
            Value::Object(obj) => {
                self.out.push_str(":\n");
                self.object(obj, depth + 1);
            }
            primitive => {
                self.out.push_str(": ");
                self.primitive(primitive);
            }
        }
    }

    /// Array header plus form-dependent body. The header attaches to
    /// whatever was written before it (a key, a `- `, or nothing at root);
    /// rows and items land at `depth + 1`.
    fn array(&mut self, items: &[Value], depth: usize) {
        let delimiter = self.options.delimiter;
        self.out.push('[');
        self.out.push_str(&items.len().to_string());
        self.out.push_str(delimiter.header_suffix());
        self.out.push(']');

        if items.is_empty() {
            self.out.push(':');
            return;
        }

        match form::detect(items) {
            ArrayForm::Inline => {
                self.out.push_str(": ");
                self.inline_values(items);
            }
            ArrayForm::Tabular(fields) => {
                self.out.push('{');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push(delimiter.as_char());
                    }
                    quote::write_key(&mut self.out, field);
                }
                self.out.push_str("}:");
                for item in items {
                    self.out.push('\n');
                    self.indent(depth + 1);
                    if let Value::Object(obj) = item {
                        self.row(obj, &fields);
                    }
                }
            }
            ArrayForm::NestedArrays | ArrayForm::Expanded => {
                self.out.push(':');
                for item in items {
                    self.out.push('\n');
                    self.list_item(item, depth + 1);
                }
            }
        }
    }

    fn row(&mut self, obj: &Map, fields: &[&str]) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push(self.options.delimiter.as_char());
            }
            match obj.get(field) {
                Some(value) => self.primitive(value),
                None => self.out.push_str("null"),
            }
        }
    }

    fn inline_values(&mut self, items: &[Value]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(self.options.delimiter.as_char());
            }
            self.primitive(item);
        }
    }

    /// One `- ` list item. A non-empty object puts its first field on the
    /// hyphen line (nested bodies of that field one level deeper than the
    /// remaining fields); an empty object is the bare hyphen.
    fn list_item(&mut self, item: &Value, item_depth: usize) {
        self.indent(item_depth);
        match item {
            Value::Object(obj) if obj.is_empty() => self.out.push('-'),
            Value::Object(obj) => {
                self.out.push_str("- ");
                let mut entries = obj.iter();
                if let Some((first_key, first_value)) = entries.next() {
                    self.entry(first_key, first_value, item_depth + 1);
                }
                for (key, value) in entries {
                    self.out.push('\n');
                    self.indent(item_depth + 1);
                    self.entry(key, value, item_depth + 1);
                }
            }
            Value::Array(inner) => {
                self.out.push_str("- ");
                self.array(inner, item_depth);
            }
            primitive => {
                self.out.push_str("- ");
                self.primitive(primitive);
            }
        }
    }
}
