//! TOON decoding.
//!
//! Decoding runs in two phases. Pre-tokenization splits the input on `\n`
//! and computes, per line, the indentation depth and the right-trimmed
//! content, rejecting tab indentation and off-grid indents in strict mode.
//! The second phase descends the line stream recursively: objects consume
//! `key: value` lines at their depth, array headers announce how many rows,
//! inline values, or list items follow, and every declared length is checked
//! against what actually arrived.
//!
//! ## Usage
//!
//! Most users should use [`crate::decode`] or [`crate::decode_with_options`]:
//!
//! ```rust
//! use toon::{decode, Value};
//!
//! let value = decode("users[2]{id,name}:\n  1,Alice\n  2,Bob").unwrap();
//! let users = value.as_object().unwrap().get("users").unwrap();
//! assert_eq!(users.as_array().unwrap().len(), 2);
//! ```

use crate::options::PathExpansion;
use crate::{escape, number, paths, DecodeOptions, Delimiter, Error, Map, Result, Value};

/// Parses a TOON document into a value tree.
pub(crate) fn parse(input: &str, options: &DecodeOptions) -> Result<Value> {
    if input.starts_with('\u{feff}') {
        return Err(Error::InvalidInput(
            "byte-order mark at start of document".to_string(),
        ));
    }

    let lines = tokenize(input, options)?;
    let mut decoder = Decoder {
        lines,
        pos: 0,
        options,
    };
    let value = decoder.document()?;

    match options.expand_paths {
        PathExpansion::Safe => paths::expand_value(value, options.strict),
        PathExpansion::Off => Ok(value),
    }
}

/// One pre-tokenized line: 1-based number, indentation depth, and content
/// with surrounding whitespace removed. Blank lines carry empty content.
#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    number: usize,
    depth: usize,
    content: &'a str,
}

fn tokenize<'a>(input: &'a str, options: &DecodeOptions) -> Result<Vec<Line<'a>>> {
    let ws = |c: char| c == ' ' || c == '\t';
    let mut lines = Vec::with_capacity(input.len() / 16 + 1);

    for (index, raw) in input.split('\n').enumerate() {
        let number = index + 1;

        let raw = if let Some(stripped) = raw.strip_suffix('\r') {
            // The wire format's line terminator is a bare newline; a CR can
            // only occur inside a quoted string.
            if options.strict && !stripped.trim_matches(ws).is_empty() {
                return Err(Error::UnexpectedCharacter { line: number, ch: '\r' });
            }
            stripped
        } else {
            raw
        };

        if raw.trim_matches(ws).is_empty() {
            lines.push(Line {
                number,
                depth: 0,
                content: "",
            });
            continue;
        }

        let bytes = raw.as_bytes();
        let mut spaces = 0;
        while spaces < bytes.len() && bytes[spaces] == b' ' {
            spaces += 1;
        }

        let mut start = spaces;
        if bytes[start] == b'\t' {
            if options.strict {
                return Err(Error::TabIndentation { line: number });
            }
            // Lenient mode counts each tab as a single space.
            while start < bytes.len() && (bytes[start] == b' ' || bytes[start] == b'\t') {
                start += 1;
            }
            spaces = start;
        }

        let unit = options.indent.max(1);
        if options.strict && spaces % unit != 0 {
            return Err(Error::InvalidIndentation {
                line: number,
                found: spaces,
                unit,
            });
        }

        lines.push(Line {
            number,
            depth: spaces / unit,
            content: raw[start..].trim_end_matches(ws),
        });
    }

    Ok(lines)
}

/// A parsed array header: `key? '[' len (tab|pipe)? ']' ('{' fields '}')? ':' inline?`.
struct Header<'a> {
    key: Option<String>,
    len: usize,
    delimiter: Delimiter,
    fields: Option<Vec<String>>,
    inline: Option<&'a str>,
    line: usize,
}

struct Decoder<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    options: &'a DecodeOptions,
}

impl<'a> Decoder<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(line) if line.content.is_empty()) {
            self.advance();
        }
    }

    /// The next non-blank line, without consuming anything. Returns the line
    /// together with the position just past it, so callers can take it (and
    /// the blanks before it) only once they know it belongs to them.
    fn peek_content(&self) -> Option<(usize, Line<'a>)> {
        let mut index = self.pos;
        while let Some(line) = self.lines.get(index) {
            if !line.content.is_empty() {
                return Some((index + 1, *line));
            }
            index += 1;
        }
        None
    }

    fn guard_depth(&self, rec: usize) -> Result<()> {
        if rec > self.options.max_depth {
            Err(Error::NestingError {
                limit: self.options.max_depth,
            })
        } else {
            Ok(())
        }
    }

    /// Root dispatch: empty document, root array, single primitive, or
    /// top-level object.
    fn document(&mut self) -> Result<Value> {
        self.skip_blanks();
        let first = match self.peek() {
            Some(line) => line,
            None => return Ok(Value::Object(Map::new())),
        };

        if first.depth != 0 && self.options.strict {
            return Err(Error::UnexpectedIndent { line: first.number });
        }

        if first.content.starts_with('[') {
            let header = match self.header(first.content, first.number)? {
                Some(header) => header,
                None => {
                    return Err(Error::invalid_header(first.number, "unclosed root header"))
                }
            };
            self.advance();
            let value = self.array_body(&header, first.depth + 1, 1)?;
            self.expect_end()?;
            return Ok(value);
        }

        let only_line = self.lines[self.pos + 1..]
            .iter()
            .all(|line| line.content.is_empty());
        if only_line
            && find_unquoted(first.content, ':').is_none()
            && find_unquoted(first.content, '[').is_none()
        {
            let value = self.primitive_token(first.content, first.number)?;
            self.advance();
            return Ok(value);
        }

        let base = if self.options.strict { 0 } else { first.depth };
        let mut map = Map::new();
        self.object_into(&mut map, base, 1)?;
        Ok(Value::Object(map))
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_blanks();
        match self.peek() {
            Some(line) => Err(Error::InvalidInput(format!(
                "unexpected content after root value at line {}",
                line.number
            ))),
            None => Ok(()),
        }
    }

    /// Consumes every `key: value` line at `depth` into `map`, last write
    /// winning on duplicate keys.
    fn object_into(&mut self, map: &mut Map, depth: usize, rec: usize) -> Result<()> {
        self.guard_depth(rec)?;
        loop {
            // Blank lines stay unconsumed until the following line is known
            // to belong to this object; an enclosing array body may need to
            // see them.
            let (next_pos, line) = match self.peek_content() {
                Some(found) => found,
                None => return Ok(()),
            };
            if line.depth < depth {
                return Ok(());
            }
            if line.depth > depth {
                if self.options.strict {
                    return Err(Error::UnexpectedIndent { line: line.number });
                }
                self.pos = next_pos;
                continue;
            }
            if line.content == "-" || line.content.starts_with("- ") {
                if self.options.strict {
                    return Err(Error::InvalidListItem { line: line.number });
                }
                self.pos = next_pos;
                continue;
            }
            self.pos = next_pos;
            self.entry_into(line.content, line.number, map, depth + 1, rec)?;
        }
    }

    /// Parses one `key: value` or `key[…]` line whose nested body (if any)
    /// sits at `child_depth`.
    fn entry_into(
        &mut self,
        content: &'a str,
        line: usize,
        map: &mut Map,
        child_depth: usize,
        rec: usize,
    ) -> Result<()> {
        if let Some(header) = self.header(content, line)? {
            let key = match header.key.clone() {
                Some(key) => key,
                None => return Err(Error::InvalidKey { line }),
            };
            let value = self.array_body(&header, child_depth, rec + 1)?;
            map.insert(key, value);
            return Ok(());
        }

        let (key, rest) = self.split_entry(content, line)?;
        let value = self.field_value(rest, line, child_depth, rec)?;
        map.insert(key, value);
        Ok(())
    }

    /// The value after a key's colon: an inline primitive, or a nested
    /// (possibly empty) object at `child_depth`.
    fn field_value(
        &mut self,
        rest: &'a str,
        line: usize,
        child_depth: usize,
        rec: usize,
    ) -> Result<Value> {
        if !rest.is_empty() {
            return self.primitive_token(rest, line);
        }
        let mut nested = Map::new();
        self.object_into(&mut nested, child_depth, rec + 1)?;
        Ok(Value::Object(nested))
    }

    /// Splits `key: rest` at the first unquoted colon.
    fn split_entry(&self, content: &'a str, line: usize) -> Result<(String, &'a str)> {
        if let Some(inner) = content.strip_prefix('"') {
            let close = find_closing_quote(inner)
                .ok_or(Error::UnterminatedString { line })?;
            let key = escape::unescape(&inner[..close], line)?;
            let after = inner[close + 1..].trim_start();
            let rest = after.strip_prefix(':').ok_or(Error::MissingColon { line })?;
            return Ok((key, rest.trim()));
        }

        let colon = find_unquoted(content, ':').ok_or(Error::MissingColon { line })?;
        let key = content[..colon].trim_end();
        if key.is_empty() {
            return Err(Error::InvalidKey { line });
        }
        Ok((key.to_string(), content[colon + 1..].trim()))
    }

    /// Parses an array header out of a line's content, or returns `None`
    /// when the line carries no unquoted `[` before its first unquoted `:`.
    fn header(&self, content: &'a str, line: usize) -> Result<Option<Header<'a>>> {
        let bracket = match find_unquoted(content, '[') {
            Some(index) => index,
            None => return Ok(None),
        };
        if matches!(find_unquoted(content, ':'), Some(colon) if colon < bracket) {
            return Ok(None);
        }

        let close = find_unquoted(&content[bracket..], ']')
            .map(|rel| bracket + rel)
            .ok_or_else(|| Error::invalid_header(line, "missing ']'"))?;

        let inside = &content[bracket + 1..close];
        let (digits, delimiter) = match inside.as_bytes().last().and_then(|&b| Delimiter::from_suffix(b)) {
            Some(delimiter) => (&inside[..inside.len() - 1], delimiter),
            None => (inside, Delimiter::Comma),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_header(line, "length must be decimal digits"));
        }
        let len: usize = digits.parse().map_err(|_| Error::Overflow { line })?;

        let key = {
            let key_part = content[..bracket].trim();
            if key_part.is_empty() {
                None
            } else {
                Some(self.key_token(key_part, line)?)
            }
        };

        let mut rest = &content[close + 1..];
        let mut fields = None;
        if let Some(after_brace) = rest.strip_prefix('{') {
            let close_brace = find_unquoted(after_brace, '}')
                .ok_or_else(|| Error::invalid_header(line, "missing '}'"))?;
            let raw_fields = split_delimited(&after_brace[..close_brace], delimiter.as_char(), line)?;
            if raw_fields.is_empty() {
                return Err(Error::invalid_header(line, "empty field list"));
            }
            if raw_fields.len() == 1 && !raw_fields[0].trim_start().starts_with('"') {
                for other in [',', '\t', '|'] {
                    if other != delimiter.as_char() && raw_fields[0].contains(other) {
                        return Err(Error::DelimiterMismatch { line });
                    }
                }
            }
            let mut parsed = Vec::with_capacity(raw_fields.len());
            for raw in raw_fields {
                parsed.push(self.key_token(raw.trim(), line)?);
            }
            fields = Some(parsed);
            rest = &after_brace[close_brace + 1..];
        }

        let rest = rest.trim_start();
        let rest = rest.strip_prefix(':').ok_or(Error::MissingColon { line })?;
        let inline = match rest.trim() {
            "" => None,
            trimmed => Some(trimmed),
        };

        Ok(Some(Header {
            key,
            len,
            delimiter,
            fields,
            inline,
            line,
        }))
    }

    /// A key token: quoted (unescaped) or verbatim.
    fn key_token(&self, token: &str, line: usize) -> Result<String> {
        if let Some(inner) = token.strip_prefix('"') {
            let close = find_closing_quote(inner)
                .ok_or(Error::UnterminatedString { line })?;
            if !inner[close + 1..].is_empty() {
                return Err(Error::InvalidKey { line });
            }
            return escape::unescape(&inner[..close], line);
        }
        if token.is_empty() {
            return Err(Error::InvalidKey { line });
        }
        Ok(token.to_string())
    }

    /// Decodes the body that the header announced: tabular rows, inline
    /// primitives, or list items at `body_depth`.
    fn array_body(&mut self, header: &Header<'a>, body_depth: usize, rec: usize) -> Result<Value> {
        self.guard_depth(rec)?;
        let strict = self.options.strict;

        if let Some(fields) = &header.fields {
            if let Some(inline) = header.inline {
                if strict {
                    return Err(Error::UnexpectedCharacter {
                        line: header.line,
                        ch: inline.chars().next().unwrap_or(' '),
                    });
                }
            }
            return self.tabular_rows(header, fields, body_depth);
        }

        if let Some(inline) = header.inline {
            let cells = split_delimited(inline, header.delimiter.as_char(), header.line)?;
            let mut items = Vec::with_capacity(cells.len());
            for cell in cells {
                items.push(self.primitive_token(cell.trim(), header.line)?);
            }
            if strict && items.len() != header.len {
                return Err(Error::ArrayLengthMismatch {
                    line: header.line,
                    expected: header.len,
                    found: items.len(),
                });
            }
            return Ok(Value::Array(items));
        }

        if header.len == 0 {
            return Ok(Value::Array(Vec::new()));
        }

        self.list_items(header, body_depth, rec)
    }

    fn tabular_rows(
        &mut self,
        header: &Header<'a>,
        fields: &[String],
        body_depth: usize,
    ) -> Result<Value> {
        let strict = self.options.strict;
        let delimiter = header.delimiter.as_char();
        let mut rows: Vec<Value> = Vec::new();

        loop {
            let line = match self.peek() {
                Some(line) => line,
                None => break,
            };
            if line.content.is_empty() {
                if rows.len() < header.len {
                    if strict {
                        return Err(Error::BlankLineInArray { line: line.number });
                    }
                    self.advance();
                    continue;
                }
                break;
            }
            if line.depth < body_depth {
                break;
            }
            if line.depth > body_depth {
                if strict {
                    return Err(Error::UnexpectedIndent { line: line.number });
                }
                self.advance();
                continue;
            }
            if !is_tabular_row(line.content, delimiter) {
                break;
            }
            if strict && rows.len() == header.len {
                return Err(Error::ArrayLengthMismatch {
                    line: line.number,
                    expected: header.len,
                    found: header.len + 1,
                });
            }
            self.advance();

            let cells = split_delimited(line.content, delimiter, line.number)?;
            if strict && cells.len() != fields.len() {
                return Err(Error::RowWidthMismatch {
                    line: line.number,
                    expected: fields.len(),
                    found: cells.len(),
                });
            }
            let mut row = Map::new();
            for (index, field) in fields.iter().enumerate() {
                let value = match cells.get(index) {
                    Some(cell) => self.primitive_token(cell.trim(), line.number)?,
                    None => Value::Null,
                };
                row.insert(field.clone(), value);
            }
            rows.push(Value::Object(row));
        }

        if strict && rows.len() != header.len {
            if self.peek().is_none() {
                return Err(Error::UnexpectedEndOfInput);
            }
            return Err(Error::ArrayLengthMismatch {
                line: header.line,
                expected: header.len,
                found: rows.len(),
            });
        }
        Ok(Value::Array(rows))
    }

    fn list_items(&mut self, header: &Header<'a>, body_depth: usize, rec: usize) -> Result<Value> {
        let strict = self.options.strict;
        let mut items: Vec<Value> = Vec::new();

        loop {
            let line = match self.peek() {
                Some(line) => line,
                None => break,
            };
            if line.content.is_empty() {
                if items.len() < header.len {
                    if strict {
                        return Err(Error::BlankLineInArray { line: line.number });
                    }
                    self.advance();
                    continue;
                }
                break;
            }
            if line.depth < body_depth {
                break;
            }
            if line.depth > body_depth {
                if strict {
                    return Err(Error::UnexpectedIndent { line: line.number });
                }
                self.advance();
                continue;
            }

            let item_content = if line.content == "-" {
                None
            } else if let Some(rest) = line.content.strip_prefix("- ") {
                Some(rest)
            } else if line.content.starts_with('-') {
                if strict {
                    return Err(Error::InvalidListItem { line: line.number });
                }
                Some(line.content[1..].trim_start())
            } else {
                break;
            };

            if strict && items.len() == header.len {
                return Err(Error::ArrayLengthMismatch {
                    line: line.number,
                    expected: header.len,
                    found: header.len + 1,
                });
            }
            self.advance();

            match item_content {
                None => items.push(Value::Object(Map::new())),
                Some(content) => {
                    let value = self.list_item(content.trim(), line.number, body_depth, rec)?;
                    items.push(value);
                }
            }
        }

        if strict && items.len() != header.len {
            if self.peek().is_none() {
                return Err(Error::UnexpectedEndOfInput);
            }
            return Err(Error::ArrayLengthMismatch {
                line: header.line,
                expected: header.len,
                found: items.len(),
            });
        }
        Ok(Value::Array(items))
    }

    /// The content after a `- ` marker: a nested array, an object whose
    /// first field shares the hyphen line, or a primitive.
    fn list_item(
        &mut self,
        content: &'a str,
        line: usize,
        item_depth: usize,
        rec: usize,
    ) -> Result<Value> {
        if let Some(header) = self.header(content, line)? {
            return match header.key.clone() {
                // A direct array element: `- [3]: 1,2,3`.
                None => self.array_body(&header, item_depth + 1, rec + 1),
                // First field of an object: its body sits one level below
                // the remaining fields.
                Some(key) => {
                    let mut map = Map::new();
                    let value = self.array_body(&header, item_depth + 2, rec + 1)?;
                    map.insert(key, value);
                    self.object_into(&mut map, item_depth + 1, rec + 1)?;
                    Ok(Value::Object(map))
                }
            };
        }

        if has_unquoted_colon(content) {
            let mut map = Map::new();
            let (key, rest) = self.split_entry(content, line)?;
            let value = self.field_value(rest, line, item_depth + 2, rec + 1)?;
            map.insert(key, value);
            self.object_into(&mut map, item_depth + 1, rec + 1)?;
            return Ok(Value::Object(map));
        }

        self.primitive_token(content, line)
    }

    /// A single primitive token: quoted string, literal, number, or
    /// verbatim string.
    fn primitive_token(&self, token: &'a str, line: usize) -> Result<Value> {
        let token = token.trim();
        if let Some(inner) = token.strip_prefix('"') {
            let close = find_closing_quote(inner)
                .ok_or(Error::UnterminatedString { line })?;
            let after = &inner[close + 1..];
            if !after.is_empty() && self.options.strict {
                return Err(Error::UnexpectedCharacter {
                    line,
                    ch: after.chars().next().unwrap_or(' '),
                });
            }
            return escape::unescape(&inner[..close], line).map(Value::Str);
        }
        match token {
            "null" => Ok(Value::Null),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Ok(number::parse_token(token)
                .unwrap_or_else(|| Value::Str(token.to_string()))),
        }
    }
}

/// Index of the first occurrence of `target` outside double quotes.
/// Inside quotes, `"` toggles and `\` escapes the following character.
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut iter = s.char_indices();
    while let Some((index, ch)) = iter.next() {
        if in_quotes {
            match ch {
                '\\' => {
                    iter.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == target {
            return Some(index);
        }
    }
    None
}

fn has_unquoted_colon(s: &str) -> bool {
    find_unquoted(s, ':').is_some()
}

/// Index of the unescaped closing quote in a string that starts just after
/// an opening quote.
fn find_closing_quote(s: &str) -> Option<usize> {
    let mut iter = s.char_indices();
    while let Some((index, ch)) = iter.next() {
        match ch {
            '\\' => {
                iter.next();
            }
            '"' => return Some(index),
            _ => {}
        }
    }
    None
}

/// Splits on the delimiter, honoring quoted regions. An unclosed quote is an
/// unterminated string.
fn split_delimited<'s>(s: &'s str, delimiter: char, line: usize) -> Result<Vec<&'s str>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut iter = s.char_indices();
    while let Some((index, ch)) = iter.next() {
        if in_quotes {
            match ch {
                '\\' => {
                    iter.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            parts.push(&s[start..index]);
            start = index + delimiter.len_utf8();
        }
    }
    if in_quotes {
        return Err(Error::UnterminatedString { line });
    }
    parts.push(&s[start..]);
    Ok(parts)
}

/// The tabular-row disambiguation: at the expected row depth, a line is a
/// row iff it has no unquoted colon, or an unquoted delimiter appears before
/// the first unquoted colon.
fn is_tabular_row(s: &str, delimiter: char) -> bool {
    let mut in_quotes = false;
    let mut iter = s.chars();
    while let Some(ch) = iter.next() {
        if in_quotes {
            match ch {
                '\\' => {
                    iter.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            return true;
        } else if ch == ':' {
            return false;
        }
    }
    true
}
