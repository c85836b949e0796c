use toon::{
    decode, decode_with_options, encode, encode_with_options, toon, DecodeOptions, Delimiter,
    EncodeOptions, Error, KeyFolding, PathExpansion, Value,
};

#[test]
fn test_flat_object() {
    let value = toon!({ "name": "Alice", "age": 30 });
    assert_eq!(encode(&value).unwrap(), "name: Alice\nage: 30");
}

#[test]
fn test_tabular_array() {
    let value = toon!({
        "users": [
            { "id": 1, "name": "Alice" },
            { "id": 2, "name": "Bob" }
        ]
    });
    assert_eq!(
        encode(&value).unwrap(),
        "users[2]{id,name}:\n  1,Alice\n  2,Bob"
    );
}

#[test]
fn test_inline_array() {
    let value = toon!({ "tags": ["a", "b", "c"] });
    assert_eq!(encode(&value).unwrap(), "tags[3]: a,b,c");
}

#[test]
fn test_array_of_arrays() {
    let value = toon!({ "matrix": [[1, 2, 3], [4, 5, 6]] });
    assert_eq!(
        encode(&value).unwrap(),
        "matrix[2]:\n  - [3]: 1,2,3\n  - [3]: 4,5,6"
    );
}

#[test]
fn test_empty_object_is_empty_document() {
    assert_eq!(encode(&toon!({})).unwrap(), "");
    assert_eq!(decode("").unwrap(), toon!({}));
}

#[test]
fn test_literal_like_string_is_quoted() {
    let value = toon!({ "s": "true" });
    let text = encode(&value).unwrap();
    assert_eq!(text, "s: \"true\"");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_decode_empty_root_array() {
    assert_eq!(decode("[0]:").unwrap(), toon!([]));
}

#[test]
fn test_decode_leading_zero_token_is_string() {
    let value = decode("n: 05").unwrap();
    assert_eq!(value, toon!({ "n": "05" }));
}

#[test]
fn test_decode_exponent_token_becomes_int() {
    let value = decode("n: 1e3").unwrap();
    assert_eq!(
        value.as_object().unwrap().get("n"),
        Some(&Value::Int(1000))
    );
}

#[test]
fn test_tab_indentation_rejected_in_strict_mode() {
    assert!(matches!(
        decode("a:\n\tb: 1"),
        Err(Error::TabIndentation { line: 2 })
    ));
}

#[test]
fn test_mixed_array_uses_list_items() {
    let value = toon!({ "items": [1, { "name": "Alice" }, "text"] });
    let text = encode(&value).unwrap();
    assert_eq!(text, "items[3]:\n  - 1\n  - name: Alice\n  - text");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_root_primitive() {
    assert_eq!(encode(&toon!(42)).unwrap(), "42");
    assert_eq!(decode("42").unwrap(), Value::Int(42));
    assert_eq!(decode("hello world").unwrap(), Value::Str("hello world".to_string()));
    assert_eq!(decode("null").unwrap(), Value::Null);
    assert_eq!(decode("\"a:b\"").unwrap(), Value::Str("a:b".to_string()));
}

#[test]
fn test_root_array_forms() {
    assert_eq!(decode("[3]: 1,2,3").unwrap(), toon!([1, 2, 3]));
    assert_eq!(
        decode("[2]{id}:\n  1\n  2").unwrap(),
        toon!([{ "id": 1 }, { "id": 2 }])
    );
    assert_eq!(
        decode("[2]:\n  - 1\n  - x: 2").unwrap(),
        toon!([1, { "x": 2 }])
    );
}

#[test]
fn test_nested_objects_roundtrip() {
    let value = toon!({
        "user": {
            "name": "Alice",
            "address": { "city": "Oslo", "zip": "0150" }
        },
        "ok": true
    });
    let text = encode(&value).unwrap();
    assert_eq!(
        text,
        "user:\n  name: Alice\n  address:\n    city: Oslo\n    zip: \"0150\"\nok: true"
    );
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_tab_delimiter() {
    let value = toon!({ "users": [{ "id": 1, "name": "Alice" }] });
    let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
    let text = encode_with_options(&value, options).unwrap();
    assert_eq!(text, "users[1\t]{id\tname}:\n  1\tAlice");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_pipe_delimiter() {
    let value = toon!({ "tags": ["a,b", "c"] });
    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    let text = encode_with_options(&value, options).unwrap();
    // The comma is inert under the pipe delimiter and stays unquoted.
    assert_eq!(text, "tags[2|]: a,b|c");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_quoted_values_with_active_delimiter() {
    let value = toon!({ "csv": ["a,b", "c"] });
    let text = encode(&value).unwrap();
    assert_eq!(text, "csv[2]: \"a,b\",c");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_non_identifier_keys_are_quoted() {
    let value = toon!({ "user-id": 1, "2nd": "x", "a b": true });
    let text = encode(&value).unwrap();
    assert_eq!(text, "\"user-id\": 1\n\"2nd\": x\n\"a b\": true");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_escape_sequences_roundtrip() {
    let value = toon!({ "s": "line1\nline2\t\"quoted\"\\end" });
    let text = encode(&value).unwrap();
    assert_eq!(text, "s: \"line1\\nline2\\t\\\"quoted\\\"\\\\end\"");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_invalid_escape_rejected() {
    assert!(matches!(
        decode("s: \"a\\qb\""),
        Err(Error::InvalidEscape { line: 1 })
    ));
}

#[test]
fn test_unterminated_string_rejected() {
    assert!(matches!(
        decode("s: \"open"),
        Err(Error::UnterminatedString { line: 1 })
    ));
}

#[test]
fn test_array_length_mismatch() {
    assert!(matches!(
        decode("tags[3]: a,b"),
        Err(Error::ArrayLengthMismatch {
            expected: 3,
            found: 2,
            ..
        })
    ));
    assert!(matches!(
        decode("items[1]:\n  - a\n  - b"),
        Err(Error::ArrayLengthMismatch { .. })
    ));
}

#[test]
fn test_truncated_table_hits_end_of_input() {
    assert!(matches!(
        decode("users[2]{id}:\n  1"),
        Err(Error::UnexpectedEndOfInput)
    ));
}

#[test]
fn test_row_width_mismatch() {
    assert!(matches!(
        decode("users[1]{id,name}:\n  1"),
        Err(Error::RowWidthMismatch {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn test_blank_line_inside_array_rejected() {
    assert!(matches!(
        decode("items[2]:\n  - a\n\n  - b"),
        Err(Error::BlankLineInArray { line: 3 })
    ));
}

#[test]
fn test_blank_line_between_object_items_rejected() {
    assert!(matches!(
        decode("items[2]:\n  - a: 1\n\n  - a: 2"),
        Err(Error::BlankLineInArray { line: 3 })
    ));
}

#[test]
fn test_trailing_blank_lines_accepted() {
    let value = decode("[2]:\n  - a\n  - b\n\n").unwrap();
    assert_eq!(value, toon!(["a", "b"]));
}

#[test]
fn test_missing_colon() {
    assert!(matches!(
        decode("a: 1\nb"),
        Err(Error::MissingColon { line: 2 })
    ));
}

#[test]
fn test_invalid_indentation() {
    assert!(matches!(
        decode("a:\n   b: 1"),
        Err(Error::InvalidIndentation { found: 3, .. })
    ));
}

#[test]
fn test_unexpected_indent() {
    assert!(matches!(
        decode("a: 1\n    b: 2"),
        Err(Error::UnexpectedIndent { line: 2 })
    ));
}

#[test]
fn test_delimiter_mismatch_in_field_list() {
    assert!(matches!(
        decode("users[2|]{id,name}:\n  1|Alice\n  2|Bob"),
        Err(Error::DelimiterMismatch { line: 1 })
    ));
}

#[test]
fn test_overflowing_header_length() {
    assert!(matches!(
        decode("a[99999999999999999999999999]:"),
        Err(Error::Overflow { line: 1 })
    ));
}

#[test]
fn test_nesting_bound() {
    let mut text = String::new();
    for depth in 0..40 {
        for _ in 0..depth * 2 {
            text.push(' ');
        }
        text.push_str("a:\n");
    }
    let options = DecodeOptions::new().with_max_depth(16);
    assert!(matches!(
        decode_with_options(text.trim_end(), options),
        Err(Error::NestingError { limit: 16 })
    ));
}

#[test]
fn test_lenient_mode_pads_and_accepts() {
    let options = DecodeOptions::new().with_strict(false);

    // Short row padded with null.
    let value = decode_with_options("users[1]{id,name}:\n  1", options.clone()).unwrap();
    assert_eq!(value, toon!({ "users": [{ "id": 1, "name": null }] }));

    // Length disagreement accepts the actual count.
    let value = decode_with_options("tags[5]: a,b", options.clone()).unwrap();
    assert_eq!(value, toon!({ "tags": ["a", "b"] }));

    // Blank line inside an array is tolerated.
    let value = decode_with_options("items[2]:\n  - a\n\n  - b", options).unwrap();
    assert_eq!(value, toon!({ "items": ["a", "b"] }));
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let value = decode("a: 1\na: 2").unwrap();
    assert_eq!(value, toon!({ "a": 2 }));
}

#[test]
fn test_empty_array_field() {
    let value = toon!({ "tags": [] });
    let text = encode(&value).unwrap();
    assert_eq!(text, "tags[0]:");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_missing_tabular_column_emits_null() {
    // Key sets differ, so the array falls back to list items instead of a
    // table; both shapes must round-trip.
    let value = toon!({ "rows": [{ "a": 1, "b": 2 }, { "a": 3, "c": 4 }] });
    let text = encode(&value).unwrap();
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_list_item_first_field_tabular_rows() {
    let value = toon!([{
        "points": [{ "x": 1, "y": 2 }, { "x": 3, "y": 4 }],
        "label": "grid"
    }]);
    let text = encode(&value).unwrap();
    assert_eq!(
        text,
        "[1]:\n  - points[2]{x,y}:\n      1,2\n      3,4\n    label: grid"
    );
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_path_expansion_safe() {
    let options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    let value = decode_with_options("user.name: Alice\nuser.age: 30", options).unwrap();
    assert_eq!(value, toon!({ "user": { "name": "Alice", "age": 30 } }));
}

#[test]
fn test_path_expansion_conflict() {
    let options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    assert!(matches!(
        decode_with_options("a: 1\na.b: 2", options),
        Err(Error::ExpansionConflict { .. })
    ));
}

#[test]
fn test_key_folding_safe() {
    let value = toon!({ "server": { "host": { "name": "db1" } } });
    let options = EncodeOptions::new().with_key_folding(KeyFolding::Safe);
    let text = encode_with_options(&value, options).unwrap();
    assert_eq!(text, "server.host.name: db1");

    let decode_options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    assert_eq!(decode_with_options(&text, decode_options).unwrap(), value);
}

#[test]
fn test_key_folding_off_by_default() {
    let value = toon!({ "server": { "host": "db1" } });
    assert_eq!(encode(&value).unwrap(), "server:\n  host: db1");
}

#[test]
fn test_number_canonicity() {
    let value = toon!({
        "a": 1.0,
        "b": (-0.0),
        "c": 1e6,
        "d": 2.5,
        "e": 0.001
    });
    assert_eq!(
        encode(&value).unwrap(),
        "a: 1\nb: 0\nc: 1000000\nd: 2.5\ne: 0.001"
    );
}

#[test]
fn test_non_finite_floats_encode_as_null() {
    let value = toon!({ "nan": (f64::NAN), "inf": (f64::INFINITY) });
    let text = encode(&value).unwrap();
    assert_eq!(text, "nan: null\ninf: null");
    assert_eq!(decode(&text).unwrap(), toon!({ "nan": null, "inf": null }));
}

#[test]
fn test_float_int_boundary_roundtrip() {
    // A float that is integral and under 2^53 may come back as Int; the
    // numeric-widening equality makes them compare equal.
    let value = toon!({ "n": 7.0 });
    let decoded = decode(&encode(&value).unwrap()).unwrap();
    assert_eq!(decoded.as_object().unwrap().get("n"), Some(&Value::Int(7)));
    assert_eq!(decoded, value);
}

#[test]
fn test_content_after_root_array_rejected() {
    assert!(matches!(
        decode("[1]: 1\nextra: 2"),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_crlf_rejected_in_strict_mode() {
    assert!(matches!(
        decode("a: 1\r\nb: 2"),
        Err(Error::UnexpectedCharacter { ch: '\r', .. })
    ));
    let options = DecodeOptions::new().with_strict(false);
    assert_eq!(
        decode_with_options("a: 1\r\nb: 2", options).unwrap(),
        toon!({ "a": 1, "b": 2 })
    );
}

#[test]
fn test_quoted_keys_with_header() {
    let value = toon!({ "my list": [1, 2] });
    let text = encode(&value).unwrap();
    assert_eq!(text, "\"my list\"[2]: 1,2");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_empty_objects_in_lists() {
    let value = toon!({ "items": [{}, {}] });
    let text = encode(&value).unwrap();
    assert_eq!(text, "items[2]:\n  -\n  -");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_strings_with_structural_bytes_roundtrip() {
    let value = toon!({
        "a": "[3]: x",
        "b": "{key}",
        "c": "- item",
        "d": "-5x",
        "e": " padded "
    });
    let text = encode(&value).unwrap();
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_custom_indent() {
    let value = toon!({ "a": { "b": 1 } });
    let encode_options = EncodeOptions::new().with_indent(4);
    let text = encode_with_options(&value, encode_options).unwrap();
    assert_eq!(text, "a:\n    b: 1");

    let decode_options = DecodeOptions::new().with_indent(4);
    assert_eq!(decode_with_options(&text, decode_options).unwrap(), value);
}
