//! Customizing delimiters, indentation, folding, and strictness.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use toon::{
    decode_with_options, encode_with_options, toon, DecodeOptions, Delimiter, EncodeOptions,
    KeyFolding, PathExpansion,
};

fn main() -> Result<(), Box<dyn Error>> {
    let value = toon!({
        "server": { "host": { "name": "db1" } },
        "tags": ["a,b", "c"]
    });

    // Pipe delimiter leaves commas unquoted.
    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    println!("pipe delimiter:\n{}\n", encode_with_options(&value, options)?);

    // Safe key folding collapses single-key chains into dotted keys.
    let options = EncodeOptions::new().with_key_folding(KeyFolding::Safe);
    let folded = encode_with_options(&value, options)?;
    println!("key folding:\n{}\n", folded);

    // Safe path expansion inverts the folding on decode.
    let options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    let expanded = decode_with_options(&folded, options)?;
    assert_eq!(expanded, value);
    println!("✓ fold/expand round-trip successful");

    // Lenient decoding tolerates count mismatches.
    let options = DecodeOptions::new().with_strict(false);
    let lenient = decode_with_options("tags[9]: a,b", options)?;
    println!("lenient decode: {:?}", lenient);

    Ok(())
}
