//! Re-emission of Groovy source text from a digested tree.

use serde_json::Value;
use std::fmt::Write;

// Leaves that need a space re-inserted before them when the previous leaf
// ended an identifier-like token; the separating whitespace was silenced by
// the adapter.
const SPACE_BEFORE: [&str; 5] = [
    "STRING_LITERAL",
    "IDENTIFIER",
    "CAPITALIZED_IDENTIFIER",
    "LBRACE",
    "GSTRING_BEGIN",
];

const SPACE_AFTER: [&str; 4] = ["IDENTIFIER", "CAPITALIZED_IDENTIFIER", "RBRACE", "COMMA"];

/// Write a compilable rendition of a digested tree back out as Groovy
/// source. String literals are re-quoted with single quotes.
pub fn mirror_source<W: Write>(digest: &Value, out: &mut W) -> std::fmt::Result {
    let mut wants_space = false;
    write_node(digest, out, &mut wants_space)
}

fn write_node<W: Write>(node: &Value, out: &mut W, wants_space: &mut bool) -> std::fmt::Result {
    if let Some(children) = node.get("children").and_then(Value::as_array) {
        for child in children {
            write_node(child, out, wants_space)?;
        }
        return Ok(());
    }

    let leaf = node.get("leaf").and_then(Value::as_str);
    let value = node.get("value").and_then(Value::as_str);
    if let (Some(leaf), Some(value)) = (leaf, value) {
        if *wants_space && SPACE_BEFORE.contains(&leaf) {
            out.write_char(' ')?;
        }
        if leaf == "STRING_LITERAL" {
            out.write_char('\'')?;
        }
        out.write_str(value)?;
        if leaf == "STRING_LITERAL" {
            out.write_char('\'')?;
        }
        *wants_space = SPACE_AFTER.contains(&leaf);
    }
    Ok(())
}
