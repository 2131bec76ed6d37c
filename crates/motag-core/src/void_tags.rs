//! Post-serialization rewrite of empty void elements.
//!
//! Some reading systems choke on `<img ...></img>` and need `<img .../>`.
//! The rewrite is a literal text substitution over a fixed list of names;
//! it does not infer void elements from the markup.

/// Element names whose `></name>` ending is collapsed to `/>`.
pub const SELF_CLOSING_TAGS: [&str; 9] = [
    "br", "col", "embed", "hr", "img", "input", "link", "meta", "track",
];

/// Replace every `></name>` with `/>` for each name in [`SELF_CLOSING_TAGS`].
#[must_use]
pub fn close_void_tags(markup: &str) -> String {
    let mut out = markup.to_string();
    for tag in SELF_CLOSING_TAGS {
        out = out.replace(&format!("></{tag}>"), "/>");
    }
    out
}
