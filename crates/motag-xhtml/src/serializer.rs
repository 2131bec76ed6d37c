//! Serialize a [`DomTree`] back to XHTML text.
//!
//! Output follows the input as closely as the tree allows: non-element
//! nodes are written verbatim and attributes keep their order and their
//! source spelling, references included. What is normalized is the inside
//! of tags: attributes are always double-quoted and separated by one space,
//! values set by code are escaped, and every element gets an explicit end tag,
//! so `<br/>` comes out as `<br></br>`. Hosts that need `<br/>` rewrite it
//! afterwards.

use motag_dom::{DomTree, ElementData, NodeId, NodeType};

/// Serialize the whole document.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        serialize_node(tree, child, &mut out);
    }
    out
}

/// Serialize one node and its subtree, appending to `out`.
pub fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
        }
        NodeType::Element(data) => {
            write_start_tag(data, out);
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&data.tag_name);
            out.push('>');
        }
        NodeType::Text(text) => out.push_str(text),
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
        NodeType::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        NodeType::Doctype(data) => {
            out.push_str("<!");
            out.push_str(data);
            out.push('>');
        }
        NodeType::ProcessingInstruction(data) => {
            out.push_str("<?");
            out.push_str(data);
            out.push_str("?>");
        }
    }
}

fn write_start_tag(data: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&data.tag_name);
    for attr in &data.attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        match &attr.raw {
            Some(raw) => write_raw_attribute_value(raw, out),
            None => escape_attribute_value(&attr.value, out),
        }
        out.push('"');
    }
    out.push('>');
}

/// Write a value as it was spelled in the source. Only `"` needs escaping,
/// for values that came from single quotes.
fn write_raw_attribute_value(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// In attribute mode, with `<` escaped as well so the output stays valid XML.
pub fn escape_attribute_value(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
