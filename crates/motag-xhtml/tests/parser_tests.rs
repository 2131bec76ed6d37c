//! Integration tests for tree construction.

use motag_dom::{DomTree, Node, NodeId, NodeType};
use motag_xhtml::{ParseError, Position, is_void_element, parse};

/// Helper to parse a document that is expected to be well-formed
fn parse_ok(markup: &str) -> DomTree {
    parse(markup).expect("parse error")
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, tag: &str) -> Option<NodeId> {
    tree.elements()
        .into_iter()
        .find(|&id| tree.as_element(id).is_some_and(|e| e.tag_name == tag))
}

/// Helper to get text content of a node (concatenated)
fn text_content(tree: &DomTree, id: NodeId) -> String {
    tree.descendants(id)
        .filter_map(|id| match &tree.get(id)?.node_type {
            NodeType::Text(data) => Some(data.as_str()),
            _ => None,
        })
        .collect()
}

/// Helper to get a node reference
fn get_node(tree: &DomTree, id: NodeId) -> &Node {
    tree.get(id).expect("Node not found")
}

#[test]
fn test_document_structure() {
    let tree = parse_ok(
        "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<html><head><title>T</title></head><body></body></html>",
    );

    let root = get_node(&tree, NodeId::ROOT);
    assert!(matches!(root.node_type, NodeType::Document));

    let kinds: Vec<&str> = tree
        .children(NodeId::ROOT)
        .iter()
        .map(|&id| match get_node(&tree, id).node_type {
            NodeType::ProcessingInstruction(_) => "pi",
            NodeType::Doctype(_) => "doctype",
            NodeType::Text(_) => "text",
            NodeType::Element(_) => "element",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["pi", "text", "doctype", "text", "element"]);

    let html = tree.document_element().unwrap();
    let head = find_element(&tree, "head").unwrap();
    let body = find_element(&tree, "body").unwrap();
    assert_eq!(tree.children(html), &[head, body]);
    assert_eq!(text_content(&tree, head), "T");
}

#[test]
fn test_nested_elements_and_text() {
    let tree = parse_ok("<div><p>Hello <span>big</span> world</p></div>");
    let p = find_element(&tree, "p").unwrap();
    let span = find_element(&tree, "span").unwrap();

    assert_eq!(tree.children(p).len(), 3);
    assert_eq!(tree.parent(span), Some(p));
    assert_eq!(text_content(&tree, p), "Hello big world");
}

#[test]
fn test_attributes_keep_order() {
    let tree = parse_ok(r#"<p lang="en" id="a" class="x y" dir="ltr"></p>"#);
    let p = tree.as_element(find_element(&tree, "p").unwrap()).unwrap();
    let names: Vec<&str> = p.attrs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["lang", "id", "class", "dir"]);
    assert_eq!(p.classes(), ["x", "y"]);
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let tree = parse_ok(r#"<p id="one" id="two"></p>"#);
    let p = tree.as_element(find_element(&tree, "p").unwrap()).unwrap();
    assert_eq!(p.id(), Some("one"));
    assert_eq!(p.attrs.len(), 1);
}

#[test]
fn test_void_elements_without_slash() {
    let tree = parse_ok(r#"<p>a<br>b<img src="x.png">c</p>"#);
    let p = find_element(&tree, "p").unwrap();
    let br = find_element(&tree, "br").unwrap();
    let img = find_element(&tree, "img").unwrap();

    assert!(tree.children(br).is_empty());
    assert!(tree.children(img).is_empty());
    assert_eq!(tree.children(p).len(), 5);
}

#[test]
fn test_redundant_void_end_tag_is_ignored() {
    let tree = parse_ok("<p><br></br><hr/></hr>x</p>");
    let p = find_element(&tree, "p").unwrap();
    assert_eq!(tree.children(p).len(), 3);
    assert_eq!(text_content(&tree, p), "x");
}

#[test]
fn test_self_closing_non_void_element() {
    let tree = parse_ok(r#"<div><a id="n1"/>text</div>"#);
    let div = find_element(&tree, "div").unwrap();
    let a = find_element(&tree, "a").unwrap();
    assert!(tree.children(a).is_empty());
    assert_eq!(tree.children(div).len(), 2);
}

#[test]
fn test_void_element_names() {
    assert!(is_void_element("img"));
    assert!(is_void_element("BR"));
    assert!(is_void_element("param"));
    assert!(!is_void_element("p"));
    assert!(!is_void_element("script"));
}

#[test]
fn test_mismatched_end_tag() {
    let err = parse("<p><span></p>").unwrap_err();
    assert_eq!(
        err,
        ParseError::MismatchedEndTag {
            expected: "span".to_string(),
            found: "p".to_string(),
            position: Position { line: 1, column: 10 },
        }
    );
}

#[test]
fn test_end_tag_case_must_match() {
    let err = parse("<p>x</P>").unwrap_err();
    assert!(matches!(err, ParseError::MismatchedEndTag { .. }));
}

#[test]
fn test_unexpected_end_tag() {
    let err = parse("<p></p></div>").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedEndTag {
            name: "div".to_string(),
            position: Position { line: 1, column: 8 },
        }
    );
}

#[test]
fn test_unclosed_element_reports_innermost() {
    let err = parse("<html>\n<body>\n<p>text").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnclosedElement {
            name: "p".to_string(),
            position: Position { line: 3, column: 1 },
        }
    );
}

#[test]
fn test_unclosed_script_is_an_error() {
    let err = parse("<script>var a = 1;").unwrap_err();
    assert!(matches!(err, ParseError::UnclosedElement { ref name, .. } if name == "script"));
}

#[test]
fn test_error_messages_carry_positions() {
    let err = parse("<p>\n  </span>").unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2, column 3: end tag </span> does not match open element <p>"
    );
}
