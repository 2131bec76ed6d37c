//! Tests for the attribute list, the class-token view and tree traversal.

use motag_dom::{Attribute, Attributes, DomTree, ElementData, NodeId, NodeType, class_tokens};

/// Helper to create an element with the given attributes.
fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
    ElementData {
        tag_name: tag.to_string(),
        attrs: attrs
            .iter()
            .map(|(name, value)| Attribute::new(*name, *value))
            .collect(),
    }
}

/// Helper to collect attribute names in order.
fn names(attrs: &Attributes) -> Vec<&str> {
    attrs.iter().map(|a| a.name.as_str()).collect()
}

// ========== Attributes ==========

#[test]
fn test_set_replaces_in_place_and_appends_new() {
    let mut elem = element("p", &[("lang", "en"), ("id", "a"), ("dir", "ltr")]);
    elem.attrs.set("id", "b");
    elem.attrs.set("class", "mo");

    assert_eq!(names(&elem.attrs), ["lang", "id", "dir", "class"]);
    assert_eq!(elem.id(), Some("b"));
}

#[test]
fn test_duplicate_attributes_first_wins() {
    let attrs: Attributes = [
        Attribute::new("id", "first"),
        Attribute::new("class", "x"),
        Attribute::new("id", "second"),
    ]
    .into_iter()
    .collect();

    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("id"), Some("first"));
}

#[test]
fn test_set_drops_source_spelling() {
    let mut attrs: Attributes = [
        Attribute::with_raw("title", "a\u{a0}b", "a&#160;b"),
        Attribute::with_raw("lang", "en", "en"),
    ]
    .into_iter()
    .collect();
    attrs.set("title", "plain");

    let title = attrs.iter().find(|a| a.name == "title").unwrap();
    let lang = attrs.iter().find(|a| a.name == "lang").unwrap();
    assert_eq!(title.raw, None);
    assert_eq!(lang.raw.as_deref(), Some("en"));
}

#[test]
fn test_attribute_equality_ignores_spelling() {
    assert_eq!(
        Attribute::with_raw("title", "&", "&amp;"),
        Attribute::new("title", "&")
    );
}

#[test]
fn test_remove_returns_previous_value() {
    let mut elem = element("p", &[("id", "x"), ("title", "")]);
    assert_eq!(elem.attrs.remove("id"), Some("x".to_string()));
    assert_eq!(elem.attrs.remove("id"), None);
    assert!(elem.attrs.contains("title"));
    assert_eq!(elem.id(), None);
}

// ========== Class tokens ==========

#[test]
fn test_class_tokens_single_and_multi() {
    assert_eq!(class_tokens("mo"), ["mo"]);
    assert_eq!(class_tokens("  a\tb\n a  c "), ["a", "b", "c"]);
    assert!(class_tokens("").is_empty());
    assert!(class_tokens(" \t ").is_empty());
}

#[test]
fn test_classes_without_attribute() {
    let elem = element("p", &[]);
    assert!(elem.classes().is_empty());
    assert!(!elem.has_class("mo"));
}

#[test]
fn test_class_list_add_appends_and_normalizes() {
    let mut elem = element("p", &[("class", "  lead\tnote ")]);
    elem.class_list().add("mo");
    assert_eq!(elem.attrs.get("class"), Some("lead note mo"));

    // Already present: order and content stay the same.
    elem.class_list().add("lead");
    assert_eq!(elem.attrs.get("class"), Some("lead note mo"));
}

#[test]
fn test_class_list_add_to_missing_or_empty_attribute() {
    let mut elem = element("p", &[]);
    elem.class_list().add("mo");
    assert_eq!(elem.attrs.get("class"), Some("mo"));

    let mut elem = element("p", &[("class", "")]);
    elem.class_list().add("mo");
    assert_eq!(elem.attrs.get("class"), Some("mo"));
}

#[test]
fn test_class_list_remove_keeps_others() {
    let mut elem = element("p", &[("class", "a mo b")]);
    assert!(elem.class_list().remove("mo"));
    assert_eq!(elem.attrs.get("class"), Some("a b"));
    assert!(!elem.class_list().remove("mo"));
}

#[test]
fn test_class_list_remove_last_token_drops_attribute() {
    let mut elem = element("p", &[("id", "x"), ("class", "mo")]);
    assert!(elem.class_list().remove("mo"));
    assert!(!elem.attrs.contains("class"));
    assert_eq!(names(&elem.attrs), ["id"]);
}

// ========== Tree ==========

#[test]
fn test_descendants_in_tree_order() {
    let mut tree = DomTree::new();
    let html = tree.append_new(NodeId::ROOT, NodeType::Element(element("html", &[])));
    let body = tree.append_new(html, NodeType::Element(element("body", &[])));
    let p1 = tree.append_new(body, NodeType::Element(element("p", &[])));
    let text = tree.append_new(p1, NodeType::Text("hi".to_string()));
    let span = tree.append_new(p1, NodeType::Element(element("span", &[])));
    let p2 = tree.append_new(body, NodeType::Element(element("p", &[])));

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, [NodeId::ROOT, html, body, p1, text, span, p2]);
    assert_eq!(tree.elements(), [html, body, p1, span, p2]);
}

#[test]
fn test_parent_children_and_document_element() {
    let mut tree = DomTree::new();
    let comment = tree.append_new(NodeId::ROOT, NodeType::Comment(" c ".to_string()));
    let html = tree.append_new(NodeId::ROOT, NodeType::Element(element("html", &[])));

    assert_eq!(tree.children(NodeId::ROOT), &[comment, html]);
    assert_eq!(tree.parent(html), Some(NodeId::ROOT));
    assert_eq!(tree.document_element(), Some(html));
    assert!(tree.as_element(comment).is_none());
    assert!(tree.children(NodeId(99)).is_empty());
}

#[test]
fn test_tag_name_comparison_ignores_ascii_case() {
    let elem = element("SPAN", &[]);
    assert!(elem.has_tag_name("span"));
    assert!(!elem.has_tag_name("p"));
}
