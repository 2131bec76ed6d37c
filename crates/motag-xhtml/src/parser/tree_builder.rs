use motag_dom::{Attribute, DomTree, ElementData, NodeId, NodeType};

use crate::error::{ParseError, Position};
use crate::tokenizer::{SpannedToken, Token};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// `param` is obsolete but still shows up in older content, so it is kept.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// True if `name` is a void element, compared ASCII case-insensitively.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v))
}

/// An entry on the stack of open elements.
#[derive(Debug)]
struct OpenElement {
    id: NodeId,
    name: String,
    position: Position,
}

/// Builds a [`DomTree`] from the token stream.
///
/// Tree construction is the XML one: every start tag is matched by an end tag
/// of the same name. The only HTML leniency is for void elements, which may
/// be written without `/>` and may carry a redundant end tag.
pub struct XhtmlParser {
    tokens: std::vec::IntoIter<SpannedToken>,
    tree: DomTree,
    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<OpenElement>,
}

impl XhtmlParser {
    /// Create a parser over the tokenizer's output.
    #[must_use]
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            tree: DomTree::new(),
            stack_of_open_elements: Vec::new(),
        }
    }

    /// Consume all tokens and return the finished tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MismatchedEndTag`] or
    /// [`ParseError::UnexpectedEndTag`] for end tags that do not close the
    /// current element, and [`ParseError::UnclosedElement`] if elements are
    /// still open at the end of input.
    pub fn run(mut self) -> Result<DomTree, ParseError> {
        while let Some(SpannedToken { token, position }) = self.tokens.next() {
            match token {
                Token::StartTag {
                    name,
                    self_closing,
                    attributes,
                } => self.insert_element(name, self_closing, attributes, position),
                Token::EndTag { name } => self.close_element(name, position)?,
                Token::Text { data } => self.insert_node(NodeType::Text(data)),
                Token::Comment { data } => self.insert_node(NodeType::Comment(data)),
                Token::CData { data } => self.insert_node(NodeType::CData(data)),
                Token::Doctype { data } => self.insert_node(NodeType::Doctype(data)),
                Token::ProcessingInstruction { data } => {
                    self.insert_node(NodeType::ProcessingInstruction(data));
                }
                Token::EndOfFile => break,
            }
        }

        if let Some(open) = self.stack_of_open_elements.pop() {
            return Err(ParseError::UnclosedElement {
                name: open.name,
                position: open.position,
            });
        }
        Ok(self.tree)
    }

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    /// With nothing open, nodes go directly under the Document.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .map_or(NodeId::ROOT, |open| open.id)
    }

    fn insert_node(&mut self, node_type: NodeType) {
        let parent = self.current_node();
        let _ = self.tree.append_new(parent, node_type);
    }

    /// "Insert an HTML element for the token." Elements that cannot have
    /// children are not pushed onto the stack.
    fn insert_element(
        &mut self,
        name: String,
        self_closing: bool,
        attributes: Vec<Attribute>,
        position: Position,
    ) {
        let data = ElementData {
            tag_name: name.clone(),
            attrs: attributes.into_iter().collect(),
        };
        let parent = self.current_node();
        let id = self.tree.append_new(parent, NodeType::Element(data));

        if !self_closing && !is_void_element(&name) {
            self.stack_of_open_elements.push(OpenElement { id, name, position });
        }
    }

    /// Pop the current element if `name` closes it.
    fn close_element(&mut self, name: String, position: Position) -> Result<(), ParseError> {
        let current = self
            .stack_of_open_elements
            .last()
            .map(|open| open.name.clone());
        match current {
            Some(expected) if expected == name => {
                let _ = self.stack_of_open_elements.pop();
                Ok(())
            }
            // `<br></br>` and friends: the void element was already closed
            // when its start tag was seen.
            _ if is_void_element(&name) => Ok(()),
            Some(expected) => Err(ParseError::MismatchedEndTag {
                expected,
                found: name,
                position,
            }),
            None => Err(ParseError::UnexpectedEndTag { name, position }),
        }
    }
}
