use motag_dom::Attribute;

use crate::error::Position;

/// [XML 1.0 § 2.1 Well-Formed XML Documents](https://www.w3.org/TR/xml/#sec-well-formed)
///
/// The tokenizer emits tokens of these types to the tree builder. Payloads
/// of non-element constructs are kept exactly as written so they can be
/// serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// [§ 2.8 Prolog and Document Type Declaration](https://www.w3.org/TR/xml/#sec-prolog-dtd)
    ///
    /// `<!data>`, where `data` starts with the `DOCTYPE` keyword as written
    /// and includes any internal subset.
    Doctype {
        /// Text between `<!` and the closing `>`.
        data: String,
    },

    /// [§ 2.6 Processing Instructions](https://www.w3.org/TR/xml/#sec-pi)
    ///
    /// `<?data?>`, which also covers the XML declaration.
    ProcessingInstruction {
        /// Text between `<?` and `?>`.
        data: String,
    },

    /// [§ 3.1 Start-Tags, End-Tags, and Empty-Element Tags](https://www.w3.org/TR/xml/#sec-starttags)
    ///
    /// "The beginning of every non-empty XML element is marked by a start-tag."
    StartTag {
        /// "a tag name"
        name: String,
        /// Set for empty-element tags (`<br/>`).
        self_closing: bool,
        /// Attributes in source order, values decoded.
        attributes: Vec<Attribute>,
    },

    /// "The end of every element that begins with a start-tag must be marked
    /// by an end-tag containing a name that echoes the element's type as
    /// given in the start-tag"
    EndTag {
        /// "a tag name"
        name: String,
    },

    /// [§ 2.5 Comments](https://www.w3.org/TR/xml/#sec-comments)
    Comment {
        /// Text between `<!--` and `-->`.
        data: String,
    },

    /// [§ 2.7 CDATA Sections](https://www.w3.org/TR/xml/#sec-cdata-sect)
    CData {
        /// Text between `<![CDATA[` and `]]>`.
        data: String,
    },

    /// [§ 2.4 Character Data and Markup](https://www.w3.org/TR/xml/#syntax)
    ///
    /// A run of character data. Entity references are left unexpanded.
    Text {
        /// Raw character data.
        data: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Create a start tag token with an empty name and no attributes.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create an end tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Append a character to the name of a start or end tag token.
    ///
    /// # Panics
    /// Panics if called on a token that is not a tag, which indicates a bug
    /// in the tokenizer state machine.
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => name.push(c),
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// Set the self-closing flag of a start tag token. No-op on other tokens.
    pub const fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// Add an attribute to a start tag token. No-op on other tokens.
    pub fn push_attribute(&mut self, attribute: Attribute) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(attribute);
        }
    }
}

/// A token together with the location where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    /// The token itself.
    pub token: Token,
    /// Location of its first character.
    pub position: Position,
}
