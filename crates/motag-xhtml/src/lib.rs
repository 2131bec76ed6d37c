//! XHTML tokenizer, tree builder and serializer for the motag tools.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - start/end/empty-element tags, attributes (quoted,
//!   unquoted, valueless), comments, CDATA sections, DOCTYPE with internal
//!   subset, processing instructions, raw text for `script` and `style`
//! - **Tree builder** - stack of open elements with XML end-tag matching and
//!   HTML void elements
//! - **Serializer** - writes the tree back, keeping everything but tag
//!   internals byte-for-byte
//!
//! # Not Implemented
//!
//! - Entity expansion in text content (text is kept as written)
//! - Namespace resolution
//! - DTD processing and validation
//! - Encoding detection (input is already a `&str`)

/// Parse errors and source positions.
pub mod error;
/// Tree construction.
pub mod parser;
/// Tree serialization.
pub mod serializer;
/// Tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{ParseError, Position};
pub use parser::{VOID_ELEMENTS, XhtmlParser, is_void_element};
pub use serializer::serialize;
pub use tokenizer::{Token, XhtmlTokenizer};

use motag_dom::DomTree;

/// Tokenize and build the tree for a complete document.
///
/// # Errors
///
/// Returns the first [`ParseError`] found by either the tokenizer or the
/// tree builder.
pub fn parse(markup: &str) -> Result<DomTree, ParseError> {
    let mut tokenizer = XhtmlTokenizer::new(markup.to_string());
    tokenizer.run()?;
    XhtmlParser::new(tokenizer.into_tokens()).run()
}
