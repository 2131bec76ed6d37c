//! XHTML tokenizer module.
//!
//! A character-level state machine modelled on
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization),
//! with the error handling of [XML 1.0](https://www.w3.org/TR/xml/): the
//! first well-formedness violation ends tokenization.

/// Helper methods for tokenizer state transitions and token emission.
pub mod helpers;
/// Tokenizer state machine implementation.
pub mod machine;
/// Token types produced by the tokenizer.
pub mod token;

pub use helpers::decode_attribute_value;
pub use machine::{TokenizerState, XhtmlTokenizer};
pub use token::{SpannedToken, Token};
