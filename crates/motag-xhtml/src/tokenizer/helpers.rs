//! Helper functions for the XHTML tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Attribute value decoding

use motag_dom::Attribute;

use crate::error::ParseError;

use super::machine::{PendingAttribute, TokenizerState, XhtmlTokenizer};
use super::token::{SpannedToken, Token};

/// Elements whose content is read as raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl XhtmlTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl XhtmlTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the
    /// position, keeping line and column up to date.
    pub(super) fn consume(&mut self) -> Option<char> {
        self.char_position = self.position;
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) fn consume_string(&mut self, target: &str) {
        self.advance_bytes(target.len());
    }

    /// Consume `len` bytes worth of characters.
    pub(super) fn advance_bytes(&mut self, len: usize) {
        let target = self.current_pos + len;
        while self.current_pos < target && self.consume().is_some() {}
    }

    /// Consume everything up to and including `terminator`, returning the
    /// text in between.
    pub(super) fn consume_delimited(
        &mut self,
        terminator: &str,
        context: &'static str,
    ) -> Result<String, ParseError> {
        let rest = &self.input[self.current_pos..];
        let Some(end) = rest.find(terminator) else {
            return Err(self.eof_error(context));
        };
        let data = rest[..end].to_string();
        self.advance_bytes(end + terminator.len());
        Ok(data)
    }

    /// Whether the `<` just consumed starts the end tag of the open raw text element.
    pub(super) fn at_appropriate_end_tag(&self) -> bool {
        let Some(name) = self.raw_text_tag.as_deref() else {
            return false;
        };
        let rest = &self.input[self.current_pos..];
        let Some(candidate) = rest.strip_prefix('/') else {
            return false;
        };
        let matches_name = candidate
            .get(..name.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name));
        matches_name
            && candidate[name.len()..]
                .chars()
                .next()
                .is_none_or(|c| c == '>' || Self::is_whitespace_char(c))
    }

    /// [XML § 2.3](https://www.w3.org/TR/xml/#NT-S)
    ///
    /// "S ::= (#x20 | #x9 | #xD | #xA)+"
    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r')
    }

    /// [XML § 2.3](https://www.w3.org/TR/xml/#NT-NameStartChar)
    ///
    /// Approximates `NameStartChar` with "letter, underscore or colon".
    pub(super) fn is_name_start_char(c: char) -> bool {
        c.is_alphabetic() || c == '_' || c == ':'
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl XhtmlTokenizer {
    /// Append a character to the pending text run.
    pub(super) fn append_text(&mut self, c: char) {
        if self.text_buffer.is_empty() {
            self.text_start = self.char_position;
        }
        self.text_buffer.push(c);
    }

    /// Emit the pending text run, if any, as a single text token.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.token_stream.push(SpannedToken {
                token: Token::Text { data },
                position: self.text_start,
            });
        }
    }

    /// Emit a markup token that started at `token_start`.
    pub(super) fn emit(&mut self, token: Token) {
        self.flush_text();
        self.token_stream.push(SpannedToken {
            token,
            position: self.token_start,
        });
    }

    /// "Emit the current tag token" and return to the data state, or to the
    /// raw text state after a `script` or `style` start tag.
    pub(super) fn emit_current_tag(&mut self) {
        let Some(token) = self.current_token.take() else {
            self.switch_to(TokenizerState::Data);
            return;
        };
        let raw_text = match &token {
            Token::StartTag {
                name,
                self_closing: false,
                ..
            } if RAW_TEXT_ELEMENTS.iter().any(|t| name.eq_ignore_ascii_case(t)) => {
                Some(name.clone())
            }
            _ => None,
        };
        self.emit(token);
        if raw_text.is_some() {
            self.raw_text_tag = raw_text;
            self.switch_to(TokenizerState::RawText);
        } else {
            self.switch_to(TokenizerState::Data);
        }
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.flush_text();
        self.token_stream.push(SpannedToken {
            token: Token::EndOfFile,
            position: self.char_position,
        });
        self.at_eof = true;
    }

    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_tag_name(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// Move the pending attribute onto the current tag, decoding its value
    /// and keeping the source spelling alongside.
    pub(super) fn finish_attribute(&mut self) {
        if let Some(PendingAttribute { name, value }) = self.current_attribute.take()
            && let Some(token) = self.current_token.as_mut()
        {
            let decoded = decode_attribute_value(&value);
            token.push_attribute(Attribute::with_raw(name, decoded, value));
        }
    }
}

// =============================================================================
// Error Helpers
// =============================================================================

impl XhtmlTokenizer {
    /// Input ended inside `context`, which started at `token_start`.
    pub(super) const fn eof_error(&self, context: &'static str) -> ParseError {
        ParseError::UnexpectedEof {
            context,
            position: self.token_start,
        }
    }

    /// The current input character cannot appear here.
    pub(super) const fn malformed(&self, reason: &'static str) -> ParseError {
        ParseError::MalformedTag {
            reason,
            position: self.char_position,
        }
    }
}

// =============================================================================
// Attribute Value Decoding
// =============================================================================

/// [XML § 4.1 Character and Entity References](https://www.w3.org/TR/xml/#sec-references)
///
/// Decodes the five predefined entities and numeric character references.
/// Any other `&...;` sequence is kept literally, since no DTD is read.
#[must_use]
pub fn decode_attribute_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .and_then(|semi| decode_reference(&after[..semi]).map(|c| (c, semi)));
        if let Some((c, semi)) = decoded {
            out.push(c);
            rest = &after[semi + 1..];
        } else {
            out.push('&');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
