use strum_macros::Display;

use crate::error::{ParseError, Position};

use super::token::{SpannedToken, Token};

/// The tokenizer state machine.
///
/// The tag states follow [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
/// of the HTML standard, tightened to the
/// [XML 1.0](https://www.w3.org/TR/xml/) well-formedness rules. Comments,
/// CDATA sections, DOCTYPEs and processing instructions are not character
/// level states: they are scanned to their terminator in one step from the
/// tag open state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Content of `script` and `style` up to the matching end tag.
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// Tag name state, for end tags.
    EndTagName,
    /// Whitespace between an end tag name and `>`.
    AfterEndTagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
}

/// An attribute whose name or value is still being read.
#[derive(Debug, Default)]
pub(super) struct PendingAttribute {
    pub(super) name: String,
    /// Raw value; references are decoded when the attribute is finished.
    pub(super) value: String,
}

/// Tokenizer for XHTML documents.
///
/// Run it once over the whole input with [`XhtmlTokenizer::run`], then hand
/// [`XhtmlTokenizer::into_tokens`] to the tree builder.
pub struct XhtmlTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    /// Location of the next character to be consumed.
    pub(super) position: Position,
    /// Location of `current_input_character`.
    pub(super) char_position: Position,
    pub(super) current_input_character: Option<char>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    pub(super) at_eof: bool,
    pub(super) current_token: Option<Token>,
    pub(super) current_attribute: Option<PendingAttribute>,
    /// Where the markup token under construction started (its `<`).
    pub(super) token_start: Position,
    pub(super) text_buffer: String,
    pub(super) text_start: Position,
    /// Set while inside a raw text element; holds its name.
    pub(super) raw_text_tag: Option<String>,
    pub(super) token_stream: Vec<SpannedToken>,
}

impl XhtmlTokenizer {
    /// Create a new tokenizer for the given input, starting in the data state.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            position: Position::START,
            char_position: Position::START,
            current_input_character: None,
            reconsume: false,
            at_eof: false,
            current_token: None,
            current_attribute: None,
            token_start: Position::START,
            text_buffer: String::new(),
            text_start: Position::START,
            raw_text_tag: None,
            token_stream: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the tree builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<SpannedToken> {
        self.token_stream
    }

    /// Current state of the machine.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Tokenize the whole input.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first well-formedness violation the
    /// tokenizer can see: malformed tags or attributes, and constructs left
    /// open at the end of input.
    pub fn run(&mut self) -> Result<(), ParseError> {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::RawText => self.handle_raw_text_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state()?,
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state()?,
                TokenizerState::TagName => self.handle_tag_name_state()?,
                TokenizerState::EndTagName => self.handle_end_tag_name_state()?,
                TokenizerState::AfterEndTagName => self.handle_after_end_tag_name_state()?,
                TokenizerState::BeforeAttributeName => {
                    self.handle_before_attribute_name_state()?;
                }
                TokenizerState::AttributeName => self.handle_attribute_name_state()?,
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state()?,
                TokenizerState::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state()?;
                }
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"')?;
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'')?;
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state()?;
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state()?;
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state()?,
            }
        }
        Ok(())
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.token_start = self.char_position;
                self.switch_to(TokenizerState::TagOpen);
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof_token(),
            // "Anything else - Emit the current input character as a character token."
            // Entity references stay as written.
            Some(c) => self.append_text(c),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Only an appropriate end tag leaves this state; any other `<` is text.
    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') if self.at_appropriate_end_tag() => {
                self.raw_text_tag = None;
                self.token_start = self.char_position;
                self.switch_to(TokenizerState::TagOpen);
            }
            None => self.emit_eof_token(),
            Some(c) => self.append_text(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => {
                self.consume_markup_declaration()?;
                self.switch_to(TokenizerState::Data);
                Ok(())
            }
            // [XML § 2.6](https://www.w3.org/TR/xml/#sec-pi)
            // "PI ::= '<?' PITarget (S (Char* - (Char* '?>' Char*)))? '?>'"
            Some('?') => {
                let data = self.consume_delimited("?>", "processing instruction")?;
                self.emit(Token::ProcessingInstruction { data });
                self.switch_to(TokenizerState::Data);
                Ok(())
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
                Ok(())
            }
            // "ASCII alpha - Create a new start tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if Self::is_name_start_char(c) => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
                Ok(())
            }
            None => Err(self.eof_error("tag")),
            // HTML would emit the '<' as text here; XML requires it escaped.
            Some(_) => Err(self.malformed("'<' not followed by a tag name")),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    fn consume_markup_declaration(&mut self) -> Result<(), ParseError> {
        // "Two U+002D HYPHEN-MINUS characters (-)"
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            let data = self.consume_delimited("-->", "comment")?;
            self.emit(Token::Comment { data });
            Ok(())
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a
        // U+005B LEFT SQUARE BRACKET character before and after)"
        } else if self.next_few_characters_are("[CDATA[") {
            self.consume_string("[CDATA[");
            let data = self.consume_delimited("]]>", "CDATA section")?;
            self.emit(Token::CData { data });
            Ok(())
        // "ASCII case-insensitive match for the word "DOCTYPE""
        } else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            let data = self.consume_doctype()?;
            self.emit(Token::Doctype { data });
            Ok(())
        } else {
            Err(self.malformed("unknown markup declaration"))
        }
    }

    /// [§ 2.8 Document Type Declaration](https://www.w3.org/TR/xml/#dt-doctype)
    ///
    /// Reads up to the `>` that closes the declaration, skipping any `>` inside
    /// quoted literals or the internal subset. The keyword is part of the data.
    fn consume_doctype(&mut self) -> Result<String, ParseError> {
        let mut data = String::new();
        let mut quote: Option<char> = None;
        let mut subset_depth = 0usize;
        loop {
            let Some(c) = self.consume() else {
                return Err(self.eof_error("DOCTYPE"));
            };
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '[') => subset_depth += 1,
                (None, ']') => subset_depth = subset_depth.saturating_sub(1),
                (None, '>') if subset_depth == 0 => return Ok(data),
                (None, _) => {}
            }
            data.push(c);
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if Self::is_name_start_char(c) => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::EndTagName);
                Ok(())
            }
            None => Err(self.eof_error("end tag")),
            Some(_) => Err(self.malformed("invalid end tag name")),
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE
            // Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current tag token."
            Some('>') => self.emit_current_tag(),
            None => return Err(self.eof_error("start tag")),
            // Tag names are case-sensitive in XHTML; no lowercasing.
            Some(c) => self.append_to_tag_name(c),
        }
        Ok(())
    }

    /// Tag name state, for end tags. Attributes are not allowed here.
    fn handle_end_tag_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterEndTagName);
            }
            Some('>') => self.emit_current_tag(),
            None => return Err(self.eof_error("end tag")),
            Some(c) => self.append_to_tag_name(c),
        }
        Ok(())
    }

    /// [XML § 3.1](https://www.w3.org/TR/xml/#NT-ETag): "ETag ::= '</' Name S? '>'"
    fn handle_after_end_tag_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => Ok(()),
            Some('>') => {
                self.emit_current_tag();
                Ok(())
            }
            None => Err(self.eof_error("end tag")),
            Some(_) => Err(self.malformed("unexpected content in end tag")),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_current_tag(),
            None => return Err(self.eof_error("start tag")),
            Some('=') => return Err(self.malformed("attribute value without a name")),
            // "Anything else - Start a new attribute in the current tag token.
            // Set that attribute name and value to the empty string. Reconsume in
            // the attribute name state."
            Some(_) => {
                self.current_attribute = Some(PendingAttribute::default());
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
        Ok(())
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF
            // Reconsume in the after attribute name state."
            Some('/' | '>') => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value state."
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            None => return Err(self.eof_error("attribute name")),
            Some('"' | '\'' | '<') => {
                return Err(self.malformed("invalid character in attribute name"));
            }
            Some(c) => {
                if let Some(attr) = self.current_attribute.as_mut() {
                    attr.name.push(c);
                }
            }
        }
        Ok(())
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    ///
    /// An attribute without `=` is kept with an empty value.
    fn handle_after_attribute_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.finish_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.finish_attribute();
                self.emit_current_tag();
            }
            None => return Err(self.eof_error("start tag")),
            Some(_) => {
                self.finish_attribute();
                self.current_attribute = Some(PendingAttribute::default());
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
        Ok(())
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => return Err(self.malformed("missing attribute value")),
            None => return Err(self.eof_error("attribute value")),
            Some(_) => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
        Ok(())
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.finish_attribute();
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            None => return Err(self.eof_error("attribute value")),
            Some(c) => self.append_to_attribute_value(c),
        }
        Ok(())
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.finish_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.finish_attribute();
                self.emit_current_tag();
            }
            None => return Err(self.eof_error("attribute value")),
            Some('"' | '\'' | '<' | '=' | '`') => {
                return Err(self.malformed("invalid character in unquoted attribute value"));
            }
            Some(c) => self.append_to_attribute_value(c),
        }
        Ok(())
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_current_tag(),
            None => return Err(self.eof_error("start tag")),
            // "This is a missing-whitespace-between-attributes parse error.
            // Reconsume in the before attribute name state."
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
        Ok(())
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            // "Set the self-closing flag of the current tag token. Switch to the
            // data state. Emit the current tag token."
            Some('>') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.set_self_closing();
                }
                self.emit_current_tag();
            }
            None => return Err(self.eof_error("start tag")),
            // "This is an unexpected-solidus-in-tag parse error. Reconsume in
            // the before attribute name state."
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
        Ok(())
    }
}
