//! Integration tests for the XHTML tokenizer.

use motag_dom::Attribute;
use motag_xhtml::tokenizer::{SpannedToken, TokenizerState};
use motag_xhtml::{ParseError, Position, Token, XhtmlTokenizer};

/// Helper to tokenize a string and return the tokens with positions
fn tokenize_spanned(input: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut tokenizer = XhtmlTokenizer::new(input.to_string());
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

/// Helper to tokenize a string and return only the tokens
fn tokenize(input: &str) -> Vec<Token> {
    tokenize_spanned(input)
        .expect("tokenizer error")
        .into_iter()
        .map(|t| t.token)
        .collect()
}

/// Helper to build an expected start tag
fn start(name: &str, self_closing: bool, attributes: &[(&str, &str)]) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing,
        attributes: attributes
            .iter()
            .map(|(n, v)| Attribute::new(*n, *v))
            .collect(),
    }
}

fn end(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

fn text(data: &str) -> Token {
    Token::Text {
        data: data.to_string(),
    }
}

#[test]
fn test_plain_text_is_one_token() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens, [text("Hello"), Token::EndOfFile]);
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), [Token::EndOfFile]);
}

#[test]
fn test_simple_element() {
    let tokens = tokenize(r#"<p class="a">Hi</p>"#);
    assert_eq!(
        tokens,
        [
            start("p", false, &[("class", "a")]),
            text("Hi"),
            end("p"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_tag_names_keep_case() {
    let tokens = tokenize("<P></P >");
    assert_eq!(tokens, [start("P", false, &[]), end("P"), Token::EndOfFile]);
}

#[test]
fn test_self_closing_tags() {
    let tokens = tokenize(r#"<br/><img src="a.png" />"#);
    assert_eq!(
        tokens,
        [
            start("br", true, &[]),
            start("img", true, &[("src", "a.png")]),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_attribute_value_forms() {
    let tokens = tokenize(r#"<input type='text' size=10 disabled value="x">"#);
    assert_eq!(
        tokens[0],
        start(
            "input",
            false,
            &[
                ("type", "text"),
                ("size", "10"),
                ("disabled", ""),
                ("value", "x")
            ]
        )
    );
}

#[test]
fn test_attribute_whitespace_around_equals() {
    let tokens = tokenize("<p id = \"a\"\n\tclass\n=\n'b'>");
    assert_eq!(tokens[0], start("p", false, &[("id", "a"), ("class", "b")]));
}

#[test]
fn test_missing_whitespace_between_attributes() {
    let tokens = tokenize(r#"<p id="a"class="b">"#);
    assert_eq!(tokens[0], start("p", false, &[("id", "a"), ("class", "b")]));
}

#[test]
fn test_attribute_values_are_decoded() {
    let tokens = tokenize(r#"<a title="Tom &amp; Jerry &#8212; &nbsp;">"#);
    assert_eq!(
        tokens[0],
        start("a", false, &[("title", "Tom & Jerry \u{2014} &nbsp;")])
    );
}

#[test]
fn test_text_references_are_kept() {
    let tokens = tokenize("<p>a &amp; b &nbsp;</p>");
    assert_eq!(tokens[1], text("a &amp; b &nbsp;"));
}

#[test]
fn test_comment_cdata_doctype_and_pi() {
    let tokens = tokenize(
        "<?xml version=\"1.0\"?><!DOCTYPE html><!-- a > b --><![CDATA[<x>]]>",
    );
    assert_eq!(
        tokens,
        [
            Token::ProcessingInstruction {
                data: "xml version=\"1.0\"".to_string()
            },
            Token::Doctype {
                data: "DOCTYPE html".to_string()
            },
            Token::Comment {
                data: " a > b ".to_string()
            },
            Token::CData {
                data: "<x>".to_string()
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_doctype_with_internal_subset() {
    let input = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "x.dtd" [ <!ENTITY e "a>b"> ]>"#;
    let tokens = tokenize(input);
    assert_eq!(
        tokens[0],
        Token::Doctype {
            data: input[2..input.len() - 1].to_string()
        }
    );
    assert!(tokens[1].is_eof());
}

#[test]
fn test_script_content_is_raw_text() {
    let tokens = tokenize("<script>if (a < b && c) {}</script>");
    assert_eq!(
        tokens,
        [
            start("script", false, &[]),
            text("if (a < b && c) {}"),
            end("script"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize_spanned("<html>\n  <p>x</p>\n</html>").unwrap();
    let positions: Vec<Position> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions[0], Position { line: 1, column: 1 });
    // "\n  " text run starts right after <html>
    assert_eq!(positions[1], Position { line: 1, column: 7 });
    assert_eq!(positions[2], Position { line: 2, column: 3 });
    assert_eq!(positions[3], Position { line: 2, column: 6 });
    assert_eq!(positions[4], Position { line: 2, column: 7 });
}

#[test]
fn test_eof_inside_constructs() {
    for (input, context) in [
        ("<p", "start tag"),
        ("<p class=\"a", "attribute value"),
        ("x</p", "end tag"),
        ("<!-- open", "comment"),
        ("<![CDATA[ open", "CDATA section"),
        ("<!DOCTYPE html", "DOCTYPE"),
        ("<?xml", "processing instruction"),
    ] {
        match tokenize_spanned(input) {
            Err(ParseError::UnexpectedEof { context: found, .. }) => {
                assert_eq!(found, context, "input: {input}");
            }
            other => panic!("expected EOF error for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_eof_error_points_at_construct_start() {
    let err = tokenize_spanned("<p>\n  <!-- never closed").unwrap_err();
    assert_eq!(err.position(), Position { line: 2, column: 3 });
}

#[test]
fn test_bare_less_than_is_malformed() {
    let err = tokenize_spanned("a < b").unwrap_err();
    assert!(matches!(err, ParseError::MalformedTag { .. }));
    assert_eq!(err.position(), Position { line: 1, column: 4 });
}

#[test]
fn test_attributes_on_end_tag_are_malformed() {
    let err = tokenize_spanned(r#"<p></p class="x">"#).unwrap_err();
    assert!(matches!(err, ParseError::MalformedTag { .. }));
}

#[test]
fn test_state_display_names() {
    assert_eq!(TokenizerState::Data.to_string(), "Data");
    assert_eq!(
        TokenizerState::AttributeValueDoubleQuoted.to_string(),
        "AttributeValueDoubleQuoted"
    );
    let mut tokenizer = XhtmlTokenizer::new(String::new());
    assert_eq!(tokenizer.state(), TokenizerState::Data);
    tokenizer.run().unwrap();
}
