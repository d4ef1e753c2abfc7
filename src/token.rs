//! HTML tag/text event stream.
//!
//! Wraps html5ever's streaming tokenizer (no tree builder) and flattens its
//! output into a linear sequence of [`Token`]s in document order:
//!
//! - character references are decoded, so [`Token::Text`] holds plain text
//! - adjacent character runs are coalesced into one `Text` token
//! - comments, doctypes and parse errors are dropped
//! - attribute order is preserved

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as RawToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

/// A single attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One event of the HTML stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr="value">`, or `<name ... />` when `self_closing` is set.
    StartTag {
        name: String,
        attrs: Vec<Attribute>,
        self_closing: bool,
    },
    /// `</name>`
    EndTag { name: String },
    /// Decoded character data.
    Text(String),
}

impl Token {
    pub fn start(name: impl Into<String>) -> Self {
        Token::StartTag {
            name: name.into(),
            attrs: Vec::new(),
            self_closing: false,
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        Token::EndTag { name: name.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }
}

/// Token sink collecting html5ever tokens.
///
/// Uses interior mutability (RefCell) because html5ever's TokenSink trait
/// requires methods to take `&self`.
#[derive(Default)]
struct CollectSink {
    tokens: RefCell<Vec<Token>>,
}

impl CollectSink {
    fn push_text(&self, text: &str) {
        let mut tokens = self.tokens.borrow_mut();
        if let Some(Token::Text(prev)) = tokens.last_mut() {
            prev.push_str(text);
        } else {
            tokens.push(Token::Text(text.to_string()));
        }
    }
}

impl TokenSink for CollectSink {
    type Handle = ();

    fn process_token(&self, token: RawToken, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            RawToken::TagToken(tag) => {
                let name = tag.name.to_string();
                let token = match tag.kind {
                    TagKind::StartTag => Token::StartTag {
                        name,
                        attrs: tag
                            .attrs
                            .into_iter()
                            .map(|a| Attribute {
                                name: a.name.local.to_string(),
                                value: a.value.to_string(),
                            })
                            .collect(),
                        self_closing: tag.self_closing || is_void(&tag.name),
                    },
                    TagKind::EndTag => Token::EndTag { name },
                };
                self.tokens.borrow_mut().push(token);
            }
            RawToken::CharacterTokens(text) => self.push_text(&text),
            RawToken::NullCharacterToken => self.push_text("\u{FFFD}"),
            // Comments, doctypes, EOF and parse errors carry nothing we emit
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Tokenize an HTML fragment into a flat event stream.
pub fn tokenize(html: &str) -> Vec<Token> {
    let tokenizer = Tokenizer::new(CollectSink::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    // The sink only ever answers Continue, so the tokenizer never pauses
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.tokens.take()
}
