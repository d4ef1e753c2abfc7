//! Tag rewriter: HTML token stream → HTML body + nroff body.
//!
//! A single forward pass over the [`Token`]s. Every token is appended to the
//! HTML body (escaped, and retagged where description lists need it) while
//! the nroff body gets the macros for block structure and one manified line
//! per block of text. Text is collected in a [`TextRun`] and only flushed
//! when the block element holding it ends.

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::token::{Attribute, Token};

use super::escape::{escape_html, quote_macro_arg};
use super::font::{FontKind, FontStack, TextRun};
use super::list::{FrameKind, ListKind, ListStack, ParagraphMacro};

/// How a tag name is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagRole {
    SectionHeading,
    Paragraph,
    ListItem,
    List(ListKind),
    BlockQuote,
    Preformatted,
    Font(FontKind),
    /// Copied to the HTML body; its text joins the enclosing block.
    PassThrough,
}

impl TagRole {
    fn of(name: &str) -> Self {
        match name {
            "h1" => TagRole::SectionHeading,
            "p" => TagRole::Paragraph,
            "li" => TagRole::ListItem,
            "ol" => TagRole::List(ListKind::Ordered),
            "ul" => TagRole::List(ListKind::Unordered),
            "blockquote" => TagRole::BlockQuote,
            "pre" => TagRole::Preformatted,
            _ => FontKind::from_tag(name).map_or(TagRole::PassThrough, TagRole::Font),
        }
    }

    /// Whether the end tag flushes the collected text.
    fn consumes_text(self) -> bool {
        matches!(
            self,
            TagRole::SectionHeading | TagRole::Paragraph | TagRole::ListItem | TagRole::Preformatted
        )
    }
}

/// The two bodies produced from one token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub man: String,
}

/// Streaming state of one document.
#[derive(Debug, Default)]
pub struct Rewriter {
    html: String,
    man: String,
    text: TextRun,
    fonts: FontStack,
    lists: ListStack,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one token.
    pub fn feed(&mut self, token: Token) -> Result<()> {
        trace!(?token, "token");
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => self.start_tag(&name, &attrs, self_closing)?,
            Token::EndTag { name } => self.end_tag(&name)?,
            Token::Text(text) => self.text(&text),
        }
        Ok(())
    }

    /// End of stream: flush stray text and hand out both bodies.
    pub fn finish(mut self) -> Rendered {
        let rest = self.text.take().trim();
        if !rest.is_empty() {
            self.push_line(&rest);
        }
        if !self.lists.is_empty() {
            debug!(depth = self.lists.depth(), "lists still open at end of stream");
        }
        Rendered {
            html: self.html,
            man: self.man,
        }
    }

    fn start_tag(&mut self, name: &str, attrs: &[Attribute], self_closing: bool) -> Result<()> {
        let role = TagRole::of(name);
        let mut suppress_paragraph = self.lists.take_body_start();
        let mut labelling = false;
        let mut tag = name;
        let mut attrs = attrs;

        if let Some(kind) = self.lists.take_first_child() {
            if kind == FrameKind::Description {
                if matches!(role, TagRole::List(_)) {
                    return Err(Error::MalformedDescriptionList(format!(
                        "item {:?} of a list starting at 0 begins with a nested <{name}> instead of a label",
                        self.text.plain_text().trim()
                    )));
                }
                // The first child of a description item holds its label
                labelling = true;
                if name == "p" {
                    tag = "dt";
                } else {
                    self.html.push_str("<dt>");
                }
                self.lists.begin_label(name);
            } else if name == "p" {
                suppress_paragraph = true;
            }
        }

        match role {
            TagRole::Paragraph => {
                if tag == "p" && !suppress_paragraph {
                    self.man.push_str(self.lists.paragraph_macro().as_line());
                }
            }
            TagRole::ListItem => {
                let kind = self.lists.enter_item(&mut self.man);
                if kind == Some(&FrameKind::Description) {
                    // <dt>/<dd> replace the <li>
                    return Ok(());
                }
            }
            TagRole::List(kind) => {
                // Text of a tight parent item precedes the nested list
                let pending = self.text.take().trim();
                if !pending.is_empty() {
                    self.push_line(&pending);
                }
                let start = match kind {
                    ListKind::Ordered => list_start(attrs),
                    ListKind::Unordered => 1,
                };
                if *self.lists.enter_list(kind, start, &mut self.man) == FrameKind::Description {
                    tag = "dl";
                    attrs = &[];
                }
            }
            TagRole::BlockQuote => self.man.push_str(".RS 4\n"),
            TagRole::Preformatted => {
                self.fonts.set_preformatted(true);
                if !labelling {
                    self.man.push_str(self.lists.paragraph_macro().as_line());
                    self.man.push_str(".nf\n");
                }
            }
            TagRole::Font(kind) => self.fonts.open(kind, &mut self.text),
            TagRole::SectionHeading | TagRole::PassThrough => {}
        }

        self.push_start_tag(tag, attrs, self_closing);
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        let role = TagRole::of(name);
        let closes_label = self.lists.closes_label(name);
        let mut run = (role.consumes_text() || closes_label).then(|| self.flush(role));
        let mut tag = name;
        let mut font_close = None;

        match role {
            // A block holding a label leaves its text to the label macro
            TagRole::SectionHeading if closes_label => {}
            TagRole::SectionHeading => {
                let heading = run.take().unwrap_or_default();
                self.man.push_str(ParagraphMacro::Paragraph.as_line());
                self.man.push_str(&format!(
                    ".SH \"{}\"\n",
                    quote_macro_arg(&heading.manify())
                ));
            }
            TagRole::Paragraph => {
                if closes_label {
                    tag = "dt";
                } else if let Some(text) = run.take()
                    && !text.is_empty()
                {
                    self.push_line(&text);
                }
            }
            TagRole::ListItem => {
                let text = run.take().unwrap_or_default();
                if self.lists.exit_item(&text.plain_text())? == Some(FrameKind::Description) {
                    tag = "dd";
                }
                if !text.is_empty() {
                    self.push_line(&text);
                }
            }
            TagRole::List(_) => {
                if self.lists.exit_list(&mut self.man) == Some(FrameKind::Description) {
                    tag = "dl";
                }
            }
            TagRole::BlockQuote => self.man.push_str(".RE\n"),
            TagRole::Preformatted if closes_label => self.fonts.set_preformatted(false),
            TagRole::Preformatted => {
                self.fonts.set_preformatted(false);
                if let Some(text) = run.take()
                    && !text.is_empty()
                {
                    self.push_line(&text);
                }
                self.man.push_str(".fi\n");
            }
            TagRole::Font(kind) => font_close = Some(kind),
            TagRole::PassThrough => {}
        }

        self.html.push_str(&format!("</{tag}>"));

        if let Some(kind) = font_close {
            match run.as_mut() {
                Some(label) => self.fonts.close(kind, label),
                None => self.fonts.close(kind, &mut self.text),
            }
        }

        if closes_label {
            let label = run.unwrap_or_default();
            self.man.push_str(&format!(
                ".IP \"{}\"\n",
                quote_macro_arg(&label.manify())
            ));
            if tag == "dt" {
                self.html.push_str("<dd>");
            } else {
                self.html.push_str("</dt><dd>");
            }
            self.lists.finish_label();
        }

        Ok(())
    }

    fn text(&mut self, text: &str) {
        if text.contains("](") {
            warn!(text, "text looks like an unrendered markdown link");
        }
        self.html.push_str(&escape_html(text));
        self.text.push_text(text);
    }

    /// Take the collected text for the block closed by a `role` end tag.
    fn flush(&mut self, role: TagRole) -> TextRun {
        let run = self.text.take();
        if role == TagRole::Preformatted {
            // Keep the indentation of the first line
            run.trim_start_matches(|c| c == '\n' || c == '\r')
                .trim_end_matches(char::is_whitespace)
        } else {
            run.trim()
        }
    }

    fn push_line(&mut self, text: &TextRun) {
        self.man.push_str(&text.manify());
        self.man.push('\n');
    }

    fn push_start_tag(&mut self, tag: &str, attrs: &[Attribute], self_closing: bool) {
        self.html.push('<');
        self.html.push_str(tag);
        for attr in attrs {
            self.html.push(' ');
            self.html.push_str(&attr.name);
            self.html.push_str("=\"");
            self.html.push_str(&escape_html(&attr.value));
            self.html.push('"');
        }
        if self_closing {
            self.html.push_str(" />");
        } else {
            self.html.push('>');
        }
    }
}

/// The `start` attribute of an `<ol>`, defaulting to 1.
fn list_start(attrs: &[Attribute]) -> u32 {
    let Some(attr) = attrs.iter().find(|a| a.name == "start") else {
        return 1;
    };
    match attr.value.trim().parse() {
        Ok(start) => start,
        Err(_) => {
            warn!(value = %attr.value, "ignoring unusable ordered list start");
            1
        }
    }
}

/// Rewrite a whole token stream.
///
/// Fails without producing any output if the stream holds a malformed
/// description list.
pub fn rewrite<I>(tokens: I) -> Result<Rendered>
where
    I: IntoIterator<Item = Token>,
{
    let mut rewriter = Rewriter::new();
    for token in tokens {
        rewriter.feed(token)?;
    }
    Ok(rewriter.finish())
}
