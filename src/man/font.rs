//! Inline font state.
//!
//! Inline emphasis cannot be rendered straight to nroff while streaming: the
//! text of a block is only escaped once its closing tag arrives. Font
//! switches are therefore recorded as private markers inside a [`TextRun`]
//! and resolved to `\fB` / `\fI` / `\fP` by [`TextRun::manify`], after the
//! surrounding text has been escaped. Markers never reach the HTML output.

use super::escape::{escape_backslashes, neutralize_line_starts};

/// Font switch recorded in a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontMarker {
    Bold,
    Italic,
    Normal,
}

impl FontMarker {
    fn escape(self) -> &'static str {
        match self {
            FontMarker::Bold => "\\fB",
            FontMarker::Italic => "\\fI",
            FontMarker::Normal => "\\fP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Font(FontMarker),
}

/// Raw text collected for one block element, with pending font switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    pieces: Vec<Piece>,
}

impl TextRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw (unescaped) text.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Piece::Text(last)) = self.pieces.last_mut() {
            last.push_str(text);
        } else {
            self.pieces.push(Piece::Text(text.to_string()));
        }
    }

    fn push_font(&mut self, marker: FontMarker) {
        self.pieces.push(Piece::Font(marker));
    }

    /// True when neither text nor font switches were collected.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Take the collected run, leaving this one empty.
    pub fn take(&mut self) -> TextRun {
        std::mem::take(self)
    }

    /// Drop leading characters matching `pat` up to the first font switch.
    pub fn trim_start_matches(mut self, pat: impl Fn(char) -> bool) -> Self {
        while let Some(Piece::Text(text)) = self.pieces.first_mut() {
            let trimmed = text.trim_start_matches(&pat);
            if trimmed.is_empty() {
                self.pieces.remove(0);
            } else {
                *text = trimmed.to_string();
                break;
            }
        }
        self
    }

    /// Drop trailing characters matching `pat` back to the last font switch.
    pub fn trim_end_matches(mut self, pat: impl Fn(char) -> bool) -> Self {
        while let Some(Piece::Text(text)) = self.pieces.last_mut() {
            let len = text.trim_end_matches(&pat).len();
            if len == 0 {
                self.pieces.pop();
            } else {
                text.truncate(len);
                break;
            }
        }
        self
    }

    pub fn trim(self) -> Self {
        self.trim_start_matches(char::is_whitespace)
            .trim_end_matches(char::is_whitespace)
    }

    /// The collected text without any font switches.
    pub fn plain_text(&self) -> String {
        self.pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Text(text) => Some(text.as_str()),
                Piece::Font(_) => None,
            })
            .collect()
    }

    /// Render the run as nroff text.
    ///
    /// Backslashes in the text are doubled before the font escapes are put in
    /// place, and control-character line starts are neutralized last.
    pub fn manify(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(&escape_backslashes(text)),
                Piece::Font(marker) => out.push_str(marker.escape()),
            }
        }
        neutralize_line_starts(&out).into_owned()
    }
}

/// Inline element affecting the man page font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Bold,
    Italic,
    /// Rendered bold, except inside preformatted blocks where it is inert.
    Code,
}

impl FontKind {
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "strong" | "b" => Some(FontKind::Bold),
            "em" | "i" => Some(FontKind::Italic),
            "code" => Some(FontKind::Code),
            _ => None,
        }
    }

    fn marker(self) -> FontMarker {
        match self {
            FontKind::Bold | FontKind::Code => FontMarker::Bold,
            FontKind::Italic => FontMarker::Italic,
        }
    }
}

/// Tracks which inline font elements are open.
#[derive(Debug, Default)]
pub struct FontStack {
    open: Vec<FontKind>,
    preformatted: bool,
}

impl FontStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_preformatted(&mut self, preformatted: bool) {
        self.preformatted = preformatted;
    }

    /// Record the start of an inline font element.
    pub fn open(&mut self, kind: FontKind, run: &mut TextRun) {
        if kind == FontKind::Code && self.preformatted {
            return;
        }
        self.open.push(kind);
        run.push_font(kind.marker());
    }

    /// Record the end of an inline font element.
    ///
    /// Ends without a matching open element (such as `</code>` inside a
    /// preformatted block) are inert.
    pub fn close(&mut self, kind: FontKind, run: &mut TextRun) {
        if let Some(pos) = self.open.iter().rposition(|&k| k == kind) {
            self.open.remove(pos);
            run.push_font(FontMarker::Normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_resolves_on_manify() {
        let mut fonts = FontStack::new();
        let mut run = TextRun::new();
        run.push_text("use ");
        fonts.open(FontKind::Bold, &mut run);
        run.push_text("this");
        fonts.close(FontKind::Bold, &mut run);
        assert_eq!(run.manify(), "use \\fBthis\\fP");
        assert_eq!(run.plain_text(), "use this");
        // Already closed
        fonts.close(FontKind::Bold, &mut run);
        assert_eq!(run.manify(), "use \\fBthis\\fP");
    }

    #[test]
    fn test_code_is_bold_outside_pre() {
        let mut fonts = FontStack::new();
        let mut run = TextRun::new();
        fonts.open(FontKind::Code, &mut run);
        run.push_text("--help");
        fonts.close(FontKind::Code, &mut run);
        assert_eq!(run.manify(), "\\fB--help\\fP");
    }

    #[test]
    fn test_code_is_inert_in_pre() {
        let mut fonts = FontStack::new();
        let mut run = TextRun::new();
        fonts.set_preformatted(true);
        fonts.open(FontKind::Code, &mut run);
        run.push_text("ls -l");
        fonts.close(FontKind::Code, &mut run);
        assert_eq!(run.manify(), "ls -l");
    }

    #[test]
    fn test_backslash_in_text_not_confused_with_escape() {
        let mut fonts = FontStack::new();
        let mut run = TextRun::new();
        fonts.open(FontKind::Italic, &mut run);
        run.push_text("C:\\fB");
        fonts.close(FontKind::Italic, &mut run);
        assert_eq!(run.manify(), "\\fIC:\\\\fB\\fP");
    }

    #[test]
    fn test_trim_stops_at_font_switch() {
        let mut fonts = FontStack::new();
        let mut run = TextRun::new();
        run.push_text("\n  ");
        fonts.open(FontKind::Bold, &mut run);
        run.push_text(" x ");
        fonts.close(FontKind::Bold, &mut run);
        run.push_text(" \n");
        assert_eq!(run.trim().manify(), "\\fB x \\fP");
    }

    #[test]
    fn test_trim_whitespace_only_is_empty() {
        let mut run = TextRun::new();
        run.push_text(" \n\t ");
        assert!(run.trim().is_empty());
    }

    #[test]
    fn test_manify_neutralizes_each_line() {
        let mut run = TextRun::new();
        run.push_text(".start\nmid\n'quote");
        assert_eq!(run.manify(), "\\&.start\nmid\n\\&'quote");
    }

    #[test]
    fn test_unmatched_close_is_inert() {
        let mut fonts = FontStack::new();
        let mut run = TextRun::new();
        fonts.close(FontKind::Italic, &mut run);
        assert!(run.is_empty());
    }
}
