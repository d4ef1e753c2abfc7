//! Pure escaping utilities for both outputs.
//!
//! - HTML: entity escaping of `&`, `<`, `>` and `"`
//! - nroff: backslash doubling, and neutralizing lines that begin with one of
//!   the two control characters (`.` and `'`) by prefixing the zero-width
//!   escape `\&`

use std::borrow::Cow;

use memchr::{memchr, memchr2, memchr3};

/// Escape text for inclusion in HTML content or a double-quoted attribute.
///
/// # Examples
///
/// ```
/// use roffdown::man::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr3(b'&', b'<', b'>', bytes).is_none() && memchr(b'"', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Double every backslash so nroff prints it literally.
pub fn escape_backslashes(text: &str) -> Cow<'_, str> {
    if memchr(b'\\', text.as_bytes()).is_none() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace('\\', "\\\\"))
    }
}

/// Prefix `\&` to every line whose first character is `.` or `'`.
pub fn neutralize_line_starts(text: &str) -> Cow<'_, str> {
    if !text.split('\n').any(starts_with_control) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 8);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if starts_with_control(line) {
            result.push_str("\\&");
        }
        result.push_str(line);
    }
    Cow::Owned(result)
}

fn starts_with_control(line: &str) -> bool {
    line.starts_with('.') || line.starts_with('\'')
}

/// Make plain text safe to emit as nroff body text.
///
/// # Examples
///
/// ```
/// use roffdown::man::manify;
///
/// assert_eq!(manify("C:\\dir"), "C:\\\\dir");
/// assert_eq!(manify(".hidden\n'quoted'"), "\\&.hidden\n\\&'quoted'");
/// assert_eq!(manify("safe text"), "safe text");
/// ```
pub fn manify(text: &str) -> String {
    neutralize_line_starts(&escape_backslashes(text)).into_owned()
}

/// Make already-manified text safe inside a double-quoted macro argument.
///
/// The argument must stay on the macro's line, so line breaks become spaces.
pub fn quote_macro_arg(text: &str) -> Cow<'_, str> {
    if memchr2(b'"', b'\n', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '"' => result.push_str("\\(dq"),
            '\n' => result.push(' '),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
