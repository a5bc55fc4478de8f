//! Lexer module
//!
//! Line-oriented: comments are stripped per physical line, the rest is split
//! on whitespace. Any text is lexically valid, so tokenizing cannot fail.
//!
//! Line breaks are `\n`, `\r\n`, a lone `\r`, vertical tab, form feed, the
//! file/group/record separators `\x1c`-`\x1e`, NEL, and the Unicode line and
//! paragraph separators. The unit separator `\x1f` separates words only.

pub mod tokens;

pub use tokens::{Token, TokenKind, COMMENT_START};

use tracing::trace;

/// Tokenize source code
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (index, line) in source_lines(source).enumerate() {
        let code = match line.split_once(COMMENT_START) {
            Some((code, _comment)) => code,
            None => line,
        };

        tokens.extend(
            code.split(is_separator)
                .filter(|word| !word.is_empty())
                .map(|word| Token::new(word, index + 1)),
        );
    }

    trace!("Tokenized {} bytes into {} tokens", source.len(), tokens.len());
    tokens
}

/// Whether `c` ends a line
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whether `c` separates words on a line
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Split `source` into physical lines; `\r\n` counts as one break
fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(source);
    std::iter::from_fn(move || {
        let text = rest?;
        match text.find(is_line_break) {
            Some(at) => {
                let tail = &text[at..];
                let width = if tail.starts_with("\r\n") {
                    2
                } else {
                    tail.chars().next().map_or(1, char::len_utf8)
                };
                rest = Some(&tail[width..]);
                Some(&text[..at])
            }
            None => {
                rest = None;
                Some(text)
            }
        }
    })
}

#[cfg(test)]
mod tests;
