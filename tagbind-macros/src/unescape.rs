//! Resolves Rust string escapes in tag values.

use core::fmt;
use core::iter::Peekable;
use core::str::CharIndices;

/// Errors that can occur while unescaping a tag value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnescapeError {
    /// A character that does not start an escape follows a backslash
    IllegalEscape { index: usize, found: char },
    /// The string ends right after a backslash
    TrailingBackslash { index: usize },
    /// `\x` not followed by two hex digits of an ASCII value
    InvalidHexEscape { index: usize },
    /// `\u` not followed by `{1-6 hex digits}` naming a scalar value
    InvalidUnicodeEscape { index: usize },
}

impl fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnescapeError::IllegalEscape { index, found } => {
                write!(f, "unsupported escape `\\{found}` at index {index} in tag value")
            }
            UnescapeError::TrailingBackslash { index } => {
                write!(f, "unterminated escape at index {index} in tag value")
            }
            UnescapeError::InvalidHexEscape { index } => {
                write!(f, "invalid hex escape at index {index} in tag value")
            }
            UnescapeError::InvalidUnicodeEscape { index } => {
                write!(f, "invalid unicode escape at index {index} in tag value")
            }
        }
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Unescapes the body of a string literal (without its quotes).
///
/// Handles the escapes Rust string literals allow: `\\ \" \' \n \r \t \0`,
/// `\xNN` (ASCII), `\u{N..}`, and a backslash before a newline, which skips
/// the newline and the indentation after it.
pub(crate) fn unescape(s: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '\\')) => out.push('\\'),
            Some((_, '"')) => out.push('"'),
            Some((_, '\'')) => out.push('\''),
            Some((_, 'n')) => out.push('\n'),
            Some((_, 'r')) => out.push('\r'),
            Some((_, 't')) => out.push('\t'),
            Some((_, '0')) => out.push('\0'),
            Some((_, 'x')) => out.push(hex_escape(&mut chars, index)?),
            Some((_, 'u')) => out.push(unicode_escape(&mut chars, index)?),
            Some((_, '\n')) => {
                while chars.next_if(|&(_, c)| c.is_ascii_whitespace()).is_some() {}
            }
            Some((_, found)) => return Err(UnescapeError::IllegalEscape { index, found }),
            None => return Err(UnescapeError::TrailingBackslash { index }),
        }
    }
    Ok(out)
}

fn hex_escape(chars: &mut Chars<'_>, index: usize) -> Result<char, UnescapeError> {
    let mut value = 0u32;
    for _ in 0..2 {
        match chars.next().and_then(|(_, c)| c.to_digit(16)) {
            Some(digit) => value = value * 16 + digit,
            None => return Err(UnescapeError::InvalidHexEscape { index }),
        }
    }
    if value > 0x7f {
        return Err(UnescapeError::InvalidHexEscape { index });
    }
    char::from_u32(value).ok_or(UnescapeError::InvalidHexEscape { index })
}

fn unicode_escape(chars: &mut Chars<'_>, index: usize) -> Result<char, UnescapeError> {
    let invalid = UnescapeError::InvalidUnicodeEscape { index };
    if !matches!(chars.next(), Some((_, '{'))) {
        return Err(invalid);
    }

    let mut value = 0u32;
    let mut digits = 0;
    loop {
        match chars.next() {
            Some((_, '}')) => break,
            Some((_, '_')) => {}
            Some((_, c)) if digits < 6 => match c.to_digit(16) {
                Some(digit) => {
                    digits += 1;
                    value = value * 16 + digit;
                }
                None => return Err(invalid),
            },
            _ => return Err(invalid),
        }
    }

    if digits == 0 {
        return Err(invalid);
    }
    char::from_u32(value).ok_or(invalid)
}
