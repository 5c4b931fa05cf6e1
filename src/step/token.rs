//! Lexical tokens produced from a step's argument string

use std::fmt;

/// Category of a retained token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Numeric literal (`5`, `0x1f`, `1.5e3`, `2j`)
    Number,
    /// Quoted string literal, kept exactly as written including prefix and quotes
    String,
    /// Identifier or keyword
    Identifier,
    /// Operator or punctuation symbol
    Operator,
}

/// A single token of an argument string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// Get the literal text of the token
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.text
    }
}

/// Decode the value of a string literal token such as `'abc'`, `"a\tb"` or `r'\d'`.
///
/// Returns `None` when `literal` is not a quoted string. Byte and format prefixes
/// are accepted and ignored; only the raw prefix changes how escapes are read.
pub fn unquote(literal: &str) -> Option<String> {
    let quote_at = literal.find(['\'', '"'])?;
    let (prefix, rest) = literal.split_at(quote_at);
    if !prefix
        .chars()
        .all(|c| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'u' | 'f'))
    {
        return None;
    }
    let raw = prefix.chars().any(|c| c.eq_ignore_ascii_case(&'r'));

    let quote = rest.chars().next()?;
    let triple: String = std::iter::repeat(quote).take(3).collect();
    let delim = if rest.len() >= 6 && rest.starts_with(&triple) && rest.ends_with(&triple) {
        triple
    } else {
        quote.to_string()
    };
    if rest.len() < delim.len() * 2 || !rest.ends_with(&delim) {
        return None;
    }
    let body = &rest[delim.len()..rest.len() - delim.len()];

    if raw {
        return Some(body.to_string());
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}

/// Decode `arg` if it is a string literal, otherwise return it unchanged
pub fn unquote_or_raw(arg: &str) -> String {
    unquote(arg).unwrap_or_else(|| arg.to_string())
}
