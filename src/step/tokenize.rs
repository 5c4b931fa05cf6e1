//! Argument string tokenizer
//!
//! Splits a step's argument string into numbers, string literals, identifiers and
//! operators using the lexical rules of a general-purpose source lexer. Whitespace,
//! newlines, comments and line continuations are dropped. Indentation is tracked
//! outside brackets so that a dedent to an unknown level is rejected.

use crate::error::{StepError, StepResult};
use crate::step::token::{Token, TokenKind};

/// Operators, longest first so that matching is greedy
const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "!=", "%=", "&=", "**", "*=", "+=", "-=", "->", "//",
    "/=", ":=", "<<", "<=", "==", ">=", ">>", "@=", "^=", "|=", "%", "&", "(", ")", "*", "+",
    ",", "-", ".", "/", ":", ";", "<", "=", ">", "@", "[", "]", "^", "{", "|", "}", "~",
];

/// String prefixes that may precede a quote (compared lowercased)
const STRING_PREFIXES: &[&str] = &["r", "u", "f", "b", "br", "rb", "fr", "rf"];

/// Tokenize an argument string into typed tokens
pub fn tokenize(input: &str) -> StepResult<Vec<Token>> {
    Lexer::new(input).run()
}

/// Tokenize an argument string and keep only the token texts
pub fn tokenize_args(input: &str) -> StepResult<Vec<String>> {
    Ok(tokenize(input)?.into_iter().map(String::from).collect())
}

struct Lexer<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    brackets: Vec<char>,
    indents: Vec<usize>,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.chars().collect(),
            pos: 0,
            brackets: Vec::new(),
            indents: vec![0],
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> StepResult<Vec<Token>> {
        while let Some(c) = self.peek() {
            if self.at_line_start {
                self.indentation()?;
                continue;
            }
            match c {
                '\n' => {
                    self.pos += 1;
                    self.at_line_start = self.brackets.is_empty();
                }
                ' ' | '\t' | '\r' | '\x0c' => self.pos += 1,
                '#' => self.skip_comment(),
                '\\' => self.line_continuation()?,
                '\'' | '"' => self.string(self.pos)?,
                '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => self.number()?,
                c if c.is_ascii_digit() => self.number()?,
                c if is_ident_start(c) => self.identifier()?,
                _ => self.operator()?,
            }
        }

        if let Some(open) = self.brackets.last() {
            return Err(self.error(format!("'{}' was never closed", open)));
        }

        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn error(&self, reason: impl Into<String>) -> StepError {
        StepError::malformed(self.input, reason)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text: String = self.chars[start..self.pos].iter().collect();
        self.tokens.push(Token::new(kind, text));
    }

    /// Measure the leading whitespace of a logical line and check it against the
    /// indentation stack. Blank and comment-only lines are ignored.
    fn indentation(&mut self) -> StepResult<()> {
        self.at_line_start = false;

        let mut column = 0;
        while let Some(c) = self.peek() {
            match c {
                ' ' => column += 1,
                '\t' => column = (column / 8 + 1) * 8,
                '\x0c' => column = 0,
                _ => break,
            }
            self.pos += 1;
        }

        if matches!(self.peek(), None | Some('\n' | '\r' | '#' | '\\')) {
            return Ok(());
        }

        let current = self.indents.last().copied().unwrap_or(0);
        if column > current {
            self.indents.push(column);
            return Ok(());
        }
        while self.indents.last().is_some_and(|level| column < *level) {
            self.indents.pop();
        }
        if self.indents.last() != Some(&column) {
            return Err(self.error("unindent does not match any outer indentation level"));
        }
        Ok(())
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn line_continuation(&mut self) -> StepResult<()> {
        match (self.peek_at(1), self.peek_at(2)) {
            (Some('\n'), _) => self.pos += 2,
            (Some('\r'), Some('\n')) => self.pos += 3,
            (None, _) => self.pos += 1,
            _ => return Err(self.error("unexpected character after line continuation character")),
        }
        Ok(())
    }

    fn identifier(&mut self) -> StepResult<()> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }

        let word: String = self.chars[start..self.pos].iter().collect::<String>().to_lowercase();
        if matches!(self.peek(), Some('\'' | '"')) && STRING_PREFIXES.contains(&word.as_str()) {
            return self.string(start);
        }

        self.push(TokenKind::Identifier, start);
        Ok(())
    }

    /// Scan a string literal; `start` points at its prefix, `self.pos` at the opening quote
    fn string(&mut self, start: usize) -> StepResult<()> {
        let quote = self.chars[self.pos];
        let triple = self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote);
        self.pos += if triple { 3 } else { 1 };

        loop {
            let Some(c) = self.peek() else {
                let reason = if triple {
                    "unterminated triple-quoted string literal"
                } else {
                    "unterminated string literal"
                };
                return Err(self.error(reason));
            };

            match c {
                '\\' if self.peek_at(1) == Some('\r') && self.peek_at(2) == Some('\n') => {
                    self.pos += 3
                }
                '\\' => self.pos += 2,
                '\n' if !triple => return Err(self.error("unterminated string literal")),
                c if c == quote => {
                    if !triple {
                        self.pos += 1;
                        break;
                    }
                    if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                        self.pos += 3;
                        break;
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }

        self.push(TokenKind::String, start);
        Ok(())
    }

    fn number(&mut self) -> StepResult<()> {
        let start = self.pos;

        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(("hexadecimal", 16)),
            (Some('0'), Some('o' | 'O')) => Some(("octal", 8)),
            (Some('0'), Some('b' | 'B')) => Some(("binary", 2)),
            _ => None,
        };

        if let Some((name, radix)) = radix {
            self.pos += 2;
            if self.peek() == Some('_') && self.peek_at(1).is_some_and(|c| c.is_digit(radix)) {
                self.pos += 1;
            }
            if !self.digits(|c| c.is_digit(radix)) {
                return Err(self.error(format!("invalid {} literal", name)));
            }
            return self.finish_number(start, name);
        }

        let mut is_float = false;
        if self.peek() != Some('.') {
            self.digits(|c| c.is_ascii_digit());
        }

        if self.peek() == Some('.') {
            self.pos += 1;
            is_float = true;
            self.digits(|c| c.is_ascii_digit());
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if !self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error("invalid decimal literal"));
            }
            self.pos += 1 + sign;
            self.digits(|c| c.is_ascii_digit());
            is_float = true;
        }

        if matches!(self.peek(), Some('j' | 'J')) {
            self.pos += 1;
            is_float = true;
        }

        if !is_float {
            let digits: Vec<char> = self.chars[start..self.pos]
                .iter()
                .copied()
                .filter(|c| *c != '_')
                .collect();
            if digits.len() > 1 && digits[0] == '0' && digits.iter().any(|c| *c != '0') {
                return Err(self.error("leading zeros in decimal integer literals are not permitted"));
            }
        }

        self.finish_number(start, "decimal")
    }

    fn finish_number(&mut self, start: usize, name: &str) -> StepResult<()> {
        if self.peek().is_some_and(is_ident_continue) {
            return Err(self.error(format!("invalid {} literal", name)));
        }
        self.push(TokenKind::Number, start);
        Ok(())
    }

    /// Consume digits with single `_` separators; returns whether any digit was read
    fn digits(&mut self, is_digit: impl Fn(char) -> bool) -> bool {
        let mut any = false;
        while let Some(c) = self.peek() {
            if is_digit(c) {
                any = true;
                self.pos += 1;
            } else if c == '_' && any && self.peek_at(1).is_some_and(&is_digit) {
                self.pos += 1;
            } else {
                break;
            }
        }
        any
    }

    fn operator(&mut self) -> StepResult<()> {
        let rest: String = self.chars[self.pos..].iter().take(3).collect();
        let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
            let c = self.chars[self.pos];
            return Err(self.error(format!("invalid character '{}'", c)));
        };

        match *op {
            "(" | "[" | "{" => self.brackets.push(op.chars().next().unwrap_or('(')),
            ")" | "]" | "}" => self.close_bracket(op)?,
            _ => {}
        }

        let start = self.pos;
        self.pos += op.chars().count();
        self.push(TokenKind::Operator, start);
        Ok(())
    }

    fn close_bracket(&mut self, close: &str) -> StepResult<()> {
        let expected = match close {
            ")" => '(',
            "]" => '[',
            _ => '{',
        };
        match self.brackets.pop() {
            Some(open) if open == expected => Ok(()),
            Some(open) => Err(self.error(format!(
                "closing parenthesis '{}' does not match opening parenthesis '{}'",
                close, open
            ))),
            None => Err(self.error(format!("unmatched '{}'", close))),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
