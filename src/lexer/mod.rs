pub mod formatter;
mod token;

use crate::error::{SyntaxError, SyntaxErrorKind};
use std::{iter::Peekable, str::CharIndices};
pub use token::{Punctuation, Token};

/// Splits a single source line into tokens.
///
/// The line is stripped of surrounding whitespace first, so a blank or
/// comment-only line produces no tokens at all.
pub fn tokenize(line: &str, line_number: u32) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(line, line_number);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    tracing::trace!(line = line_number, count = tokens.len(), "tokenized line");
    Ok(tokens)
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, line: u32) -> Self {
        let source = source.trim();
        Self {
            source,
            chars: source.char_indices().peekable(),
            line,
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.line)
    }

    fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn current_offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(offset, _)| offset)
            .unwrap_or(self.source.len())
    }

    /// Returns `Ok(None)` once the line (or the code before a comment) is used up.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        use Punctuation as P;
        loop {
            let Some((start, c)) = self.chars.next() else {
                return Ok(None);
            };

            let punctuation = match c {
                // Single character tokens
                '(' => P::LeftParenthesis,
                ')' => P::RightParenthesis,
                '{' => P::LeftBrace,
                '}' => P::RightBrace,
                '[' => P::LeftBracket,
                ']' => P::RightBracket,
                '+' => P::Plus,
                '-' => P::Minus,
                '*' => P::Star,
                '%' => P::Percent,
                // Comment or division
                '/' => {
                    if self.eat('/') {
                        self.chars.by_ref().for_each(drop);
                        return Ok(None);
                    }
                    P::Slash
                }
                // One or two character operators
                '=' => match self.eat('=') {
                    true => P::EqualEqual,
                    false => P::Equal,
                },
                '!' => match self.eat('=') {
                    true => P::BangEqual,
                    false => return Err(self.error(SyntaxErrorKind::UnrecognizedToken('!'))),
                },
                '>' => match self.eat('=') {
                    true => P::GreaterThanEqual,
                    false => P::GreaterThan,
                },
                '<' => match self.eat('=') {
                    true => P::LessThanEqual,
                    false => P::LessThan,
                },
                // Literals and identifiers
                '"' => return self.lex_string(start).map(Some),
                c if c.is_ascii_digit() || c == '.' => return self.lex_number(start).map(Some),
                c if c.is_alphabetic() => return Ok(Some(self.lex_word(start))),
                // Separators
                ',' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(self.error(SyntaxErrorKind::UnrecognizedToken(c))),
            };
            return Ok(Some(Token::Punctuation(punctuation)));
        }
    }

    fn lex_word(&mut self, start: usize) -> Token {
        while self.chars.next_if(|&(_, c)| c.is_alphanumeric()).is_some() {}
        let end = self.current_offset();
        match &self.source[start..end] {
            "true" => Token::BoolLiteral(true),
            "false" => Token::BoolLiteral(false),
            "null" => Token::NullLiteral,
            word => Token::Ident(word.into()),
        }
    }

    fn lex_string(&mut self, start: usize) -> Result<Token, SyntaxError> {
        for (offset, c) in self.chars.by_ref() {
            if c == '"' {
                return Ok(Token::StringLiteral(self.source[start + 1..offset].into()));
            }
        }
        Err(self.error(SyntaxErrorKind::UnterminatedString))
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, SyntaxError> {
        while self
            .chars
            .next_if(|&(_, c)| c.is_ascii_digit() || c == '.')
            .is_some()
        {}
        let end = self.current_offset();
        let lexeme = &self.source[start..end];
        match lexeme.matches('.').count() {
            0 => lexeme
                .parse()
                .map(Token::IntLiteral)
                .map_err(|_| self.error(SyntaxErrorKind::InvalidInt(lexeme.into()))),
            1 => lexeme
                .parse()
                .map(Token::FloatLiteral)
                .map_err(|_| self.error(SyntaxErrorKind::InvalidFloat(lexeme.into()))),
            _ => Err(self.error(SyntaxErrorKind::InvalidFloat(lexeme.into()))),
        }
    }
}
