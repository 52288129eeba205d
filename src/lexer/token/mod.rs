use crate::parser::BinaryOperator;
use crate::string::IdentName;
use compact_str::CompactString;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
    // Parentheses
    LeftParenthesis,
    RightParenthesis,
    // Braces
    LeftBrace,
    RightBrace,
    // Brackets
    LeftBracket,
    RightBracket,
    // Miscellaneous
    Comma,
    Equal,
    // Operators
    EqualEqual,
    BangEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

impl Punctuation {
    pub fn lexeme(&self) -> &'static str {
        match self {
            Punctuation::LeftParenthesis => "(",
            Punctuation::RightParenthesis => ")",
            Punctuation::LeftBrace => "{",
            Punctuation::RightBrace => "}",
            Punctuation::LeftBracket => "[",
            Punctuation::RightBracket => "]",
            Punctuation::Comma => ",",
            Punctuation::Equal => "=",
            Punctuation::EqualEqual => "==",
            Punctuation::BangEqual => "!=",
            Punctuation::GreaterThan => ">",
            Punctuation::GreaterThanEqual => ">=",
            Punctuation::LessThan => "<",
            Punctuation::LessThanEqual => "<=",
            Punctuation::Plus => "+",
            Punctuation::Minus => "-",
            Punctuation::Star => "*",
            Punctuation::Slash => "/",
            Punctuation::Percent => "%",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Punctuation::LeftParenthesis => "LEFT_PAREN",
            Punctuation::RightParenthesis => "RIGHT_PAREN",
            Punctuation::LeftBrace => "LEFT_BRACE",
            Punctuation::RightBrace => "RIGHT_BRACE",
            Punctuation::LeftBracket => "LEFT_BRACKET",
            Punctuation::RightBracket => "RIGHT_BRACKET",
            Punctuation::Comma => "COMMA",
            Punctuation::Equal => "EQUAL",
            Punctuation::EqualEqual => "EQUAL_EQUAL",
            Punctuation::BangEqual => "BANG_EQUAL",
            Punctuation::GreaterThan => "GREATER",
            Punctuation::GreaterThanEqual => "GREATER_EQUAL",
            Punctuation::LessThan => "LESS",
            Punctuation::LessThanEqual => "LESS_EQUAL",
            Punctuation::Plus => "PLUS",
            Punctuation::Minus => "MINUS",
            Punctuation::Star => "STAR",
            Punctuation::Slash => "SLASH",
            Punctuation::Percent => "PERCENT",
        }
    }

    pub fn binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Punctuation::Plus => Some(BinaryOperator::Add),
            Punctuation::Minus => Some(BinaryOperator::Subtract),
            Punctuation::Star => Some(BinaryOperator::Multiply),
            Punctuation::Slash => Some(BinaryOperator::Divide),
            Punctuation::Percent => Some(BinaryOperator::Remainder),
            Punctuation::EqualEqual => Some(BinaryOperator::EqualEqual),
            Punctuation::BangEqual => Some(BinaryOperator::BangEqual),
            Punctuation::GreaterThan => Some(BinaryOperator::GreaterThan),
            Punctuation::GreaterThanEqual => Some(BinaryOperator::GreaterThanEqual),
            Punctuation::LessThan => Some(BinaryOperator::LessThan),
            Punctuation::LessThanEqual => Some(BinaryOperator::LessThanEqual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(IdentName),
    /// The text between the quotes. Interpolation happens at evaluation time.
    StringLiteral(CompactString),
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),
    NullLiteral,
    Punctuation(Punctuation),
}

impl Token {
    pub fn is_punct(&self, punctuation: Punctuation) -> bool {
        matches!(self, Token::Punctuation(p) if *p == punctuation)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Token::Ident(ident) if ident.as_str() == name)
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Token::Ident(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Token::Punctuation(p) => p.binary_operator(),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{name}"),
            Token::StringLiteral(text) => write!(f, "\"{text}\""),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::FloatLiteral(v) => write!(f, "{v:?}"),
            Token::BoolLiteral(v) => write!(f, "{v}"),
            Token::NullLiteral => write!(f, "null"),
            Token::Punctuation(p) => write!(f, "{}", p.lexeme()),
        }
    }
}
