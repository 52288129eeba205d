pub mod formatter;

use crate::string::IdentName;
use crate::{parser::BinaryOperator, value::Value};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Invalid float `{0}`")]
    InvalidFloat(CompactString),
    #[error("Invalid integer `{0}`")]
    InvalidInt(CompactString),
    #[error("Unknown token `{0}`")]
    UnrecognizedToken(char),
    #[error("Unsupported statement")]
    UnsupportedStatement,
    #[error("`{0}` is a reserved keyword and cannot be assigned to")]
    ReservedKeyword(IdentName),
    #[error("Block is never closed")]
    UnclosedBlock,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] {kind}")]
pub struct SyntaxError {
    #[source]
    pub kind: SyntaxErrorKind,
    pub line: u32,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            SyntaxErrorKind::UnterminatedString => "SY001",
            SyntaxErrorKind::InvalidFloat(_) => "SY002",
            SyntaxErrorKind::InvalidInt(_) => "SY003",
            SyntaxErrorKind::UnrecognizedToken(_) => "SY004",
            SyntaxErrorKind::UnsupportedStatement => "SY005",
            SyntaxErrorKind::ReservedKeyword(_) => "SY006",
            SyntaxErrorKind::UnclosedBlock => "SY007",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Undefined variable `{0}`")]
    UndefinedVariable(IdentName),
    #[error("Invalid coercion, could not convert {} `{value}` to {target}", .value.type_name())]
    InvalidCoercion { value: Value, target: &'static str },
    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(CompactString),
    #[error(
        "Unsupported operand types for `{operator}`: {} and {}",
        .lhs.type_name(),
        .rhs.type_name()
    )]
    InvalidOperands {
        operator: BinaryOperator,
        lhs: Value,
        rhs: Value,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow")]
    IntegerOverflow,
    #[error("Invalid sleep duration `{0}`")]
    InvalidDuration(Value),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] {kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    pub line: u32,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::UndefinedVariable(_) => "RT001",
            RuntimeErrorKind::InvalidCoercion { .. } => "RT002",
            RuntimeErrorKind::UnsupportedStatement(_) => "RT003",
            RuntimeErrorKind::InvalidOperands { .. } => "RT004",
            RuntimeErrorKind::DivisionByZero => "RT005",
            RuntimeErrorKind::IntegerOverflow => "RT006",
            RuntimeErrorKind::InvalidDuration(_) => "RT007",
        }
    }
}

/// The interpreter itself broke an invariant. Never a mistake in the script.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] Oh crumbs, muffin had an issue: {message}")]
pub struct InternalError {
    pub message: String,
    pub line: u32,
}

impl InternalError {
    pub fn new(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    pub fn line(&self) -> u32 {
        match self {
            Error::Syntax(e) => e.line,
            Error::Runtime(e) => e.line,
            Error::Internal(e) => e.line,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Syntax(e) => e.code(),
            Error::Runtime(e) => e.code(),
            Error::Internal(_) => "IN001",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Error::Syntax(_) => "SyntaxError",
            Error::Runtime(_) => "RuntimeError",
            Error::Internal(_) => "InternalError",
        }
    }

    /// The error text without the line prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Syntax(e) => e.kind.to_string(),
            Error::Runtime(e) => e.kind.to_string(),
            Error::Internal(e) => e.message.clone(),
        }
    }
}
