use crate::{
    error::{Error, SyntaxError, SyntaxErrorKind},
    lexer::{self, Punctuation, Token},
    parser::{self, Node},
};

/// The tokens of one brace-balanced statement and the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub tokens: Vec<Token>,
    pub line: u32,
}

impl Unit {
    pub fn parse(&self) -> Result<Node, Error> {
        parser::parse(&self.tokens, self.line)
    }

    fn starts_with(&self, keyword: &str) -> bool {
        self.tokens.first().is_some_and(|t| t.is_ident(keyword))
    }
}

/// Accumulates tokenized lines until every `{` has its `}`.
#[derive(Debug, Default)]
pub struct UnitBuilder {
    tokens: Vec<Token>,
    line: u32,
    depth: usize,
}

impl UnitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line. Returns the finished unit once the braces balance.
    pub fn push(&mut self, tokens: Vec<Token>, line: u32) -> Result<Option<Unit>, SyntaxError> {
        if tokens.is_empty() {
            return Ok(None);
        }

        let mut depth = self.depth;
        for token in &tokens {
            if token.is_punct(Punctuation::LeftBrace) {
                depth += 1;
            } else if token.is_punct(Punctuation::RightBrace) {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SyntaxError::new(SyntaxErrorKind::UnsupportedStatement, line))?;
            }
        }

        if self.tokens.is_empty() {
            self.line = line;
        }
        self.tokens.extend(tokens);
        self.depth = depth;

        if depth > 0 {
            return Ok(None);
        }
        Ok(Some(Unit {
            tokens: std::mem::take(&mut self.tokens),
            line: self.line,
        }))
    }

    pub fn is_open(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Reopens a finished unit so that following lines are appended to it.
    pub fn resume(&mut self, unit: Unit) {
        self.tokens = unit.tokens;
        self.line = unit.line;
        self.depth = 0;
    }

    /// Fails if a block is still waiting for its closing brace.
    pub fn finish(&self) -> Result<(), SyntaxError> {
        match self.is_open() {
            true => Err(SyntaxError::new(SyntaxErrorKind::UnclosedBlock, self.line)),
            false => Ok(()),
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.depth = 0;
    }
}

/// A fully parsed source file.
///
/// Construction tokenizes and parses every line up front, so a syntax error
/// anywhere means nothing gets executed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    statements: Vec<Node>,
}

impl Program {
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut builder = UnitBuilder::new();
        // A finished `if` is held back in case the next line starts with `else`.
        let mut pending: Option<Unit> = None;
        let mut statements = Vec::new();

        for (index, text) in source.lines().enumerate() {
            let line = index as u32 + 1;
            let tokens = lexer::tokenize(text, line)?;
            if tokens.is_empty() {
                continue;
            }

            if let Some(unit) = pending.take() {
                if tokens[0].is_ident("else") {
                    builder.resume(unit);
                } else {
                    statements.push(unit.parse()?);
                }
            }

            if let Some(unit) = builder.push(tokens, line)? {
                if unit.starts_with("if") {
                    pending = Some(unit);
                } else {
                    statements.push(unit.parse()?);
                }
            }
        }

        if let Some(unit) = pending {
            statements.push(unit.parse()?);
        }
        builder.finish()?;

        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Self { statements })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.statements.iter()
    }

    pub fn statements(&self) -> &[Node] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
