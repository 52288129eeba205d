pub mod formatter;
mod node;
mod operator;

pub use node::{Node, NodeKind};
pub use operator::BinaryOperator;

use crate::error::{Error, RuntimeError, RuntimeErrorKind, SyntaxError, SyntaxErrorKind};
use crate::lexer::{Punctuation, Token};
use crate::string::{is_reserved, IdentName};
use crate::value::Value;

/// Parses one statement's worth of tokens into a single node.
///
/// Multi-line `if`/`for` statements arrive here already joined into one token
/// run. Tokens left over after the statement are an error.
pub fn parse(tokens: &[Token], line: u32) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens, line);
    let node = parser.parse_statement()?;
    parser.expect_end()?;
    tracing::trace!(line, ?node, "parsed statement");
    Ok(node)
}

/// Recursive descent over a flat token slice.
///
/// Every parse routine consumes exactly one construct and leaves the cursor
/// right after it, which is what lets block bodies be split into statements
/// without any lookahead heuristics.
pub struct Parser<'tok> {
    tokens: &'tok [Token],
    position: usize,
    line: u32,
}

impl<'tok> Parser<'tok> {
    pub fn new(tokens: &'tok [Token], line: u32) -> Self {
        Self {
            tokens,
            position: 0,
            line,
        }
    }

    fn nested(&self, tokens: &'tok [Token]) -> Parser<'tok> {
        Parser::new(tokens, self.line)
    }

    fn peek(&self) -> Option<&'tok Token> {
        self.tokens.get(self.position)
    }

    fn peek_nth(&self, n: usize) -> Option<&'tok Token> {
        self.tokens.get(self.position + n)
    }

    fn next_token(&mut self) -> Option<&'tok Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.line)
    }

    fn unsupported(&self) -> SyntaxError {
        self.error(SyntaxErrorKind::UnsupportedStatement)
    }

    fn expect_end(&self) -> Result<(), SyntaxError> {
        match self.is_at_end() {
            true => Ok(()),
            false => Err(self.unsupported()),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SyntaxError> {
        match self.next_token() {
            Some(token) if token.is_ident(keyword) => Ok(()),
            _ => Err(self.unsupported()),
        }
    }

    fn eat_commas(&mut self) {
        while self
            .peek()
            .is_some_and(|t| t.is_punct(Punctuation::Comma))
        {
            self.position += 1;
        }
    }

    /// Consumes `open ... close` and returns the tokens in between.
    fn enclosed(
        &mut self,
        open: Punctuation,
        close: Punctuation,
    ) -> Result<&'tok [Token], SyntaxError> {
        let tokens = self.tokens;
        if !tokens
            .get(self.position)
            .is_some_and(|t| t.is_punct(open))
        {
            return Err(self.unsupported());
        }

        let mut depth = 0usize;
        for (index, token) in tokens.iter().enumerate().skip(self.position) {
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
                if depth == 0 {
                    let inner = &tokens[self.position + 1..index];
                    self.position = index + 1;
                    return Ok(inner);
                }
            }
        }
        Err(self.unsupported())
    }

    /// Validates the shape `name ( ... )` before any argument is looked at.
    fn call_arguments(&mut self, name: &str) -> Result<&'tok [Token], SyntaxError> {
        self.expect_keyword(name)?;
        let arguments = self.enclosed(Punctuation::LeftParenthesis, Punctuation::RightParenthesis)?;
        match arguments.is_empty() {
            true => Err(self.unsupported()),
            false => Ok(arguments),
        }
    }

    fn expect_binding_name(&mut self) -> Result<IdentName, SyntaxError> {
        match self.next_token() {
            Some(Token::Ident(name)) if is_reserved(name) => {
                Err(self.error(SyntaxErrorKind::ReservedKeyword(name.clone())))
            }
            Some(Token::Ident(name)) => Ok(name.clone()),
            _ => Err(self.unsupported()),
        }
    }
}

// Statements
impl<'tok> Parser<'tok> {
    pub fn parse_statement(&mut self) -> Result<Node, Error> {
        let Some(first) = self.peek() else {
            return Err(self.unsupported().into());
        };

        if first.is_ident("p") {
            return self.parse_print();
        }
        if self
            .peek_nth(1)
            .is_some_and(|t| t.is_punct(Punctuation::Equal))
        {
            return self.parse_assignment();
        }
        match first.as_ident() {
            Some("sleep") => Ok(self.parse_sleep()?),
            Some("if") => self.parse_if(),
            Some("for") => self.parse_for(),
            _ => self.parse_expression(),
        }
    }

    pub fn parse_statements(&mut self) -> Result<Vec<Node>, Error> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_print(&mut self) -> Result<Node, Error> {
        let arguments = self.call_arguments("p")?;
        let value = self.nested(arguments).parse_complete_expression()?;
        Ok(Node::new(NodeKind::Print(Box::new(value)), self.line))
    }

    fn parse_assignment(&mut self) -> Result<Node, Error> {
        let name = self.expect_binding_name()?;
        // Dispatch already saw the `=`.
        self.position += 1;
        let value = self.parse_expression()?;
        Ok(Node::new(
            NodeKind::Assign {
                name,
                value: Box::new(value),
            },
            self.line,
        ))
    }

    fn parse_sleep(&mut self) -> Result<Node, SyntaxError> {
        let arguments = self.call_arguments("sleep")?;
        let duration = match arguments {
            [Token::IntLiteral(v)] => NodeKind::IntLit(*v),
            [Token::FloatLiteral(v)] => NodeKind::FloatLit(*v),
            [Token::Ident(name)] if !is_reserved(name) => NodeKind::Name(name.clone()),
            _ => {
                let text = arguments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                return Err(self.error(SyntaxErrorKind::InvalidFloat(text.into())));
            }
        };
        Ok(Node::new(
            NodeKind::Sleep(Node::boxed(duration, self.line)),
            self.line,
        ))
    }

    fn parse_if(&mut self) -> Result<Node, Error> {
        self.expect_keyword("if")?;
        let condition =
            self.enclosed(Punctuation::LeftParenthesis, Punctuation::RightParenthesis)?;
        let condition = self.nested(condition).parse_complete_expression()?;
        let success = self.parse_block()?;
        let failure = if self.peek().is_some_and(|t| t.is_ident("else")) {
            self.position += 1;
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Node::new(
            NodeKind::If {
                condition: Box::new(condition),
                success,
                failure,
            },
            self.line,
        ))
    }

    fn parse_for(&mut self) -> Result<Node, Error> {
        self.expect_keyword("for")?;
        let header = self.enclosed(Punctuation::LeftParenthesis, Punctuation::RightParenthesis)?;

        let mut header = self.nested(header);
        let item = header.expect_binding_name()?;
        header.expect_keyword("in")?;
        let iterable = match header.peek() {
            Some(Token::Punctuation(Punctuation::LeftBracket)) => header.parse_list()?,
            Some(Token::Ident(name)) if !is_reserved(name) => {
                header.position += 1;
                Node::new(NodeKind::Name(name.clone()), self.line)
            }
            _ => return Err(header.unsupported().into()),
        };
        header.expect_end()?;

        let body = self.parse_block()?;
        Ok(Node::new(
            NodeKind::ForLoop {
                item,
                iterable: Box::new(iterable),
                body,
            },
            self.line,
        ))
    }

    fn parse_block(&mut self) -> Result<Vec<Node>, Error> {
        let body = self.enclosed(Punctuation::LeftBrace, Punctuation::RightBrace)?;
        self.nested(body).parse_statements()
    }
}

// Expressions
impl<'tok> Parser<'tok> {
    /// An operand, optionally followed by one operator and a second operand.
    pub fn parse_expression(&mut self) -> Result<Node, Error> {
        let lhs = self.parse_operand()?;
        let Some(operator) = self.peek().and_then(Token::binary_operator) else {
            return Ok(lhs);
        };
        self.position += 1;
        let rhs = self.parse_operand()?;
        Ok(Node::new(
            NodeKind::Arithmetic {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            self.line,
        ))
    }

    fn parse_complete_expression(&mut self) -> Result<Node, Error> {
        let node = self.parse_expression()?;
        self.expect_end()?;
        Ok(node)
    }

    fn parse_operand(&mut self) -> Result<Node, Error> {
        let Some(token) = self.peek() else {
            return Err(self.unsupported().into());
        };

        let kind = match token {
            Token::StringLiteral(text) => NodeKind::StringLit(text.clone()),
            Token::IntLiteral(v) => NodeKind::IntLit(*v),
            Token::FloatLiteral(v) => NodeKind::FloatLit(*v),
            Token::BoolLiteral(v) => NodeKind::BoolLit(*v),
            Token::NullLiteral => NodeKind::NullLit,
            Token::Punctuation(Punctuation::LeftBracket) => return Ok(self.parse_list()?),
            Token::Ident(name) => match name.as_str() {
                "cat" => return self.parse_cat(),
                builtin @ ("str" | "int" | "float" | "type") => {
                    return self.parse_builtin(builtin)
                }
                word if is_reserved(word) => return Err(self.unsupported().into()),
                // There are no user-defined functions to call.
                _ if self
                    .peek_nth(1)
                    .is_some_and(|t| t.is_punct(Punctuation::LeftParenthesis)) =>
                {
                    return Err(self.unsupported().into())
                }
                _ => NodeKind::Name(name.clone()),
            },
            Token::Punctuation(_) => return Err(self.unsupported().into()),
        };
        self.position += 1;
        Ok(Node::new(kind, self.line))
    }

    fn parse_list(&mut self) -> Result<Node, Error> {
        let elements = self.enclosed(Punctuation::LeftBracket, Punctuation::RightBracket)?;
        let mut parser = self.nested(elements);
        let mut items = Vec::new();
        loop {
            parser.eat_commas();
            if parser.is_at_end() {
                break;
            }
            items.push(parser.parse_operand()?);
        }
        Ok(Node::new(NodeKind::ListLit(items), self.line))
    }

    fn parse_cat(&mut self) -> Result<Node, Error> {
        let arguments = self.call_arguments("cat")?;
        let mut parser = self.nested(arguments);
        let mut parts = Vec::new();
        loop {
            parser.eat_commas();
            if parser.is_at_end() {
                break;
            }
            parts.push(parser.parse_operand()?);
        }
        if parts.is_empty() {
            return Err(self.unsupported().into());
        }
        Ok(Node::new(NodeKind::Cat(parts), self.line))
    }

    fn parse_builtin(&mut self, name: &str) -> Result<Node, Error> {
        let arguments = self.call_arguments(name)?;
        let inner = self.nested(arguments).parse_complete_expression()?;
        let kind = match name {
            "str" => NodeKind::StrCoerce(Box::new(inner)),
            "int" => {
                self.check_literal_coercion(&inner, Value::to_int)?;
                NodeKind::IntCoerce(Box::new(inner))
            }
            "float" => {
                self.check_literal_coercion(&inner, Value::to_float)?;
                NodeKind::FloatCoerce(Box::new(inner))
            }
            _ => NodeKind::TypeCheck(Box::new(inner)),
        };
        Ok(Node::new(kind, self.line))
    }

    /// A literal argument that can never be coerced fails before anything runs.
    fn check_literal_coercion(
        &self,
        node: &Node,
        coerce: fn(&Value) -> Result<Value, RuntimeErrorKind>,
    ) -> Result<(), RuntimeError> {
        let value = match &node.kind {
            NodeKind::StringLit(text) if !text.contains("#{") => Value::String(text.clone()),
            NodeKind::IntLit(v) => Value::Int(*v),
            NodeKind::FloatLit(v) => Value::Float(*v),
            NodeKind::BoolLit(v) => Value::Bool(*v),
            NodeKind::NullLit => Value::Null,
            _ => return Ok(()),
        };
        coerce(&value)
            .map(|_| ())
            .map_err(|kind| RuntimeError::new(kind, self.line))
    }
}
