use crate::{
    error::Error,
    interpreter::{environment::Environment, SystemContext, TreeWalkInterpreter},
    lexer,
    program::UnitBuilder,
    value::Value,
};

/// What happened to a line fed into a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    /// A block is still open; more lines are needed.
    Incomplete,
    /// The unit ran. Holds the value to echo, if the statement was a bare expression.
    Complete(Option<Value>),
}

/// An interactive session: one environment that outlives every unit fed to it.
pub struct Session<C: SystemContext> {
    interpreter: TreeWalkInterpreter<C>,
    builder: UnitBuilder,
    line: u32,
}

impl<C> Session<C>
where
    C: SystemContext,
{
    pub fn new(context: C) -> Self {
        Self {
            interpreter: TreeWalkInterpreter::new(context),
            builder: UnitBuilder::new(),
            line: 0,
        }
    }

    /// Feeds one line of input. On error the buffered block is dropped.
    pub fn feed(&mut self, text: &str) -> Result<Feed, Error> {
        self.line += 1;
        let result = self.feed_line(text);
        if result.is_err() {
            self.builder.clear();
        }
        result
    }

    fn feed_line(&mut self, text: &str) -> Result<Feed, Error> {
        let tokens = lexer::tokenize(text, self.line)?;
        let Some(unit) = self.builder.push(tokens, self.line)? else {
            return Ok(match self.builder.is_open() {
                true => Feed::Incomplete,
                false => Feed::Complete(None),
            });
        };

        let statement = unit.parse()?;
        let value = self.interpreter.execute(&statement)?;
        Ok(Feed::Complete(statement.is_expression().then_some(value)))
    }

    pub fn is_buffering(&self) -> bool {
        self.builder.is_open()
    }

    /// Drops a half-entered block. Variables are kept.
    pub fn reset(&mut self) {
        self.builder.clear();
    }

    pub fn environment(&self) -> &Environment {
        self.interpreter.environment()
    }

    pub fn context(&self) -> &C {
        self.interpreter.context()
    }

    pub fn into_context(self) -> C {
        self.interpreter.into_context()
    }
}
