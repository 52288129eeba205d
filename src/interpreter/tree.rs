use super::{environment::Environment, interpolate::interpolate, SystemContext};
use crate::{
    error::{Error, InternalError, RuntimeError, RuntimeErrorKind},
    parser::{Node, NodeKind},
    program::Program,
    value::Value,
};
use compact_str::CompactString;
use std::{fmt::Write, time::Duration};

pub struct TreeWalkInterpreter<C: SystemContext> {
    environment: Environment,
    context: C,
}

impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    pub fn new(context: C) -> Self {
        Self {
            environment: Environment::new(),
            context,
        }
    }

    /// Runs every statement in order, stopping at the first failure.
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        for statement in program.iter() {
            self.execute(statement)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, statement: &Node) -> Result<Value, Error> {
        tracing::debug!(line = statement.line, "executing statement");
        evaluate(statement, &mut self.environment, &mut self.context)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

fn runtime_error(kind: RuntimeErrorKind, node: &Node) -> Error {
    RuntimeError::new(kind, node.line).into()
}

pub fn evaluate<C: SystemContext>(
    node: &Node,
    environment: &mut Environment,
    context: &mut C,
) -> Result<Value, Error> {
    match &node.kind {
        NodeKind::Print(inner) => {
            let value = evaluate(inner, environment, context)?;
            context
                .writeln(&value.to_string())
                .map_err(|e| InternalError::new(format!("could not write output: {e}"), node.line))?;
            Ok(value)
        }
        NodeKind::Assign { name, value } => {
            let value = evaluate(value, environment, context)?;
            environment.assign(name.clone(), value.clone());
            Ok(value)
        }
        NodeKind::Sleep(duration) => {
            let value = evaluate(duration, environment, context)?;
            let duration = value
                .as_float()
                .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
                .ok_or_else(|| runtime_error(RuntimeErrorKind::InvalidDuration(value), node))?;
            tracing::trace!(line = node.line, ?duration, "sleeping");
            context.sleep(duration);
            Ok(Value::Null)
        }
        NodeKind::If {
            condition,
            success,
            failure,
        } => {
            let branch = match evaluate(condition, environment, context)?.is_truthy() {
                true => success,
                false => failure,
            };
            let results = branch
                .iter()
                .map(|statement| evaluate(statement, environment, context))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(results))
        }
        NodeKind::ForLoop {
            item,
            iterable,
            body,
        } => {
            let items = match evaluate(iterable, environment, context)? {
                Value::List(items) => items,
                other => {
                    let message = format!("cannot iterate over {}", other.type_name());
                    return Err(runtime_error(
                        RuntimeErrorKind::UnsupportedStatement(message.into()),
                        node,
                    ));
                }
            };
            let mut results = Vec::with_capacity(items.len() * body.len());
            for value in items {
                environment.assign(item.clone(), value);
                for statement in body {
                    results.push(evaluate(statement, environment, context)?);
                }
            }
            Ok(Value::List(results))
        }
        NodeKind::Arithmetic { operator, lhs, rhs } => {
            let lhs = evaluate(lhs, environment, context)?;
            let rhs = evaluate(rhs, environment, context)?;
            lhs.apply(*operator, &rhs)
                .map_err(|kind| runtime_error(kind, node))
        }
        NodeKind::Cat(parts) => {
            let mut text = CompactString::default();
            for part in parts {
                let value = evaluate(part, environment, context)?;
                write!(text, "{value}").map_err(|e| InternalError::new(e.to_string(), node.line))?;
            }
            Ok(Value::String(text))
        }
        NodeKind::TypeCheck(inner) => {
            let value = evaluate(inner, environment, context)?;
            Ok(Value::String(value.type_name().into()))
        }
        NodeKind::StrCoerce(inner) => Ok(evaluate(inner, environment, context)?.to_str()),
        NodeKind::IntCoerce(inner) => evaluate(inner, environment, context)?
            .to_int()
            .map_err(|kind| runtime_error(kind, node)),
        NodeKind::FloatCoerce(inner) => evaluate(inner, environment, context)?
            .to_float()
            .map_err(|kind| runtime_error(kind, node)),
        NodeKind::Name(name) => environment
            .access(name)
            .cloned()
            .ok_or_else(|| runtime_error(RuntimeErrorKind::UndefinedVariable(name.clone()), node)),
        NodeKind::StringLit(text) => Ok(Value::String(interpolate(
            text,
            environment,
            node.line,
        )?)),
        NodeKind::IntLit(v) => Ok(Value::Int(*v)),
        NodeKind::FloatLit(v) => Ok(Value::Float(*v)),
        NodeKind::BoolLit(v) => Ok(Value::Bool(*v)),
        NodeKind::NullLit => Ok(Value::Null),
        NodeKind::ListLit(items) => items
            .iter()
            .map(|item| evaluate(item, environment, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
    }
}
