use crate::error::RuntimeErrorKind;
use crate::parser::BinaryOperator;
use compact_str::{CompactString, CompactStringExt, ToCompactString};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(CompactString),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<Value>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => {
                // Whole floats keep their decimal point so `2.0` never reads as an int.
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Self::Bool(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
            Self::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    match item {
                        Self::String(v) => write!(f, "\"{v}\"")?,
                        other => write!(f, "{other}")?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

// Introspection
impl Value {
    /// The name `type(...)` reports for this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "str",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::List(_) => "list",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(v) => !v.is_empty(),
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Bool(v) => *v,
            Value::Null => false,
            Value::List(items) => !items.is_empty(),
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

// Coercions
impl Value {
    pub fn to_str(&self) -> Value {
        Value::String(self.to_compact_string())
    }

    pub fn to_int(&self) -> Result<Value, RuntimeErrorKind> {
        let invalid = || RuntimeErrorKind::InvalidCoercion {
            value: self.clone(),
            target: "int",
        };
        match self {
            Value::Int(v) => Ok(Value::Int(*v)),
            Value::Float(v) => {
                let truncated = v.trunc();
                if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64
                {
                    Ok(Value::Int(truncated as i64))
                } else {
                    Err(invalid())
                }
            }
            Value::Bool(v) => Ok(Value::Int(i64::from(*v))),
            Value::String(v) => v.trim().parse().map(Value::Int).map_err(|_| invalid()),
            Value::Null | Value::List(_) => Err(invalid()),
        }
    }

    pub fn to_float(&self) -> Result<Value, RuntimeErrorKind> {
        let invalid = || RuntimeErrorKind::InvalidCoercion {
            value: self.clone(),
            target: "float",
        };
        match self {
            Value::Int(v) => Ok(Value::Float(*v as f64)),
            Value::Float(v) => Ok(Value::Float(*v)),
            Value::Bool(v) => Ok(Value::Float(if *v { 1.0 } else { 0.0 })),
            Value::String(v) => v.trim().parse().map(Value::Float).map_err(|_| invalid()),
            Value::Null | Value::List(_) => Err(invalid()),
        }
    }
}

impl Value {
    pub fn apply(&self, operator: BinaryOperator, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match operator {
            BinaryOperator::Add => self.add(other),
            BinaryOperator::Subtract => self.subtract(other),
            BinaryOperator::Multiply => self.multiply(other),
            BinaryOperator::Divide => self.divide(other),
            BinaryOperator::Remainder => self.remainder(other),
            BinaryOperator::EqualEqual => Ok(Value::Bool(self.is_equal(other))),
            BinaryOperator::BangEqual => Ok(Value::Bool(self.is_not_equal(other))),
            BinaryOperator::GreaterThan => self.compare(operator, other, Ordering::is_gt),
            BinaryOperator::GreaterThanEqual => self.compare(operator, other, Ordering::is_ge),
            BinaryOperator::LessThan => self.compare(operator, other, Ordering::is_lt),
            BinaryOperator::LessThanEqual => self.compare(operator, other, Ordering::is_le),
        }
    }

    fn invalid_operands(&self, operator: BinaryOperator, other: &Value) -> RuntimeErrorKind {
        RuntimeErrorKind::InvalidOperands {
            operator,
            lhs: self.clone(),
            rhs: other.clone(),
        }
    }

    // Arithmetic + string/list concatenation
    pub fn add(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs
                .checked_add(*rhs)
                .map(Value::Int)
                .ok_or(RuntimeErrorKind::IntegerOverflow),
            (Value::String(lhs), Value::String(rhs)) => {
                Ok(Value::String([lhs, rhs].concat_compact()))
            }
            (Value::List(lhs), Value::List(rhs)) => {
                Ok(Value::List(lhs.iter().chain(rhs).cloned().collect()))
            }
            (lhs, rhs) => match (lhs.as_float(), rhs.as_float()) {
                (Some(lhs), Some(rhs)) => Ok(Value::Float(lhs + rhs)),
                _ => Err(self.invalid_operands(BinaryOperator::Add, other)),
            },
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs
                .checked_sub(*rhs)
                .map(Value::Int)
                .ok_or(RuntimeErrorKind::IntegerOverflow),
            (lhs, rhs) => match (lhs.as_float(), rhs.as_float()) {
                (Some(lhs), Some(rhs)) => Ok(Value::Float(lhs - rhs)),
                _ => Err(self.invalid_operands(BinaryOperator::Subtract, other)),
            },
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs
                .checked_mul(*rhs)
                .map(Value::Int)
                .ok_or(RuntimeErrorKind::IntegerOverflow),
            (lhs, rhs) => match (lhs.as_float(), rhs.as_float()) {
                (Some(lhs), Some(rhs)) => Ok(Value::Float(lhs * rhs)),
                _ => Err(self.invalid_operands(BinaryOperator::Multiply, other)),
            },
        }
    }

    /// True division: the quotient is always a float.
    pub fn divide(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self.as_float(), other.as_float()) {
            (Some(_), Some(rhs)) if rhs == 0.0 => Err(RuntimeErrorKind::DivisionByZero),
            (Some(lhs), Some(rhs)) => Ok(Value::Float(lhs / rhs)),
            _ => Err(self.invalid_operands(BinaryOperator::Divide, other)),
        }
    }

    /// Remainder takes the sign of the divisor.
    pub fn remainder(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Int(_), Value::Int(0)) => Err(RuntimeErrorKind::DivisionByZero),
            (Value::Int(lhs), Value::Int(rhs)) => {
                let remainder = lhs
                    .checked_rem(*rhs)
                    .ok_or(RuntimeErrorKind::IntegerOverflow)?;
                if remainder != 0 && (remainder < 0) != (*rhs < 0) {
                    Ok(Value::Int(remainder + rhs))
                } else {
                    Ok(Value::Int(remainder))
                }
            }
            (lhs, rhs) => match (lhs.as_float(), rhs.as_float()) {
                (Some(_), Some(rhs)) if rhs == 0.0 => Err(RuntimeErrorKind::DivisionByZero),
                (Some(lhs), Some(rhs)) => {
                    let remainder = lhs % rhs;
                    if remainder != 0.0 && (remainder < 0.0) != (rhs < 0.0) {
                        Ok(Value::Float(remainder + rhs))
                    } else {
                        Ok(Value::Float(remainder))
                    }
                }
                _ => Err(self.invalid_operands(BinaryOperator::Remainder, other)),
            },
        }
    }

    // Comparison
    fn compare(
        &self,
        operator: BinaryOperator,
        other: &Value,
        accept: fn(Ordering) -> bool,
    ) -> Result<Value, RuntimeErrorKind> {
        let ordering = match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => Some(lhs.cmp(rhs)),
            (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
            (lhs, rhs) => match (lhs.as_float(), rhs.as_float()) {
                (Some(lhs), Some(rhs)) => {
                    // NaN compares false against everything.
                    match lhs.partial_cmp(&rhs) {
                        Some(ordering) => Some(ordering),
                        None => return Ok(Value::Bool(false)),
                    }
                }
                _ => None,
            },
        };
        match ordering {
            Some(ordering) => Ok(Value::Bool(accept(ordering))),
            None => Err(self.invalid_operands(operator, other)),
        }
    }

    // Equality
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            (Value::Null, Value::Null) => true,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            (Value::List(lhs), Value::List(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| l.is_equal(r))
            }
            (lhs, rhs) => match (lhs.as_float(), rhs.as_float()) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => false,
            },
        }
    }

    pub fn is_not_equal(&self, other: &Value) -> bool {
        !self.is_equal(other)
    }
}
