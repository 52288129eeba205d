use crate::{string::IdentName, value::Value};
use std::collections::HashMap;

/// The single flat variable table. There are no nested scopes: loop variables
/// and assignments all land here and overwrite whatever was bound before.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<IdentName, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn assign(&mut self, name: impl Into<IdentName>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
