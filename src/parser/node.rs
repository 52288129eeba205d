use super::BinaryOperator;
use crate::string::IdentName;
use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Statements
    Print(Box<Node>),
    Assign {
        name: IdentName,
        value: Box<Node>,
    },
    Sleep(Box<Node>),
    If {
        condition: Box<Node>,
        success: Vec<Node>,
        failure: Vec<Node>,
    },
    ForLoop {
        item: IdentName,
        iterable: Box<Node>,
        body: Vec<Node>,
    },
    // Expressions
    Arithmetic {
        operator: BinaryOperator,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Cat(Vec<Node>),
    TypeCheck(Box<Node>),
    StrCoerce(Box<Node>),
    IntCoerce(Box<Node>),
    FloatCoerce(Box<Node>),
    Name(IdentName),
    // Literals
    StringLit(CompactString),
    IntLit(i64),
    FloatLit(f64),
    BoolLit(bool),
    NullLit,
    ListLit(Vec<Node>),
}

impl Node {
    pub fn new(kind: NodeKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn boxed(kind: NodeKind, line: u32) -> Box<Self> {
        Box::new(Self::new(kind, line))
    }

    /// Whether the node produces a value worth echoing back in a REPL.
    pub fn is_expression(&self) -> bool {
        !matches!(
            self.kind,
            NodeKind::Print(_)
                | NodeKind::Assign { .. }
                | NodeKind::Sleep(_)
                | NodeKind::If { .. }
                | NodeKind::ForLoop { .. }
        )
    }
}
