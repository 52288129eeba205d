use super::{Node, NodeKind};

/// Renders parsed statements for the `parse` command.
pub trait NodeFormatter {
    fn format(&self, node: &Node) -> String;
}

pub struct DebugFormatter;

impl NodeFormatter for DebugFormatter {
    fn format(&self, node: &Node) -> String {
        format!("{node:?}")
    }
}

/// Lisp-style rendering, e.g. `(= total (+ a b))`.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    fn format_list(nodes: &[Node]) -> String {
        nodes
            .iter()
            .map(Self::format_node)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_node(node: &Node) -> String {
        match &node.kind {
            NodeKind::Print(value) => format!("(print {})", Self::format_node(value)),
            NodeKind::Assign { name, value } => {
                format!("(= {name} {})", Self::format_node(value))
            }
            NodeKind::Sleep(duration) => format!("(sleep {})", Self::format_node(duration)),
            NodeKind::If {
                condition,
                success,
                failure,
            } => format!(
                "(if {} ({}) ({}))",
                Self::format_node(condition),
                Self::format_list(success),
                Self::format_list(failure)
            ),
            NodeKind::ForLoop {
                item,
                iterable,
                body,
            } => format!(
                "(for {item} {} ({}))",
                Self::format_node(iterable),
                Self::format_list(body)
            ),
            NodeKind::Arithmetic { operator, lhs, rhs } => format!(
                "({operator} {} {})",
                Self::format_node(lhs),
                Self::format_node(rhs)
            ),
            NodeKind::Cat(parts) => format!("(cat {})", Self::format_list(parts)),
            NodeKind::TypeCheck(inner) => format!("(type {})", Self::format_node(inner)),
            NodeKind::StrCoerce(inner) => format!("(str {})", Self::format_node(inner)),
            NodeKind::IntCoerce(inner) => format!("(int {})", Self::format_node(inner)),
            NodeKind::FloatCoerce(inner) => format!("(float {})", Self::format_node(inner)),
            NodeKind::Name(name) => name.to_string(),
            NodeKind::StringLit(text) => format!("\"{text}\""),
            NodeKind::IntLit(v) => format!("{v}"),
            NodeKind::FloatLit(v) => format!("{v:?}"),
            NodeKind::BoolLit(v) => format!("{v}"),
            NodeKind::NullLit => "null".into(),
            NodeKind::ListLit(items) if items.is_empty() => "(list)".into(),
            NodeKind::ListLit(items) => format!("(list {})", Self::format_list(items)),
        }
    }
}

impl NodeFormatter for SExpressionFormatter {
    fn format(&self, node: &Node) -> String {
        Self::format_node(node)
    }
}
