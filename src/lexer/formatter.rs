use super::Token;

/// Interface for turning tokens into text for the `tokenize` command.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
}

pub struct DebugFormatter;

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }
}

/// `KIND lexeme literal` triples, one token per line.
pub struct BasicFormatter;

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        match token {
            Token::Ident(name) => format!("IDENTIFIER {name} null"),
            Token::StringLiteral(text) => format!("STRING \"{text}\" {text}"),
            Token::IntLiteral(v) => format!("INT {v} {v}"),
            Token::FloatLiteral(v) => format!("FLOAT {v:?} {v:?}"),
            Token::BoolLiteral(v) => format!("BOOL {v} {v}"),
            Token::NullLiteral => "NULL null null".into(),
            Token::Punctuation(p) => format!("{} {} null", p.name(), p.lexeme()),
        }
    }
}
