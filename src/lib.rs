pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod session;
pub mod string;
pub mod value;
