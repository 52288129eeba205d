use color_eyre::eyre::Result;

use muffin::{
    error::{Error, SyntaxErrorKind},
    interpreter::{context::BufferedContext, TreeWalkInterpreter},
    lexer::tokenize,
    parser::formatter::{NodeFormatter, SExpressionFormatter},
    program::{Program, UnitBuilder},
    session::{Feed, Session},
    value::Value,
};

fn format_program(program: &Program) -> Vec<String> {
    program
        .iter()
        .map(|node| SExpressionFormatter.format(node))
        .collect()
}

fn syntax_error(source: &str) -> Option<(SyntaxErrorKind, u32)> {
    match Program::parse(source) {
        Err(Error::Syntax(e)) => Some((e.kind, e.line)),
        _ => None,
    }
}

#[test]
fn test_lines_become_statements() -> Result<()> {
    let program = Program::parse("x = 1\n\n// comment\np(x)\n")?;
    assert_eq!(format_program(&program), vec!["(= x 1)", "(print x)"]);
    assert_eq!(program.statements()[1].line, 4);
    Ok(())
}

#[test]
fn test_blocks_span_lines() -> Result<()> {
    let source = "\
for (i in [1, 2]) {
    p(i)
}
if (true) {
    p(\"{ not a brace }\")
}
else {
    p(2)
}
p(3)";
    let program = Program::parse(source)?;
    assert_eq!(
        format_program(&program),
        vec![
            "(for i (list 1 2) ((print i)))",
            "(if true ((print \"{ not a brace }\")) ((print 2)))",
            "(print 3)",
        ]
    );
    assert_eq!(program.statements()[1].line, 4);
    Ok(())
}

#[test]
fn test_parse_gate() -> Result<()> {
    let program = Program::parse("p(1)\np(2)\np(");
    assert!(program.is_err());

    let program = Program::parse("p(1)\np(2)")?;
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    interpreter.run(&program)?;
    assert_eq!(interpreter.into_context().into_data(), "1\n2\n");
    Ok(())
}

#[test]
fn test_unbalanced_braces() {
    assert_eq!(
        syntax_error("p(1)\nif (true) {\n  p(2)\n"),
        Some((SyntaxErrorKind::UnclosedBlock, 2))
    );
    assert_eq!(
        syntax_error("p(1)\n}\n"),
        Some((SyntaxErrorKind::UnsupportedStatement, 2))
    );
}

#[test]
fn test_unit_builder() -> Result<()> {
    let mut builder = UnitBuilder::new();
    assert_eq!(builder.push(tokenize("if (x) {", 3)?, 3)?, None);
    assert!(builder.is_open());
    assert_eq!(builder.push(Vec::new(), 4)?, None);
    let unit = builder
        .push(tokenize("}", 5)?, 5)?
        .expect("the block was closed");
    assert_eq!(unit.line, 3);
    assert_eq!(unit.tokens.len(), 6);
    assert!(!builder.is_open());
    assert!(builder.finish().is_ok());
    Ok(())
}

#[test]
fn test_session_echoes_expressions_only() -> Result<()> {
    let mut session = Session::new(BufferedContext::new());
    assert_eq!(session.feed("x = 2")?, Feed::Complete(None));
    assert_eq!(session.feed("x * 3")?, Feed::Complete(Some(Value::Int(6))));
    assert_eq!(session.feed("p(x)")?, Feed::Complete(None));
    assert_eq!(session.feed("")?, Feed::Complete(None));
    assert_eq!(session.into_context().into_data(), "2\n");
    Ok(())
}

#[test]
fn test_session_buffers_blocks() -> Result<()> {
    let mut session = Session::new(BufferedContext::new());
    assert_eq!(session.feed("for (i in [1, 2]) {")?, Feed::Incomplete);
    assert!(session.is_buffering());
    assert_eq!(session.feed("p(i)")?, Feed::Incomplete);
    assert_eq!(session.feed("}")?, Feed::Complete(None));
    assert!(!session.is_buffering());
    assert_eq!(session.context().output(), "1\n2\n");
    Ok(())
}

#[test]
fn test_session_survives_errors() -> Result<()> {
    let mut session = Session::new(BufferedContext::new());
    session.feed("x = 1")?;
    session.feed("if (x) {")?;
    assert!(session
        .feed("p(\"oops)")
        .is_err_and(|e| matches!(e, Error::Syntax(_))));
    assert!(!session.is_buffering());

    assert!(session.feed("p(missing)").is_err());
    assert_eq!(session.feed("x + 1")?, Feed::Complete(Some(Value::Int(2))));
    assert_eq!(session.environment().len(), 1);
    Ok(())
}

#[test]
fn test_session_reset_keeps_variables() -> Result<()> {
    let mut session = Session::new(BufferedContext::new());
    session.feed("x = \"kept\"")?;
    session.feed("if (x) {")?;
    session.reset();
    assert!(!session.is_buffering());
    assert_eq!(session.feed("x")?, Feed::Complete(Some(Value::from("kept"))));
    Ok(())
}
