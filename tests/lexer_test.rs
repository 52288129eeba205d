use color_eyre::eyre::{Context, Result};
use proptest::prelude::*;
use std::{
    fs::{read_dir, read_to_string},
    path::Path,
};

use muffin::{
    error::{SyntaxError, SyntaxErrorKind},
    lexer::{
        formatter::{BasicFormatter, TokenFormatter},
        tokenize, Punctuation, Token,
    },
};

fn check(input: &str, expected: &str, test_name: &str) {
    let formatter = BasicFormatter;
    let mut buffer = String::new();
    for (index, line) in input.lines().enumerate() {
        match tokenize(line, index as u32 + 1) {
            Ok(tokens) => {
                for token in &tokens {
                    buffer.push_str(&formatter.format(token));
                    buffer.push('\n');
                }
            }
            Err(error) => {
                buffer.push_str(&error.to_string());
                buffer.push('\n');
            }
        }
    }

    assert_eq!(buffer, expected, "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check("", "", "smoke");
}

#[test]
fn test_assignment_line() -> Result<()> {
    let tokens = tokenize("foo = 2 + 2", 1)?;
    assert_eq!(
        tokens,
        vec![
            Token::Ident("foo".into()),
            Token::Punctuation(Punctuation::Equal),
            Token::IntLiteral(2),
            Token::Punctuation(Punctuation::Plus),
            Token::IntLiteral(2),
        ]
    );
    Ok(())
}

#[test]
fn test_comparison_operators_are_single_tokens() -> Result<()> {
    let tokens = tokenize("== != >= <=", 1)?;
    assert_eq!(
        tokens,
        vec![
            Token::Punctuation(Punctuation::EqualEqual),
            Token::Punctuation(Punctuation::BangEqual),
            Token::Punctuation(Punctuation::GreaterThanEqual),
            Token::Punctuation(Punctuation::LessThanEqual),
        ]
    );
    Ok(())
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        tokenize("p(\"hello world)", 1),
        Err(SyntaxError::new(SyntaxErrorKind::UnterminatedString, 1))
    );
}

#[test]
fn test_lone_bang() {
    assert_eq!(
        tokenize("p(!true)", 4),
        Err(SyntaxError::new(SyntaxErrorKind::UnrecognizedToken('!'), 4))
    );
}

#[test]
fn test_numbers() {
    assert_eq!(tokenize("3.25", 1), Ok(vec![Token::FloatLiteral(3.25)]));
    assert_eq!(
        tokenize("1.2.3", 2),
        Err(SyntaxError::new(
            SyntaxErrorKind::InvalidFloat("1.2.3".into()),
            2
        ))
    );
    assert_eq!(
        tokenize("99999999999999999999", 3),
        Err(SyntaxError::new(
            SyntaxErrorKind::InvalidInt("99999999999999999999".into()),
            3
        ))
    );
}

#[test]
fn test_commas_and_comments_produce_nothing() -> Result<()> {
    assert!(tokenize("  // just a comment", 1)?.is_empty());
    assert!(tokenize(" , ,, ", 1)?.is_empty());
    assert_eq!(
        tokenize("cat(a, b) // trailing", 1)?,
        vec![
            Token::Ident("cat".into()),
            Token::Punctuation(Punctuation::LeftParenthesis),
            Token::Ident("a".into()),
            Token::Ident("b".into()),
            Token::Punctuation(Punctuation::RightParenthesis),
        ]
    );
    Ok(())
}

#[test]
fn test_keywords_are_literals() -> Result<()> {
    assert_eq!(
        tokenize("true false null truthy", 1)?,
        vec![
            Token::BoolLiteral(true),
            Token::BoolLiteral(false),
            Token::NullLiteral,
            Token::Ident("truthy".into()),
        ]
    );
    Ok(())
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/lexer/in");
    let output_dir = Path::new("./test_data/lexer/out");

    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "ms" {
            continue;
        }

        let test_name = AsRef::<Path>::as_ref(
            path.file_name()
                .expect("File name can't be none as the path is to a real file."),
        );

        let input = read_to_string(&path).context("Failed to open input test data file")?;

        let expected = {
            let output_file_name = test_name.with_extension("txt");
            let output_path = output_dir.join(output_file_name);
            read_to_string(output_path).context("Failed to open output test data file")?
        };

        let res = std::panic::catch_unwind(|| {
            check(&input, &expected, &test_name.to_string_lossy());
        });
        if res.is_err() {
            succeeded = false;
        }
    }

    assert!(succeeded, "At least one lexer test case failed");

    Ok(())
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("-".to_string()),
        Just("+".to_string()),
        Just("*".to_string()),
        Just("%".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
        Just("/".to_string()),
    ]
}

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,18}".prop_map(|s| s),
        "[0-9]{1,9}\\.[0-9]{1,9}".prop_map(|s| s)
    ]
}

fn string_literal_strategy() -> impl Strategy<Value = String> {
    "[^\"\n\r]*".prop_map(|s: String| format!("\"{}\"", s))
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]*".prop_map(|s: String| s)
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("p".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("for".to_string()),
        Just("in".to_string()),
        Just("sleep".to_string()),
        Just("cat".to_string()),
        Just("type".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("null".to_string()),
    ]
}

fn token_sequence_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            numeric_literal_strategy(),
            string_literal_strategy(),
            identifier_strategy(),
            keyword_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_handles_valid_tokens(input in token_sequence_strategy()) {
        let expected_num_tokens = input.len();
        let line = input.join(" ");
        let tokens = tokenize(&line, 1);
        prop_assert!(tokens.is_ok());
        prop_assert_eq!(tokens.unwrap().len(), expected_num_tokens);
    }

    #[test]
    fn lexer_separates_with_commas(input in token_sequence_strategy()) {
        let spaced = tokenize(&input.join(" "), 1);
        let commas = tokenize(&input.join(", "), 1);
        prop_assert_eq!(spaced, commas);
    }

    #[test]
    fn comments_hide_the_rest_of_the_line(input in token_sequence_strategy(), comment in "[^\n]*") {
        let line = input.join(" ");
        let commented = format!("{line} //{comment}");
        prop_assert_eq!(tokenize(&line, 1), tokenize(&commented, 1));
    }

    #[test]
    fn integers_lex_to_their_value(value in 0..i64::MAX) {
        prop_assert_eq!(tokenize(&value.to_string(), 1), Ok(vec![Token::IntLiteral(value)]));
    }
}
