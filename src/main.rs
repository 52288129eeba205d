use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use muffin::{
    error::{
        formatter::{BasicFormatter, DebugFormatter, ErrorFormatter, PrettyFormatter},
        Error,
    },
    interpreter::{context::StdioContext, TreeWalkInterpreter},
    program::Program,
    session::{Feed, Session},
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::path::PathBuf;
use std::{fs::read_to_string, process::ExitCode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PROMPT: &str = ">>> ";
const CONTINUATION_PROMPT: &str = "... ";

#[derive(Debug, Parser)]
#[clap(name = "muffin", version, about = "MuffinScript interpreter")]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: MuffinCommand,
}

#[derive(Debug, Subcommand)]
pub enum MuffinCommand {
    /// Print the tokens of every line.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the parsed statements of a file.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: NodeFormat,
    },
    /// Run a script.
    Run {
        path: PathBuf,
        #[clap(long = "errors", value_enum, default_value = "pretty")]
        errors: ErrorFormat,
    },
    /// Start an interactive session.
    Repl,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum NodeFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ErrorFormat {
    Debug,
    Basic,
    Pretty,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = CLArgs::parse();
    match args.routine {
        MuffinCommand::Tokenize { path, format } => {
            let src = read_to_string(path)?;
            tokenize(&src, &format)
        }
        MuffinCommand::Parse { path, format } => {
            let src = read_to_string(&path)?;
            parse(&src, &path.display().to_string(), &format)
        }
        MuffinCommand::Run { path, errors } => {
            let src = read_to_string(&path)?;
            run(&src, &path.display().to_string(), &errors)
        }
        MuffinCommand::Repl => repl(),
    }
}

fn exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Syntax(_) => ExitCode::from(65),
        Error::Runtime(_) | Error::Internal(_) => ExitCode::from(70),
    }
}

fn error_formatter<'src>(
    format: &ErrorFormat,
    src: &'src str,
    name: &'src str,
) -> Box<dyn ErrorFormatter + 'src> {
    match format {
        ErrorFormat::Debug => Box::new(DebugFormatter),
        ErrorFormat::Basic => Box::new(BasicFormatter),
        ErrorFormat::Pretty => Box::new(PrettyFormatter::new(src, name)),
    }
}

fn tokenize(src: &str, format: &TokenFormat) -> Result<ExitCode> {
    use muffin::lexer::formatter::{
        BasicFormatter as BasicTokenFormatter, DebugFormatter as DebugTokenFormatter,
        TokenFormatter,
    };
    use muffin::lexer::tokenize;

    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(DebugTokenFormatter),
        TokenFormat::Basic => Box::new(BasicTokenFormatter),
    };
    let mut succeeded = true;
    for (index, text) in src.lines().enumerate() {
        match tokenize(text, index as u32 + 1) {
            Ok(tokens) => {
                for token in &tokens {
                    println!("{}", formatter.format(token));
                }
            }
            Err(error) => {
                eprintln!("{}", BasicFormatter.format_error(&Error::from(error)));
                succeeded = false;
            }
        }
    }
    Ok(match succeeded {
        true => ExitCode::SUCCESS,
        false => ExitCode::from(65),
    })
}

fn parse(src: &str, name: &str, format: &NodeFormat) -> Result<ExitCode> {
    use muffin::parser::formatter::{
        DebugFormatter as DebugNodeFormatter, NodeFormatter, SExpressionFormatter,
    };

    let formatter: Box<dyn NodeFormatter> = match format {
        NodeFormat::Debug => Box::new(DebugNodeFormatter),
        NodeFormat::SExpr => Box::new(SExpressionFormatter),
    };
    match Program::parse(src) {
        Ok(program) => {
            for statement in program.iter() {
                println!("{}", formatter.format(statement));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", PrettyFormatter::new(src, name).format_error(&error));
            Ok(exit_code(&error))
        }
    }
}

fn run(src: &str, name: &str, format: &ErrorFormat) -> Result<ExitCode> {
    let formatter = error_formatter(format, src, name);
    let result = Program::parse(src).and_then(|program| {
        let mut interpreter = TreeWalkInterpreter::new(StdioContext);
        interpreter.run(&program)
    });
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            eprintln!("{}", formatter.format_error(&error));
            Ok(exit_code(&error))
        }
    }
}

fn repl() -> Result<ExitCode> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new(StdioContext);

    loop {
        let prompt = match session.is_buffering() {
            true => CONTINUATION_PROMPT,
            false => PROMPT,
        };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                session.reset();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        match session.feed(&line) {
            Ok(Feed::Complete(Some(value))) => println!("{value}"),
            Ok(Feed::Complete(None) | Feed::Incomplete) => {}
            Err(error) => eprintln!("{}", BasicFormatter.format_error(&error)),
        }
    }
    Ok(ExitCode::SUCCESS)
}
