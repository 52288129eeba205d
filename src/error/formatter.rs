use super::Error;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::ops::Range;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait ErrorFormatter {
    fn format_error(&self, error: &Error) -> String;
}

pub struct DebugFormatter;

impl ErrorFormatter for DebugFormatter {
    fn format_error(&self, error: &Error) -> String {
        format!("{error:?}")
    }
}

/// Single line diagnostics: `[line 3] RuntimeError: Undefined variable `foo``.
pub struct BasicFormatter;

impl ErrorFormatter for BasicFormatter {
    fn format_error(&self, error: &Error) -> String {
        format!(
            "[line {}] {}: {}",
            error.line(),
            error.category(),
            error.message()
        )
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    name: &'src str,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, name: &'src str) -> Self {
        Self { text, name }
    }

    /// Byte range of a 1-based line, without its line terminator.
    fn line_range(&self, line: u32) -> Range<usize> {
        let mut offset = 0;
        for (index, content) in self.text.split_inclusive('\n').enumerate() {
            if index + 1 == line as usize {
                let trimmed = content.trim_end_matches(['\n', '\r']);
                return offset..offset + trimmed.len();
            }
            offset += content.len();
        }
        self.text.len()..self.text.len()
    }

    fn headline(error: &Error) -> &'static str {
        match error {
            Error::Syntax(_) => "Could not parse this statement",
            Error::Runtime(_) => "Statement failed while running",
            Error::Internal(_) => "Oh crumbs, muffin had an issue. We burnt something, not you",
        }
    }
}

impl<'src> ErrorFormatter for PrettyFormatter<'src> {
    fn format_error(&self, error: &Error) -> String {
        let name = self.name;
        let range = self.line_range(error.line());
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (name, range.clone()))
            .with_code(error.code())
            .with_message(format!(
                "{}: {}",
                error.category().fg(Color::BrightRed),
                Self::headline(error)
            ))
            .with_label(
                Label::new((name, range))
                    .with_message(error.message())
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((name, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
