use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::value::Value;

/// Character offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    pub fn to(self, other: Span) -> Self {
        Self::new(self.start, other.end)
    }
}

/// Coarse classification of a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Parse,
    TypeOrReference,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpartieError {
    #[error("Error occurred on line {line} : {message}")]
    Lexical {
        line: usize,
        span: Span,
        message: String,
    },

    #[error("Error occurred on line {line} : {message}")]
    Parse {
        line: usize,
        span: Span,
        message: String,
        help: Option<String>,
    },

    /// `operands` holds one value for a unary operator, two for a binary one.
    #[error("Invalid type on line {line} : {}", render_operands(.operator, .operands))]
    InvalidType {
        line: usize,
        span: Span,
        operator: String,
        operands: Vec<Value>,
    },

    #[error("Error occurred on line {line} : Undefined variable: {name}")]
    UndefinedVariable {
        line: usize,
        span: Span,
        name: String,
    },

    /// A scope handle was used after its scope was popped.
    #[error("Scope handle used after its scope was released")]
    ReleasedScope,
}

pub type SpartieResult<T> = Result<T, SpartieError>;

fn render_operands(operator: &str, operands: &[Value]) -> String {
    match operands {
        [operand] => format!("{}{}", operator, operand),
        [left, right] => format!("{}{}{}", left, operator, right),
        _ => operator.to_string(),
    }
}

impl SpartieError {
    pub fn lexical(line: usize, span: Span, message: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            span,
            message: message.into(),
        }
    }

    pub fn parse(line: usize, span: Span, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            span,
            message: message.into(),
            help: None,
        }
    }

    pub fn parse_with_help(
        line: usize,
        span: Span,
        message: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self::Parse {
            line,
            span,
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SpartieError::Lexical { .. } => ErrorKind::Lexical,
            SpartieError::Parse { .. } => ErrorKind::Parse,
            SpartieError::InvalidType { .. }
            | SpartieError::UndefinedVariable { .. }
            | SpartieError::ReleasedScope => ErrorKind::TypeOrReference,
        }
    }

    /// Source line of the error; `None` for errors raised through the
    /// environment API without a source position.
    pub fn line(&self) -> Option<usize> {
        match self {
            SpartieError::Lexical { line, .. }
            | SpartieError::Parse { line, .. }
            | SpartieError::InvalidType { line, .. }
            | SpartieError::UndefinedVariable { line, .. } => Some(*line),
            SpartieError::ReleasedScope => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            SpartieError::Lexical { span, .. }
            | SpartieError::Parse { span, .. }
            | SpartieError::InvalidType { span, .. }
            | SpartieError::UndefinedVariable { span, .. } => Some(*span),
            SpartieError::ReleasedScope => None,
        }
    }

    fn help(&self) -> Option<&str> {
        match self {
            SpartieError::Parse { help, .. } => help.as_deref(),
            SpartieError::InvalidType { operator, .. } if operator == "+" => {
                Some("'+' accepts two numbers, or a string on either side")
            }
            SpartieError::InvalidType { .. } => Some("this operator only accepts numbers"),
            SpartieError::UndefinedVariable { .. } => {
                Some("variables must be declared with 'var' before they are assigned")
            }
            SpartieError::Lexical { .. } | SpartieError::ReleasedScope => None,
        }
    }

    /// Renders the error against its source text on stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let (color, kind_str) = match self.kind() {
            ErrorKind::Lexical => (Color::Red, "Lexical Error"),
            ErrorKind::Parse => (Color::Yellow, "Parse Error"),
            ErrorKind::TypeOrReference => (Color::Magenta, "Runtime Error"),
        };

        let Some(span) = self.span() else {
            eprintln!("{}", self);
            return;
        };

        // Spans past the end of input (e.g. EOF errors) are clamped for ariadne.
        let len = source.chars().count();
        let start = span.start.min(len);
        let end = span.end.clamp(start, len);

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", kind_str.fg(color), self))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(self.to_string())
                    .with_color(color),
            );

        if let Some(help_text) = self.help() {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(error) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            tracing::warn!(%error, "failed to render diagnostic");
            eprintln!("{}", self);
        }
    }
}
