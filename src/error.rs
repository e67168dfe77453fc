//! # Error Module
//!
//! Unified error type for all stages of the mlogc pipeline. Every error
//! carries a classification, a human-readable message quoting the offending
//! text, and the 1-based source line number where the stage has one.
//! Compilation is fail-fast: the first error aborts the whole compile.

use std::fmt;

// -----------------------------------------------------------------------------
// ERROR KIND — Failure Classification
// -----------------------------------------------------------------------------

/// Classifies every way a compile can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer could not classify a substring of a line.
    UnrecognizedToken,
    /// The parser needed another token but the line ended.
    UnexpectedEndOfLine,
    /// The parser required one kind of token but found another.
    ExpectedButFound,
    /// A statement parsed cleanly but tokens remained on the line.
    TrailingTokens,
    /// No statement form matched the line.
    SyntaxError,
    /// The first line was indented, or sibling lines disagree on indentation.
    InvalidIndentation,
    /// The same label name was declared twice.
    DuplicateLabel,
    /// A `goto` or conditional referenced a label never declared.
    UnknownLabel,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnrecognizedToken => "UnrecognizedToken",
            ErrorKind::UnexpectedEndOfLine => "UnexpectedEndOfLine",
            ErrorKind::ExpectedButFound => "ExpectedButFound",
            ErrorKind::TrailingTokens => "TrailingTokens",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::InvalidIndentation => "InvalidIndentation",
            ErrorKind::DuplicateLabel => "DuplicateLabel",
            ErrorKind::UnknownLabel => "UnknownLabel",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// COMPILE ERROR — Unified Error Type
// -----------------------------------------------------------------------------

/// The unified error type for the entire compiler.
///
/// Pairs an [`ErrorKind`] with a message naming the offending token, text,
/// or label, and the source line number when the failing stage knows it.
#[derive(Debug, Clone)]
pub struct CompileError {
    /// Which failure class this error belongs to.
    pub kind: ErrorKind,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// 1-based source line number, if the failing stage tracks one.
    pub line: Option<u32>,
}

impl CompileError {
    /// Creates a new error with a source line number.
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            line: Some(line),
        }
    }

    /// Creates a new error without line information.
    pub fn no_line(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
        }
    }

    /// Attaches a line number to an error that was raised without one.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn unrecognized_token(rest: &str) -> Self {
        Self::no_line(
            ErrorKind::UnrecognizedToken,
            format!("unexpected token at: {rest}"),
        )
    }

    pub fn unexpected_end_of_line() -> Self {
        Self::no_line(ErrorKind::UnexpectedEndOfLine, "unexpected end of line")
    }

    pub fn expected_but_found(expected: &str, found: &str) -> Self {
        Self::no_line(
            ErrorKind::ExpectedButFound,
            format!("expected {expected} but found: {found}"),
        )
    }

    pub fn trailing_tokens(token: &str, text: &str) -> Self {
        Self::no_line(
            ErrorKind::TrailingTokens,
            format!("expected end of line but found \"{token}\" in line: {text}"),
        )
    }

    pub fn syntax_error(line: u32, text: &str) -> Self {
        Self::new(ErrorKind::SyntaxError, format!("syntax error: {text}"), line)
    }

    pub fn invalid_indentation(line: u32) -> Self {
        Self::new(ErrorKind::InvalidIndentation, "invalid indentation", line)
    }

    pub fn duplicate_label(name: &str) -> Self {
        Self::no_line(
            ErrorKind::DuplicateLabel,
            format!("duplicate label \"{name}\""),
        )
    }

    pub fn unknown_label(name: &str) -> Self {
        Self::no_line(ErrorKind::UnknownLabel, format!("unknown label \"{name}\""))
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} [line {}]: {}", self.kind, line, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for CompileError {}

/// Convenience alias for Results throughout the compiler.
pub type CompileResult<T> = std::result::Result<T, CompileError>;
