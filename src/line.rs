//! # Line Reader Module
//!
//! Maps raw source lines to [`SourceLine`] records carrying the 1-based line
//! number, original text, indentation width, and token sequence. Lines that
//! lex to zero tokens (blank or comment-only) are dropped entirely, so their
//! indentation never participates in block validation.

use crate::error::CompileResult;
use crate::lexer;
use crate::token::Token;

/// One source line that survived lexing.
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// 1-based position in the input.
    pub line_number: u32,
    /// The original line text, untrimmed.
    pub text: String,
    /// Count of leading space characters.
    pub indent: usize,
    /// The line's token sequence; never empty.
    pub tokens: Vec<Token>,
}

/// Lexes every input line, keeping only lines that produced tokens.
pub fn read_lines<S: AsRef<str>>(lines: &[S]) -> CompileResult<Vec<SourceLine>> {
    let mut result = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let line_number = index as u32 + 1;

        let tokens = lexer::lex(raw).map_err(|e| e.with_line(line_number))?;
        if tokens.is_empty() {
            continue;
        }

        let indent = raw.len() - raw.trim_start_matches(' ').len();
        result.push(SourceLine {
            line_number,
            text: raw.to_string(),
            indent,
            tokens,
        });
    }

    Ok(result)
}
