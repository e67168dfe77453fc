//! # Block Builder Module
//!
//! Restructures the flat (statement, line) sequence into a nested statement
//! tree. A conditional header absorbs the following run of deeper-indented
//! lines as its body, recursively. Within one run every sibling must sit at
//! exactly the same indentation; a shallower line ends the run and is left
//! for the enclosing caller.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::ast::Stmt;
use crate::error::{CompileError, CompileResult};
use crate::line::SourceLine;

/// Builds the nested statement tree from parsed lines.
///
/// # Errors
/// Fails with `InvalidIndentation` when the first line is indented or when
/// sibling lines within one block disagree on indentation.
pub fn build(lines: Vec<(Stmt, SourceLine)>) -> CompileResult<Vec<Stmt>> {
    if let Some((_, line)) = lines.first() {
        if line.indent > 0 {
            return Err(CompileError::invalid_indentation(line.line_number));
        }
    }

    let mut builder = BlockBuilder {
        lines: lines.into_iter().peekable(),
    };
    builder.parse_block_contents(0)
}

struct BlockBuilder {
    lines: Peekable<IntoIter<(Stmt, SourceLine)>>,
}

impl BlockBuilder {
    fn parse_block_contents(&mut self, min_indent: usize) -> CompileResult<Vec<Stmt>> {
        let mut block = Vec::new();
        let mut block_indent: Option<usize> = None;

        while let Some((stmt, line)) = self.next_if_indent_at_least(min_indent) {
            if let Some(expected) = block_indent {
                if line.indent != expected {
                    return Err(CompileError::invalid_indentation(line.line_number));
                }
            }
            block_indent = Some(line.indent);

            block.push(self.attach_body(stmt, &line)?);
        }

        Ok(block)
    }

    /// Conditional headers recursively take the run of lines indented past
    /// their own level as their body; every other statement is a leaf.
    fn attach_body(&mut self, stmt: Stmt, line: &SourceLine) -> CompileResult<Stmt> {
        match stmt {
            Stmt::If {
                kind, condition, ..
            } => {
                let body = self.parse_block_contents(line.indent + 1)?;
                Ok(Stmt::If {
                    kind,
                    condition,
                    body,
                })
            }
            other => Ok(other),
        }
    }

    fn next_if_indent_at_least(&mut self, min_indent: usize) -> Option<(Stmt, SourceLine)> {
        if self.lines.peek()?.1.indent >= min_indent {
            self.lines.next()
        } else {
            None
        }
    }
}
