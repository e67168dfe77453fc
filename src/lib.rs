//! # mlogc — Script-to-mlog Compiler
//!
//! Compiles a small line-oriented, indentation-structured scripting language
//! into Mindustry logic assembly (mlog): `set`, `op`, `jump`, `print`, `end`.
//!
//! ## Architecture
//! Lines → Lexer → Line Reader → Parser → Block Builder → Emitter → mlog
//!
//! Each stage's output type is the next stage's sole input. The whole
//! pipeline is synchronous and carries no state between [`compile`] calls,
//! so independent compiles can run concurrently.
//!
//! ## Key Features
//! - Precedence-climbing expression parser with `if`/`unless` blocks,
//!   `goto`/`label:`, and `print`.
//! - Lazy temp-variable naming keeps `$temp` numbers increasing in emission
//!   order even under recursive lowering.
//! - Two-pass label resolution: forward `goto`s resolve in a final pass,
//!   and a jump past the last instruction wraps to offset 0.
//! - `FxHashMap` label table for fast string-keyed offset lookups.

pub mod ast;
pub mod blocks;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod line;
pub mod parser;
pub mod token;

#[cfg(test)]
mod tests;

use error::CompileResult;

/// Compiles an ordered sequence of source lines into mlog instructions.
///
/// This is the primary public entry point:
/// lines → lex → parse → build blocks → emit.
///
/// # Errors
/// Returns the first [`error::CompileError`] any stage produces; there is
/// no recovery or partial output.
pub fn compile<S: AsRef<str>>(source: &[S]) -> CompileResult<Vec<String>> {
    let lines = line::read_lines(source)?;

    let mut parsed = Vec::with_capacity(lines.len());
    for line in lines {
        let stmt = parser::parse_line(&line)?;
        parsed.push((stmt, line));
    }

    let program = blocks::build(parsed)?;
    emitter::emit(&program)
}
