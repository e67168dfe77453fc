//! # Parser Module
//!
//! Per-line recursive descent parser with precedence climbing for
//! expressions. Consumes one [`SourceLine`]'s token sequence and produces
//! exactly one flat [`Stmt`]; indentation nesting is the block builder's
//! job, so conditional headers come back with an empty body.
//!
//! The cursor is an index over the token slice — peeking never consumes
//! and nothing is removed from the front.

use crate::ast::{BinOp, Expr, IfKind, Stmt, UnaryOp};
use crate::error::{CompileError, CompileResult};
use crate::line::SourceLine;
use crate::token::{Token, TokenKind};

/// Parses one line into a statement.
///
/// # Errors
/// Fails with `SyntaxError` when no statement form matches, with
/// `TrailingTokens` when tokens remain after a complete statement, or with
/// the expression-level errors (`UnexpectedEndOfLine`, `ExpectedButFound`).
/// Every error carries the line number.
pub fn parse_line(line: &SourceLine) -> CompileResult<Stmt> {
    let mut parser = LineParser::new(&line.tokens);

    let stmt = parser
        .parse_statement(line)
        .map_err(|e| e.with_line(line.line_number))?;

    if let Some(token) = parser.peek() {
        return Err(
            CompileError::trailing_tokens(&token.text, line.text.trim())
                .with_line(line.line_number),
        );
    }

    Ok(stmt)
}

// -----------------------------------------------------------------------------
// LINE PARSER
// -----------------------------------------------------------------------------

struct LineParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> LineParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    // -------------------------------------------------------------------------
    // STATEMENT DISPATCH
    // -------------------------------------------------------------------------

    /// Tries each statement form in order; first match wins. The label rule
    /// runs before keyword rules, so `end:` declares a label named `end`.
    fn parse_statement(&mut self, line: &SourceLine) -> CompileResult<Stmt> {
        if self.peek_at(1).map(|t| t.kind) == Some(TokenKind::Colon) {
            let name = self.next()?.text.clone();
            self.next()?; // colon
            return Ok(Stmt::Label { name });
        }

        match self.peek().map(|t| t.kind) {
            Some(TokenKind::End) => {
                self.next()?;
                Ok(Stmt::End)
            }
            Some(TokenKind::Goto) => {
                self.next()?;
                let label = self.parse_label_name()?;
                Ok(Stmt::Goto { label })
            }
            Some(TokenKind::If) | Some(TokenKind::Unless) => {
                let kind = if self.next()?.kind == TokenKind::If {
                    IfKind::If
                } else {
                    IfKind::Unless
                };
                let condition = self.parse_expression()?;
                Ok(Stmt::If {
                    kind,
                    condition,
                    body: Vec::new(),
                })
            }
            Some(TokenKind::Print) => {
                self.next()?;
                let value = self.parse_expression()?;
                Ok(Stmt::Print { value })
            }
            _ => {
                if self.peek_at(1).map(|t| t.kind) == Some(TokenKind::AssignmentOperator) {
                    let lvalue = self.next()?.text.clone();
                    self.next()?; // '='
                    let rvalue = self.parse_expression()?;
                    return Ok(Stmt::Assignment { lvalue, rvalue });
                }

                Err(CompileError::syntax_error(
                    line.line_number,
                    line.text.trim(),
                ))
            }
        }
    }

    fn parse_label_name(&mut self) -> CompileResult<String> {
        let token = self.next()?;
        if token.kind != TokenKind::Value || !is_identifier(&token.text) {
            return Err(CompileError::expected_but_found("identifier", &token.text));
        }
        Ok(token.text.clone())
    }

    // -------------------------------------------------------------------------
    // EXPRESSIONS — Precedence Climbing
    // -------------------------------------------------------------------------

    /// Precedence, lowest to highest: equality, relational, additive,
    /// multiplicative, unary, primary. Binary levels are left-associative.
    fn parse_expression(&mut self) -> CompileResult<Expr> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> CompileResult<Expr> {
        self.parse_binary(&["==", "===", "!=", "!=="], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> CompileResult<Expr> {
        self.parse_binary(&["<", "<=", ">", ">="], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> CompileResult<Expr> {
        self.parse_binary(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> CompileResult<Expr> {
        self.parse_binary(&["*", "/", "\\", "%", "//"], Self::parse_unary)
    }

    fn parse_binary(
        &mut self,
        operators: &[&'static str],
        mut operand: impl FnMut(&mut Self) -> CompileResult<Expr>,
    ) -> CompileResult<Expr> {
        let mut expr = operand(self)?;

        while let Some(symbol) = self.match_operator(operators) {
            let right = operand(self)?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op: symbol_to_binop(symbol),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> CompileResult<Expr> {
        if let Some(symbol) = self.match_operator(&["-", "!", "~"]) {
            let op = match symbol {
                "-" => UnaryOp::Neg,
                "!" => UnaryOp::Not,
                "~" => UnaryOp::Flip,
                _ => unreachable!("not a unary operator: {symbol}"),
            };
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> CompileResult<Expr> {
        if self.peek().map(|t| t.kind) == Some(TokenKind::ParenOpen) {
            self.next()?;
            let expr = self.parse_expression()?;
            let close = self.next()?;
            if close.kind != TokenKind::ParenClose {
                return Err(CompileError::expected_but_found(")", &close.text));
            }
            return Ok(expr);
        }

        self.parse_value()
    }

    fn parse_value(&mut self) -> CompileResult<Expr> {
        let token = self.next()?;
        if token.kind != TokenKind::Value {
            return Err(CompileError::expected_but_found("value", &token.text));
        }

        if is_identifier(&token.text) {
            Ok(Expr::Ident(token.text.clone()))
        } else {
            Ok(Expr::Number(token.text.clone()))
        }
    }

    // -------------------------------------------------------------------------
    // TOKEN HELPERS
    // -------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Consumes and returns the current token, or fails at end of line.
    fn next(&mut self) -> CompileResult<&Token> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(CompileError::unexpected_end_of_line)?;
        self.pos += 1;
        Ok(token)
    }

    /// Consumes the current token if its text is one of `symbols`, returning
    /// the matched symbol.
    fn match_operator(&mut self, symbols: &[&'static str]) -> Option<&'static str> {
        let token = self.peek()?;
        let symbol = *symbols.iter().find(|s| **s == token.text)?;
        self.pos += 1;
        Some(symbol)
    }
}

// -----------------------------------------------------------------------------
// OPERATOR CONVERSION
// -----------------------------------------------------------------------------

/// Converts an operator symbol to its AST `BinOp`.
fn symbol_to_binop(symbol: &str) -> BinOp {
    match symbol {
        "+" => BinOp::Add,
        "-" => BinOp::Sub,
        "*" => BinOp::Mul,
        "/" => BinOp::Div,
        "\\" | "//" => BinOp::IDiv,
        "%" => BinOp::Mod,
        "==" => BinOp::Eq,
        "!=" => BinOp::Ne,
        "===" => BinOp::StrictEq,
        "!==" => BinOp::StrictNe,
        "<" => BinOp::Lt,
        "<=" => BinOp::Le,
        ">" => BinOp::Gt,
        ">=" => BinOp::Ge,
        _ => unreachable!("not a binary operator: {symbol}"),
    }
}

/// True when a value token is identifier-shaped rather than a number.
/// The lexer only emits values matching one of the two shapes, so checking
/// the first character is sufficient.
fn is_identifier(text: &str) -> bool {
    !text.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
}
