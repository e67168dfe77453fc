//! # Token Module
//!
//! Defines the token classes, keywords, and operator table for the source
//! language. Tokens are produced by the lexer one line at a time and consumed
//! by the parser. Each token carries its literal text; line information lives
//! on the owning [`SourceLine`](crate::line::SourceLine).

// -----------------------------------------------------------------------------
// TOKEN KIND — All Lexical Categories
// -----------------------------------------------------------------------------

/// Represents every token class in the source language.
///
/// Identifiers and number literals are lexically indistinguishable to later
/// stages except by shape, so both are emitted as [`TokenKind::Value`].
/// Operators are grouped by the precedence level that consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or number literal.
    Value,

    // -- Keywords --
    /// `if`
    If,
    /// `unless`
    Unless,
    /// `end`
    End,
    /// `goto`
    Goto,
    /// `print`
    Print,

    // -- Operators --
    /// `+` `-`
    AdditiveOperator,
    /// `*` `/` `\` `%` `//`
    MultiplicativeOperator,
    /// `==` `===` `!=` `!==` `<` `<=` `>` `>=`
    ComparisonOperator,
    /// `=`
    AssignmentOperator,
    /// `!` `~` (prefix-only)
    UnaryOperator,

    // -- Punctuation --
    /// `:`
    Colon,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
}

// -----------------------------------------------------------------------------
// TOKEN — Token with Literal Text
// -----------------------------------------------------------------------------

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The classification of this token.
    pub kind: TokenKind,
    /// The literal source text of this token.
    pub text: String,
}

impl Token {
    /// Creates a new token with the given kind and text.
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// OPERATOR TABLE
// -----------------------------------------------------------------------------

/// All operator symbols with their token classes, ordered longest symbol
/// first so the lexer never splits `===` into `==` `=` or `!==` into `!=` `=`.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("===", TokenKind::ComparisonOperator),
    ("!==", TokenKind::ComparisonOperator),
    ("==", TokenKind::ComparisonOperator),
    ("!=", TokenKind::ComparisonOperator),
    ("<=", TokenKind::ComparisonOperator),
    (">=", TokenKind::ComparisonOperator),
    ("//", TokenKind::MultiplicativeOperator),
    ("<", TokenKind::ComparisonOperator),
    (">", TokenKind::ComparisonOperator),
    ("+", TokenKind::AdditiveOperator),
    ("-", TokenKind::AdditiveOperator),
    ("*", TokenKind::MultiplicativeOperator),
    ("/", TokenKind::MultiplicativeOperator),
    ("\\", TokenKind::MultiplicativeOperator),
    ("%", TokenKind::MultiplicativeOperator),
    ("=", TokenKind::AssignmentOperator),
    (":", TokenKind::Colon),
    ("(", TokenKind::ParenOpen),
    (")", TokenKind::ParenClose),
    ("!", TokenKind::UnaryOperator),
    ("~", TokenKind::UnaryOperator),
];

// -----------------------------------------------------------------------------
// KEYWORD LOOKUP
// -----------------------------------------------------------------------------

/// Resolves an identifier to its keyword token kind, if it is a reserved
/// keyword. Returns `None` for ordinary identifiers.
#[inline]
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "if" => Some(TokenKind::If),
        "unless" => Some(TokenKind::Unless),
        "end" => Some(TokenKind::End),
        "goto" => Some(TokenKind::Goto),
        "print" => Some(TokenKind::Print),
        _ => None,
    }
}
