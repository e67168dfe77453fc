/// Expression tree. Strictly a tree: every node owns its children and is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Identifier reference, e.g. `speed` or `@copper`.
    Ident(String),
    /// Number literal, carried as its source text, e.g. `1.5` or `-2`.
    Number(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
    /// `~`
    Flip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `//` and `\` both lower to integer division.
    IDiv,
    Mod,
    Eq,
    Ne,
    StrictEq,
    /// `!==`; has no direct opcode and is synthesized at code generation.
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Whether a conditional runs its body when the condition is true (`if`) or
/// false (`unless`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfKind {
    If,
    Unless,
}

/// One statement. Only `If` nests; its body is filled in by the block
/// builder — the parser always produces it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Assignment {
        lvalue: String,
        rvalue: Expr,
    },
    End,
    Goto {
        label: String,
    },
    Label {
        name: String,
    },
    Print {
        value: Expr,
    },
    If {
        kind: IfKind,
        condition: Expr,
        body: Vec<Stmt>,
    },
}
