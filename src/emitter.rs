//! # Emitter Module
//!
//! Walks the nested statement tree in source order and produces the final
//! mlog instruction strings. Compound expressions are lowered into
//! temp-variable chains, `goto` and conditionals become placeholder jumps
//! keyed by label, and a final resolution pass rewrites every placeholder
//! into a concrete `jump <offset> ...` once all label offsets are known.

use rustc_hash::FxHashMap;

use crate::ast::{BinOp, Expr, IfKind, Stmt, UnaryOp};
use crate::error::{CompileError, CompileResult};

/// Emits the whole program.
///
/// # Errors
/// Fails with `DuplicateLabel` or `UnknownLabel`.
pub fn emit(program: &[Stmt]) -> CompileResult<Vec<String>> {
    let mut emitter = Emitter::new();
    emitter.emit_all(program)?;
    emitter.resolve()
}

// -----------------------------------------------------------------------------
// INSTRUCTION BUFFER
// -----------------------------------------------------------------------------

/// One buffered instruction: either a finished line of output text, or an
/// unresolved jump awaiting the label table.
enum Instruction {
    Text(String),
    Jump {
        label: String,
        operator: &'static str,
        lvalue: String,
        rvalue: String,
    },
}

/// How a binary operator reaches the target instruction set.
enum Opcode {
    /// Emitted as a single `op` instruction.
    Direct(&'static str),
    /// No opcode of its own: emit the named opcode into a temp, then
    /// `equal <temp> 0` into the real target.
    Negated(&'static str),
}

// -----------------------------------------------------------------------------
// EMITTER STATE
// -----------------------------------------------------------------------------

/// Per-compile code generation state. Counters and the label table are
/// constructed fresh for every call, so independent compiles never share
/// state.
struct Emitter {
    next_temp: u32,
    next_label: u32,
    instructions: Vec<Instruction>,
    labels: FxHashMap<String, usize>,
}

impl Emitter {
    fn new() -> Self {
        Self {
            next_temp: 0,
            next_label: 0,
            instructions: Vec::new(),
            labels: FxHashMap::default(),
        }
    }

    fn emit_all(&mut self, stmts: &[Stmt]) -> CompileResult<()> {
        for stmt in stmts {
            self.emit_stmt(stmt)?;
        }
        Ok(())
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> CompileResult<()> {
        match stmt {
            Stmt::Assignment { lvalue, rvalue } => {
                // The rvalue lowers directly into the assignment target;
                // no temp is needed at the top level.
                self.emit_into(rvalue, Some(lvalue))?;
            }
            Stmt::End => self.push_text("end".to_string()),
            Stmt::Goto { label } => self.instructions.push(Instruction::Jump {
                label: label.clone(),
                operator: "always",
                lvalue: "0".to_string(),
                rvalue: "0".to_string(),
            }),
            Stmt::Label { name } => {
                if self.labels.contains_key(name) {
                    return Err(CompileError::duplicate_label(name));
                }
                self.add_label(name.clone());
            }
            Stmt::Print { value } => {
                let operand = self.resolve_to_operand(value)?;
                self.push_text(format!("print {operand}"));
            }
            Stmt::If {
                kind,
                condition,
                body,
            } => self.emit_if(*kind, condition, body)?,
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // EXPRESSION LOWERING
    // -------------------------------------------------------------------------

    /// Resolves an expression to something an instruction can reference:
    /// plain values resolve to themselves, compound expressions are lowered
    /// into a fresh temp variable.
    fn resolve_to_operand(&mut self, expr: &Expr) -> CompileResult<String> {
        match expr {
            Expr::Ident(text) | Expr::Number(text) => Ok(text.clone()),
            _ => self.emit_into(expr, None),
        }
    }

    /// Lowers `expr` into `target`, or into a fresh temp when `target` is
    /// `None`. Returns the name written to.
    ///
    /// The temp name is allocated only at the instant the instruction using
    /// it is pushed — operands lower first, so temp numbers increase in
    /// emission order even though lowering is recursive.
    fn emit_into(&mut self, expr: &Expr, target: Option<&str>) -> CompileResult<String> {
        match expr {
            Expr::Ident(text) | Expr::Number(text) => {
                let target = self.target_name(target);
                self.push_text(format!("set {target} {text}"));
                Ok(target)
            }
            Expr::Unary { op, operand } => {
                let operand = self.resolve_to_operand(operand)?;
                let target = self.target_name(target);
                match op {
                    UnaryOp::Neg => self.push_text(format!("op sub {target} 0 {operand}")),
                    UnaryOp::Not => self.push_text(format!("op equal {target} {operand} 0")),
                    UnaryOp::Flip => self.push_text(format!("op flip {target} {operand} 0")),
                }
                Ok(target)
            }
            Expr::Binary { left, op, right } => {
                let lvalue = self.resolve_to_operand(left)?;
                let rvalue = self.resolve_to_operand(right)?;
                match opcode(*op) {
                    Opcode::Direct(name) => {
                        let target = self.target_name(target);
                        self.push_text(format!("op {name} {target} {lvalue} {rvalue}"));
                        Ok(target)
                    }
                    Opcode::Negated(name) => {
                        let temp = self.next_temp_identifier();
                        self.push_text(format!("op {name} {temp} {lvalue} {rvalue}"));
                        let target = self.target_name(target);
                        self.push_text(format!("op equal {target} {temp} 0"));
                        Ok(target)
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // CONDITIONALS
    // -------------------------------------------------------------------------

    /// Emission shape: conditional jump to the body label, unconditional
    /// jump to the end label, the body, then the end label. The labels are
    /// internal resolution keys only and never appear in the output.
    fn emit_if(&mut self, kind: IfKind, condition: &Expr, body: &[Stmt]) -> CompileResult<()> {
        let body_label = self.next_temp_label();
        let end_label = self.next_temp_label();

        let (operator, lvalue, rvalue) = self.jump_condition(kind, condition)?;
        self.instructions.push(Instruction::Jump {
            label: body_label.clone(),
            operator,
            lvalue,
            rvalue,
        });
        self.instructions.push(Instruction::Jump {
            label: end_label.clone(),
            operator: "always",
            lvalue: "0".to_string(),
            rvalue: "0".to_string(),
        });

        self.add_label(body_label);
        self.emit_all(body)?;
        self.add_label(end_label);
        Ok(())
    }

    /// A comparison the jump instruction supports directly becomes the jump
    /// condition in place; `unless` uses the inverted opcode. Everything
    /// else (arithmetic, bare values, `!==`, uninvertible `===` under
    /// `unless`) lowers the whole condition to one operand and jumps on it
    /// being truthy (`if`) or falsy (`unless`).
    fn jump_condition(
        &mut self,
        kind: IfKind,
        condition: &Expr,
    ) -> CompileResult<(&'static str, String, String)> {
        if let Expr::Binary { left, op, right } = condition {
            let jump_op = match kind {
                IfKind::If => jump_opcode(*op),
                IfKind::Unless => inverted_jump_opcode(*op),
            };
            if let Some(operator) = jump_op {
                let lvalue = self.resolve_to_operand(left)?;
                let rvalue = self.resolve_to_operand(right)?;
                return Ok((operator, lvalue, rvalue));
            }
        }

        let value = self.resolve_to_operand(condition)?;
        let operator = match kind {
            IfKind::If => "notEqual",
            IfKind::Unless => "equal",
        };
        Ok((operator, value, "0".to_string()))
    }

    // -------------------------------------------------------------------------
    // RESOLUTION PASS
    // -------------------------------------------------------------------------

    /// Rewrites every jump placeholder into a concrete instruction now that
    /// all label offsets are known.
    fn resolve(self) -> CompileResult<Vec<String>> {
        let Emitter {
            instructions,
            labels,
            ..
        } = self;
        let total = instructions.len();

        instructions
            .into_iter()
            .map(|instruction| match instruction {
                Instruction::Text(text) => Ok(text),
                Instruction::Jump {
                    label,
                    operator,
                    lvalue,
                    rvalue,
                } => {
                    let offset = *labels
                        .get(&label)
                        .ok_or_else(|| CompileError::unknown_label(&label))?;

                    // A label sitting past the last instruction wraps the
                    // jump around to the start of the program.
                    let offset = if offset >= total { 0 } else { offset };

                    Ok(format!("jump {offset} {operator} {lvalue} {rvalue}"))
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // HELPERS
    // -------------------------------------------------------------------------

    fn next_temp_identifier(&mut self) -> String {
        let n = self.next_temp;
        self.next_temp += 1;
        format!("$temp{n}")
    }

    // Temp labels draw from their own counter so conditionals never consume
    // temp-variable numbers. User labels are identifiers and identifiers
    // cannot contain '$', so collisions are impossible.
    fn next_temp_label(&mut self) -> String {
        let n = self.next_label;
        self.next_label += 1;
        format!("$label{n}")
    }

    fn target_name(&mut self, target: Option<&str>) -> String {
        match target {
            Some(name) => name.to_string(),
            None => self.next_temp_identifier(),
        }
    }

    fn add_label(&mut self, label: String) {
        self.labels.insert(label, self.instructions.len());
    }

    #[inline]
    fn push_text(&mut self, text: String) {
        self.instructions.push(Instruction::Text(text));
    }
}

// -----------------------------------------------------------------------------
// OPCODE TABLES
// -----------------------------------------------------------------------------

fn opcode(op: BinOp) -> Opcode {
    match op {
        BinOp::Add => Opcode::Direct("add"),
        BinOp::Sub => Opcode::Direct("sub"),
        BinOp::Mul => Opcode::Direct("mul"),
        BinOp::Div => Opcode::Direct("div"),
        BinOp::IDiv => Opcode::Direct("idiv"),
        BinOp::Mod => Opcode::Direct("mod"),
        BinOp::Eq => Opcode::Direct("equal"),
        BinOp::Ne => Opcode::Direct("notEqual"),
        BinOp::StrictEq => Opcode::Direct("strictEqual"),
        BinOp::StrictNe => Opcode::Negated("strictEqual"),
        BinOp::Lt => Opcode::Direct("lessThan"),
        BinOp::Le => Opcode::Direct("lessThanEq"),
        BinOp::Gt => Opcode::Direct("greaterThan"),
        BinOp::Ge => Opcode::Direct("greaterThanEq"),
    }
}

/// Comparisons the target's jump instruction supports directly. `!==` is
/// the one comparison it does not.
fn jump_opcode(op: BinOp) -> Option<&'static str> {
    match op {
        BinOp::Eq => Some("equal"),
        BinOp::Ne => Some("notEqual"),
        BinOp::StrictEq => Some("strictEqual"),
        BinOp::Lt => Some("lessThan"),
        BinOp::Le => Some("lessThanEq"),
        BinOp::Gt => Some("greaterThan"),
        BinOp::Ge => Some("greaterThanEq"),
        _ => None,
    }
}

/// Jump opcode for the logical inverse of a comparison. `===` has no
/// jumpable inverse; `!==`'s inverse is `===`, which is jumpable.
fn inverted_jump_opcode(op: BinOp) -> Option<&'static str> {
    match op {
        BinOp::Eq => Some("notEqual"),
        BinOp::Ne => Some("equal"),
        BinOp::StrictNe => Some("strictEqual"),
        BinOp::Lt => Some("greaterThanEq"),
        BinOp::Le => Some("greaterThan"),
        BinOp::Gt => Some("lessThanEq"),
        BinOp::Ge => Some("lessThan"),
        _ => None,
    }
}
