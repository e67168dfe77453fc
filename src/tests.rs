//! # Tests Module
//!
//! Unit and integration tests for the whole compiler pipeline: lexer, line
//! reader, parser, block builder, and emitter, plus end-to-end compiles
//! checked byte-for-byte against hand-computed mlog output.

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::lexer;
    use crate::line;
    use crate::token::TokenKind;

    // =========================================================================
    // HELPERS — Run source through the full pipeline
    // =========================================================================

    /// Compiles source lines, panicking on error.
    fn compile_ok(lines: &[&str]) -> Vec<String> {
        match crate::compile(lines) {
            Ok(instructions) => instructions,
            Err(e) => panic!("compile failed: {e}"),
        }
    }

    /// Compiles source lines and expects a specific error kind.
    fn expect_error(lines: &[&str], kind: ErrorKind) {
        match crate::compile(lines) {
            Ok(out) => panic!("expected {kind:?} error but compile produced: {out:?}"),
            Err(e) => assert_eq!(e.kind, kind, "expected {kind:?}, got: {e}"),
        }
    }

    /// Lexes one line and returns the token texts.
    fn lex_texts(source: &str) -> Vec<String> {
        lexer::lex(source)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    // =========================================================================
    // LEXER TESTS
    // =========================================================================

    #[test]
    fn lexer_ignores_blank_lines() {
        assert_eq!(lex_texts(""), Vec::<String>::new());
        assert_eq!(lex_texts("    "), Vec::<String>::new());
    }

    #[test]
    fn lexer_ignores_comments() {
        assert_eq!(lex_texts("# comment"), Vec::<String>::new());
        assert_eq!(lex_texts("    # indented comment"), Vec::<String>::new());
    }

    #[test]
    fn lexer_stops_at_trailing_comment() {
        assert_eq!(lex_texts("a = 1 # note"), ["a", "=", "1"]);
    }

    #[test]
    fn lexer_identifiers() {
        assert_eq!(lex_texts("a"), ["a"]);
        assert_eq!(lex_texts("abc1"), ["abc1"]);
        assert_eq!(lex_texts("_abc1"), ["_abc1"]);
        assert_eq!(lex_texts("@abc1"), ["@abc1"]);
    }

    #[test]
    fn lexer_unicode_identifier() {
        assert_eq!(lex_texts("π = 1"), ["π", "=", "1"]);
    }

    #[test]
    fn lexer_numbers() {
        assert_eq!(lex_texts("123"), ["123"]);
        assert_eq!(lex_texts("1.23"), ["1.23"]);
        assert_eq!(lex_texts(".23"), [".23"]);
        assert_eq!(lex_texts("-1.5"), ["-1.5"]);
    }

    #[test]
    fn lexer_single_character_operators() {
        assert_eq!(
            lex_texts("+-*/\\!~"),
            ["+", "-", "*", "/", "\\", "!", "~"]
        );
    }

    #[test]
    fn lexer_longest_operator_wins() {
        assert_eq!(lex_texts("==="), ["==="]);
        assert_eq!(lex_texts("!=="), ["!=="]);
        assert_eq!(lex_texts("== ="), ["==", "="]);
        assert_eq!(lex_texts("<= >= < >"), ["<=", ">=", "<", ">"]);
        assert_eq!(lex_texts("//"), ["//"]);
    }

    #[test]
    fn lexer_tokenizes_without_spaces() {
        assert_eq!(lex_texts("a=1"), ["a", "=", "1"]);
    }

    #[test]
    fn lexer_classifies_keywords() {
        let tokens = lexer::lex("if unless end goto print x").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::If,
                TokenKind::Unless,
                TokenKind::End,
                TokenKind::Goto,
                TokenKind::Print,
                TokenKind::Value,
            ]
        );
    }

    #[test]
    fn lexer_leading_minus_binds_to_number() {
        // `-1` is one value token; `- 1` is an operator then a value.
        assert_eq!(lex_texts("-1"), ["-1"]);
        assert_eq!(lex_texts("- 1"), ["-", "1"]);
        assert_eq!(lex_texts("a -1"), ["a", "-1"]);
    }

    #[test]
    fn lexer_rejects_unknown_characters() {
        let err = lexer::lex("a = $x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedToken);
        assert!(err.message.contains("$x"), "message was: {}", err.message);
    }

    // =========================================================================
    // LINE READER TESTS
    // =========================================================================

    #[test]
    fn line_reader_drops_token_free_lines() {
        let lines = line::read_lines(&["", "# comment", "  a = 1"]).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_number, 3);
        assert_eq!(lines[0].indent, 2);
    }

    #[test]
    fn line_reader_counts_leading_spaces() {
        let lines = line::read_lines(&["    x = 1"]).unwrap();
        assert_eq!(lines[0].indent, 4);
        assert_eq!(lines[0].text, "    x = 1");
    }

    #[test]
    fn line_reader_reports_line_number_on_lex_error() {
        let err = line::read_lines(&["a = 1", "b = $"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedToken);
        assert_eq!(err.line, Some(2));
    }

    // =========================================================================
    // TRIVIAL PROGRAMS
    // =========================================================================

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(compile_ok(&[]), Vec::<String>::new());
    }

    #[test]
    fn trivial_program() {
        assert_eq!(compile_ok(&["end"]), ["end"]);
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(compile_ok(&["value = 1"]), ["set value 1"]);
        assert_eq!(compile_ok(&["value=1"]), ["set value 1"]);
    }

    #[test]
    fn comments_and_blanks_compile_to_nothing() {
        assert_eq!(
            compile_ok(&["x = 1", "", "# comment", "    # indented", "y = 2"]),
            ["set x 1", "set y 2"]
        );
    }

    // =========================================================================
    // EXPRESSION LOWERING
    // =========================================================================

    #[test]
    fn binary_operators_emit_single_instruction() {
        assert_eq!(compile_ok(&["result = a + b"]), ["op add result a b"]);
        assert_eq!(compile_ok(&["result = a - b"]), ["op sub result a b"]);
        assert_eq!(compile_ok(&["result = a * b"]), ["op mul result a b"]);
        assert_eq!(compile_ok(&["result = a / b"]), ["op div result a b"]);
        assert_eq!(compile_ok(&["result = a // b"]), ["op idiv result a b"]);
        assert_eq!(compile_ok(&["result = a \\ b"]), ["op idiv result a b"]);
        assert_eq!(compile_ok(&["result = a % b"]), ["op mod result a b"]);
    }

    #[test]
    fn comparison_operators_emit_single_instruction() {
        assert_eq!(compile_ok(&["result = a == b"]), ["op equal result a b"]);
        assert_eq!(compile_ok(&["result = a != b"]), ["op notEqual result a b"]);
        assert_eq!(
            compile_ok(&["result = a === b"]),
            ["op strictEqual result a b"]
        );
        assert_eq!(compile_ok(&["result = a < b"]), ["op lessThan result a b"]);
        assert_eq!(
            compile_ok(&["result = a <= b"]),
            ["op lessThanEq result a b"]
        );
        assert_eq!(
            compile_ok(&["result = a > b"]),
            ["op greaterThan result a b"]
        );
        assert_eq!(
            compile_ok(&["result = a >= b"]),
            ["op greaterThanEq result a b"]
        );
    }

    #[test]
    fn operator_chain_uses_increasing_temps() {
        assert_eq!(
            compile_ok(&["result = a + b + c + d"]),
            [
                "op add $temp0 a b",
                "op add $temp1 $temp0 c",
                "op add result $temp1 d",
            ]
        );
    }

    #[test]
    fn additive_operators_share_a_level() {
        assert_eq!(
            compile_ok(&["result = a + b - c + d"]),
            [
                "op add $temp0 a b",
                "op sub $temp1 $temp0 c",
                "op add result $temp1 d",
            ]
        );
    }

    #[test]
    fn multiplicative_operators_share_a_level() {
        assert_eq!(
            compile_ok(&["result = a * b // c * d"]),
            [
                "op mul $temp0 a b",
                "op idiv $temp1 $temp0 c",
                "op mul result $temp1 d",
            ]
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            compile_ok(&["result = a * b + c * d"]),
            [
                "op mul $temp0 a b",
                "op mul $temp1 c d",
                "op add result $temp0 $temp1",
            ]
        );
    }

    #[test]
    fn relational_binds_tighter_than_equality() {
        assert_eq!(
            compile_ok(&["result = a < b == c < d"]),
            [
                "op lessThan $temp0 a b",
                "op lessThan $temp1 c d",
                "op equal result $temp0 $temp1",
            ]
        );
    }

    #[test]
    fn parentheses_group_strictly() {
        assert_eq!(
            compile_ok(&["result = (a + b) + (c + d)"]),
            [
                "op add $temp0 a b",
                "op add $temp1 c d",
                "op add result $temp0 $temp1",
            ]
        );
    }

    #[test]
    fn missing_close_paren_fails() {
        expect_error(&["result = (a + b"], ErrorKind::UnexpectedEndOfLine);
    }

    #[test]
    fn strict_not_equal_lowers_to_two_instructions() {
        assert_eq!(
            compile_ok(&["result = a !== b"]),
            ["op strictEqual $temp0 a b", "op equal result $temp0 0"]
        );
    }

    #[test]
    fn strict_not_equal_nested_still_two_instructions() {
        assert_eq!(
            compile_ok(&["result = a !== b + c"]),
            [
                "op add $temp0 b c",
                "op strictEqual $temp1 a $temp0",
                "op equal result $temp1 0",
            ]
        );
    }

    #[test]
    fn unary_minus_subtracts_from_zero() {
        assert_eq!(compile_ok(&["result = - a"]), ["op sub result 0 a"]);
        assert_eq!(compile_ok(&["result = -(a + b)"]), [
            "op add $temp0 a b",
            "op sub result 0 $temp0",
        ]);
    }

    #[test]
    fn unary_not_is_equal_zero() {
        assert_eq!(compile_ok(&["result = !a"]), ["op equal result a 0"]);
        assert_eq!(
            compile_ok(&["result = !!a"]),
            ["op equal $temp0 a 0", "op equal result $temp0 0"]
        );
    }

    #[test]
    fn unary_flip_uses_flip_opcode() {
        assert_eq!(compile_ok(&["result = ~a"]), ["op flip result a 0"]);
    }

    #[test]
    fn negative_literal_is_a_plain_value() {
        assert_eq!(compile_ok(&["result = -1"]), ["set result -1"]);
    }

    #[test]
    fn print_lowers_compound_values() {
        assert_eq!(compile_ok(&["print 1"]), ["print 1"]);
        assert_eq!(
            compile_ok(&["print a + b"]),
            ["op add $temp0 a b", "print $temp0"]
        );
    }

    // =========================================================================
    // PARSER ERRORS
    // =========================================================================

    #[test]
    fn trailing_tokens_fail() {
        expect_error(&["value = 1 1"], ErrorKind::TrailingTokens);
    }

    #[test]
    fn unrecognized_statement_is_a_syntax_error() {
        let err = crate::compile(&["+"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert_eq!(err.line, Some(1));
        assert!(err.message.contains('+'), "message was: {}", err.message);
    }

    #[test]
    fn keyword_in_value_position_fails() {
        expect_error(&["x = print"], ErrorKind::ExpectedButFound);
    }

    #[test]
    fn goto_requires_identifier() {
        expect_error(&["goto 1"], ErrorKind::ExpectedButFound);
        expect_error(&["goto"], ErrorKind::UnexpectedEndOfLine);
    }

    #[test]
    fn dangling_operator_fails() {
        expect_error(&["x = a +"], ErrorKind::UnexpectedEndOfLine);
    }

    #[test]
    fn error_carries_line_number() {
        let err = crate::compile(&["a = 1", "b = c +"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfLine);
        assert_eq!(err.line, Some(2));
    }

    // =========================================================================
    // LABELS & GOTO
    // =========================================================================

    #[test]
    fn label_goto_round_trip() {
        assert_eq!(
            compile_ok(&["print 1", "label1:", "print 2", "goto label1"]),
            ["print 1", "print 2", "jump 1 always 0 0"]
        );
    }

    #[test]
    fn forward_goto_resolves() {
        assert_eq!(
            compile_ok(&["goto skip", "print 1", "skip:", "print 2"]),
            ["jump 2 always 0 0", "print 1", "print 2"]
        );
    }

    #[test]
    fn goto_to_trailing_label_wraps_to_start() {
        assert_eq!(
            compile_ok(&["print 1", "goto done", "done:"]),
            ["print 1", "jump 0 always 0 0"]
        );
    }

    #[test]
    fn colon_rule_wins_over_keywords() {
        // `end:` declares a label named `end` rather than emitting `end`.
        assert_eq!(compile_ok(&["end:", "end"]), ["end"]);
    }

    #[test]
    fn unknown_label_fails() {
        expect_error(&["goto missing"], ErrorKind::UnknownLabel);
    }

    #[test]
    fn duplicate_label_fails() {
        expect_error(&["label1:", "print 1", "label1:"], ErrorKind::DuplicateLabel);
    }

    // =========================================================================
    // CONDITIONALS
    // =========================================================================

    #[test]
    fn if_with_comparison_jumps_directly() {
        assert_eq!(
            compile_ok(&["if a == b", "  x = 1", "  y = 2", "z = 3"]),
            [
                "jump 2 equal a b",
                "jump 4 always 0 0",
                "set x 1",
                "set y 2",
                "set z 3",
            ]
        );
    }

    #[test]
    fn if_with_bare_value_jumps_on_truthy() {
        assert_eq!(
            compile_ok(&["if a", "  x = 1", "end"]),
            [
                "jump 2 notEqual a 0",
                "jump 3 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn if_with_arithmetic_condition_lowers_first() {
        assert_eq!(
            compile_ok(&["if a + b", "  x = 1", "end"]),
            [
                "op add $temp0 a b",
                "jump 3 notEqual $temp0 0",
                "jump 4 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn if_strict_not_equal_is_not_directly_jumpable() {
        assert_eq!(
            compile_ok(&["if a !== b", "  x = 1", "end"]),
            [
                "op strictEqual $temp0 a b",
                "op equal $temp1 $temp0 0",
                "jump 4 notEqual $temp1 0",
                "jump 5 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn unless_inverts_the_comparison_opcode() {
        assert_eq!(
            compile_ok(&["unless a == b", "  x = 1", "end"]),
            [
                "jump 2 notEqual a b",
                "jump 3 always 0 0",
                "set x 1",
                "end",
            ]
        );
        assert_eq!(
            compile_ok(&["unless a < b", "  x = 1", "end"]),
            [
                "jump 2 greaterThanEq a b",
                "jump 3 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn unless_strict_not_equal_inverts_to_strict_equal() {
        assert_eq!(
            compile_ok(&["unless a !== b", "  x = 1", "end"]),
            [
                "jump 2 strictEqual a b",
                "jump 3 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn unless_strict_equal_falls_back_to_falsy_jump() {
        // `===` has no jumpable inverse, so the condition lowers first.
        assert_eq!(
            compile_ok(&["unless a === b", "  x = 1", "end"]),
            [
                "op strictEqual $temp0 a b",
                "jump 3 equal $temp0 0",
                "jump 4 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn unless_bare_value_jumps_on_falsy() {
        assert_eq!(
            compile_ok(&["unless a", "  x = 1", "end"]),
            ["jump 2 equal a 0", "jump 3 always 0 0", "set x 1", "end"]
        );
    }

    #[test]
    fn nested_if_produces_nested_offsets() {
        assert_eq!(
            compile_ok(&["if a == b", "  if c == d", "    x = 1", "end"]),
            [
                "jump 2 equal a b",
                "jump 5 always 0 0",
                "jump 4 equal c d",
                "jump 5 always 0 0",
                "set x 1",
                "end",
            ]
        );
    }

    #[test]
    fn if_with_empty_body_is_allowed() {
        assert_eq!(
            compile_ok(&["if a == b", "end"]),
            ["jump 2 equal a b", "jump 2 always 0 0", "end"]
        );
    }

    #[test]
    fn conditionals_do_not_consume_temp_numbers() {
        // Temp labels draw from their own counter, so the first temp
        // variable after a conditional is still $temp0.
        assert_eq!(
            compile_ok(&["if a == b", "  x = c + d + e", "end"]),
            [
                "jump 2 equal a b",
                "jump 4 always 0 0",
                "op add $temp0 c d",
                "op add x $temp0 e",
                "end",
            ]
        );
    }

    // =========================================================================
    // INDENTATION
    // =========================================================================

    #[test]
    fn first_line_must_not_be_indented() {
        expect_error(&["  x = 1"], ErrorKind::InvalidIndentation);
    }

    #[test]
    fn indent_without_open_block_fails() {
        expect_error(&["x = 1", "  y = 2"], ErrorKind::InvalidIndentation);
    }

    #[test]
    fn sibling_lines_must_agree_on_indentation() {
        expect_error(
            &["if a == b", "  x = 1", "   y = 2"],
            ErrorKind::InvalidIndentation,
        );
    }

    #[test]
    fn comment_indentation_is_ignored() {
        assert_eq!(
            compile_ok(&["if a == b", "      # deep comment", "  x = 1", "end"]),
            ["jump 2 equal a b", "jump 3 always 0 0", "set x 1", "end"]
        );
    }

    #[test]
    fn dedent_returns_to_enclosing_block() {
        assert_eq!(
            compile_ok(&["if a == b", "  x = 1", "y = 2"]),
            ["jump 2 equal a b", "jump 3 always 0 0", "set x 1", "set y 2"]
        );
    }

    // =========================================================================
    // WHOLE-PIPELINE PROPERTIES
    // =========================================================================

    #[test]
    fn compile_is_idempotent() {
        let source = [
            "total = a + b + c",
            "loop:",
            "if total > 10",
            "  print total",
            "goto loop",
        ];
        let first = compile_ok(&source);
        let second = compile_ok(&source);
        assert_eq!(first, second);
    }

    #[test]
    fn small_program_end_to_end() {
        let source = [
            "# countdown",
            "n = 3",
            "loop:",
            "print n",
            "n = n - 1",
            "if n > 0",
            "  goto loop",
            "end",
        ];
        assert_eq!(
            compile_ok(&source),
            [
                "set n 3",
                "print n",
                "op sub n n 1",
                "jump 5 greaterThan n 0",
                "jump 6 always 0 0",
                "jump 1 always 0 0",
                "end",
            ]
        );
    }
}
