use crate::error::{CompileError, CompileResult};
use crate::token::{lookup_keyword, Token, TokenKind, OPERATORS};

/// Tokenizes one line of source text.
///
/// Blank lines and `#` comments (leading or trailing) produce no tokens.
/// Anything that is neither a value nor a known operator symbol fails with
/// `UnrecognizedToken` quoting the unconsumed remainder of the line.
pub fn lex(line: &str) -> CompileResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = line.trim();

    while !rest.is_empty() && !rest.starts_with('#') {
        let token = next_token(rest).ok_or_else(|| CompileError::unrecognized_token(rest))?;
        rest = rest[token.text.len()..].trim_start();
        tokens.push(token);
    }

    Ok(tokens)
}

// Numbers are tried before operators so a leading `-` directly followed by
// digits belongs to the number token, matching `-?\d+(\.\d+)?` / `-?\.\d+`.
fn next_token(rest: &str) -> Option<Token> {
    if let Some(len) = match_number(rest) {
        return Some(Token::new(TokenKind::Value, &rest[..len]));
    }

    if let Some(len) = match_identifier(rest) {
        let text = &rest[..len];
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Value);
        return Some(Token::new(kind, text));
    }

    for &(symbol, kind) in OPERATORS {
        if rest.starts_with(symbol) {
            return Some(Token::new(kind, symbol));
        }
    }

    None
}

fn match_number(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut pos = usize::from(bytes.first() == Some(&b'-'));

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    if int_digits == 0 {
        // No integer part: only `-?.digits` remains possible.
        if bytes.get(pos) != Some(&b'.') {
            return None;
        }
        let frac_digits = count_digits(&bytes[pos + 1..]);
        if frac_digits == 0 {
            return None;
        }
        return Some(pos + 1 + frac_digits);
    }

    if bytes.get(pos) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[pos + 1..]);
        if frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    Some(pos)
}

// Identifiers are `@?`/`_`/Unicode-letter first, ASCII word chars after.
fn match_identifier(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_alphabetic() || first == '_' || first == '@') {
        return None;
    }

    let mut end = first.len_utf8();
    for (index, ch) in chars {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            end = index + ch.len_utf8();
        } else {
            break;
        }
    }

    Some(end)
}

#[inline]
fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
