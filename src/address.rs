//! Address expressions in the debugger's native syntax.
//!
//! Numbers are hexadecimal unless prefixed with `#` (decimal). `$` and `here`
//! refer to the context address. Terms combine with `+` and `-`, wrapping at
//! 64 bits like pointer arithmetic.

/// Parse `text` relative to `context`. Returns `None` for empty or malformed input.
pub fn parse_address_expr(text: &str, context: u64) -> Option<u64> {
    let mut total: u64 = 0;
    let mut negate = false;
    let mut expect_term = true;

    for token in tokenize(text) {
        match token {
            Token::Op(op) if expect_term => {
                // unary sign
                if op == '-' {
                    negate = !negate;
                }
            }
            Token::Op(op) => {
                negate = op == '-';
                expect_term = true;
            }
            Token::Term(term) => {
                let value = parse_term(term, context)?;
                total = apply(total, value, negate);
                negate = false;
                expect_term = false;
            }
        }
    }

    if expect_term {
        return None;
    }
    Some(total)
}

enum Token<'a> {
    Op(char),
    Term(&'a str),
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == '+' || c == '-' {
            let term = text[start..i].trim();
            if !term.is_empty() {
                tokens.push(Token::Term(term));
            }
            tokens.push(Token::Op(c));
            start = i + c.len_utf8();
        }
    }
    let term = text[start..].trim();
    if !term.is_empty() {
        tokens.push(Token::Term(term));
    }
    tokens
}

fn apply(total: u64, value: u64, negate: bool) -> u64 {
    if negate {
        total.wrapping_sub(value)
    } else {
        total.wrapping_add(value)
    }
}

fn parse_term(term: &str, context: u64) -> Option<u64> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    if term == "$" || term.eq_ignore_ascii_case("here") {
        return Some(context);
    }
    if let Some(decimal) = term.strip_prefix('#') {
        return decimal.parse::<u64>().ok();
    }
    let digits = term
        .strip_prefix("0x")
        .or_else(|| term.strip_prefix("0X"))
        .or_else(|| term.strip_suffix('h'))
        .or_else(|| term.strip_suffix('H'))
        .unwrap_or(term);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_hex() {
        assert_eq!(parse_address_expr("10", 0), Some(0x10));
        assert_eq!(parse_address_expr("  1A2b ", 0), Some(0x1a2b));
    }

    #[test]
    fn prefixes_and_suffixes() {
        assert_eq!(parse_address_expr("0x400", 0), Some(0x400));
        assert_eq!(parse_address_expr("400h", 0), Some(0x400));
        assert_eq!(parse_address_expr("#16", 0), Some(16));
    }

    #[test]
    fn arithmetic_and_context() {
        assert_eq!(parse_address_expr("100+20", 0), Some(0x120));
        assert_eq!(parse_address_expr("100 - 20", 0), Some(0xe0));
        assert_eq!(parse_address_expr("$+8", 0x1000), Some(0x1008));
        assert_eq!(parse_address_expr("here", 0x2000), Some(0x2000));
        assert_eq!(parse_address_expr("-1", 0), Some(u64::MAX));
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse_address_expr("", 0), None);
        assert_eq!(parse_address_expr("   ", 0), None);
        assert_eq!(parse_address_expr("zz", 0), None);
        assert_eq!(parse_address_expr("10+", 0), None);
        assert_eq!(parse_address_expr("0x", 0), None);
        assert_eq!(parse_address_expr("#ff", 0), None);
        assert_eq!(parse_address_expr("1 2", 0), None);
    }
}
