use super::BinOp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(BinOp),
    OpenParen,
    CloseParen,
}

#[derive(Debug, Clone)]
pub struct LexError(pub String);

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for LexError {}

/// Splits an expression into tokens with a single left-to-right scan.
///
/// A `-` in unary position (first token, after an operator, or after an
/// open paren) is rewritten rather than emitted directly: `-(expr)`
/// becomes `(-1) * (expr)`, and `-<number>` becomes a negative literal.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            tokens.push(Token::OpenParen);
            i += 1;
            continue;
        }

        if c == ')' {
            tokens.push(Token::CloseParen);
            i += 1;
            continue;
        }

        if let Some(op) = BinOp::from_symbol(c) {
            if op == BinOp::Sub && unary_position(&tokens) {
                // Peek the next non-space character without consuming it
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }

                if j < chars.len() && chars[j] == '(' {
                    // Rewrite "-(" as "(-1) * (", leaving the paren to be
                    // scanned normally on the next iteration
                    tokens.push(Token::Number(-1.0));
                    tokens.push(Token::Operator(BinOp::Mul));
                    i = j;
                    continue;
                }

                let next = i + 1;
                if next < chars.len() && (chars[next].is_ascii_digit() || chars[next] == '.') {
                    // Consume the minus and the literal as one negative number
                    let (value, end) = scan_number(&chars, i)?;
                    tokens.push(Token::Number(value));
                    i = end;
                    continue;
                }

                // Neither sub-case applies, fall through to a binary minus
            }

            tokens.push(Token::Operator(op));
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (value, end) = scan_number(&chars, i)?;
            tokens.push(Token::Number(value));
            i = end;
            continue;
        }

        return Err(LexError(format!("Unexpected character '{}'", c)));
    }

    Ok(tokens)
}

fn unary_position(tokens: &[Token]) -> bool {
    match tokens.last() {
        None => true,
        Some(Token::Operator(_)) => true,
        Some(Token::OpenParen) => true,
        _ => false,
    }
}

// Scans a maximal run of digits and decimal points, optionally preceded
// by a minus sign
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), LexError> {
    let mut j = start;
    if chars[j] == '-' {
        j += 1;
    }

    let digits = j;
    let mut dots = 0;
    while j < chars.len() && (chars[j].is_ascii_digit() || chars[j] == '.') {
        if chars[j] == '.' {
            dots += 1;
        }
        j += 1;
    }

    let literal: String = chars[start..j].iter().collect();
    if dots > 1 {
        return Err(LexError(format!(
            "Invalid number '{}': multiple decimal points",
            literal
        )));
    }
    if !chars[digits..j].iter().any(|c| c.is_ascii_digit()) {
        return Err(LexError(format!("Invalid number '{}'", literal)));
    }

    let value = literal
        .parse()
        .map_err(|_| LexError(format!("Invalid number '{}'", literal)))?;
    Ok((value, j))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_operators() {
        let tokens = tokenize("2 + 3.5*4").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(BinOp::Add),
                Token::Number(3.5),
                Token::Operator(BinOp::Mul),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_parens() {
        let tokens = tokenize("(1)").unwrap();
        assert_eq!(
            tokens,
            vec![Token::OpenParen, Token::Number(1.0), Token::CloseParen]
        );
    }

    #[test]
    fn test_leading_dot() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Number(5.0)]);
    }

    #[test]
    fn test_unary_minus_number() {
        assert_eq!(tokenize("-5").unwrap(), vec![Token::Number(-5.0)]);
        assert_eq!(tokenize("-.5").unwrap(), vec![Token::Number(-0.5)]);

        let tokens = tokenize("2*-3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(BinOp::Mul),
                Token::Number(-3.0),
            ]
        );

        let tokens = tokenize("(-3)").unwrap();
        assert_eq!(
            tokens,
            vec![Token::OpenParen, Token::Number(-3.0), Token::CloseParen]
        );
    }

    #[test]
    fn test_unary_minus_paren_rewrite() {
        let tokens = tokenize("-(2+3)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(-1.0),
                Token::Operator(BinOp::Mul),
                Token::OpenParen,
                Token::Number(2.0),
                Token::Operator(BinOp::Add),
                Token::Number(3.0),
                Token::CloseParen,
            ]
        );

        // Whitespace between the minus and the paren is ignored
        assert_eq!(tokenize("- (2+3)").unwrap(), tokens);
    }

    #[test]
    fn test_minus_falls_through_to_binary() {
        // A space before the digit means the minus is not consumed as
        // part of a literal
        let tokens = tokenize("- 5").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Operator(BinOp::Sub), Token::Number(5.0)]
        );

        let tokens = tokenize("7-5").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(7.0),
                Token::Operator(BinOp::Sub),
                Token::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_double_minus() {
        let tokens = tokenize("2--3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(BinOp::Sub),
                Token::Number(-3.0),
            ]
        );
    }

    #[test]
    fn test_lex_errors() {
        tokenize("1.2.3").unwrap_err();
        tokenize("1..2").unwrap_err();
        tokenize(".").unwrap_err();
        tokenize("-.").unwrap_err();
        tokenize("2 $ 3").unwrap_err();
        tokenize("abc").unwrap_err();
    }

    #[test]
    fn test_empty() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}
