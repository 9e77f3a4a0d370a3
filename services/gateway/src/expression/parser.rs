use super::{BinOp, Expr, Token};

#[derive(Debug, Clone)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

// The operator stack holds pending operators and open-paren barriers
#[derive(Debug, Clone, Copy)]
enum StackOp {
    Operator(BinOp),
    OpenParen,
}

/// Builds an expression tree from a token sequence using the two-stack
/// shunting-yard algorithm.
///
/// An incoming operator first reduces every stacked operator that binds
/// at least as tightly (strictly tighter for right-associative
/// operators), which gives `^` right-to-left grouping and the rest
/// left-to-right.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    let mut output: Vec<Expr> = Vec::new();
    let mut operators: Vec<StackOp> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(v) => output.push(Expr::Constant(v)),
            Token::Operator(op) => {
                while let Some(StackOp::Operator(top)) = operators.last() {
                    let reduce_top = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && op.is_left_associative());
                    if !reduce_top {
                        break;
                    }
                    reduce(&mut output, &mut operators)?;
                }
                operators.push(StackOp::Operator(op));
            }
            Token::OpenParen => operators.push(StackOp::OpenParen),
            Token::CloseParen => loop {
                match operators.last() {
                    Some(StackOp::OpenParen) => {
                        operators.pop();
                        break;
                    }
                    Some(StackOp::Operator(_)) => reduce(&mut output, &mut operators)?,
                    None => return Err(ParseError("Mismatched parentheses".to_string())),
                }
            },
        }
    }

    while let Some(top) = operators.last() {
        match top {
            StackOp::OpenParen => return Err(ParseError("Mismatched parentheses".to_string())),
            StackOp::Operator(_) => reduce(&mut output, &mut operators)?,
        }
    }

    match (output.pop(), output.is_empty()) {
        (Some(expr), true) => Ok(expr),
        _ => Err(ParseError("Invalid expression".to_string())),
    }
}

fn reduce(output: &mut Vec<Expr>, operators: &mut Vec<StackOp>) -> Result<(), ParseError> {
    let op = match operators.pop() {
        Some(StackOp::Operator(op)) => op,
        _ => return Err(ParseError("Operator stack underflow".to_string())),
    };
    let right = output
        .pop()
        .ok_or_else(|| ParseError("Operand stack underflow".to_string()))?;
    let left = output
        .pop()
        .ok_or_else(|| ParseError("Operand stack underflow".to_string()))?;
    output.push(Expr::Application(op, Box::new(left), Box::new(right)));
    Ok(())
}
