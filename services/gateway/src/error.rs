use derive_more::Display;

use crate::expression::{BinOp, LexError, ParseError};

/// Every failure an evaluation can surface; any error anywhere in the
/// tree aborts the whole evaluation.
#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "{}", _0)]
    Lex(LexError),

    #[display(fmt = "{}", _0)]
    Parse(ParseError),

    #[display(fmt = "Division by zero")]
    DivisionByZero,

    #[display(fmt = "No service route for operator '{}'", _0)]
    Unroutable(BinOp),

    #[display(fmt = "Remote call failed: {}", _0)]
    Remote(String),
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Remote(format!("deadline exceeded: {}", e))
        } else {
            Error::Remote(e.to_string())
        }
    }
}
