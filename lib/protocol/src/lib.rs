use serde::{Deserialize, Serialize};

/// The two evaluated operands carried by every remote operator call.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TwoNumbers {
    pub a: f64,
    pub b: f64,
}

/// The single numeric result returned by an operator service.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Number {
    pub result: f64,
}
