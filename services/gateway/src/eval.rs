use async_trait::async_trait;
use futures::{future::BoxFuture, join, FutureExt};

use protocol::TwoNumbers;

use crate::error::Error;
use crate::expression::{parse, tokenize, BinOp, Expr};

/// The remote computation capability consulted for every operator
/// application. Production routes calls over the network, tests
/// substitute an in-process implementation.
#[async_trait]
pub trait Compute: Send + Sync {
    async fn compute(&self, op: BinOp, operands: TwoNumbers) -> Result<f64, Error>;
}

/// Reduces an expression tree to a single number.
///
/// The two operand subtrees of an application are independent and are
/// evaluated in parallel. Both children run to completion before either
/// error is surfaced; in-flight sibling calls are not cancelled.
pub fn eval<'a, C>(compute: &'a C, e: &'a Expr) -> BoxFuture<'a, Result<f64, Error>>
where
    C: Compute + ?Sized,
{
    // As this function is self-recursive it returns a boxed future
    match e {
        Expr::Constant(v) => futures::future::ready(Ok(*v)).boxed(),
        Expr::Application(op, l, r) => Box::pin(async move {
            let (left, right) = join!(eval(compute, l), eval(compute, r));
            let (a, b) = (left?, right?);

            // Checked locally, no remote call is issued for a zero divisor
            if *op == BinOp::Div && b == 0.0 {
                return Err(Error::DivisionByZero);
            }

            compute.compute(*op, TwoNumbers { a, b }).await
        }),
    }
}

/// Tokenizes, parses and evaluates an expression in one step.
pub async fn evaluate<C>(compute: &C, input: &str) -> Result<f64, Error>
where
    C: Compute + ?Sized,
{
    let tokens = tokenize(input)?;
    let expr = parse(tokens)?;
    eval(compute, &expr).await
}
