use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use reqwest::ClientBuilder;

use crate::client::{ClientPool, RemoteCompute};
use crate::config::Config;
use crate::route::Router;

mod client;
mod config;
mod error;
mod eval;
mod expression;
mod route;

#[derive(Debug, Parser)]
#[command(about = "Evaluate arithmetic expressions against remote operator services")]
struct Args {
    /// Per-call timeout in milliseconds, overriding the configured value
    #[arg(long)]
    timeout_ms: Option<u64>,
}

/// Integers print without a decimal point, everything else is rounded
/// to at most ten fractional digits.
fn pretty(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let fixed = format!("{:.10}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut config: Config = config::load().expect("Failed to load configuration");
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let http_client = ClientBuilder::new().build().expect("Failed to build HTTP Client");

    let compute = RemoteCompute::new(
        Router::new(&config),
        ClientPool::new(http_client),
        Duration::from_millis(config.timeout_ms),
    );

    println!("Distributed calculator: every operator is computed by a remote service");
    println!("supported: + - * / % ^, parentheses, decimals, unary minus");
    print!("Enter expression: ");
    io::stdout().flush().expect("Failed to flush stdout");

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read expression");

    match eval::evaluate(&compute, line.trim()).await {
        Ok(value) => println!("Result: {}", pretty(value)),
        Err(e) => println!("Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_integers() {
        assert_eq!(pretty(3.0), "3");
        assert_eq!(pretty(-20.0), "-20");
        assert_eq!(pretty(0.0), "0");
        assert_eq!(pretty(125.0), "125");
    }

    #[test]
    fn test_pretty_decimals() {
        assert_eq!(pretty(0.5), "0.5");
        assert_eq!(pretty(-3.25), "-3.25");
        assert_eq!(pretty(1.0 / 3.0), "0.3333333333");
        assert_eq!(pretty(5f64.sqrt()), "2.2360679775");
    }
}
