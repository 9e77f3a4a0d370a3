use std::collections::HashMap;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Endpoint for one operator: where the service lives and the remote
/// method that computes the operator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OperatorConfig {
    pub address: String,
    pub method: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Deadline for each individual remote operator call, relative to
    /// the moment the call is issued.
    pub timeout_ms: u64,

    /// Operator symbol -> service endpoint. Read once at startup.
    pub operators: HashMap<String, OperatorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let operators = [
            ("+", "add"),
            ("-", "subtract"),
            ("*", "multiply"),
            ("/", "divide"),
            ("%", "modulus"),
            ("^", "exponentiate"),
        ]
        .iter()
        .map(|(symbol, method)| {
            (
                symbol.to_string(),
                OperatorConfig {
                    address: "http://localhost:8000".to_string(),
                    method: method.to_string(),
                },
            )
        })
        .collect();

        Config {
            timeout_ms: 2000,
            operators,
        }
    }
}

pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file("Calculator.toml"))
        .merge(Env::prefixed("CALCULATOR_").split("__"))
}

pub fn load() -> Result<Config, figment::Error> {
    figment().extract()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.timeout_ms, 2000);
        assert_eq!(config.operators.len(), 6);
        assert_eq!(config.operators["^"].method, "exponentiate");
    }

    #[test]
    fn test_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CALCULATOR_TIMEOUT_MS", "500");

            let config: Config = figment().extract()?;
            assert_eq!(config.timeout_ms, 500);
            assert_eq!(config.operators.len(), 6);
            Ok(())
        });
    }

    #[test]
    fn test_toml_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "Calculator.toml",
                r#"
                    timeout_ms = 3000

                    [operators."/"]
                    address = "http://divide-server:50054"
                    method = "divide"
                "#,
            )?;

            let config: Config = figment().extract()?;
            assert_eq!(config.timeout_ms, 3000);
            assert_eq!(config.operators["/"].address, "http://divide-server:50054");
            // Untouched operators keep their defaults
            assert_eq!(config.operators["+"].method, "add");
            Ok(())
        });
    }
}
