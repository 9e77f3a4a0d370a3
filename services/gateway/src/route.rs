use std::collections::HashMap;

use log::warn;
use strum::IntoEnumIterator;

use crate::config::Config;
use crate::error::Error;
use crate::expression::BinOp;

/// The remote service endpoint that computes one operator.
#[derive(Debug, Clone)]
pub struct Route {
    pub address: String,
    pub method: String,
}

/// Static operator -> endpoint table, built once from config at startup.
pub struct Router {
    routes: HashMap<BinOp, Route>,
}

impl Router {
    pub fn new(config: &Config) -> Router {
        let mut routes = HashMap::new();
        for (symbol, operator) in &config.operators {
            let mut chars = symbol.chars();
            match (chars.next().and_then(BinOp::from_symbol), chars.next()) {
                (Some(op), None) => {
                    routes.insert(
                        op,
                        Route {
                            address: operator.address.clone(),
                            method: operator.method.clone(),
                        },
                    );
                }
                _ => warn!("Ignoring route for unknown operator '{}'", symbol),
            }
        }

        // Every operator the parser can produce must have a route
        for op in BinOp::iter() {
            if !routes.contains_key(&op) {
                warn!("No route configured for operator '{}'", op);
            }
        }

        Router { routes }
    }

    pub fn route(&self, op: BinOp) -> Result<&Route, Error> {
        self.routes.get(&op).ok_or(Error::Unroutable(op))
    }
}
