use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;

use protocol::{Number, TwoNumbers};

use crate::error::Error;
use crate::eval::Compute;
use crate::expression::BinOp;
use crate::route::Router;

/// A client bound to one operator service endpoint.
pub struct OperatorClient {
    base_url: String,
    client: reqwest::Client,
}

impl OperatorClient {
    pub fn new(client: reqwest::Client, address: &str) -> OperatorClient {
        OperatorClient {
            base_url: format!("{}/api/v1", address),
            client,
        }
    }

    /// Issues a single remote call carrying the two operands, bound by
    /// a deadline relative to now.
    pub async fn invoke(
        &self,
        method: &str,
        request: &TwoNumbers,
        timeout: Duration,
    ) -> Result<f64, Error> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .timeout(timeout)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Number>()
            .await?;

        Ok(response.result)
    }
}

/// Memoizes one client per distinct endpoint address, created lazily on
/// first use and reused for the lifetime of the process.
pub struct ClientPool {
    http: reqwest::Client,
    clients: Mutex<HashMap<String, Arc<OperatorClient>>>,
}

impl ClientPool {
    pub fn new(http: reqwest::Client) -> ClientPool {
        ClientPool {
            http,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// The lock is held across insertion, so concurrent first use of an
    /// address still creates exactly one client. Construction is cheap,
    /// the underlying connections are only opened on use.
    pub fn get(&self, address: &str) -> Arc<OperatorClient> {
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        clients
            .entry(address.to_string())
            .or_insert_with(|| Arc::new(OperatorClient::new(self.http.clone(), address)))
            .clone()
    }
}

/// Dispatches operator applications to their remote services through
/// the routing table and the client pool.
pub struct RemoteCompute {
    router: Router,
    pool: ClientPool,
    timeout: Duration,
}

impl RemoteCompute {
    pub fn new(router: Router, pool: ClientPool, timeout: Duration) -> RemoteCompute {
        RemoteCompute {
            router,
            pool,
            timeout,
        }
    }
}

#[async_trait]
impl Compute for RemoteCompute {
    async fn compute(&self, op: BinOp, operands: TwoNumbers) -> Result<f64, Error> {
        let route = self.router.route(op)?;
        let client = self.pool.get(&route.address);

        let start = Instant::now();
        let result = client.invoke(&route.method, &operands, self.timeout).await;
        debug!(
            "{} on {} took {:?}",
            route.method,
            route.address,
            start.elapsed()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_reuses_clients() {
        let pool = ClientPool::new(reqwest::Client::new());

        let a = pool.get("http://localhost:8000");
        let b = pool.get("http://localhost:8000");
        let c = pool.get("http://localhost:8001");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_client_url() {
        let client = OperatorClient::new(reqwest::Client::new(), "http://add-server:50051");
        assert_eq!(client.base_url, "http://add-server:50051/api/v1");
    }
}
