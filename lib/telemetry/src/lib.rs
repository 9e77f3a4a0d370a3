#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;

use std::convert::Infallible;
use std::future::Future;

use prometheus::{Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, TextEncoder};

lazy_static! {
    static ref SUCCESS: IntCounterVec = register_int_counter_vec!(
        "calculator_success_total",
        "Operations that completed successfully",
        &["component", "operation"]
    )
    .unwrap();
    static ref FAILURE: IntCounterVec = register_int_counter_vec!(
        "calculator_failure_total",
        "Operations that failed",
        &["component", "operation"]
    )
    .unwrap();
    static ref LATENCY: HistogramVec = register_histogram_vec!(
        "calculator_latency_seconds",
        "Operation latency in seconds",
        &["component", "operation"]
    )
    .unwrap();
}

// Errors that represent invalid requests rather than faults, e.g. a
// zero divisor, should not count as failures
pub trait IsErr {
    fn is_err(&self) -> bool {
        true
    }
}

impl IsErr for Infallible {
    fn is_err(&self) -> bool {
        false
    }
}

impl IsErr for () {
    fn is_err(&self) -> bool {
        false
    }
}

impl IsErr for Box<dyn std::error::Error> {}

#[derive(Clone)]
pub struct Measure {
    success: IntCounter,
    failure: IntCounter,
    latency: Histogram,
}

impl Measure {
    pub fn new(component: &str, operation: &str) -> Measure {
        Measure {
            success: SUCCESS.with_label_values(&[component, operation]),
            failure: FAILURE.with_label_values(&[component, operation]),
            latency: LATENCY.with_label_values(&[component, operation]),
        }
    }

    pub async fn stats<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: IsErr,
    {
        let timer = self.latency.start_timer();
        let r = inner.await;
        timer.observe_duration();
        match &r {
            Ok(_) => self.success.inc(),
            Err(e) if !e.is_err() => self.success.inc(),
            Err(_) => self.failure.inc(),
        }
        r
    }
}

pub fn encode() -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
