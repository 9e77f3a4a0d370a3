use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::Route;

use protocol::{Number, TwoNumbers};
use telemetry::Measure;

use crate::error::ApiError;

lazy_static! {
    static ref COMPUTE_MEASURE: Measure = Measure::new("api", "compute");
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, Status> {
    telemetry::encode().map_err(|_| Status::InternalServerError)
}

#[post("/api/v1/<operation>", format = "json", data = "<request>")]
async fn compute(operation: &str, request: Json<TwoNumbers>) -> Result<Json<Number>, ApiError> {
    COMPUTE_MEASURE
        .stats(async move {
            let TwoNumbers { a, b } = *request;

            let result = match operation {
                "add" => a + b,
                "subtract" => a - b,
                "multiply" => a * b,
                "divide" if b == 0.0 => return Err(ApiError::DivisionByZero),
                "divide" => a / b,
                "modulus" if b == 0.0 => return Err(ApiError::DivisionByZero),
                "modulus" => a % b,
                "exponentiate" => a.powf(b),
                _ => return Err(ApiError::UnknownOperation(operation.to_string())),
            };

            Ok(Json(Number { result }))
        })
        .await
}

pub fn routes() -> Vec<Route> {
    routes![status, metrics, compute]
}
