use std::borrow::Cow;

use log::warn;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{response, Request};
use serde::Serialize;

use telemetry::IsErr;

#[derive(Debug)]
pub enum ApiError {
    DivisionByZero,
    UnknownOperation(String),
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::UnknownOperation(_))
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: Cow<'a, str>,
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (message, status) = match self {
            ApiError::DivisionByZero => (Cow::Borrowed("Division by zero"), Status::BadRequest),
            ApiError::UnknownOperation(operation) => {
                warn!("No such operation: {}", operation);
                (
                    Cow::Owned(format!("No such operation: {}", operation)),
                    Status::NotFound,
                )
            }
        };
        response::status::Custom(status, Json(ErrorResponse { message })).respond_to(req)
    }
}
