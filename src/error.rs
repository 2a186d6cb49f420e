use rocket::{
    Request, catch,
    http::Status,
    response::{self, Responder},
    serde::json::Json,
};
use thiserror::Error;

use crate::{forward::ForwardError, types::ApiMessage};

const AUTH_FAILED: &str = "Authentication failed";
const REQUEST_FAILED: &str = "Request failed";

/// Every way `POST /api/webhook` can fail.
///
/// `Display` is for server logs only. Callers see [`ApiError::public_message`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid payload: {0}")]
    Validation(String),

    #[error("Admin password or webhook URL is not configured")]
    Configuration,

    #[error("Password mismatch")]
    Unauthorized,

    #[error("Webhook delivery failed: {0}")]
    Delivery(#[from] ForwardError),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Unauthorized => Status::Unauthorized,
            _ => Status::InternalServerError,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => AUTH_FAILED,
            _ => REQUEST_FAILED,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let body = Json(ApiMessage {
            message: self.public_message().to_string(),
        });
        (self.status(), body).respond_to(request)
    }
}

/// Renders Rocket-level failures (unknown route, bad method) in the API's error shape.
#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<ApiMessage>) {
    let message = match status.code {
        401 => AUTH_FAILED,
        404 => "Not found",
        _ => REQUEST_FAILED,
    };
    (
        status,
        Json(ApiMessage {
            message: message.to_string(),
        }),
    )
}
