use rocket::{
    State,
    data::{Data, ToByteUnit},
    http::{ContentType, Status},
    post,
};
use tracing::{error, info, warn};

use crate::auth::password_matches;
use crate::config::Config;
use crate::error::ApiError;
use crate::forward::SharedForwarder;
use crate::types::WebhookPayload;

/// Handler for POST /api/webhook
///
/// Success is a bare 200. Every failure is logged here and reaches the caller
/// only as the generic body from [`ApiError`].
#[post("/api/webhook", data = "<data>")]
pub async fn webhook_handler(
    config: &State<Config>,
    forwarder: &State<SharedForwarder>,
    content_type: Option<&ContentType>,
    data: Data<'_>,
) -> Result<Status, ApiError> {
    let result = relay(config, forwarder.inner(), content_type, data).await;
    match &result {
        Ok(_) => {}
        Err(ApiError::Unauthorized) => warn!("Rejected webhook request: wrong password"),
        Err(err) => error!("Error sending webhook: {err}"),
    }
    result
}

async fn relay(
    config: &Config,
    forwarder: &SharedForwarder,
    content_type: Option<&ContentType>,
    data: Data<'_>,
) -> Result<Status, ApiError> {
    if !content_type.is_some_and(|ct| ct.is_json()) {
        return Err(ApiError::Validation("body is not application/json".into()));
    }

    let payload = read_payload(data).await?;

    let (secret, webhook_url) = config.credentials().ok_or(ApiError::Configuration)?;

    if !password_matches(&payload.password, secret) {
        return Err(ApiError::Unauthorized);
    }

    forwarder.forward(webhook_url, &payload.forwarded()).await?;

    info!("Forwarded {} item(s) to webhook", payload.items.len());
    Ok(Status::Ok)
}

async fn read_payload(data: Data<'_>) -> Result<WebhookPayload, ApiError> {
    let body = data
        .open(64.kibibytes())
        .into_bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("failed to read body: {e}")))?;

    if !body.is_complete() {
        return Err(ApiError::Validation("body exceeds size limit".into()));
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    payload
        .validate()
        .map_err(|reason| ApiError::Validation(reason.into()))?;

    Ok(payload)
}
