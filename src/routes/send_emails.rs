use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    domain::{EmailAddress, Submission, SubmissionRequest},
    email_client::{EmailClient, SendEmailError, SendReceipt},
    emails::{staff_notification, user_confirmation},
    startup::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub success: bool,
    pub user_email: SendReceipt,
    pub notification_email: SendReceipt,
}

#[tracing::instrument(
    name = "Dispatching submission emails",
    skip(app_state, body),
    fields(submission_kind = tracing::field::Empty)
)]
pub async fn send_emails(
    State(app_state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DispatchResult>, DispatchError> {
    let body = body.map_err(|rejection| DispatchError::MalformedRequest(rejection.body_text()))?;
    let request: SubmissionRequest = serde_json::from_slice(&body)
        .map_err(|e| DispatchError::MalformedRequest(e.to_string()))?;
    let submission: Submission = request
        .try_into()
        .map_err(DispatchError::MalformedRequest)?;
    tracing::Span::current().record("submission_kind", submission.kind());

    let result = dispatch(
        &app_state.email_client,
        &submission,
        &app_state.internal_recipient,
        &app_state.website_url.0,
    )
    .await?;

    Ok(Json(result))
}

/// Sends the confirmation to the submitter, then the notification to staff.
///
/// Stops at the first failure; a confirmation that already went out is not
/// reported separately.
#[tracing::instrument(
    name = "Sending confirmation and staff notification",
    skip(email_client, submission, internal_recipient, website_url)
)]
pub async fn dispatch(
    email_client: &EmailClient,
    submission: &Submission,
    internal_recipient: &EmailAddress,
    website_url: &str,
) -> Result<DispatchResult, DispatchError> {
    let confirmation = user_confirmation(submission, website_url)?;
    let notification = staff_notification(submission, Utc::now())?;

    let user_email = email_client
        .send_email(
            submission.email(),
            &confirmation.subject,
            &confirmation.html,
            None,
        )
        .await?;

    let notification_email = email_client
        .send_email(
            internal_recipient,
            &notification.subject,
            &notification.html,
            Some(submission.email()),
        )
        .await?;

    Ok(DispatchResult {
        success: true,
        user_email,
        notification_email,
    })
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("malformed request, {0}")]
    MalformedRequest(String),
    #[error("couldn't send email, {0}")]
    ProviderFailure(#[from] SendEmailError),
    #[error("{0:#}")]
    UnknownFailure(#[from] anyhow::Error),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        match &self {
            DispatchError::MalformedRequest(e) => {
                tracing::error!("Rejected submission: {}", e);
            }
            DispatchError::ProviderFailure(e) => {
                tracing::error!(error.cause_chain = ?e, "Email provider call failed");
            }
            DispatchError::UnknownFailure(e) => {
                tracing::error!(error.cause_chain = ?e, "Unexpected failure while dispatching");
            }
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
