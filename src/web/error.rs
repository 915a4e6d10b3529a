use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::AsRefStr;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("request method not allowed: {0}")]
    MethodNotAllowed(Method),
    #[error("email is missing from the signup request")]
    EmailMissing,
    #[error("failed to parse the request body: {0}")]
    BodyParsing(#[from] serde_json::Error),
    #[error("mailchimp env variables are not set")]
    SecretsMissing,
    #[error("mailchimp rejected the member upsert with status: {status}")]
    UpsertRejected { status: StatusCode, body: Value },

    #[error("mailchimp client error: {0}")]
    MailchimpClient(#[from] crate::mailchimp_client::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::EmailMissing => (StatusCode::BAD_REQUEST, EmailRequired),
            Error::BodyParsing(_) => (StatusCode::BAD_REQUEST, InvalidBody),
            Error::SecretsMissing => (StatusCode::INTERNAL_SERVER_ERROR, EnvVarsNotSet),
            Error::UpsertRejected { status, body } => (*status, Remote(body.clone())),
            Error::MailchimpClient(_) => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the client gets to see, always as `{"error": ...}`.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("Email required")]
    EmailRequired,
    #[display("Invalid request body")]
    InvalidBody,
    #[display("Mailchimp env vars not set")]
    EnvVarsNotSet,
    #[display("Internal server error")]
    ServiceError,
    /// The remote body, relayed as is.
    #[display("{_0}")]
    Remote(Value),
}

impl ClientError {
    pub fn body(&self) -> Value {
        match self {
            ClientError::Remote(remote) => json!({ "error": remote }),
            other => json!({ "error": other.to_string() }),
        }
    }
}
