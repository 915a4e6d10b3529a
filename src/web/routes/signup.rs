use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        Method, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    config::MailchimpSecrets,
    mailchimp_client::{SubscriberHash, TagsPayload},
    web::{types::SignupRequest, Error, WebResult},
    AppState,
};

pub const SIGNUP_TAG: &str = "Website Signup";

#[tracing::instrument(name = "Relaying signup to Mailchimp", skip_all, fields(method = %method))]
pub async fn signup_relay(
    method: Method,
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<Response> {
    if method == Method::OPTIONS {
        return Ok(preflight());
    }
    if method != Method::POST {
        return Err(Error::MethodNotAllowed(method));
    }

    let signup = SignupRequest::parse(&body)?;
    let email = signup.email().ok_or(Error::EmailMissing)?;

    // Read on every request, nothing gets cached.
    let secrets =
        MailchimpSecrets::load(app_state.secrets.as_ref()).ok_or(Error::SecretsMissing)?;

    let subscriber_hash = SubscriberHash::derive(email);
    let mailchimp = &app_state.mailchimp_client;

    let upserted = mailchimp
        .upsert_member(&secrets, &subscriber_hash, &signup.upsert_payload(email))
        .await?;
    if !upserted.status.is_success() {
        return Err(Error::UpsertRejected {
            status: upserted.status,
            body: upserted.body,
        });
    }

    // Best effort: the member exists at this point, a missing tag doesn't fail the signup.
    let _ = mailchimp
        .tag_member(&secrets, &subscriber_hash, &TagsPayload::active(SIGNUP_TAG))
        .await;

    info!("Signup relayed to Mailchimp.");
    Ok(Json(json!({ "success": true, "data": upserted.body })).into_response())
}

fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}
