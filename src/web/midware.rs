use std::sync::Arc;

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::web::{log, Error};

/// Turns a `web::Error` stashed in the response extensions into the client facing `{"error": ...}` body.
/// Responses without an error pass through untouched.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let uuid = Uuid::new_v4();

    let web_error = resp.extensions().get::<Arc<Error>>().map(|er| er.as_ref());
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    // Relayed Mailchimp rejections are not our failures.
    if let (Some(er), Some((status, _))) = (web_error, &client_status_and_error) {
        if status.is_server_error() && !matches!(er, Error::UpsertRejected { .. }) {
            tracing::error!("SERVER ERROR: {er} STATUS: {status} ID: {uuid}");
        }
    }

    let err_resp = client_status_and_error
        .as_ref()
        .map(|(status, cl_err)| (*status, Json(cl_err.body())).into_response());

    log::log_request(
        uuid,
        req_method,
        uri,
        resp.status(),
        web_error,
        client_status_and_error,
    );

    err_resp.unwrap_or(resp)
}
