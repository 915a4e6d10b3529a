//! The relay answers on every path, the method decides what happens.

mod signup;

pub use signup::{signup_relay, SIGNUP_TAG};

use axum::Router;

use crate::AppState;

pub fn routes(app_state: AppState) -> Router {
    Router::new().fallback(signup_relay).with_state(app_state)
}
