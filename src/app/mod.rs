use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{AppConfig, ProcessEnv, SecretSource},
    MailchimpClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    /// Mailchimp secrets come from the process environment, read on every request.
    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let mailchimp_client =
            MailchimpClient::new(config.mailchimp_config.base_url.as_deref())?;

        let app_state = AppState::new(mailchimp_client, ProcessEnv);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub mailchimp_client: MailchimpClient,
    pub secrets: Box<dyn SecretSource>,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(mailchimp_client: MailchimpClient, secrets: impl SecretSource + 'static) -> Self {
        AppState(Arc::new(InternalState {
            mailchimp_client,
            secrets: Box::new(secrets),
        }))
    }
}
