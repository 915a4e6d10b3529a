use anyhow::Context;
use signup_relay::{config::get_or_init_config, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        signup_relay::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        signup_relay::init_dbg_tracing();
    }

    let config = get_or_init_config().clone();
    let app = App::build_from_config(config)
        .await
        .context("startup: failed to build the app")?;

    signup_relay::serve(app).await?;

    Ok(())
}
