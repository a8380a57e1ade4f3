use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zac_rs::{ClientOptions, ZacClient, ZacConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zac_rs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ZacConfig {
        tenant_code: env::var("ZAC_TENANT_CODE").context("ZAC_TENANT_CODE is not set")?,
        id: env::var("ZAC_ID").context("ZAC_ID is not set")?,
        password: env::var("ZAC_PASSWORD").context("ZAC_PASSWORD is not set")?,
    };
    let options = ClientOptions {
        debug: env::var("ZAC_DEBUG").is_ok(),
        ..Default::default()
    };

    let mut client = ZacClient::with_options(config, options)?;
    client.login().await.context("login failed")?;
    println!("login ok, stage: {:?}", client.stage());

    let logged_in = client.is_logged_in().await;
    println!("session valid: {logged_in}");

    Ok(())
}
