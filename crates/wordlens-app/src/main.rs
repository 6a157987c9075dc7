use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wordlens_client::WordnikClient;
use wordlens_config::{Config, ConfigError};
use wordlens_core::canonical::RedirectRules;
use wordlens_core::resolve::Resolver;

pub mod events;
pub mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err @ ConfigError::MissingApiKey) => {
            // Operator error, not a crash: say what to do and leave quietly.
            eprintln!("{err}");
            return Ok(());
        }
    };

    let client = WordnikClient::new(config.wordnik.clone());
    let resolver = Arc::new(Resolver::new(RedirectRules::default()));

    ui::run(config.ui, client, resolver).await
}
