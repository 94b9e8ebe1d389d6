//! alttext - Alt text generation behind a web form UI.
//!
//! Serves a small form with three input modes (single URL, batch URLs, file
//! uploads), captions each image through a pretrained backend, and offers
//! results as a CSV download.
//!
//! The binary takes no arguments; behavior comes from the config file
//! (`alttext_core::Config::default_path()`) and `RUST_LOG`.

use std::sync::Arc;

use alttext_core::{BatchCaptioner, Captioner, CaptionerFactory, Config};

mod logging;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {e}\n  Using default configuration.");
            Config::default()
        }
    };
    logging::init_from_config(&config);

    tracing::debug!("alttext v{}", alttext_core::VERSION);

    // The captioning backend is constructed once and shared for every
    // request; providers are stateless and reentrant.
    let captioner: Arc<dyn Captioner> =
        Arc::from(CaptionerFactory::create(&config.captioning.provider, &config.providers)?);
    if !captioner.is_available().await {
        tracing::warn!(
            provider = captioner.name(),
            "caption backend not reachable — caption requests will fail until it is"
        );
    }

    let state = server::AppState {
        batch: Arc::new(BatchCaptioner::new(captioner.clone(), &config.limits)),
        default_max_words: config.captioning.max_words,
    };

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(provider = captioner.name(), %addr, "alttext listening");
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
