//! Askpod application entry point

use anyhow::Result;
use askpod::config::AppConfig;
use askpod::engine::WolframClient;
use askpod::speech::{default_capture_factory, default_synth_factory};
use askpod::ui::{AppState, AskpodApp};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("askpod=debug,info")),
        )
        .init();

    info!("Starting Askpod");

    let mut config = AppConfig::default();
    if let Ok(app_id) = std::env::var("ASKPOD_APP_ID") {
        config.engine.app_id = app_id;
    }
    if let Ok(model) = std::env::var("ASKPOD_MODEL") {
        config.capture.model_path = model.into();
    }

    if let Err(e) = config.validate() {
        warn!("Configuration problem: {}", e);
    }

    let engine = Arc::new(WolframClient::new(config.engine.clone())?);
    let state = AppState::new(
        engine,
        default_synth_factory(),
        default_capture_factory(config.capture.clone()),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Askpod"),
        ..Default::default()
    };

    eframe::run_native(
        "Askpod",
        options,
        Box::new(|cc| Ok(Box::new(AskpodApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))?;

    Ok(())
}
