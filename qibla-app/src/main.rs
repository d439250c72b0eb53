use anyhow::Context;
use qibla::search::NominatimClient;
use qibla::{runtime, QiblaApp, QiblaConfig};
use std::sync::Arc;

/// Desktop Qibla finder
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    qibla::init_logging();

    let config = QiblaConfig::from_env().context("loading configuration")?;
    let spawner = runtime::current_spawner()?;
    let places = Arc::new(NominatimClient::new(&config.search).context("building places client")?);
    log::info!("places service at {}", config.search.endpoint);

    let mut app = QiblaApp::new(&config, places.clone(), places, spawner);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Qibla"),
        ..Default::default()
    };

    eframe::run_native(
        "qibla-app",
        options,
        Box::new(move |cc| {
            app.install(&cc.egui_ctx);
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))?;

    Ok(())
}
