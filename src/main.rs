mod app;
mod assets;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::GridironApp;
use assets::{AssetStore, DirAssetStore, NoAssets};
use config::{Cli, DashboardConfig};
use state::AppState;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::from_cli(&cli)?;

    // A dataset that fails to load is fatal: never serve a partial table.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} team seasons with columns {:?}",
        dataset.len(),
        dataset.columns()
    );

    let assets: Arc<dyn AssetStore + Send + Sync> = match &config.asset_dir {
        Some(dir) => Arc::new(
            DirAssetStore::open(dir)
                .with_context(|| format!("indexing assets in {}", dir.display()))?,
        ),
        None => Arc::new(NoAssets),
    };

    let mut state = AppState::new(&config, assets);
    state.set_dataset(Arc::new(dataset));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gridiron Lens – NFL Team Analysis",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the team logos.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(GridironApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
