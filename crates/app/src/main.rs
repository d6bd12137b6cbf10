//! QuickDeck — personal launcher with tabbed button grids.
//!
//! eframe entry point: installs logging, resolves the per-user config
//! path, and hands the controller to the event loop.

use std::path::PathBuf;

use eframe::egui;
use quickdeck_core::ConfigStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod bridge;
mod editor;

fn main() -> eframe::Result {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = ConfigStore::new(config_path());
    tracing::info!(path = %store.path().display(), "starting QuickDeck");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 650.0])
            .with_min_inner_size([700.0, 520.0])
            .with_title("QuickDeck"),
        ..Default::default()
    };

    eframe::run_native(
        "QuickDeck",
        options,
        Box::new(|_cc| Ok(Box::new(app::QuickDeckApp::new(store)))),
    )
}

/// `<OS config dir>/quickdeck/workspace.json`, falling back to the working
/// directory when no config dir can be resolved.
fn config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("quickdeck").join("workspace.json"),
        None => PathBuf::from("workspace.json"),
    }
}
