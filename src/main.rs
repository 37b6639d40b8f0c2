// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Citrine - Main Entry Point
//!
//! A lightweight Markdown editor with live preview and syntax highlighting.
//! Built with Rust and egui.

mod app;
mod config;
mod editor;
mod error;
mod files;
mod highlight;
mod preview;
mod refresh;
mod state;
mod theme;
mod ui;

use app::CitrineApp;
use config::load_config;
use log::info;
use std::path::PathBuf;

/// Application name constant.
const APP_NAME: &str = "Citrine";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = settings.window_size;

    info!(
        "Window configuration: {}x{}",
        window_size.width, window_size.height
    );

    // Optional initial file path, the only command-line argument.
    let initial_file = std::env::args().nth(1).map(PathBuf::from);
    if let Some(path) = &initial_file {
        info!("Initial file: {}", path.display());
    }

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(CitrineApp::new(cc, initial_file)))),
    )
}
