#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = eframe_sketchpad::SketchConfig::load_or_default();
    let side = config.canvas_size as f32;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side.max(360.0) + 40.0, side + 160.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_sketchpad::SketchApp::new(cc, config)?))),
    )
}

// The web build is not wired up yet.
#[cfg(target_arch = "wasm32")]
fn main() {}
