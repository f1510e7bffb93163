//! # Perfect Circle
//!
//! Draw a loop around the red dot in one stroke; the rounder the loop, the
//! higher the score. All of the game rules live in the library, this binary
//! only turns egui pointer input into gestures and paints the result.
//!
use clap::Parser;

use env_logger::Env;
use log::debug;
use model::Model;
use perfect_circle::settings::Cli;

mod model;
mod ui;

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .init();

    debug!("Started; args: {:?}", cli);

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(960.0, 760.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Perfect Circle",
        options,
        Box::new(move |_cc| Box::new(Model::new(&cli))),
    )
}
