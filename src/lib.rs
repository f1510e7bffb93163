pub mod best_score;
pub mod colours;
pub mod cues;
pub mod export;
pub mod game;
pub mod game_config;
pub mod geometry_utils;
pub mod gesture;
pub mod scoring;
pub mod settings;
pub mod surface;

pub type Point2D = (f32, f32);
