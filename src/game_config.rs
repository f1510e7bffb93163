use std::{fs, io::ErrorKind};

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    colours::parse_hex,
    gesture::{TrackerSettings, DEFAULT_MIN_STROKE_POINTS},
    scoring::{FillRule, ScoringSettings, DEFAULT_SCORE_CEILING},
    settings::Cli,
    surface::SurfaceLimits,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    // -------- GAME BALANCE
    /// Strokes with fewer points than this are discarded without a score
    pub min_stroke_points: usize,

    /// Score given to a perfect circle; the radius standard deviation is
    /// subtracted from this
    pub score_ceiling: f32,

    /// How to decide whether the closed stroke surrounds the dot
    pub fill_rule: FillRule,

    // -------- SURFACE
    pub max_surface_width: f32,
    pub max_surface_height: f32,
    pub surface_margin: f32,
    pub surface_height_ratio: f32,

    // -------- LOOK
    pub stroke_colour: String,
    pub stroke_width: f32,
    pub centre_colour: String,
    pub centre_radius: f32,

    // -------- SOUND
    /// Optional clip files (wav, ogg, flac or mp3); a tone is played for any
    /// cue without one
    pub draw_sound: Option<String>,
    pub success_sound: Option<String>,
    pub failure_sound: Option<String>,
    pub cue_volume: f32,

    // -------- SCREENSHOT
    /// Extra space below the drawing for the score text
    pub export_footer_height: u32,
    pub export_file_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let limits = SurfaceLimits::default();
        GameConfig {
            min_stroke_points: DEFAULT_MIN_STROKE_POINTS,
            score_ceiling: DEFAULT_SCORE_CEILING,
            fill_rule: FillRule::NonZero,
            max_surface_width: limits.max_width,
            max_surface_height: limits.max_height,
            surface_margin: limits.margin,
            surface_height_ratio: limits.height_ratio,
            stroke_colour: String::from("#4a90e2"),
            stroke_width: 3.,
            centre_colour: String::from("#ff0000"),
            centre_radius: 5.,
            draw_sound: None,
            success_sound: None,
            failure_sound: None,
            cue_volume: 0.5,
            export_footer_height: 100,
            export_file_name: String::from("circle_score.png"),
        }
    }
}

impl GameConfig {
    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            min_stroke_points: self.min_stroke_points,
            scoring: ScoringSettings {
                score_ceiling: self.score_ceiling,
                fill_rule: self.fill_rule,
            },
        }
    }

    pub fn surface_limits(&self) -> SurfaceLimits {
        SurfaceLimits {
            max_width: self.max_surface_width,
            max_height: self.max_surface_height,
            margin: self.surface_margin,
            height_ratio: self.surface_height_ratio,
        }
    }

    pub fn stroke_rgb(&self) -> [u8; 3] {
        parse_hex(&self.stroke_colour).unwrap_or_else(|e| {
            warn!("{}; using default stroke colour", e);
            [0x4a, 0x90, 0xe2]
        })
    }

    pub fn centre_rgb(&self) -> [u8; 3] {
        parse_hex(&self.centre_colour).unwrap_or_else(|e| {
            warn!("{}; using default centre colour", e);
            [255, 0, 0]
        })
    }

    /// Command-line values win over whatever the file said.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(min_stroke_points) = cli.min_stroke_points {
            info!("Override minStrokePoints = {}", min_stroke_points);
            self.min_stroke_points = min_stroke_points;
        }
        if let Some(score_ceiling) = cli.score_ceiling {
            info!("Override scoreCeiling = {}", score_ceiling);
            self.score_ceiling = score_ceiling;
        }
    }

    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        debug!("Current state of config: {:?}", self);
        let text = serde_json::to_string_pretty(self)?;
        match fs::write(config_file_path, text) {
            Ok(()) => {
                info!("Wrote config to file: {:?}", config_file_path);
                Ok(())
            }
            Err(e) => Err(anyhow!("Error writing config to file: {}", e)),
        }
    }
}

pub fn load_config_from_file(config_file_path: &str) -> Result<GameConfig> {
    match fs::read_to_string(config_file_path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Game config file not found at {}, using defaults",
                config_file_path
            );
            Ok(GameConfig::default())
        }
        Err(e) => Err(anyhow!("Failed to load game config from disk: {}", e)),
        Ok(s) => {
            info!("Loaded game config OK from \"{}\"", config_file_path);
            match serde_json::from_str::<GameConfig>(&s) {
                Ok(loaded_config) => {
                    debug!("Config parsed data from file: {:?}", &loaded_config);
                    Ok(loaded_config)
                }
                Err(e) => Err(anyhow!("Failed to parse config data: {}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn temp_path(dir: &TempDir, name: &str) -> String {
        dir.path()
            .join(format!("{}.json", name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from_file(&temp_path(&dir, "missing")).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.min_stroke_points, 6);
        assert_eq!(config.score_ceiling, 100.);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = temp_path(&dir, "partial");
        fs::write(&path, r#"{ "minStrokePoints": 10, "fillRule": "EvenOdd" }"#).unwrap();
        let config = load_config_from_file(&path).unwrap();

        assert_eq!(config.min_stroke_points, 10);
        assert_eq!(config.fill_rule, FillRule::EvenOdd);
        assert_eq!(config.stroke_colour, "#4a90e2");
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = temp_path(&dir, "garbage");
        fs::write(&path, "minStrokePoints = 10").unwrap();
        assert!(load_config_from_file(&path).is_err());
    }

    #[test]
    fn write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = temp_path(&dir, "written");
        let config = GameConfig {
            score_ceiling: 80.,
            stroke_width: 5.,
            ..Default::default()
        };
        config.write_config_to_file(&path).unwrap();
        let loaded = load_config_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn cli_overrides_apply() {
        let cli = Cli::parse_from(["circle-game", "--minStrokePoints", "12", "--scoreCeiling", "50"]);
        let mut config = GameConfig::default();
        config.apply_overrides(&cli);
        assert_eq!(config.min_stroke_points, 12);
        assert_eq!(config.tracker_settings().scoring.score_ceiling, 50.);

        let untouched = Cli::parse_from(["circle-game"]);
        let mut config = GameConfig::default();
        config.apply_overrides(&untouched);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn bad_colours_fall_back() {
        let config = GameConfig {
            stroke_colour: String::from("blue-ish"),
            ..Default::default()
        };
        assert_eq!(config.stroke_rgb(), [0x4a, 0x90, 0xe2]);
        assert_eq!(config.centre_rgb(), [255, 0, 0]);
    }
}
