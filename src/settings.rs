use clap::{command, Parser};

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./circle.json";
const EXPORT_DIR: &str = ".";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load (and save) the game config
    #[arg(long="configPath",default_value_t=String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,

    /// Override the minimum number of points a stroke needs to be scored
    #[arg(long = "minStrokePoints")]
    pub min_stroke_points: Option<usize>,

    /// Override the score given to a perfect circle
    #[arg(long = "scoreCeiling")]
    pub score_ceiling: Option<f32>,

    /// Directory that screenshots are saved into
    #[arg(long="exportDir",default_value_t=String::from(EXPORT_DIR))]
    pub export_dir: String,

    /// Keep the session's best score in this file (removed when the game
    /// closes); by default it is only kept in memory
    #[arg(long = "sessionFile")]
    pub session_file: Option<String>,
}
