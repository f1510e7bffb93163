use log::{error, info};
use perfect_circle::{
    best_score::{BestScoreStore, JsonFileStore, SessionStore},
    cues::cue_player_for,
    export::save_snapshot,
    game::Game,
    game_config::{load_config_from_file, GameConfig},
    settings::Cli,
};

use crate::ui::render_ui;

pub struct Model {
    pub game: Game,
    /// Settings being edited in the side panel, applied on request
    pub draft_config: GameConfig,
    pub config_path: String,
    pub export_dir: String,
    /// Result of the last save/export, shown under the buttons
    pub status: Option<String>,
}

impl Model {
    pub fn new(cli: &Cli) -> Self {
        let mut config = match load_config_from_file(&cli.config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}; falling back to default config", e);
                GameConfig::default()
            }
        };
        config.apply_overrides(cli);

        let store: Box<dyn BestScoreStore> = match &cli.session_file {
            Some(path) => {
                let store = JsonFileStore::new(path);
                info!("Keeping best score in session file {:?}", store.path());
                Box::new(store)
            }
            None => Box::new(SessionStore::new()),
        };

        let game = Game::new(config.clone(), cue_player_for(&config), store);

        info!("Perfect Circle started OK");

        Model {
            game,
            draft_config: config,
            config_path: cli.config_path.clone(),
            export_dir: cli.export_dir.clone(),
            status: None,
        }
    }

    pub fn take_screenshot(&mut self) {
        let file_name = &self.game.config().export_file_name;
        let saved = self
            .game
            .snapshot()
            .and_then(|image| save_snapshot(&image, &self.export_dir, file_name));
        self.status = match saved {
            Ok(path) => Some(format!("Saved {}", path.display())),
            Err(e) => {
                error!("Screenshot failed: {}", e);
                Some(String::from("Screenshot failed"))
            }
        };
    }

    pub fn apply_draft_config(&mut self) {
        self.game.apply_config(self.draft_config.clone());
        self.status = Some(String::from("Settings applied"));
    }

    pub fn save_draft_config(&mut self) {
        self.apply_draft_config();
        self.status = match self.draft_config.write_config_to_file(&self.config_path) {
            Ok(()) => Some(format!("Saved settings to {}", self.config_path)),
            Err(e) => {
                error!("{}", e);
                Some(String::from("Could not save settings"))
            }
        };
    }
}

impl eframe::App for Model {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        render_ui(ctx, self);
    }

    fn on_close_event(&mut self) -> bool {
        info!("Window closing; end of session");
        self.game.end_session();
        true
    }
}
