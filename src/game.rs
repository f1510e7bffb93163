use anyhow::Result;
use image::RgbaImage;
use log::{debug, error, info, warn};

use crate::{
    best_score::{BestScore, BestScoreStore},
    cues::{Cue, CuePlayer},
    export::{render_snapshot, SnapshotStyle},
    game_config::GameConfig,
    gesture::{GestureEvent, GestureOutcome, GestureTracker, Stroke},
    scoring::ScoreResult,
    surface::{DrawingSurface, InputSample},
    Point2D,
};

pub const PROMPT_MESSAGE: &str = "Draw a circle around the red dot.";
pub const REJECTED_MESSAGE: &str = "❌ Not a circle!";

pub fn accepted_message(score: f32) -> String {
    format!("✅ Score: {:.2}", score)
}

/// Owns one session of the game: the surface, the gesture in progress, the
/// best score and the collaborators that make sounds and keep scores.
pub struct Game {
    config: GameConfig,
    surface: DrawingSurface,
    tracker: GestureTracker,
    best_score: BestScore,
    store: Box<dyn BestScoreStore>,
    cues: Box<dyn CuePlayer>,
    /// Last finalized stroke, kept on screen until the next gesture or reset
    finished_stroke: Stroke,
    last_result: Option<ScoreResult>,
    last_score: f32,
    message: String,
}

impl Game {
    pub fn new(
        config: GameConfig,
        cues: Box<dyn CuePlayer>,
        store: Box<dyn BestScoreStore>,
    ) -> Self {
        let initial_best = match store.load() {
            Ok(Some(value)) => {
                info!("Restored best score {:.2}", value);
                value
            }
            Ok(None) => 0.,
            Err(e) => {
                warn!("Could not load best score, starting from zero: {}", e);
                0.
            }
        };

        let limits = config.surface_limits();
        Game {
            tracker: GestureTracker::new(config.tracker_settings()),
            surface: DrawingSurface::new(limits.max_width, limits.max_height),
            best_score: BestScore::new(initial_best),
            store,
            cues,
            config,
            finished_stroke: Stroke::default(),
            last_result: None,
            last_score: 0.,
            message: String::from(PROMPT_MESSAGE),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swap in new settings; takes effect from the next gesture.
    pub fn apply_config(&mut self, config: GameConfig) {
        debug!("Apply config {:?}", config);
        self.tracker.set_settings(config.tracker_settings());
        self.config = config;
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn centre(&self) -> Point2D {
        self.surface.centre()
    }

    pub fn resize(&mut self, window_width: f32, window_height: f32) -> bool {
        let limits = self.config.surface_limits();
        self.surface
            .fit_to_window(window_width, window_height, &limits)
    }

    pub fn set_origin(&mut self, origin: Point2D) {
        self.surface.set_origin(origin);
    }

    pub fn is_capturing(&self) -> bool {
        self.tracker.is_capturing()
    }

    /// What should be on screen: the stroke being drawn, or else the last
    /// finished one.
    pub fn visible_stroke(&self) -> &[Point2D] {
        if self.tracker.is_capturing() {
            self.tracker.stroke().points()
        } else {
            self.finished_stroke.points()
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_score(&self) -> f32 {
        self.last_score
    }

    pub fn last_result(&self) -> Option<ScoreResult> {
        self.last_result
    }

    pub fn best_score(&self) -> f32 {
        self.best_score.value()
    }

    pub fn begin(&mut self, sample: &InputSample) -> Option<GestureEvent> {
        let point = self.surface.to_local(sample)?;
        self.finished_stroke = Stroke::default();
        let event = self.tracker.begin(point);
        self.play(Cue::Draw);
        Some(event)
    }

    pub fn extend(&mut self, sample: &InputSample) -> Option<GestureEvent> {
        let point = self.surface.to_local(sample)?;
        self.tracker.move_to(point)
    }

    /// End the gesture (pointer released or left the surface) and report the
    /// outcome. Returns the score result if the stroke was evaluated.
    pub fn end(&mut self) -> Option<ScoreResult> {
        let centre = self.surface.centre();
        let event = self.tracker.end(&centre)?;
        self.stop(Cue::Draw);

        match event {
            GestureEvent::Finished(GestureOutcome::Discarded { points }) => {
                debug!("Discarded short stroke ({} points)", points);
                self.reset();
                None
            }
            GestureEvent::Finished(GestureOutcome::Evaluated { stroke, result }) => {
                self.finished_stroke = stroke;
                self.report(result);
                Some(result)
            }
            other => {
                error!("Unexpected event at end of gesture: {:?}", other);
                None
            }
        }
    }

    fn report(&mut self, result: ScoreResult) {
        self.last_result = Some(result);
        match result {
            ScoreResult::Rejected => {
                info!("Stroke does not surround the dot");
                self.message = String::from(REJECTED_MESSAGE);
                self.last_score = 0.;
                self.play(Cue::Failure);
            }
            ScoreResult::Accepted(score) => {
                self.message = accepted_message(score);
                self.last_score = score;
                if self.best_score.offer(score) {
                    info!("New best score {:.2}", score);
                    if let Err(e) = self.store.persist(score) {
                        warn!("Could not persist best score: {}", e);
                    }
                    self.play(Cue::Success);
                }
            }
        }
    }

    /// Clear the drawing and go back to the prompt. The best score is kept.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.finished_stroke = Stroke::default();
        self.last_result = None;
        self.last_score = 0.;
        self.message = String::from(PROMPT_MESSAGE);
    }

    /// Forget the session's best score, e.g. when the session ends.
    pub fn end_session(&mut self) {
        self.best_score.reset();
        if let Err(e) = self.store.clear() {
            warn!("Could not clear best score store: {}", e);
        }
    }

    pub fn snapshot(&self) -> Result<RgbaImage> {
        render_snapshot(
            self.visible_stroke(),
            &self.surface.centre(),
            self.surface.size(),
            self.last_score,
            &SnapshotStyle::from_config(&self.config),
        )
    }

    fn play(&mut self, cue: Cue) {
        if let Err(e) = self.cues.play(cue) {
            error!("Audio failed: {}", e);
        }
    }

    fn stop(&mut self, cue: Cue) {
        if let Err(e) = self.cues.stop(cue) {
            error!("Audio failed: {}", e);
        }
    }
}
