use log::{debug, info};

use crate::{
    scoring::{score, ScoreResult, ScoringSettings},
    Point2D,
};

pub const DEFAULT_MIN_STROKE_POINTS: usize = 6;

/// Ordered points of one drawing gesture, in surface-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point2D>,
}

impl Stroke {
    pub fn starting_at(point: Point2D) -> Self {
        Stroke {
            points: vec![point],
        }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Capturing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Strokes with fewer points are treated as accidental taps and never scored
    pub min_stroke_points: usize,
    pub scoring: ScoringSettings,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings {
            min_stroke_points: DEFAULT_MIN_STROKE_POINTS,
            scoring: ScoringSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    Discarded { points: usize },
    Evaluated { stroke: Stroke, result: ScoreResult },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Started(Point2D),
    /// A point was appended; the in-progress stroke needs redrawing
    Updated { points: usize },
    Finished(GestureOutcome),
}

pub struct GestureTracker {
    settings: TrackerSettings,
    state: GestureState,
    stroke: Stroke,
}

impl GestureTracker {
    pub fn new(settings: TrackerSettings) -> Self {
        GestureTracker {
            settings,
            state: GestureState::Idle,
            stroke: Stroke::default(),
        }
    }

    pub fn set_settings(&mut self, settings: TrackerSettings) {
        self.settings = settings;
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == GestureState::Capturing
    }

    /// The in-progress stroke; empty while Idle.
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    /// Start a new stroke at `point`, dropping any stroke still in progress.
    pub fn begin(&mut self, point: Point2D) -> GestureEvent {
        if self.is_capturing() {
            debug!(
                "Gesture restarted; dropping {} captured points",
                self.stroke.len()
            );
        }
        self.stroke = Stroke::starting_at(point);
        self.state = GestureState::Capturing;
        GestureEvent::Started(point)
    }

    /// Append a point to the stroke. Ignored (returns None) unless a gesture
    /// has begun.
    pub fn move_to(&mut self, point: Point2D) -> Option<GestureEvent> {
        if !self.is_capturing() {
            return None;
        }
        self.stroke.push(point);
        Some(GestureEvent::Updated {
            points: self.stroke.len(),
        })
    }

    /// Finish the gesture, scoring it against `centre` if it is long enough.
    /// Calling this while Idle does nothing.
    pub fn end(&mut self, centre: &Point2D) -> Option<GestureEvent> {
        if !self.is_capturing() {
            return None;
        }
        self.state = GestureState::Idle;
        let stroke = std::mem::take(&mut self.stroke);

        if stroke.len() < self.settings.min_stroke_points {
            debug!(
                "Stroke of {} points is below minimum {}; discard",
                stroke.len(),
                self.settings.min_stroke_points
            );
            return Some(GestureEvent::Finished(GestureOutcome::Discarded {
                points: stroke.len(),
            }));
        }

        let result = score(stroke.points(), centre, &self.settings.scoring);
        info!("Scored stroke of {} points: {:?}", stroke.len(), result);
        Some(GestureEvent::Finished(GestureOutcome::Evaluated {
            stroke,
            result,
        }))
    }

    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.stroke = Stroke::default();
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        GestureTracker::new(TrackerSettings::default())
    }
}
