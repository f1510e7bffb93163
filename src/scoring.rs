use serde::{Deserialize, Serialize};

use crate::{
    geometry_utils::{crossing_count, distance_points, winding_number},
    Point2D,
};

pub const DEFAULT_SCORE_CEILING: f32 = 100.;

/// Fewer points than this cannot enclose anything.
pub const MIN_POLYGON_POINTS: usize = 3;

/// How the closed stroke decides whether it surrounds the centre.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSettings {
    pub score_ceiling: f32,
    pub fill_rule: FillRule,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        ScoringSettings {
            score_ceiling: DEFAULT_SCORE_CEILING,
            fill_rule: FillRule::NonZero,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreResult {
    /// The closed stroke does not surround the centre.
    Rejected,
    Accepted(f32),
}

impl ScoreResult {
    pub fn value(&self) -> Option<f32> {
        match self {
            ScoreResult::Rejected => None,
            ScoreResult::Accepted(v) => Some(*v),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ScoreResult::Accepted(_))
    }
}

/// Spread of the point-to-centre distances of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialStats {
    pub mean: f32,
    /// Population variance (divides by n, not n - 1)
    pub variance: f32,
}

impl RadialStats {
    pub fn std_dev(&self) -> f32 {
        self.variance.sqrt()
    }
}

pub fn radial_stats(stroke: &[Point2D], centre: &Point2D) -> Option<RadialStats> {
    if stroke.is_empty() {
        return None;
    }
    let count = stroke.len() as f32;
    let distances: Vec<f32> = stroke.iter().map(|p| distance_points(p, centre)).collect();
    let mean = distances.iter().sum::<f32>() / count;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f32>() / count;
    Some(RadialStats { mean, variance })
}

/// Does the stroke, closed from its last point back to its first, surround `point`?
pub fn encloses(stroke: &[Point2D], point: &Point2D, fill_rule: FillRule) -> bool {
    if stroke.len() < MIN_POLYGON_POINTS {
        return false;
    }
    match fill_rule {
        FillRule::NonZero => winding_number(point, stroke) != 0,
        FillRule::EvenOdd => crossing_count(point, stroke) % 2 == 1,
    }
}

/// Score how round the stroke is around `centre`. A stroke that does not
/// enclose the centre is rejected; otherwise the score drops from the ceiling
/// by the standard deviation of the radii, and never goes below zero.
pub fn score(stroke: &[Point2D], centre: &Point2D, settings: &ScoringSettings) -> ScoreResult {
    if !encloses(stroke, centre, settings.fill_rule) {
        return ScoreResult::Rejected;
    }
    match radial_stats(stroke, centre) {
        Some(stats) => ScoreResult::Accepted((settings.score_ceiling - stats.std_dev()).max(0.)),
        None => ScoreResult::Rejected,
    }
}
