use log::debug;
use serde::{Deserialize, Serialize};

use crate::Point2D;

/// How the drawing surface is sized from the window it lives in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceLimits {
    pub max_width: f32,
    pub max_height: f32,
    /// Horizontal space left free around the surface
    pub margin: f32,
    /// Share of the window height the surface may take up
    pub height_ratio: f32,
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        SurfaceLimits {
            max_width: 500.,
            max_height: 500.,
            margin: 40.,
            height_ratio: 0.6,
        }
    }
}

/// A raw input position in screen coordinates, from either a mouse-like
/// pointer or a touch screen.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSample {
    Pointer(Point2D),
    /// All current touches; only the first one draws
    Touch(Vec<Point2D>),
}

impl InputSample {
    fn screen_position(&self) -> Option<Point2D> {
        match self {
            InputSample::Pointer(p) => Some(*p),
            InputSample::Touch(touches) => touches.first().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSurface {
    width: f32,
    height: f32,
    /// Top-left corner of the surface on screen
    origin: Point2D,
}

impl DrawingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        DrawingSurface {
            width: width.max(0.),
            height: height.max(0.),
            origin: (0., 0.),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn origin(&self) -> Point2D {
        self.origin
    }

    /// The target dot, always the middle of the surface.
    pub fn centre(&self) -> Point2D {
        (self.width / 2., self.height / 2.)
    }

    /// Resize to fit the window; returns true if the size (and therefore the
    /// centre) changed.
    pub fn fit_to_window(
        &mut self,
        window_width: f32,
        window_height: f32,
        limits: &SurfaceLimits,
    ) -> bool {
        let width = (window_width - limits.margin).min(limits.max_width).max(0.);
        let height = (window_height * limits.height_ratio)
            .min(limits.max_height)
            .max(0.);
        if (width, height) == (self.width, self.height) {
            return false;
        }
        debug!(
            "Surface resized {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        true
    }

    pub fn set_origin(&mut self, origin: Point2D) {
        self.origin = origin;
    }

    /// Convert a screen-space sample into surface-local coordinates.
    pub fn to_local(&self, sample: &InputSample) -> Option<Point2D> {
        let (x, y) = sample.screen_position()?;
        let (ox, oy) = self.origin;
        Some((x - ox, y - oy))
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        let limits = SurfaceLimits::default();
        DrawingSurface::new(limits.max_width, limits.max_height)
    }
}
