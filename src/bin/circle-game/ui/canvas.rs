use egui::{vec2, Color32, Pos2, Response, Sense, Shape, Stroke, Ui, Vec2};
use log::debug;
use perfect_circle::surface::InputSample;

use crate::model::Model;

fn sample_at(pos: Pos2) -> InputSample {
    // egui already folds touch input into the pointer
    InputSample::Pointer((pos.x, pos.y))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerAction {
    Begin,
    Extend,
    End,
}

/// What the pointer did to the surface during one frame.
#[derive(Debug, Clone, Copy, Default)]
struct PointerFrame {
    started: bool,
    released: bool,
    inside: bool,
    moved: bool,
}

impl PointerFrame {
    fn read(response: &Response) -> (Self, Option<Pos2>) {
        let pos = response.interact_pointer_pos();
        let frame = PointerFrame {
            started: response.drag_started() && pos.is_some(),
            released: response.drag_released(),
            inside: pos.map_or(true, |p| response.rect.contains(p)),
            moved: pos.is_some() && response.drag_delta() != Vec2::ZERO,
        };
        (frame, pos)
    }
}

/// Gesture calls for one frame, in order. Leaving the surface ends the
/// gesture just like letting go; frames where the pointer stood still add
/// nothing.
fn pointer_steps(capturing: bool, frame: PointerFrame) -> Vec<PointerAction> {
    if frame.started {
        let mut steps = vec![PointerAction::Begin];
        if frame.released {
            steps.push(PointerAction::End);
        }
        return steps;
    }
    if !capturing {
        return Vec::new();
    }
    if frame.released || !frame.inside {
        vec![PointerAction::End]
    } else if frame.moved {
        vec![PointerAction::Extend]
    } else {
        Vec::new()
    }
}

pub fn render_canvas(model: &mut Model, ui: &mut Ui) {
    let room = ui.available_size();
    if model.game.resize(room.x, room.y) {
        debug!("Surface now {:?}", model.game.surface().size());
    }

    let (width, height) = model.game.surface().size();
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::drag());
    let rect = response.rect;
    model.game.set_origin((rect.min.x, rect.min.y));

    let (frame, pos) = PointerFrame::read(&response);
    for step in pointer_steps(model.game.is_capturing(), frame) {
        match (step, pos) {
            (PointerAction::Begin, Some(pos)) => {
                model.game.begin(&sample_at(pos));
            }
            (PointerAction::Extend, Some(pos)) => {
                if model.game.extend(&sample_at(pos)).is_some() {
                    ui.ctx().request_repaint();
                }
            }
            (PointerAction::End, _) => {
                if !frame.inside {
                    debug!("Pointer left the surface mid-stroke");
                }
                model.game.end();
            }
            _ => {}
        }
    }

    let config = model.game.config();
    painter.rect_filled(rect, 0.0, Color32::from_gray(24));

    let points: Vec<Pos2> = model
        .game
        .visible_stroke()
        .iter()
        .map(|(x, y)| rect.min + vec2(*x, *y))
        .collect();
    if points.len() > 1 {
        let [r, g, b] = config.stroke_rgb();
        painter.add(Shape::line(
            points,
            Stroke::new(config.stroke_width, Color32::from_rgb(r, g, b)),
        ));
    }

    let (cx, cy) = model.game.centre();
    let [r, g, b] = config.centre_rgb();
    painter.circle_filled(
        rect.min + vec2(cx, cy),
        config.centre_radius,
        Color32::from_rgb(r, g, b),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PointerFrame {
        PointerFrame {
            inside: true,
            ..Default::default()
        }
    }

    #[test]
    fn press_begins_and_moves_extend() {
        let press = PointerFrame {
            started: true,
            ..frame()
        };
        assert_eq!(pointer_steps(false, press), vec![PointerAction::Begin]);

        let drag = PointerFrame {
            moved: true,
            ..frame()
        };
        assert_eq!(pointer_steps(true, drag), vec![PointerAction::Extend]);
    }

    #[test]
    fn still_frames_add_nothing() {
        assert!(pointer_steps(true, frame()).is_empty());
    }

    #[test]
    fn release_ends_the_gesture() {
        let release = PointerFrame {
            released: true,
            moved: true,
            ..frame()
        };
        assert_eq!(pointer_steps(true, release), vec![PointerAction::End]);
    }

    #[test]
    fn leaving_then_releasing_ends_once() {
        let outside = PointerFrame {
            inside: false,
            moved: true,
            ..frame()
        };
        assert_eq!(pointer_steps(true, outside), vec![PointerAction::End]);

        // The gesture is over, so neither more dragging outside nor the
        // release does anything
        assert!(pointer_steps(false, outside).is_empty());
        let release = PointerFrame {
            released: true,
            inside: false,
            ..frame()
        };
        assert!(pointer_steps(false, release).is_empty());
    }

    #[test]
    fn click_within_one_frame_begins_then_ends() {
        let click = PointerFrame {
            started: true,
            released: true,
            ..frame()
        };
        assert_eq!(pointer_steps(false, click), vec![PointerAction::Begin, PointerAction::End]);
    }

    #[test]
    fn moves_without_a_gesture_are_ignored() {
        let drag = PointerFrame {
            moved: true,
            ..frame()
        };
        assert!(pointer_steps(false, drag).is_empty());
    }
}
