use egui::{Slider, Ui};
use perfect_circle::scoring::FillRule;

use crate::model::Model;

pub fn render_game_settings(model: &mut Model, ui: &mut Ui) {
    let draft = &mut model.draft_config;

    ui.heading("Game Settings");
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Min stroke points");
            ui.add(Slider::new(&mut draft.min_stroke_points, 3..=60));
        });
        ui.horizontal(|ui| {
            ui.label("Score ceiling");
            ui.add(Slider::new(&mut draft.score_ceiling, 10.0..=200.0));
        });
        ui.label("Surround test");
        ui.horizontal(|ui| {
            ui.radio_value(&mut draft.fill_rule, FillRule::NonZero, "Non-zero");
            ui.radio_value(&mut draft.fill_rule, FillRule::EvenOdd, "Even-odd");
        });
    });

    ui.heading("Look");
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Stroke width");
            ui.add(Slider::new(&mut draft.stroke_width, 1.0..=12.0));
        });
        ui.horizontal(|ui| {
            ui.label("Stroke colour");
            ui.text_edit_singleline(&mut draft.stroke_colour);
        });
        ui.horizontal(|ui| {
            ui.label("Dot radius");
            ui.add(Slider::new(&mut draft.centre_radius, 2.0..=20.0));
        });
        ui.horizontal(|ui| {
            ui.label("Dot colour");
            ui.text_edit_singleline(&mut draft.centre_colour);
        });
    });

    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            model.apply_draft_config();
        }
        if ui.button("Save").clicked() {
            model.save_draft_config();
        }
    });
}
