mod canvas;
mod game_settings;
mod scoreboard;

use canvas::render_canvas;
use egui::{Color32, RichText};
use game_settings::render_game_settings;
use perfect_circle::colours::score_colour;
use scoreboard::render_scoreboard;

use crate::model::Model;

pub const SPACING_AMOUNT: f32 = 16.0;

pub fn render_ui(ctx: &egui::Context, model: &mut Model) {
    egui::SidePanel::left("settings").show(ctx, |ui| {
        ui.add_space(SPACING_AMOUNT);
        render_game_settings(model, ui);
    });

    egui::SidePanel::right("scores").show(ctx, |ui| {
        ui.add_space(SPACING_AMOUNT);
        render_scoreboard(model, ui);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(message_text(model));
            ui.add_space(SPACING_AMOUNT);
            render_canvas(model, ui);
        });
    });
}

fn message_text(model: &Model) -> RichText {
    let text = RichText::new(model.game.message()).size(24.);
    match model.game.last_result().and_then(|r| r.value()) {
        Some(score) => {
            let [r, g, b] = score_colour(score, model.game.config().score_ceiling);
            text.color(Color32::from_rgb(r, g, b))
        }
        None => text,
    }
}
