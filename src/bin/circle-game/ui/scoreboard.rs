use egui::{Grid, RichText, Ui};

use crate::model::Model;

pub fn render_scoreboard(model: &mut Model, ui: &mut Ui) {
    ui.heading("Scores");
    Grid::new("scores_grid").show(ui, |ui| {
        ui.label("Best score:");
        ui.label(RichText::new(format!("{:.2}", model.game.best_score())).strong());
        ui.end_row();

        ui.label("Last score:");
        ui.label(format!("{:.2}", model.game.last_score()));
        ui.end_row();

        ui.label("Points drawn:");
        ui.label(format!("{}", model.game.visible_stroke().len()));
        ui.end_row();
    });

    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            model.game.reset();
            model.status = None;
        }
        if ui.button("Screenshot").clicked() {
            model.take_screenshot();
        }
    });

    if let Some(status) = &model.status {
        ui.label(status.as_str());
    }
}
