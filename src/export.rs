use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Result};
use image::{Rgba, RgbaImage};
use log::{debug, info};
use resvg::{
    tiny_skia::{
        Color, FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Rect, Stroke,
        Transform,
    },
    usvg,
};

use crate::{game_config::GameConfig, Point2D};

const FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Text baseline distance from the bottom edge of the snapshot
const TEXT_BASELINE_OFFSET: u32 = 50;
const TEXT_FONT_SIZE: f32 = 20.;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotStyle {
    pub stroke_rgb: [u8; 3],
    pub stroke_width: f32,
    pub centre_rgb: [u8; 3],
    pub centre_radius: f32,
    pub footer_height: u32,
}

impl SnapshotStyle {
    pub fn from_config(config: &GameConfig) -> Self {
        SnapshotStyle {
            stroke_rgb: config.stroke_rgb(),
            stroke_width: config.stroke_width,
            centre_rgb: config.centre_rgb(),
            centre_radius: config.centre_radius,
            footer_height: config.export_footer_height,
        }
    }
}

fn paint_for([r, g, b]: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

/// Draw the surface (stroke and dot) on black, with the score written in the
/// footer underneath.
pub fn render_snapshot(
    stroke: &[Point2D],
    centre: &Point2D,
    size: (f32, f32),
    score: f32,
    style: &SnapshotStyle,
) -> Result<RgbaImage> {
    let width = size.0.round().max(1.) as u32;
    let height = size.1.round().max(0.) as u32;
    let total_height = height + style.footer_height;
    let mut pixmap = Pixmap::new(width, total_height)
        .ok_or_else(|| anyhow!("Cannot allocate a {}x{} snapshot", width, total_height))?;
    pixmap.fill(Color::BLACK);

    // Nothing drawn on the surface may spill into the footer
    if let Some(clip) = surface_mask(width, height) {
        draw_stroke(&mut pixmap, stroke, style, &clip);
        if let Some(dot) = PathBuilder::from_circle(centre.0, centre.1, style.centre_radius) {
            pixmap.fill_path(
                &dot,
                &paint_for(style.centre_rgb),
                FillRule::Winding,
                Transform::identity(),
                Some(&clip),
            );
        }
    }

    draw_score_text(&mut pixmap, score)?;

    Ok(RgbaImage::from_fn(width, total_height, |x, y| {
        match pixmap.pixel(x, y) {
            Some(p) => {
                let c = p.demultiply();
                Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            }
            None => Rgba([0, 0, 0, 255]),
        }
    }))
}

fn surface_mask(width: u32, height: u32) -> Option<Mask> {
    let rect = Rect::from_xywh(0., 0., width as f32, height as f32)?;
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(
        &PathBuilder::from_rect(rect),
        FillRule::Winding,
        false,
        Transform::identity(),
    );
    Some(mask)
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &[Point2D], style: &SnapshotStyle, clip: &Mask) {
    let paint = paint_for(style.stroke_rgb);
    match stroke {
        [] => {}
        [(x, y)] => {
            if let Some(spot) = PathBuilder::from_circle(*x, *y, style.stroke_width / 2.) {
                pixmap.fill_path(
                    &spot,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    Some(clip),
                );
            }
        }
        [(x, y), rest @ ..] => {
            let mut pb = PathBuilder::new();
            pb.move_to(*x, *y);
            for (x, y) in rest {
                pb.line_to(*x, *y);
            }
            let Some(path) = pb.finish() else {
                debug!("Stroke has no extent; nothing to draw");
                return;
            };
            let line = Stroke {
                width: style.stroke_width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &line, Transform::identity(), Some(clip));
        }
    }
}

fn score_text_options() -> usvg::Options<'static> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_font_data(FONT_BYTES.to_vec());
    let family_name = fontdb
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
    if let Some(name) = family_name {
        fontdb.set_sans_serif_family(name);
    }
    opt.fontdb = Arc::new(fontdb);
    opt
}

/// "Score: x.xx" centred, with its baseline a fixed distance above the bottom.
fn draw_score_text(pixmap: &mut Pixmap, score: f32) -> Result<()> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" font-family="sans-serif" font-size="{size}" fill="white" text-anchor="middle">Score: {score:.2}</text></svg>"#,
        w = width,
        h = height,
        x = width as f32 / 2.,
        y = height.saturating_sub(TEXT_BASELINE_OFFSET),
        size = TEXT_FONT_SIZE,
        score = score,
    );
    let tree = usvg::Tree::from_str(&svg, &score_text_options())
        .map_err(|e| anyhow!("Score text could not be laid out: {:?}", e))?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(())
}

pub fn save_snapshot(image: &RgbaImage, dir: &str, file_name: &str) -> Result<PathBuf> {
    let path = Path::new(dir).join(file_name);
    image.save(&path)?;
    info!("Saved screenshot to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use super::*;

    const STROKE: Rgba<u8> = Rgba([0x4a, 0x90, 0xe2, 255]);
    const DOT: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn style() -> SnapshotStyle {
        SnapshotStyle::from_config(&GameConfig::default())
    }

    /// Any near-white (text) pixel in the given rows
    fn has_text(image: &RgbaImage, rows: Range<u32>) -> bool {
        image
            .enumerate_pixels()
            .any(|(_, y, p)| rows.contains(&y) && p.0[..3].iter().all(|&c| c > 160))
    }

    #[test]
    fn snapshot_adds_footer() {
        let image = render_snapshot(&[], &(200., 150.), (400., 300.), 0., &style()).unwrap();
        assert_eq!(image.dimensions(), (400, 400));
        assert_eq!(*image.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn snapshot_draws_stroke_dot_and_score() {
        let stroke = [(100., 50.), (300., 50.)];
        let image =
            render_snapshot(&stroke, &(200., 150.), (400., 300.), 87.25, &style()).unwrap();

        assert_eq!(*image.get_pixel(200, 50), STROKE);
        assert_eq!(*image.get_pixel(200, 150), DOT);
        assert_eq!(*image.get_pixel(200, 250), BLACK);
        // Score text sits in the footer, above the baseline
        assert!(has_text(&image, 320..352));
        assert!(!has_text(&image, 0..300));
    }

    #[test]
    fn stroke_has_round_caps() {
        let stroke = [(100., 100.), (200., 100.)];
        let style = SnapshotStyle {
            stroke_width: 10.,
            ..style()
        };
        let image = render_snapshot(&stroke, &(300., 250.), (400., 300.), 0., &style).unwrap();
        // Inside the cap past the end point, outside its corner
        assert_eq!(*image.get_pixel(202, 100), STROKE);
        assert_eq!(*image.get_pixel(204, 95), BLACK);
    }

    #[test]
    fn stroke_does_not_spill_into_footer() {
        let stroke = [(10., 290.), (10., 340.)];
        let image = render_snapshot(&stroke, &(200., 150.), (400., 300.), 0., &style()).unwrap();
        assert_eq!(*image.get_pixel(10, 295), STROKE);
        assert_eq!(*image.get_pixel(10, 320), BLACK);
    }

    #[test]
    fn any_score_is_written() {
        for score in [f32::INFINITY, f32::NAN, -1.5, 1234.5] {
            let image = render_snapshot(&[], &(50., 50.), (100., 100.), score, &style()).unwrap();
            assert!(has_text(&image, 100..200), "no text for {}", score);
        }
    }

    #[test]
    fn single_point_is_a_dot() {
        let style = SnapshotStyle {
            stroke_width: 8.,
            ..style()
        };
        let image = render_snapshot(&[(40., 40.)], &(150., 150.), (300., 300.), 0., &style).unwrap();
        assert_eq!(*image.get_pixel(40, 40), STROKE);
    }

    #[test]
    fn save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let image = render_snapshot(&[], &(5., 5.), (10., 10.), 0., &style()).unwrap();
        let path = save_snapshot(&image, &dir.path().to_string_lossy(), "circle_score.png").unwrap();
        assert!(path.exists());
        assert_eq!(image::open(&path).unwrap().to_rgba8(), image);
    }
}
