use anyhow::{anyhow, Result};
use colorsys::{Hsl, Rgb};
use map_range::MapRange;

/// Parse a CSS-style hex colour such as `#4a90e2`.
pub fn parse_hex(colour: &str) -> Result<[u8; 3]> {
    match Rgb::from_hex_str(colour) {
        Ok(rgb) => Ok(rgb.into()),
        Err(e) => Err(anyhow!("Invalid colour \"{}\": {:?}", colour, e)),
    }
}

/// Red for zero through to green at the ceiling.
pub fn score_colour(score: f32, score_ceiling: f32) -> [u8; 3] {
    let ceiling = score_ceiling.max(f32::EPSILON) as f64;
    let score = (score as f64).clamp(0., ceiling);
    let hue = score.map_range(0. ..ceiling, 0. ..120.);
    Rgb::from(&Hsl::new(hue, 80., 45., None)).into()
}
