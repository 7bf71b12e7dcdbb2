use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Price ramp: price per m² → Color32
// ---------------------------------------------------------------------------

/// Hue of the cheapest value (blue).
const LOW_HUE: f32 = 240.0;
/// Hue of the most expensive value (red).
const HIGH_HUE: f32 = 0.0;

/// Maps a price per m² onto a blue → red ramp between two bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRamp {
    min: i64,
    max: i64,
}

impl PriceRamp {
    /// Ramp spanning `values`, or `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(PriceRamp { min: v, max: v }),
            Some(r) => Some(PriceRamp {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// Colour for `value`, clamped to the ramp bounds.
    pub fn color_for(&self, value: i64) -> Color32 {
        let span = self.max as f64 - self.min as f64;
        let t = if span > 0.0 {
            ((value as f64 - self.min as f64) / span).clamp(0.0, 1.0) as f32
        } else {
            0.5
        };
        hue_color(LOW_HUE + (HIGH_HUE - LOW_HUE) * t)
    }
}

fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
