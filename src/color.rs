use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed series colors
// ---------------------------------------------------------------------------

/// Lower-limit series (muted blue).
pub const LIC_COLOR: Color32 = Color32::from_rgb(0x4c, 0x78, 0xa8);
/// Upper-limit series (strong blue).
pub const LSC_COLOR: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
/// Mean-LIC line (dark navy, keeps the two lines distinguishable).
pub const LIC_LINE_COLOR: Color32 = Color32::from_rgb(0x0d, 0x3b, 0x66);

// ---------------------------------------------------------------------------
// Sequential color scale for the heatmap
// ---------------------------------------------------------------------------

/// Blues-like sequential scale: light for low values, saturated dark blue
/// for high values.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    min: f64,
    max: f64,
}

impl SequentialScale {
    pub fn new(min: f64, max: f64) -> Self {
        SequentialScale { min, max }
    }

    /// Map a value to its cell color.  Values outside [min, max] clamp to
    /// the scale ends; a degenerate scale (min == max) maps to the midpoint.
    pub fn color_for(&self, value: f64) -> Color32 {
        let span = self.max - self.min;
        let t = if span.abs() < f64::EPSILON {
            0.5
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        };

        // Hue fixed at blue; ramp lightness down and saturation up.
        let lightness = 0.92 - 0.62 * t as f32;
        let saturation = 0.30 + 0.55 * t as f32;
        let hsl = Hsl::new(212.0, saturation, lightness);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(c: Color32) -> u32 {
        c.r() as u32 + c.g() as u32 + c.b() as u32
    }

    #[test]
    fn higher_values_map_darker() {
        let scale = SequentialScale::new(0.0, 10.0);
        assert!(luminance(scale.color_for(0.0)) > luminance(scale.color_for(5.0)));
        assert!(luminance(scale.color_for(5.0)) > luminance(scale.color_for(10.0)));
    }

    #[test]
    fn out_of_range_values_clamp() {
        let scale = SequentialScale::new(0.0, 10.0);
        assert_eq!(scale.color_for(-5.0), scale.color_for(0.0));
        assert_eq!(scale.color_for(99.0), scale.color_for(10.0));
    }

    #[test]
    fn degenerate_scale_is_stable() {
        let scale = SequentialScale::new(3.0, 3.0);
        assert_eq!(scale.color_for(3.0), scale.color_for(3.0));
    }
}
