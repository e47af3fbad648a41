use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour scale
// ---------------------------------------------------------------------------

/// Anchor colours of the viridis colormap, dark purple to yellow.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3b, 0x52, 0x8b),
    (0x21, 0x91, 0x8c),
    (0x5e, 0xc9, 0x62),
    (0xfd, 0xe7, 0x25),
];

/// Bar fill in the bar chart, and while hovered.
pub const BAR_FILL: Color32 = Color32::from_rgb(0x28, 0xA7, 0x45);
pub const BAR_FILL_HOVER: Color32 = Color32::from_rgb(0x21, 0x88, 0x38);

/// Background of the details box when nothing is hovered: white at 95%
/// opacity, premultiplied.
pub const DETAILS_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(242, 242, 242, 242);

fn to_linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Maps a value in `[min, max]` onto the viridis colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    min: f64,
    max: f64,
}

impl SequentialScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale spanning the smallest and largest of `values`.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(s) => Some(Self::new(s.min.min(v), s.max.max(v))),
        })
    }

    /// Position of `value` in the domain, clamped to `[0, 1]`.
    fn position(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        self.color_at(self.position(value))
    }

    /// Colour at fraction `t` of the way from `min` to `max`.
    pub fn color_at(&self, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f32;
        let i = (t.floor() as usize).min(VIRIDIS.len() - 2);
        let mixed = to_linear(VIRIDIS[i]).mix(to_linear(VIRIDIS[i + 1]), t - i as f32);
        let rgb: Srgb<u8> = Srgb::from_linear(mixed);
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

// ---------------------------------------------------------------------------
// Text contrast
// ---------------------------------------------------------------------------

/// Black or white, whichever reads better on `background` (YIQ brightness).
pub fn contrast_text_color(background: Color32) -> Color32 {
    let yiq = (u32::from(background.r()) * 299
        + u32::from(background.g()) * 587
        + u32::from(background.b()) * 114) as f32
        / 1000.0;
    if yiq >= 128.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color32, b: Color32) -> bool {
        a.r().abs_diff(b.r()) <= 1 && a.g().abs_diff(b.g()) <= 1 && a.b().abs_diff(b.b()) <= 1
    }

    #[test]
    fn scale_endpoints_are_viridis_ends() {
        let scale = SequentialScale::new(1_000.0, 90_000.0);
        assert!(close(scale.color_for(1_000.0), Color32::from_rgb(0x44, 0x01, 0x54)));
        assert!(close(scale.color_for(90_000.0), Color32::from_rgb(0xfd, 0xe7, 0x25)));
        // Out-of-domain values clamp.
        assert!(close(scale.color_for(-5.0), scale.color_for(1_000.0)));
    }

    #[test]
    fn spanning_collects_min_and_max() {
        let scale = SequentialScale::spanning([5.0, 1.0, 9.0]).unwrap();
        assert_eq!(scale, SequentialScale::new(1.0, 9.0));
        assert!(SequentialScale::spanning(std::iter::empty()).is_none());
    }

    #[test]
    fn degenerate_domain_uses_middle_color() {
        let scale = SequentialScale::new(3.0, 3.0);
        assert!(close(scale.color_for(3.0), Color32::from_rgb(0x21, 0x91, 0x8c)));
    }

    #[test]
    fn color_at_walks_the_gradient() {
        let scale = SequentialScale::new(0.0, 10.0);
        assert_eq!(scale.color_at(0.0), scale.color_for(0.0));
        assert_eq!(scale.color_at(0.5), scale.color_for(5.0));
        assert_eq!(scale.color_at(1.0), scale.color_for(10.0));
        assert_eq!(scale.color_at(2.0), scale.color_at(1.0));
    }

    #[test]
    fn idle_details_background_is_translucent_white() {
        // Premultiplied white keeps every channel equal to alpha.
        let [r, g, b, a] = DETAILS_BACKGROUND.to_array();
        assert_eq!((r, g, b), (a, a, a));
        assert_eq!(a, (0.95f32 * 255.0).round() as u8);
    }

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(contrast_text_color(Color32::from_rgb(0x44, 0x01, 0x54)), Color32::WHITE);
        assert_eq!(contrast_text_color(Color32::from_rgb(0xfd, 0xe7, 0x25)), Color32::BLACK);
        assert_eq!(contrast_text_color(BAR_FILL), Color32::WHITE);
        assert_eq!(contrast_text_color(DETAILS_BACKGROUND), Color32::BLACK);
        assert_eq!(contrast_text_color(BAR_FILL_HOVER), Color32::WHITE);
    }
}
