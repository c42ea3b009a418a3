use plotters::prelude::*;
use serde::Deserialize;

/// Visual settings for the dashboard, passed explicitly to every panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub mono_font_family: String,
    pub title_size: u32,
    pub panel_title_size: u32,
    pub label_size: u32,
    pub annotation_size: u32,
    pub background: [u8; 3],
    pub grid_alpha: f64,
}

impl Default for DashboardStyle {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1200,
            font_family: "sans-serif".to_string(),
            mono_font_family: "monospace".to_string(),
            title_size: 40,
            panel_title_size: 22,
            label_size: 15,
            annotation_size: 14,
            background: [255, 255, 255],
            grid_alpha: 0.3,
        }
    }
}

impl DashboardStyle {
    pub fn background_color(&self) -> RGBColor {
        let [r, g, b] = self.background;
        RGBColor(r, g, b)
    }

    pub fn title_font(&self) -> TextStyle<'_> {
        self.bold(self.title_size)
    }

    pub fn panel_title_font(&self) -> TextStyle<'_> {
        self.bold(self.panel_title_size)
    }

    pub fn label_font(&self) -> TextStyle<'_> {
        self.plain(self.label_size)
    }

    pub fn annotation_font(&self) -> TextStyle<'_> {
        self.bold(self.annotation_size)
    }

    pub fn mono_font(&self) -> TextStyle<'_> {
        TextStyle::from((self.mono_font_family.as_str(), self.label_size).into_font())
            .color(&BLACK)
    }

    pub fn grid_style(&self) -> ShapeStyle {
        BLACK.mix(self.grid_alpha).stroke_width(1)
    }

    fn plain(&self, size: u32) -> TextStyle<'_> {
        TextStyle::from((self.font_family.as_str(), size).into_font()).color(&BLACK)
    }

    fn bold(&self, size: u32) -> TextStyle<'_> {
        TextStyle::from(
            (self.font_family.as_str(), size)
                .into_font()
                .style(FontStyle::Bold),
        )
        .color(&BLACK)
    }
}

/// Approximation of the viridis colormap.
pub const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

/// Red to yellow to green, used for grade scales.
pub const RED_YELLOW_GREEN: [RGBColor; 5] = [
    RGBColor(165, 0, 38),
    RGBColor(244, 109, 67),
    RGBColor(255, 255, 191),
    RGBColor(102, 189, 99),
    RGBColor(0, 104, 55),
];

pub const PIE_COLORS: [RGBColor; 4] = [
    RGBColor(0xe7, 0x4c, 0x3c),
    RGBColor(0xf3, 0x9c, 0x12),
    RGBColor(0x2e, 0xcc, 0x71),
    RGBColor(0x34, 0x98, 0xdb),
];

pub const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

pub const TREND_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const SUMMARY_BACKGROUND: RGBColor = RGBColor(173, 216, 230);
pub const CELL_BORDER: RGBColor = RGBColor(128, 128, 128);

/// Linear interpolation across `stops`; `t` is clamped to `[0, 1]`.
pub fn gradient(stops: &[RGBColor], t: f64) -> RGBColor {
    match stops {
        [] => BLACK,
        [only] => *only,
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
            let i = (scaled.floor() as usize).min(stops.len() - 2);
            let frac = scaled - i as f64;
            let (a, b) = (stops[i], stops[i + 1]);
            let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
            RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
        }
    }
}

/// Evenly spaced position of item `i` out of `n` in `[0, 1]`.
pub fn spread(i: usize, n: usize) -> f64 {
    if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient(&VIRIDIS, 0.0), VIRIDIS[0]);
        assert_eq!(gradient(&VIRIDIS, 1.0), VIRIDIS[4]);
        assert_eq!(gradient(&VIRIDIS, -3.0), VIRIDIS[0]);
        assert_eq!(gradient(&VIRIDIS, 7.0), VIRIDIS[4]);
    }

    #[test]
    fn test_gradient_midpoint() {
        let stops = [RGBColor(0, 0, 0), RGBColor(200, 100, 50)];
        assert_eq!(gradient(&stops, 0.5), RGBColor(100, 50, 25));
        assert_eq!(gradient(&RED_YELLOW_GREEN, 0.5), RED_YELLOW_GREEN[2]);
    }

    #[test]
    fn test_spread() {
        assert_eq!(spread(0, 1), 0.0);
        assert_eq!(spread(2, 5), 0.5);
        assert_eq!(spread(4, 5), 1.0);
    }
}
