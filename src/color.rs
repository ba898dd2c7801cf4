use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Activity colour classification (map markers)
// ---------------------------------------------------------------------------

/// Marker colour derived from a volcano's activity evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityColor {
    /// Eruptions are known to have been observed or dated.
    RedHighlight,
    BlueDefault,
}

impl ActivityColor {
    /// Case-sensitive: `"Active"` or `"Historical"` anywhere in the text.
    pub fn classify(activity_evidence: &str) -> Self {
        if activity_evidence.contains("Active") || activity_evidence.contains("Historical") {
            ActivityColor::RedHighlight
        } else {
            ActivityColor::BlueDefault
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            ActivityColor::RedHighlight => [255, 0, 0],
            ActivityColor::BlueDefault => [0, 0, 255],
        }
    }

    pub fn color32(self) -> Color32 {
        let [r, g, b] = self.rgb();
        Color32::from_rgb(r, g, b)
    }

    /// Legend text for the map.
    pub fn label(self) -> &'static str {
        match self {
            ActivityColor::RedHighlight => "Active / historical",
            ActivityColor::BlueDefault => "Other evidence",
        }
    }
}

// ---------------------------------------------------------------------------
// Color palette generator (pie slices)
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // start at 210° so the first (largest) slice is blue-ish
            let hue = (210.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
