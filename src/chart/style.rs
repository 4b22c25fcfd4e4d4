// src/chart/style.rs

use plotters::style::RGBColor;

/// Chart surface size in pixels.
pub const CHART_SIZE: (u32, u32) = (1000, 600);

/// Caption font for every chart.
pub const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);

/// Series palette carried over from the project's chart frontend.
pub const PALETTE: &[RGBColor] = &[
    RGBColor(0x7c, 0x3a, 0xed),
    RGBColor(0x22, 0xd3, 0xee),
    RGBColor(0x10, 0xb9, 0x81),
    RGBColor(0xf5, 0x9e, 0x0b),
    RGBColor(0xef, 0x44, 0x44),
    RGBColor(0x60, 0xa5, 0xfa),
    RGBColor(0xc0, 0x84, 0xfc),
];

/// Color of the era at `idx`, cycling through the palette.
pub fn era_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// Marker shape of an era on the scatter plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EraMarker {
    Cross,
    Circle,
    Triangle,
}

/// Marker of the era at `idx`, cycling cross → circle → triangle.
pub fn era_marker(idx: usize) -> EraMarker {
    match idx % 3 {
        0 => EraMarker::Cross,
        1 => EraMarker::Circle,
        _ => EraMarker::Triangle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_and_markers_cycle() {
        assert_eq!(era_color(0), era_color(PALETTE.len()));
        assert_eq!(era_marker(0), EraMarker::Cross);
        assert_eq!(era_marker(1), EraMarker::Circle);
        assert_eq!(era_marker(2), EraMarker::Triangle);
        assert_eq!(era_marker(3), EraMarker::Cross);
    }
}
