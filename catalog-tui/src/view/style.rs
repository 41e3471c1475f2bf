//! Colours and text styles.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowers OKLCH lightness by `amount`, clamped to `0.0..=1.0`.
    pub fn darken(self, amount: f32) -> Self {
        use palette::{Clamp, IntoColor, Oklch, Srgb};

        let srgb = Srgb::new(self.r, self.g, self.b).into_format::<f32>();
        let mut oklch: Oklch = srgb.into_color();
        oklch.l = (oklch.l - amount).clamp(0.0, 1.0);

        let srgb: Srgb = oklch.into_color();
        let (r, g, b) = srgb.clamp().into_format::<u8>().into_components();
        Self::new(r, g, b)
    }
}

/// Fixed colours for the catalog screen.
pub mod colors {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb::new(18, 18, 24);
    pub const FOREGROUND: Rgb = Rgb::new(230, 230, 235);
    pub const MUTED: Rgb = Rgb::new(136, 136, 150);
    pub const ACCENT: Rgb = Rgb::new(90, 110, 255);
    pub const PRICE: Rgb = Rgb::new(80, 200, 120);
    pub const SEPARATOR: Rgb = Rgb::new(60, 60, 72);
    pub const HIGHLIGHT: Rgb = Rgb::new(34, 36, 52);
    pub const BUTTON: Rgb = Rgb::new(44, 48, 72);
    pub const THUMBNAIL: Rgb = Rgb::new(70, 70, 84);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground(mut self, color: Rgb) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(c: Rgb) -> u32 {
        c.r as u32 + c.g as u32 + c.b as u32
    }

    #[test]
    fn test_darken_zero_keeps_color() {
        let accent = colors::ACCENT;
        let same = accent.darken(0.0);
        assert!(same.r.abs_diff(accent.r) <= 1);
        assert!(same.g.abs_diff(accent.g) <= 1);
        assert!(same.b.abs_diff(accent.b) <= 1);
    }

    #[test]
    fn test_darken_grey_to_black() {
        assert_eq!(Rgb::new(255, 255, 255).darken(1.0), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::new(128, 128, 128).darken(2.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_darken_works_on_lightness_not_channels() {
        // Halving each channel would give (45, 55, 128). Taking 0.5 off
        // OKLCH lightness lands much closer to black.
        let dark = colors::ACCENT.darken(0.5);
        assert!(luma(dark) < 45 + 55 + 128);
        assert!(dark.b < 100);
    }

    #[test]
    fn test_darken_is_monotonic() {
        let accent = colors::ACCENT;
        assert!(luma(accent.darken(0.1)) > luma(accent.darken(0.2)));
        assert!(luma(accent.darken(0.2)) > luma(accent.darken(0.4)));
    }
}
