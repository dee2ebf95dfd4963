/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const MAGENTA: Self = Self { r: 0.659, g: 0.0,   b: 0.361, a: 1.0 }; // #a8005c
    pub const GREEN:   Self = Self { r: 0.298, g: 0.686, b: 0.314, a: 1.0 }; // #4caf50
    pub const RED:     Self = Self { r: 0.957, g: 0.263, b: 0.212, a: 1.0 }; // #f44336

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// 8-bit RGB channels, alpha dropped.
    #[inline]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Wrap `text` in a 24-bit ANSI foreground escape.
    pub fn paint(self, text: &str) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#FF6B6B").unwrap().to_rgb8(), (0xff, 0x6b, 0x6b));
        assert_eq!(Color::from_hex("45B7D180").unwrap().a, 128.0 / 255.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
        assert!(Color::from_hex("#ä1234").is_none());
    }

    #[test]
    fn paint_emits_truecolor_escape() {
        assert_eq!(Color::MAGENTA.paint("x"), "\x1b[38;2;168;0;92mx\x1b[0m");
    }
}
