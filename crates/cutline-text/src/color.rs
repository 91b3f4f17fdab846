//! Hex colour parsing for text styles.

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize, len: usize| -> Option<u8> {
            let digits = hex.get(i..i + len)?;
            let value = u8::from_str_radix(digits, 16).ok()?;
            Some(if len == 1 { value * 17 } else { value })
        };
        match hex.len() {
            3 => Some(Rgb {
                r: channel(0, 1)?,
                g: channel(1, 1)?,
                b: channel(2, 1)?,
            }),
            6 => Some(Rgb {
                r: channel(0, 2)?,
                g: channel(2, 2)?,
                b: channel(4, 2)?,
            }),
            _ => None,
        }
    }

    /// Backend colour syntax: `0xRRGGBB`, with `@alpha` when not opaque.
    pub fn to_ffmpeg(self, alpha: f64) -> String {
        let base = format!("0x{:02X}{:02X}{:02X}", self.r, self.g, self.b);
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha >= 1.0 {
            base
        } else {
            format!("{base}@{}", cutline_core::fmt_num(alpha))
        }
    }
}
