use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

/// Normalized (`0..=1`) straight-alpha color as written in config files.
///
/// Written either as `"#RRGGBB"` / `"#RRGGBBAA"` or as `{"h", "s", "l", "a"?}` with the hue
/// in degrees and the other channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
    pub(crate) a: f64,
}

impl Color {
    /// Color from normalized channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from HSL (hue in degrees).
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        hsla_to_rgba(h, s, l, 1.0)
    }

    /// Quantize to straight-alpha RGBA8.
    pub fn to_rgba8(self) -> Rgba8 {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8 {
            r: to_u8(self.r),
            g: to_u8(self.g),
            b: to_u8(self.b),
            a: to_u8(self.a),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged, deny_unknown_fields)]
        enum Written {
            Hex(String),
            Hsl {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default)]
                a: Option<f64>,
            },
        }

        match Written::deserialize(deserializer)? {
            Written::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Written::Hsl { h, s, l, a } => Ok(hsla_to_rgba(h, s, l, a.unwrap_or(1.0))),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let c = self.to_rgba8();
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a))
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let digits = s.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
        return Err(format!("expected #RRGGBB or #RRGGBBAA, got \"{s}\""));
    }

    let mut channels = [1.0f64; 4];
    for (slot, pair) in channels.iter_mut().zip(digits.as_bytes().chunks(2)) {
        let pair = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
        let byte =
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))?;
        *slot = f64::from(byte) / 255.0;
    }
    let [r, g, b, a] = channels;
    Ok(Color::rgba(r, g, b, a))
}

/// Chroma/hue-sector conversion; hue wraps, saturation and lightness clamp.
fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    Color::rgba(r + m, g + m, b + m, a)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
