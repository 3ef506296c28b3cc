//! Hex/RGB conversion and tinting toward white.
//!
//! Parsing is validated explicitly: after an optional single leading `#`, the
//! string must be exactly six ASCII hex digits. Anything else is
//! `InvalidColorFormat`.

use std::fmt;
use std::str::FromStr;

use mindmap_error::{Error, Result};

/// Blend factor used by [`lighten`] callers that have no factor of their own.
pub const DEFAULT_LIGHTEN_FACTOR: f64 = 0.25;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend each channel toward white: `c + (255 - c) * factor`, truncated
    /// toward zero and clamped to `0..=255`.
    pub fn lighten(self, factor: f64) -> Self {
        fn channel(c: u8, factor: f64) -> u8 {
            let c = f64::from(c);
            (c + (255.0 - c) * factor).trunc().clamp(0.0, 255.0) as u8
        }

        Self {
            r: channel(self.r, factor),
            g: channel(self.g, factor),
            b: channel(self.b, factor),
        }
    }
}

/// A validated `#RRGGBB` color.
///
/// The text is kept as written (digit case included) with a `#` prefix
/// added when it was missing, so palette entries reach the sink verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    text: String,
    rgb: Rgb,
}

impl HexColor {
    pub fn parse(input: &str) -> Result<Self> {
        let rgb = hex_to_rgb(input)?;
        let text = if input.starts_with('#') {
            input.to_string()
        } else {
            format!("#{input}")
        };
        Ok(Self { text, rgb })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Lighter tint of this color. Infallible because the color is already valid.
    pub fn lighten(&self, factor: f64) -> HexColor {
        HexColor::from(self.rgb.lighten(factor))
    }
}

impl From<Rgb> for HexColor {
    fn from(rgb: Rgb) -> Self {
        Self {
            text: format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b),
            rgb,
        }
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HexColor::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Parse `#RRGGBB` (or `RRGGBB`) into its three byte channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 {
        return Err(Error::invalid_color(
            hex,
            format!("expected 6 hex digits, found {}", digits.chars().count()),
        )
        .with_operation("color::hex_to_rgb"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(
            Error::invalid_color(hex, format!("'{bad}' is not a hex digit"))
                .with_operation("color::hex_to_rgb"),
        );
    }

    // All six bytes are ASCII hex digits, so slicing and radix parsing cannot fail.
    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|e| {
            Error::invalid_color(hex, e.to_string()).with_operation("color::hex_to_rgb")
        })
    };

    Ok(Rgb::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Format a triple as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    HexColor::from(rgb).text
}

/// Lighter shade of `hex`, blending each channel toward white by `factor`.
///
/// Factors outside `[0, 1]` are accepted: negative factors darken and
/// factors above one saturate at white.
pub fn lighten(hex: &str, factor: f64) -> Result<HexColor> {
    Ok(HexColor::from(hex_to_rgb(hex)?.lighten(factor)))
}
