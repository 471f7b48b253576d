//! Hex to OKLCH conversions
//!
//! The pipeline is sRGB decode to linear light to OKLab (two fixed 3x3
//! matrices around a cube-root nonlinearity) to cylindrical form, and the
//! exact inverse on the way back. The inverse clamps out-of-gamut channels to
//! [0, 1] instead of failing; that lossy step is acceptable for preview
//! tooling and never triggers for in-gamut sRGB input, so in-gamut colors
//! round-trip exactly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color conversion error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The input was not `#` followed by 6 hex digits
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// Result type for color conversions
pub type Result<T> = std::result::Result<T, ColorError>;

/// A color in cylindrical OKLab coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    /// Lightness, 0 to 100
    pub l: f64,
    /// Chroma, at least 0 (typically under 0.4 for sRGB colors)
    pub c: f64,
    /// Hue angle in degrees, [0, 360)
    pub h: f64,
}

/// Parse a strict `#RRGGBB` string into 0 to 1 channel values.
fn hex_to_rgb(hex: &str) -> Result<[f64; 3]> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| ColorError::InvalidHex(hex.to_string()))?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }

    let mut channels = [0.0; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))?;
        *channel = f64::from(byte) / 255.0;
    }
    Ok(channels)
}

/// Format 0 to 1 channel values as lowercase `#rrggbb`, clamping each channel.
fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        to_byte(rgb[0]),
        to_byte(rgb[1]),
        to_byte(rgb[2])
    )
}

/// sRGB transfer function, encoded to linear.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function, linear to encoded.
fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn linear_rgb_to_oklab(r: f64, g: f64, b: f64) -> [f64; 3] {
    let l = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
    let m = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
    let s = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

    [
        0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
        1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
        0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
    ]
}

fn oklab_to_linear_rgb(lab_l: f64, a: f64, b: f64) -> [f64; 3] {
    let l = lab_l + 0.3963377774 * a + 0.2158037573 * b;
    let m = lab_l - 0.1055613458 * a - 0.0638541728 * b;
    let s = lab_l - 0.0894841775 * a - 1.2914855480 * b;

    let l3 = l * l * l;
    let m3 = m * m * m;
    let s3 = s * s * s;

    [
        4.0767416621 * l3 - 3.3077115913 * m3 + 0.2309699292 * s3,
        -1.2684380046 * l3 + 2.6097574011 * m3 - 0.3413193965 * s3,
        -0.0041960863 * l3 - 0.7034186147 * m3 + 1.7076147010 * s3,
    ]
}

/// Convert a `#RRGGBB` color to cylindrical OKLab coordinates.
pub fn hex_to_oklch(hex: &str) -> Result<Oklch> {
    let [r, g, b] = hex_to_rgb(hex)?;
    let [lab_l, a, lab_b] =
        linear_rgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));

    let c = (a * a + lab_b * lab_b).sqrt();
    let mut h = lab_b.atan2(a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    Ok(Oklch { l: lab_l * 100.0, c, h })
}

/// Convert cylindrical OKLab coordinates back to a `#rrggbb` string.
///
/// Out-of-gamut inputs are clamped per channel rather than rejected.
pub fn oklch_to_hex(color: Oklch) -> String {
    let lab_l = color.l / 100.0;
    let a = color.c * color.h.to_radians().cos();
    let b = color.c * color.h.to_radians().sin();

    let [lr, lg, lb] = oklab_to_linear_rgb(lab_l, a, b);
    rgb_to_hex([linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb)])
}
