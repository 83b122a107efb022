//! Engine for a daily color-matching game.
//!
//! Two stateless pieces share one set of color conversion primitives:
//!
//! - [`score`] and [`score_guess`]: perceptual similarity of two sRGB
//!   colors as an integer percentage, via the CIE76 color difference
//!   in L\*a\*b\* space.
//! - [`daily`]: the deterministic target color for a calendar day.
//!
//! Every function here is pure and total over its valid inputs; all
//! values are plain `Copy` data, so callers may invoke anything from
//! any number of threads without synchronization.

use rgb::RGB8;
use thiserror::Error;

pub mod daily;

pub use rgb;

/// A color string failed the "6 hex digits, optional leading `#`"
/// structural check.
///
/// Malformed input is always surfaced, never defaulted: substituting
/// black (or anything else) for a bad parse would silently corrupt
/// every score computed from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color format: {0:?} is not a 6-digit hex color")]
pub struct InvalidColorFormat(pub String);

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;

/// D65 reference white, 2° observer.
const D65: Xyz = Xyz { x: 0.95047, y: 1., z: 1.08883 };

#[inline]
const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Parse a `"#rrggbb"` color, case-insensitive, the `#` optional.
///
/// Anything but exactly 6 hex digits after `#`-stripping is an error.
pub fn parse_hex(s: &str) -> Result<RGB8, InvalidColorFormat> {
    let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();
    if digits.len() != 6 {
        return Err(InvalidColorFormat(s.to_string()));
    }
    let byte = |i: usize| -> Option<u8> {
        let hi = hex_digit(digits[i])?;
        let lo = hex_digit(digits[i + 1])?;
        Some(hi << 4 | lo)
    };
    match (byte(0), byte(2), byte(4)) {
        (Some(r), Some(g), Some(b)) => Ok(RGB8 { r, g, b }),
        _ => Err(InvalidColorFormat(s.to_string())),
    }
}

/// Format a color as `"#rrggbb"`, lowercase and zero-padded.
pub fn hex_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Gamma-decode one sRGB channel to linear light in \[0., 1.\].
#[inline]
pub fn srgb_channel_to_linear(c: u8) -> f64 {
    let v = c as f64 / 255.;
    if v <= 0.04045 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
}

/// CIE 1931 tristimulus values under the sRGB (Rec. 709) primaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// Linearize each channel, then apply the sRGB→XYZ (D65) matrix.
    pub fn from_rgb(c: RGB8) -> Xyz {
        let r = srgb_channel_to_linear(c.r);
        let g = srgb_channel_to_linear(c.g);
        let b = srgb_channel_to_linear(c.b);
        Xyz { x: 0.4124 * r + 0.3576 * g + 0.1805 * b,
              y: 0.2126 * r + 0.7152 * g + 0.0722 * b,
              z: 0.0193 * r + 0.1192 * g + 0.9505 * b }
    }
}

/// The type for colors in the CIE L\*a\*b\* color space with a D65
/// reference white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// The lightness in the range 0. to 100.
    pub l: f64,
    /// Green–red axis, roughly -128. to 128. for in-gamut colors.
    pub a: f64,
    /// Blue–yellow axis, roughly -128. to 128. for in-gamut colors.
    pub b: f64,
}

impl Lab {
    pub fn from_xyz(c: Xyz) -> Lab {
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let f = |t: f64| if t > EPS { t.cbrt() } else { C1 * t + C2 };
        let fx = f(c.x / D65.x);
        let fy = f(c.y / D65.y);
        let fz = f(c.z / D65.z);
        Lab { l: 116. * fy - 16.,
              a: 500. * (fx - fy),
              b: 200. * (fy - fz) }
    }

    #[inline]
    pub fn from_rgb(c: RGB8) -> Lab {
        Lab::from_xyz(Xyz::from_rgb(c))
    }

    pub fn from_hex(s: &str) -> Result<Lab, InvalidColorFormat> {
        Ok(Lab::from_rgb(parse_hex(s)?))
    }

    /// CIE76 color difference: the Euclidean distance to `other`.
    ///
    /// By construction of the L axis, black against white comes out
    /// at ΔE ≈ 100.
    pub fn delta_e(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

/// Similarity of two colors as an integer percentage.
///
/// The CIE76 ΔE between the two Lab coordinates is mapped through
/// `clamp(100 − ΔE, 0, 100)` and rounded, so a perfect match scores
/// 100 and any ΔE of 100 or more scores 0.
pub fn score(target: RGB8, guess: RGB8) -> u8 {
    let de = Lab::from_rgb(target).delta_e(Lab::from_rgb(guess));
    (100. - de).clamp(0., 100.).round() as u8
}

/// Score a submitted guess against the round's target.
///
/// Both arguments are `"#rrggbb"` strings (the `#` optional). A
/// malformed color on either side is the caller's error to reject
/// (typically as an HTTP 400); it is never scored against a default.
pub fn score_guess(target_hex: &str, user_hex: &str) -> Result<u8, InvalidColorFormat> {
    Ok(score(parse_hex(target_hex)?, parse_hex(user_hex)?))
}

/// Convert HSL to RGB via the `k(n) = (n + h/30) mod 12` chroma
/// formula.
///
/// `h` is the hue in degrees; `s` and `l` are fractions in \[0., 1.\].
/// This is the formula the daily generator runs, so its rounding is
/// part of the determinism contract.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RGB8 {
    let a = s * l.min(1. - l);
    let f = |n: f64| {
        let k = (n + h / 30.) % 12.;
        let v = l - a * (k - 3.).min((9. - k).min(1.)).max(-1.);
        (255. * v).round() as u8
    };
    RGB8 { r: f(0.), g: f(8.), b: f(4.) }
}

/// Convert HSV to RGB via the sector formula.
///
/// `h` is the hue in degrees in \[0., 360.); `s` and `v` are fractions
/// in \[0., 1.\]. This is the space the color picker works in.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> RGB8 {
    let c = v * s;
    let x = c * (1. - ((h / 60.) % 2. - 1.).abs());
    let m = v - c;
    let (r, g, b) = {
        if h < 60. { (c, x, 0.) }
        else if h < 120. { (x, c, 0.) }
        else if h < 180. { (0., c, x) }
        else if h < 240. { (0., x, c) }
        else if h < 300. { (x, 0., c) }
        else { (c, 0., x) } };
    let to = |ch: f64| ((ch + m) * 255.).round() as u8;
    RGB8 { r: to(r), g: to(g), b: to(b) }
}

/// Presentation band for a finished round's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// 95 and up.
    Perfect,
    /// 85 to 94.
    Amazing,
    /// 70 to 84.
    Great,
    /// 50 to 69.
    Good,
    /// Everything below 50.
    NotBad,
}

impl Rating {
    pub fn of(score: u8) -> Rating {
        if score >= 95 { Rating::Perfect }
        else if score >= 85 { Rating::Amazing }
        else if score >= 70 { Rating::Great }
        else if score >= 50 { Rating::Good }
        else { Rating::NotBad }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rating::Perfect => "PERFECT MATCH!",
            Rating::Amazing => "Amazing!",
            Rating::Great => "Great job!",
            Rating::Good => "Good try!",
            Rating::NotBad => "Not bad!",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Rating::Perfect => "🔥",
            Rating::Amazing => "🌟",
            Rating::Great => "👏",
            Rating::Good => "👍",
            Rating::NotBad => "🎯",
        }
    }
}

/// The share line for a finished round. Building share *URLs* out of
/// it is the caller's business.
pub fn share_message(score: u8) -> String {
    let rating = Rating::of(score);
    format!("{} {} I scored {score}% accuracy on ColorMash! 🎨 \
             Can you beat my color matching skills?",
            rating.emoji(), rating.message())
}
