// SPDX-License-Identifier: PMPL-1.0-or-later
//! CSS color values and WCAG contrast math.
//!
//! Colors are parsed from the subset of CSS color syntax that shows up in
//! inline styles and author style sheets: hex, `rgb()`/`rgba()` and
//! `hsl()`/`hsla()` in both the comma and the space/slash forms, named
//! colors and `transparent`. Contrast uses the WCAG relative luminance
//! algorithm:
//! - ratio = (L1 + 0.05) / (L2 + 0.05), L1 the lighter luminance
//! - 1.0 for identical colors, 21.0 for black on white

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(rgba?|hsla?)\(([^()]*)\)$").expect("valid regex"));

/// An sRGB color with straight (non-premultiplied) alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, alpha: 0.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha: alpha.clamp(0.0, 1.0), ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Composite this color over an opaque backdrop
    pub fn over(self, backdrop: Color) -> Color {
        if self.is_opaque() {
            return self;
        }
        let a = self.alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (top as f64 * a + bottom as f64 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }

    pub fn luminance(&self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a CSS hex color (#rgb, #rgba, #rrggbb, #rrggbbaa)
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color::rgb(short(0)?, short(1)?, short(2)?).with_alpha(short(3)? as f64 / 255.0)),
        6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Some(Color::rgb(long(0)?, long(2)?, long(4)?).with_alpha(long(6)? as f64 / 255.0)),
        _ => None,
    }
}

/// Parse an rgb() or rgba() color, keeping the alpha channel
pub fn parse_rgb_color(value: &str) -> Option<Color> {
    let (name, args) = function_args(value)?;
    if !name.starts_with("rgb") {
        return None;
    }
    let channel = |arg: &str| -> Option<u8> {
        let v = match arg.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? * 2.55,
            None => arg.parse::<f64>().ok()?,
        };
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let color = Color::rgb(channel(args[0])?, channel(args[1])?, channel(args[2])?);
    with_optional_alpha(color, args.get(3).copied())
}

/// Parse an hsl() or hsla() color
pub fn parse_hsl_color(value: &str) -> Option<Color> {
    let (name, args) = function_args(value)?;
    if !name.starts_with("hsl") {
        return None;
    }
    let hue = parse_hue(args[0])?;
    let fraction = |arg: &str| -> Option<f64> {
        let v = arg.strip_suffix('%').unwrap_or(arg).parse::<f64>().ok()?;
        Some((v / 100.0).clamp(0.0, 1.0))
    };
    let (r, g, b) = hsl_to_rgb(hue, fraction(args[1])?, fraction(args[2])?);
    with_optional_alpha(Color::rgb(r, g, b), args.get(3).copied())
}

/// Function name and its three or four arguments. `none` reads as zero.
fn function_args(value: &str) -> Option<(&str, Vec<&str>)> {
    let caps = FUNCTION_RE.captures(value.trim())?;
    let name = caps.get(1)?.as_str();
    let args: Vec<&str> = caps
        .get(2)?
        .as_str()
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|arg| !arg.is_empty())
        .map(|arg| if arg == "none" { "0" } else { arg })
        .collect();
    matches!(args.len(), 3 | 4).then_some((name, args))
}

fn with_optional_alpha(color: Color, alpha: Option<&str>) -> Option<Color> {
    let Some(raw) = alpha else {
        return Some(color);
    };
    let alpha = match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => raw.parse::<f64>().ok()?,
    };
    Some(color.with_alpha(alpha))
}

/// Hue in degrees, normalized to `0.0..360.0`
fn parse_hue(raw: &str) -> Option<f64> {
    let degrees = if let Some(v) = raw.strip_suffix("deg") {
        v.parse::<f64>().ok()?
    } else if let Some(v) = raw.strip_suffix("grad") {
        v.parse::<f64>().ok()? * 0.9
    } else if let Some(v) = raw.strip_suffix("rad") {
        v.parse::<f64>().ok()?.to_degrees()
    } else if let Some(v) = raw.strip_suffix("turn") {
        v.parse::<f64>().ok()? * 360.0
    } else {
        raw.parse::<f64>().ok()?
    };
    Some(degrees.rem_euclid(360.0))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

/// Parse any supported CSS color value
pub fn parse_color(value: &str) -> Option<Color> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.starts_with('#') {
        parse_hex_color(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else if trimmed.starts_with("hsl") {
        parse_hsl_color(&trimmed)
    } else if trimmed == "transparent" {
        Some(Color::TRANSPARENT)
    } else {
        parse_named_color(&trimmed)
    }
}

/// Parse a named CSS color
pub fn parse_named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "dimgray" | "dimgrey" => (105, 105, 105),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "darkblue" => (0, 0, 139),
        "darkred" => (139, 0, 0),
        "darkgreen" => (0, 100, 0),
        "whitesmoke" => (245, 245, 245),
        "gainsboro" => (220, 220, 220),
        _ => return None,
    };
    Some(Color::rgb(r, g, b))
}

/// Calculate relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let srgb = [r, g, b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
}

/// Calculate contrast ratio between two opaque colors
/// Returns a ratio in `1.0..=21.0`
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let l1 = fg.luminance();
    let l2 = bg.luminance();
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_hex_color("#000"), Some(Color::BLACK));
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#ggg"), None);
        assert_eq!(parse_hex_color("#ff00ff00").map(|c| c.alpha), Some(0.0));
    }

    #[test]
    fn test_parse_rgb_color() {
        assert_eq!(parse_rgb_color("rgb(255, 0, 0)"), Some(Color::rgb(255, 0, 0)));
        let half = parse_rgb_color("rgba(0, 128, 0, 0.5)").expect("rgba");
        assert_eq!((half.r, half.g, half.b), (0, 128, 0));
        assert!((half.alpha - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_space_separated_rgb() {
        let c = parse_color("rgb(0 0 0 / 50%)").expect("space syntax");
        assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        assert!((c.alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(parse_color("rgb(100% 50% 0%)"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(parse_color("rgba(10, 20, 30)"), Some(Color::rgb(10, 20, 30)));
        assert_eq!(parse_color("rgb(1 2)"), None);
    }

    #[test]
    fn test_parse_hsl_color() {
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("hsl(120deg 100% 25%)"), Some(Color::rgb(0, 128, 0)));
        assert_eq!(parse_color("hsl(0.5turn 0% 100%)"), Some(Color::WHITE));
        assert_eq!(parse_color("HSL(240, 100%, 50%)"), Some(Color::rgb(0, 0, 255)));
        let faded = parse_color("hsla(0 0% 0% / 0.25)").expect("hsla");
        assert!((faded.alpha - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_color_keywords() {
        assert_eq!(parse_color(" White "), Some(Color::WHITE));
        assert!(parse_color("transparent").map(|c| c.is_transparent()).unwrap_or(false));
        assert_eq!(parse_color("currentcolor"), None);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.01, "Black on white should be 21:1, got {:.2}", ratio);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let gray = Color::rgb(128, 128, 128);
        let ratio = contrast_ratio(gray, gray);
        assert!((ratio - 1.0).abs() < 0.01, "Same color should be 1:1, got {:.2}", ratio);
    }

    #[test]
    fn test_contrast_ratio_is_symmetric() {
        let a = Color::rgb(89, 89, 89);
        assert!((contrast_ratio(a, Color::WHITE) - contrast_ratio(Color::WHITE, a)).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_compositing() {
        let half_black = Color::BLACK.with_alpha(0.5);
        assert_eq!(half_black.over(Color::WHITE), Color::rgb(128, 128, 128));
        assert_eq!(Color::TRANSPARENT.over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn test_relative_luminance() {
        let white = relative_luminance(255, 255, 255);
        let black = relative_luminance(0, 0, 0);
        assert!((white - 1.0).abs() < 0.01);
        assert!(black.abs() < 0.01);
    }
}
