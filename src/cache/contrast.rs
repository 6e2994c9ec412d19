// SPDX-License-Identifier: PMPL-1.0-or-later
//! Effective text colors and contrast ratios.
//!
//! A transparent background shows the nearest ancestor background (white at
//! the root). Semi-transparent colors are composited over what is behind
//! them and opacity multiplies down the tree.

use crate::color::{contrast_ratio, Color};
use crate::config::ContrastConfig;
use crate::dom::ComputedStyle;

/// Background state carried down the traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorContext {
    /// Opaque effective background
    pub background: Color,
    pub has_background_image: bool,
    pub opacity: f64,
}

impl Default for ColorContext {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            has_background_image: false,
            opacity: 1.0,
        }
    }
}

impl ColorContext {
    /// Context inside an element with `style`
    pub fn enter(&self, style: &ComputedStyle) -> ColorContext {
        let background = if style.background_color.is_transparent() {
            self.background
        } else {
            style.background_color.over(self.background)
        };
        ColorContext {
            background,
            has_background_image: self.has_background_image || style.background_image,
            opacity: self.opacity * style.opacity,
        }
    }
}

/// Resolved colors of one text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub foreground: Color,
    pub background: Color,
    pub contrast_ratio: f64,
    pub is_large_font: bool,
}

/// Resolve the text colors for text directly inside an element. `ctx` must
/// already include the element's own background.
pub fn text_colors(ctx: &ColorContext, style: &ComputedStyle, thresholds: &ContrastConfig) -> TextColors {
    let foreground = style
        .color
        .with_alpha(style.color.alpha * ctx.opacity)
        .over(ctx.background);
    TextColors {
        foreground,
        background: ctx.background,
        contrast_ratio: contrast_ratio(foreground, ctx.background),
        is_large_font: thresholds.is_large_font(style.font_size, style.font_weight),
    }
}
