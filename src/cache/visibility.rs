// SPDX-License-Identifier: PMPL-1.0-or-later
//! Visibility to assistive technology and on screen.
//!
//! The two flags are computed independently:
//! - `hidden`, `display:none` and `visibility:hidden|collapse` remove an
//!   element from both (`area` is exempt, its box is never rendered)
//! - `aria-hidden="true"` on the element or an ancestor removes it from AT only
//! - zero-area geometry removes it from both
//! - clipping to a 1px box or a font size of 1px or less removes it from the
//!   screen only, so visually hidden text stays available to AT
//! - an element without computed style is hidden from both

use crate::dom::{Display, ElementData, Visibility};

/// State passed from an element to its children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InheritedVisibility {
    pub display_none: bool,
    pub aria_hidden: bool,
    pub off_screen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityInfo {
    pub is_visible_to_at: bool,
    pub is_visible_on_screen: bool,
}

impl VisibilityInfo {
    pub const HIDDEN: VisibilityInfo = VisibilityInfo {
        is_visible_to_at: false,
        is_visible_on_screen: false,
    };
}

/// Compute the visibility of one element and the state its children inherit
pub fn compute(element: &ElementData, inherited: InheritedVisibility) -> (VisibilityInfo, InheritedVisibility) {
    let aria_hidden = inherited.aria_hidden
        || element
            .attr("aria-hidden")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

    let Some(style) = element.style.as_ref() else {
        let children = InheritedVisibility { display_none: true, aria_hidden, ..inherited };
        return (VisibilityInfo::HIDDEN, children);
    };

    let exempt = element.tag == "area";
    let display_none = inherited.display_none
        || (!exempt && (style.display == Display::None || element.has_attr("hidden")));
    let visibility_hidden = !exempt && style.visibility != Visibility::Visible;

    let zero_area = element.geometry.map(|g| g.is_zero_area()).unwrap_or(false);
    let clipped = element
        .geometry
        .map(|g| (g.width <= 1.0 || g.height <= 1.0) && style.overflow_hidden)
        .unwrap_or(false);
    let tiny_font = style.font_size <= 1.0;
    let off_screen = inherited.off_screen || clipped;

    let rendered = !display_none && !visibility_hidden && !zero_area;
    let info = VisibilityInfo {
        is_visible_to_at: rendered && !aria_hidden,
        is_visible_on_screen: rendered && !off_screen && !tiny_font,
    };

    let children = InheritedVisibility { display_none, aria_hidden, off_screen };
    (info, children)
}
