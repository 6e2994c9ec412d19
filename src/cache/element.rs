// SPDX-License-Identifier: PMPL-1.0-or-later
//! Element and text run descriptors.

use crate::aria::attributes::AriaAttribute;
use crate::aria::RoleStatus;
use crate::color::Color;
use crate::dom::NodeId;
use serde::Serialize;

/// Handle of an [`ElementDescriptor`] in the cache arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementId(pub usize);

/// Handle of a [`TextRunDescriptor`] in the cache arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TextRunId(pub usize);

/// Where an accessible name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NameSource {
    None,
    AriaLabelledby,
    AriaLabel,
    NativeMarkup,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibleName {
    pub name: String,
    pub source: NameSource,
}

impl AccessibleName {
    pub fn none() -> Self {
        Self { name: String::new(), source: NameSource::None }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ElementDescriptor {
    pub id: ElementId,
    pub node: NodeId,
    /// 1-based position in traversal order
    pub ordinal_position: usize,
    pub tag_name: String,
    pub html_id: Option<String>,
    /// Lowercased `type` attribute
    pub type_attr: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub explicit_role: Option<String>,
    /// Never empty
    pub resolved_role: &'static str,
    pub default_role: &'static str,
    pub role_status: RoleStatus,
    pub accessible_name: AccessibleName,
    pub accessible_description: String,
    pub is_visible_to_at: bool,
    pub is_visible_on_screen: bool,
    pub aria_attributes: Vec<AriaAttribute>,
    pub parent: Option<ElementId>,
    pub parent_landmark: Option<ElementId>,
    /// Level of the nearest preceding heading visible to AT
    pub parent_heading_level: Option<u8>,
    pub heading_level: Option<u8>,
    pub is_landmark: bool,
    /// Has a non-whitespace text node as a direct child
    pub has_own_text: bool,
    /// Any descendant text
    pub has_text_content: bool,
    /// Any descendant img, svg or role=img element
    pub has_image_content: bool,
    pub text_runs: Vec<TextRunId>,
}

impl ElementDescriptor {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    pub fn has_explicit_role(&self) -> bool {
        self.explicit_role.is_some()
    }

    pub fn name(&self) -> &str {
        &self.accessible_name.name
    }

    pub fn has_name(&self) -> bool {
        !self.accessible_name.is_empty()
    }

    /// Short label for reports: `tag#id`, `tag[type=x]` or `tag[role=x]`
    pub fn identifier(&self) -> String {
        if let Some(id) = &self.html_id {
            format!("{}#{}", self.tag_name, id)
        } else if let Some(t) = &self.type_attr {
            format!("{}[type={}]", self.tag_name, t)
        } else if let Some(r) = &self.explicit_role {
            format!("{}[role={}]", self.tag_name, r)
        } else {
            self.tag_name.clone()
        }
    }
}

/// A run of visible text with its resolved colors
#[derive(Debug, Clone)]
pub struct TextRunDescriptor {
    pub id: TextRunId,
    /// Element the text belongs to
    pub parent: ElementId,
    pub text: String,
    pub foreground: Color,
    pub background: Color,
    pub contrast_ratio: f64,
    pub font_size: f64,
    pub font_weight: u16,
    pub is_large_font: bool,
    pub has_background_image: bool,
}
