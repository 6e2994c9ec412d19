// SPDX-License-Identifier: PMPL-1.0-or-later
//! Landmark, heading, list and table structure.

use super::element::ElementId;

#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkEntry {
    pub element: ElementId,
    pub role: &'static str,
    /// Normalized accessible name
    pub label: String,
    pub parent_landmark: Option<ElementId>,
    pub child_headings: Vec<ElementId>,
    pub is_visible_to_at: bool,
    /// Another visible landmark shares this role and label
    pub is_duplicate_label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingEntry {
    pub element: ElementId,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry {
    pub element: ElementId,
    pub item_count: usize,
    /// Links anywhere inside the list, nested lists included
    pub link_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub element: ElementId,
    pub row_count: usize,
    pub header_cell_count: usize,
    pub has_caption: bool,
}

/// A `th` or `td` placed on its table's row/column grid. Columns follow
/// `colspan`; `rowspan` is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCellEntry {
    pub element: ElementId,
    /// The `table` element the cell belongs to
    pub table: ElementId,
    pub row: usize,
    pub column: usize,
    pub is_header: bool,
}

impl TableEntry {
    /// Tables with header cells or a caption carry data rather than layout
    pub fn is_data_table(&self) -> bool {
        self.header_cell_count > 0 || self.has_caption
    }
}

/// Flag visible landmarks whose (role, label) pair is not unique.
///
/// Candidates are stable-sorted by (label, role) so equal pairs end up next
/// to each other; equal neighbours are flagged. Ties keep document order.
pub fn flag_duplicate_labels(landmarks: &mut [LandmarkEntry]) {
    let mut order: Vec<usize> = (0..landmarks.len())
        .filter(|i| landmarks[*i].is_visible_to_at)
        .collect();
    order.sort_by(|a, b| {
        let (la, lb) = (&landmarks[*a], &landmarks[*b]);
        la.label
            .to_lowercase()
            .cmp(&lb.label.to_lowercase())
            .then_with(|| la.role.cmp(lb.role))
    });

    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let same = landmarks[a].role == landmarks[b].role
            && landmarks[a].label.to_lowercase() == landmarks[b].label.to_lowercase();
        if same {
            landmarks[a].is_duplicate_label = true;
            landmarks[b].is_duplicate_label = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark(n: usize, role: &'static str, label: &str) -> LandmarkEntry {
        LandmarkEntry {
            element: ElementId(n),
            role,
            label: label.to_string(),
            parent_landmark: None,
            child_headings: Vec::new(),
            is_visible_to_at: true,
            is_duplicate_label: false,
        }
    }

    #[test]
    fn test_identical_navigation_labels_flagged() {
        let mut marks = vec![
            landmark(0, "navigation", "Main menu"),
            landmark(1, "main", ""),
            landmark(2, "navigation", "main menu"),
        ];
        flag_duplicate_labels(&mut marks);
        assert!(marks[0].is_duplicate_label);
        assert!(!marks[1].is_duplicate_label);
        assert!(marks[2].is_duplicate_label);
    }

    #[test]
    fn test_different_labels_or_roles_not_flagged() {
        let mut marks = vec![
            landmark(0, "navigation", "Primary"),
            landmark(1, "navigation", "Footer"),
            landmark(2, "region", "Primary"),
        ];
        flag_duplicate_labels(&mut marks);
        assert!(marks.iter().all(|m| !m.is_duplicate_label));
    }

    #[test]
    fn test_hidden_landmarks_ignored() {
        let mut marks = vec![landmark(0, "navigation", ""), landmark(1, "navigation", "")];
        marks[1].is_visible_to_at = false;
        flag_duplicate_labels(&mut marks);
        assert!(!marks[0].is_duplicate_label);
    }

    #[test]
    fn test_unlabelled_duplicates_flagged() {
        let mut marks = vec![landmark(0, "navigation", ""), landmark(1, "navigation", "")];
        flag_duplicate_labels(&mut marks);
        assert!(marks[0].is_duplicate_label && marks[1].is_duplicate_label);
    }

    #[test]
    fn test_data_table_detection() {
        let layout = TableEntry { element: ElementId(0), row_count: 2, header_cell_count: 0, has_caption: false };
        assert!(!layout.is_data_table());
        let data = TableEntry { header_cell_count: 3, ..layout };
        assert!(data.is_data_table());
    }
}
