// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table rules - WCAG 1.3.1 Info and Relationships
//!
//! Tables with header cells or a caption are treated as data tables. Their
//! data cells need headers and the tables need an accessible name. Layout
//! tables are not checked.

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::{ElementDescriptor, ElementId, SemanticCache, TableCellEntry};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;
use std::collections::HashSet;

pub static TABLE_1: RuleInfo = RuleInfo {
    id: "TABLE_1",
    summary: "Data cells in data tables must have headers",
    scope: RuleScope::Element,
    category: RuleCategory::Tables,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "1.3.1",
    wcag_related: &["2.4.6"],
    target_resources: &["td"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_PASS_2", 3),
        msg("ELEMENT_PASS_3", 2),
        msg("ELEMENT_PASS_4", 3),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_MC_1", 1),
        msg("ELEMENT_MC_2", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static TABLE_2: RuleInfo = RuleInfo {
    id: "TABLE_2",
    summary: "Data tables should have an accessible name",
    scope: RuleScope::Element,
    category: RuleCategory::Tables,
    tier: RuleTier::More,
    required: false,
    wcag_primary: "1.3.1",
    wcag_related: &["2.4.6"],
    target_resources: &["table", "caption", "[role=\"table\"]", "[role=\"grid\"]"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub struct DataTablesHaveNames;

impl RuleCheck for DataTablesHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let data_tables = cache
            .tables()
            .iter()
            .filter(|t| t.is_data_table())
            .filter_map(|t| cache.element(t.element));
        for el in data_tables {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[])?;
            } else if el.has_name() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[el.name()])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[])?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderSource {
    /// `th` cells in the same row or column
    RowColumn,
    /// The cell's `headers` id list
    HeadersAttribute,
}

/// Names of the headers that apply to a data cell
fn cell_headers<'c>(
    cache: &'c SemanticCache,
    cell: &TableCellEntry,
    element: &ElementDescriptor,
) -> (Vec<&'c str>, HeaderSource) {
    let same_table = cache.table_cells().iter().filter(|c| c.table == cell.table);
    let visible_name = move |c: &TableCellEntry| {
        cache
            .element(c.element)
            .filter(|e| e.is_visible_to_at && e.has_name())
            .map(|e| e.name())
    };

    let ids: Vec<&str> = element.attr("headers").map(|h| h.split_whitespace().collect()).unwrap_or_default();
    if !ids.is_empty() {
        let names = same_table
            .filter(|c| {
                cache
                    .element(c.element)
                    .and_then(|e| e.html_id.as_deref())
                    .map(|id| ids.contains(&id))
                    .unwrap_or(false)
            })
            .filter_map(visible_name)
            .collect();
        return (names, HeaderSource::HeadersAttribute);
    }

    let names = same_table
        .filter(|c| c.is_header)
        .filter(|c| (c.row == cell.row && c.column < cell.column) || (c.column == cell.column && c.row < cell.row))
        .filter_map(visible_name)
        .collect();
    (names, HeaderSource::RowColumn)
}

pub struct DataCellsHaveHeaders;

impl RuleCheck for DataCellsHaveHeaders {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let data_tables: HashSet<ElementId> = cache
            .tables()
            .iter()
            .filter(|t| t.is_data_table())
            .map(|t| t.element)
            .collect();

        for cell in cache.table_cells().iter().filter(|c| data_tables.contains(&c.table)) {
            let Some(el) = cache.element(cell.element) else { continue };
            let tag = el.tag_name.as_str();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
                continue;
            }
            if cell.is_header {
                if !el.has_name() {
                    sink.element(Classification::ManualCheck, el, "ELEMENT_MC_2", &[tag])?;
                }
                continue;
            }
            if !el.has_name() {
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_1", &[tag])?;
                continue;
            }

            let (headers, source) = cell_headers(cache, cell, el);
            let joined = headers.join(" | ");
            let count = headers.len().to_string();
            match (headers.len(), source) {
                (0, _) => sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[tag])?,
                (1, HeaderSource::RowColumn) => {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[tag, joined.as_str()])?
                }
                (_, HeaderSource::RowColumn) => {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_2", &[tag, count.as_str(), joined.as_str()])?
                }
                (1, HeaderSource::HeadersAttribute) => {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_3", &[tag, joined.as_str()])?
                }
                (_, HeaderSource::HeadersAttribute) => {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_4", &[tag, count.as_str(), joined.as_str()])?
                }
            }
        }
        Ok(())
    }
}
