// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ybot - accessibility evaluation of rendered documents
//!
//! A document is annotated once into a [`cache::SemanticCache`] (resolved
//! ARIA roles, accessible names, visibility to assistive technology,
//! landmark and heading structure, text contrast). Independent rules then
//! classify the cached content, and their node results are aggregated into
//! rule, group and whole-document results.
//!
//! ## Rule groups
//!
//! - **Images** (1.1.1): accessible names, generic and file-name names, length
//! - **Color** (1.4.1/1.4.3): text contrast, use of color
//! - **Landmarks** (1.3.1/2.4.1): main, navigation, content containment, labels
//! - **Headings** (1.3.1/2.4.6): h1 presence and placement, nesting, content
//! - **Controls** (3.3.2/4.1.2): labels, image inputs, buttons, unique ids
//! - **Links** (2.4.4): names, same name with different targets
//! - **Widgets** (4.1.2): names, roles, ARIA attribute validity
//! - **Tables** (1.3.1): data table names
//! - **Page** (2.4.2/3.1.1): title and language
//!
//! ## Entry points
//!
//! [`evaluator::evaluate`] evaluates a [`dom::Document`]; [`dom::html::parse_html`]
//! builds one from markup. [`scanner`] and [`report`] cover files, directories
//! and text/JSON/SARIF output.

pub mod aria;
pub mod cache;
pub mod color;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod results;
pub mod rules;
pub mod scanner;
pub mod wcag;
