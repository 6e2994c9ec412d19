// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic DOM cache.
//!
//! One traversal of a [`Document`] produces an immutable snapshot: an arena
//! of [`ElementDescriptor`]s in document order, the visible
//! [`TextRunDescriptor`]s with their contrast data, and the category indexes
//! rules use to find their targets (landmarks, headings, images, links,
//! controls, widgets, lists, tables and their cells). Nothing in the cache is mutated after
//! [`SemanticCache::build`] returns.
//!
//! Bad input degrades individual descriptors (hidden, unnamed, generic)
//! instead of failing the pass.

pub mod accname;
pub mod contrast;
pub mod element;
pub mod structure;
pub mod visibility;

pub use element::{AccessibleName, ElementDescriptor, ElementId, NameSource, TextRunDescriptor, TextRunId};
pub use structure::{HeadingEntry, LandmarkEntry, ListEntry, TableCellEntry, TableEntry};

use crate::aria::attributes::AriaAttribute;
use crate::aria::{self, lookup_role, resolve_role, RoleQuery, RoleStatus};
use crate::config::ContrastConfig;
use crate::dom::{ComputedStyle, Document, ElementData, NodeId, NodeKind};
use accname::{normalize, NameContext};
use contrast::{text_colors, ColorContext};
use tracing::debug;
use visibility::{InheritedVisibility, VisibilityInfo};

/// Elements that get no descriptor; their subtrees are ignored
const SKIPPED_ELEMENTS: &[&str] = &[
    "base", "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

const CONTROL_ELEMENTS: &[&str] = &["button", "input", "meter", "output", "progress", "select", "textarea"];

const SECTIONING_ELEMENTS: &[&str] = &["article", "aside", "main", "nav", "section"];

/// A named, ordered group of element handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    name: &'static str,
    members: Vec<ElementId>,
}

impl CategoryIndex {
    fn new(name: &'static str) -> Self {
        Self { name, members: Vec::new() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Document-level facts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    /// `lang` of the root element
    pub language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SemanticCache {
    page: PageInfo,
    elements: Vec<ElementDescriptor>,
    text_runs: Vec<TextRunDescriptor>,
    landmarks: Vec<LandmarkEntry>,
    headings: Vec<HeadingEntry>,
    lists: Vec<ListEntry>,
    tables: Vec<TableEntry>,
    table_cells: Vec<TableCellEntry>,
    images: CategoryIndex,
    links: CategoryIndex,
    controls: CategoryIndex,
    widgets: CategoryIndex,
}

impl SemanticCache {
    /// Build the cache in a single traversal of `doc`
    pub fn build(doc: &Document, title: &str, url: &str, thresholds: &ContrastConfig) -> Self {
        let language = doc
            .attr(doc.root(), "lang")
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        let cache = SemanticCache {
            page: PageInfo { title: normalize(title), url: url.to_string(), language },
            elements: Vec::new(),
            text_runs: Vec::new(),
            landmarks: Vec::new(),
            headings: Vec::new(),
            lists: Vec::new(),
            tables: Vec::new(),
            table_cells: Vec::new(),
            images: CategoryIndex::new("images"),
            links: CategoryIndex::new("links"),
            controls: CategoryIndex::new("controls"),
            widgets: CategoryIndex::new("widgets"),
        };

        let mut builder = CacheBuilder {
            doc,
            names: NameContext::new(doc),
            thresholds,
            cache,
            open_lists: Vec::new(),
            open_tables: Vec::new(),
            last_heading_level: None,
        };

        let mut state = TraversalState::default();
        let start = doc.body().unwrap_or(doc.root());
        if start != doc.root() {
            if let Some(root) = doc.element(doc.root()) {
                let (_, inherited) = visibility::compute(root, state.visibility);
                state.visibility = inherited;
                if let Some(style) = root.style.as_ref() {
                    state.colors = state.colors.enter(style);
                }
            }
        }
        builder.walk(start, &state);

        let mut cache = builder.cache;
        structure::flag_duplicate_labels(&mut cache.landmarks);

        debug!(
            "Semantic cache: {} elements, {} text runs, {} landmarks, {} headings",
            cache.elements.len(),
            cache.text_runs.len(),
            cache.landmarks.len(),
            cache.headings.len()
        );

        cache
    }

    pub fn page(&self) -> &PageInfo {
        &self.page
    }

    pub fn elements(&self) -> &[ElementDescriptor] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementDescriptor> {
        self.elements.get(id.0)
    }

    pub fn text_runs(&self) -> &[TextRunDescriptor] {
        &self.text_runs
    }

    pub fn text_run(&self, id: TextRunId) -> Option<&TextRunDescriptor> {
        self.text_runs.get(id.0)
    }

    pub fn landmarks(&self) -> &[LandmarkEntry] {
        &self.landmarks
    }

    pub fn landmark(&self, element: ElementId) -> Option<&LandmarkEntry> {
        self.landmarks.iter().find(|l| l.element == element)
    }

    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    pub fn lists(&self) -> &[ListEntry] {
        &self.lists
    }

    pub fn tables(&self) -> &[TableEntry] {
        &self.tables
    }

    /// Cells of every table, in document order
    pub fn table_cells(&self) -> &[TableCellEntry] {
        &self.table_cells
    }

    pub fn images(&self) -> &CategoryIndex {
        &self.images
    }

    pub fn links(&self) -> &CategoryIndex {
        &self.links
    }

    pub fn controls(&self) -> &CategoryIndex {
        &self.controls
    }

    pub fn widgets(&self) -> &CategoryIndex {
        &self.widgets
    }

    /// Descriptors of a category index, in document order
    pub fn members<'a>(&'a self, index: &'a CategoryIndex) -> impl Iterator<Item = &'a ElementDescriptor> + 'a {
        index.iter().filter_map(move |id| self.element(id))
    }

    /// Role of the landmark an element sits in
    pub fn parent_landmark_role(&self, element: &ElementDescriptor) -> Option<&'static str> {
        element
            .parent_landmark
            .and_then(|id| self.element(id))
            .map(|lm| lm.resolved_role)
    }
}

#[derive(Debug, Clone, Default)]
struct TraversalState {
    parent: Option<ElementId>,
    landmark: Option<ElementId>,
    visibility: InheritedVisibility,
    colors: ColorContext,
    in_sectioning: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct ContentFlags {
    text: bool,
    image: bool,
}

struct CacheBuilder<'d> {
    doc: &'d Document,
    names: NameContext<'d>,
    thresholds: &'d ContrastConfig,
    cache: SemanticCache,
    open_lists: Vec<usize>,
    open_tables: Vec<OpenTable>,
    last_heading_level: Option<u8>,
}

/// Innermost-last stack entry for a table being walked
struct OpenTable {
    index: usize,
    next_column: usize,
}

/// One open element of the traversal
struct Frame {
    id: ElementId,
    node: NodeId,
    child_state: TraversalState,
    vis: VisibilityInfo,
    next_child: usize,
    pending: String,
    own_text: bool,
    flags: ContentFlags,
    opened_list: bool,
    opened_table: bool,
    is_image: bool,
}

impl CacheBuilder<'_> {
    /// Depth-first walk from `start` with an explicit stack of open elements
    fn walk(&mut self, start: NodeId, state: &TraversalState) {
        let doc = self.doc;
        let mut stack: Vec<Frame> = self.enter_element(start, state).into_iter().collect();

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = doc.children(frame.node).get(frame.next_child) else {
                let Some(frame) = stack.pop() else { break };
                let flags = self.leave_element(frame);
                if let Some(parent) = stack.last_mut() {
                    parent.flags.text |= flags.text;
                    parent.flags.image |= flags.image;
                }
                continue;
            };
            frame.next_child += 1;

            match doc.node(child).map(|n| &n.kind) {
                Some(NodeKind::Text(text)) => frame.pending.push_str(text),
                Some(NodeKind::Element(_)) => {
                    let style = doc.element(frame.node).and_then(|el| el.style.as_ref());
                    frame.own_text |=
                        self.flush_text(&mut frame.pending, frame.id, style, &frame.child_state, frame.vis);
                    if let Some(entered) = self.enter_element(child, &frame.child_state) {
                        stack.push(entered);
                    }
                }
                None => {}
            }
        }
    }

    /// Describe and index an element; `None` for skipped subtrees
    fn enter_element(&mut self, node: NodeId, state: &TraversalState) -> Option<Frame> {
        let doc = self.doc;
        let el = doc.element(node)?;
        if is_skipped(el) {
            return None;
        }

        let (vis, child_visibility) = visibility::compute(el, state.visibility);
        let tag = el.tag.as_str();
        let type_attr = el.attr("type").map(|t| t.trim().to_ascii_lowercase());

        let query = RoleQuery {
            tag,
            type_attr: type_attr.as_deref(),
            has_href: el.has_attr("href"),
            alt: el.attr("alt"),
            has_author_name: self.names.has_author_name(node),
            has_list: el.has_attr("list"),
            size_or_multiple: el.has_attr("multiple")
                || el
                    .attr("size")
                    .and_then(|s| s.trim().parse::<u32>().ok())
                    .map(|s| s > 1)
                    .unwrap_or(false),
            has_figcaption: doc.children(node).iter().any(|c| doc.tag(*c) == Some("figcaption")),
            in_sectioning_content: state.in_sectioning,
        };
        let info = lookup_role(&query);
        let explicit_role = el
            .attr("role")
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let (resolved_role, role_status) = resolve_role(&info, explicit_role.as_deref());

        let accessible_name = self.names.accessible_name(node, resolved_role);
        let accessible_description = self.names.accessible_description(node, accessible_name.source);
        let aria_attributes = el
            .attributes
            .iter()
            .filter(|(n, _)| n.starts_with("aria-"))
            .map(|(n, v)| AriaAttribute::new(n, v))
            .collect();
        let heading_level = (resolved_role == "heading").then(|| heading_level(el));
        let is_landmark = aria::is_landmark_role(resolved_role, !accessible_name.is_empty());

        let id = ElementId(self.cache.elements.len());
        self.cache.elements.push(ElementDescriptor {
            id,
            node,
            ordinal_position: id.0 + 1,
            tag_name: el.tag.clone(),
            html_id: el.attr("id").map(str::to_string),
            type_attr,
            attributes: el.attributes.clone(),
            explicit_role,
            resolved_role,
            default_role: info.default_role,
            role_status,
            accessible_name,
            accessible_description,
            is_visible_to_at: vis.is_visible_to_at,
            is_visible_on_screen: vis.is_visible_on_screen,
            aria_attributes,
            parent: state.parent,
            parent_landmark: state.landmark,
            parent_heading_level: self.last_heading_level,
            heading_level,
            is_landmark,
            has_own_text: false,
            has_text_content: false,
            has_image_content: false,
            text_runs: Vec::new(),
        });

        self.index_element(id, tag, resolved_role, role_status, state, vis);

        let opened_list = resolved_role == "list";
        if opened_list {
            self.cache.lists.push(ListEntry { element: id, item_count: 0, link_count: 0 });
            self.open_lists.push(self.cache.lists.len() - 1);
        }
        let opened_table = tag == "table";
        if opened_table {
            self.cache.tables.push(TableEntry { element: id, row_count: 0, header_cell_count: 0, has_caption: false });
            self.open_tables.push(OpenTable { index: self.cache.tables.len() - 1, next_column: 0 });
        }

        let child_state = TraversalState {
            parent: Some(id),
            landmark: if is_landmark { Some(id) } else { state.landmark },
            visibility: child_visibility,
            colors: el.style.as_ref().map(|s| state.colors.enter(s)).unwrap_or(state.colors),
            in_sectioning: state.in_sectioning || SECTIONING_ELEMENTS.contains(&tag),
        };

        Some(Frame {
            id,
            node,
            child_state,
            vis,
            next_child: 0,
            pending: String::new(),
            own_text: false,
            flags: ContentFlags::default(),
            opened_list,
            opened_table,
            is_image: matches!(tag, "img" | "svg") || resolved_role == "img",
        })
    }

    /// Flush trailing text, close the element's list/table and record its
    /// content flags; returns what the element contributes to its parent
    fn leave_element(&mut self, mut frame: Frame) -> ContentFlags {
        let style = self.doc.element(frame.node).and_then(|el| el.style.as_ref());
        frame.own_text |= self.flush_text(&mut frame.pending, frame.id, style, &frame.child_state, frame.vis);
        frame.flags.text |= frame.own_text;

        if frame.opened_list {
            self.open_lists.pop();
        }
        if frame.opened_table {
            self.open_tables.pop();
        }

        if let Some(descriptor) = self.cache.elements.get_mut(frame.id.0) {
            descriptor.has_own_text = frame.own_text;
            descriptor.has_text_content = frame.flags.text;
            descriptor.has_image_content = frame.flags.image;
        }

        ContentFlags { text: frame.flags.text, image: frame.flags.image || frame.is_image }
    }

    fn index_element(
        &mut self,
        id: ElementId,
        tag: &str,
        role: &'static str,
        role_status: RoleStatus,
        state: &TraversalState,
        vis: VisibilityInfo,
    ) {
        let cache = &mut self.cache;

        if matches!(tag, "img" | "area") || role == "img" {
            cache.images.members.push(id);
        }
        if role == "link" {
            cache.links.members.push(id);
            for &list in &self.open_lists {
                cache.lists[list].link_count += 1;
            }
        }
        if CONTROL_ELEMENTS.contains(&tag) {
            cache.controls.members.push(id);
        }
        if role_status == RoleStatus::Accepted && aria::is_widget_role(role) {
            cache.widgets.members.push(id);
        }
        if role == "listitem" {
            if let Some(&list) = self.open_lists.last() {
                cache.lists[list].item_count += 1;
            }
        }
        if let Some(open) = self.open_tables.last_mut() {
            let colspan = cache
                .elements
                .get(id.0)
                .and_then(|d| d.attr("colspan"))
                .and_then(|c| c.trim().parse::<usize>().ok())
                .filter(|c| *c > 0)
                .unwrap_or(1);
            let table = &mut cache.tables[open.index];
            match tag {
                "tr" => {
                    table.row_count += 1;
                    open.next_column = 0;
                }
                "th" | "td" => {
                    if tag == "th" {
                        table.header_cell_count += 1;
                    }
                    cache.table_cells.push(TableCellEntry {
                        element: id,
                        table: table.element,
                        row: table.row_count.saturating_sub(1),
                        column: open.next_column,
                        is_header: tag == "th",
                    });
                    open.next_column += colspan;
                }
                "caption" => table.has_caption = true,
                _ => {}
            }
        }

        let Some(descriptor) = cache.elements.get(id.0) else { return };

        if let Some(level) = descriptor.heading_level {
            cache.headings.push(HeadingEntry { element: id, level });
            if let Some(landmark) = state.landmark {
                if let Some(entry) = cache.landmarks.iter_mut().rev().find(|l| l.element == landmark) {
                    entry.child_headings.push(id);
                }
            }
            if vis.is_visible_to_at {
                self.last_heading_level = Some(level);
            }
        }

        if descriptor.is_landmark {
            let label = descriptor.accessible_name.name.clone();
            cache.landmarks.push(LandmarkEntry {
                element: id,
                role,
                label,
                parent_landmark: state.landmark,
                child_headings: Vec::new(),
                is_visible_to_at: vis.is_visible_to_at,
                is_duplicate_label: false,
            });
        }
    }

    /// Turn buffered sibling text into a text run; returns whether the
    /// buffer held any non-whitespace text
    fn flush_text(
        &mut self,
        pending: &mut String,
        owner: ElementId,
        style: Option<&ComputedStyle>,
        state: &TraversalState,
        vis: VisibilityInfo,
    ) -> bool {
        let text = normalize(pending);
        pending.clear();
        if text.is_empty() {
            return false;
        }

        if let (true, Some(style)) = (vis.is_visible_on_screen, style) {
            let colors = text_colors(&state.colors, style, self.thresholds);
            let run_id = TextRunId(self.cache.text_runs.len());
            self.cache.text_runs.push(TextRunDescriptor {
                id: run_id,
                parent: owner,
                text,
                foreground: colors.foreground,
                background: colors.background,
                contrast_ratio: colors.contrast_ratio,
                font_size: style.font_size,
                font_weight: style.font_weight,
                is_large_font: colors.is_large_font,
                has_background_image: state.colors.has_background_image,
            });
            if let Some(descriptor) = self.cache.elements.get_mut(owner.0) {
                descriptor.text_runs.push(run_id);
            }
        }
        true
    }
}

fn is_skipped(el: &ElementData) -> bool {
    SKIPPED_ELEMENTS.contains(&el.tag.as_str())
        || (el.tag == "input"
            && el
                .attr("type")
                .map(|t| t.trim().eq_ignore_ascii_case("hidden"))
                .unwrap_or(false))
}

fn heading_level(el: &ElementData) -> u8 {
    if let Some(level) = el
        .attr("aria-level")
        .and_then(|l| l.trim().parse::<u8>().ok())
        .filter(|l| *l >= 1)
    {
        return level;
    }
    match el.tag.as_str() {
        "h1" => 1,
        "h2" => 2,
        "h3" => 3,
        "h4" => 4,
        "h5" => 5,
        "h6" => 6,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html::parse_html;

    fn build(markup: &str) -> SemanticCache {
        let doc = parse_html(markup);
        SemanticCache::build(&doc, doc.title(), "https://example.com/", &ContrastConfig::default())
    }

    fn by_html_id<'a>(cache: &'a SemanticCache, id: &str) -> &'a ElementDescriptor {
        cache
            .elements()
            .iter()
            .find(|e| e.html_id.as_deref() == Some(id))
            .expect("element with id")
    }

    #[test]
    fn test_ordinals_start_at_body() {
        let cache = build("<html lang=\"en\"><head><title>T</title></head><body><p>a</p></body></html>");
        assert_eq!(cache.elements()[0].tag_name, "body");
        assert_eq!(cache.elements()[0].ordinal_position, 1);
        assert_eq!(cache.elements()[1].ordinal_position, 2);
        assert_eq!(cache.page().language.as_deref(), Some("en"));
        assert_eq!(cache.page().title, "T");
    }

    #[test]
    fn test_skipped_elements_have_no_descriptor() {
        let cache = build(
            r#"<body><script>var x;</script><input type="hidden" name="t"><template><p>x</p></template><p>ok</p></body>"#,
        );
        let tags: Vec<&str> = cache.elements().iter().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["body", "p"]);
    }

    #[test]
    fn test_resolved_role_never_empty_and_fallback() {
        let cache = build(r#"<body><main id="m" role="button">x</main><x-foo id="f">y</x-foo></body>"#);
        let main = by_html_id(&cache, "m");
        assert_eq!(main.resolved_role, "main");
        assert_eq!(main.role_status, RoleStatus::NotAllowed);
        assert_eq!(main.explicit_role.as_deref(), Some("button"));
        assert_eq!(by_html_id(&cache, "f").resolved_role, "generic");
        assert!(cache.elements().iter().all(|e| !e.resolved_role.is_empty()));
    }

    #[test]
    fn test_aria_hidden_visible_on_screen() {
        let cache = build(r#"<body><div id="d" aria-hidden="true"><span id="s">x</span></div></body>"#);
        for id in ["d", "s"] {
            let el = by_html_id(&cache, id);
            assert!(!el.is_visible_to_at, "{} should be hidden from AT", id);
            assert!(el.is_visible_on_screen, "{} should be on screen", id);
        }
    }

    #[test]
    fn test_parent_landmark_links() {
        let cache = build(
            r#"<body><header id="h"><nav id="n" aria-label="Main"><a id="a" href="/">Home</a></nav></header>
               <main id="m"><p id="p">Text</p></main><p id="outside">Loose</p></body>"#,
        );
        let nav = by_html_id(&cache, "n");
        assert_eq!(cache.parent_landmark_role(nav), Some("banner"));
        let link = by_html_id(&cache, "a");
        assert_eq!(link.parent_landmark, Some(nav.id));
        assert_eq!(cache.parent_landmark_role(by_html_id(&cache, "p")), Some("main"));
        assert!(by_html_id(&cache, "outside").parent_landmark.is_none());

        let roles: Vec<&str> = cache.landmarks().iter().map(|l| l.role).collect();
        assert_eq!(roles, vec!["banner", "navigation", "main"]);
        assert_eq!(cache.landmark(nav.id).map(|l| l.parent_landmark), Some(Some(by_html_id(&cache, "h").id)));
    }

    #[test]
    fn test_region_and_form_need_names() {
        let cache = build(
            r#"<body><section id="s1">a</section><section id="s2" aria-label="News">b</section>
               <form id="f1"></form><form id="f2" aria-label="Search site"></form></body>"#,
        );
        assert!(!by_html_id(&cache, "s1").is_landmark);
        assert!(by_html_id(&cache, "s2").is_landmark);
        assert!(!by_html_id(&cache, "f1").is_landmark);
        assert!(by_html_id(&cache, "f2").is_landmark);
    }

    #[test]
    fn test_duplicate_navigation_labels() {
        let cache = build(
            r#"<body><nav aria-label="Site">a</nav><nav aria-label=" Site ">b</nav><nav aria-label="Footer">c</nav></body>"#,
        );
        let flags: Vec<bool> = cache.landmarks().iter().map(|l| l.is_duplicate_label).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_heading_levels_and_parent_heading() {
        let cache = build(
            r#"<body><h1 id="a">A</h1><h3 id="hidden" hidden>H</h3><h2 id="b">B</h2>
               <div id="c" role="heading" aria-level="4">C</div><p id="p">after</p></body>"#,
        );
        assert_eq!(by_html_id(&cache, "a").parent_heading_level, None);
        assert_eq!(by_html_id(&cache, "b").parent_heading_level, Some(1));
        assert_eq!(by_html_id(&cache, "c").heading_level, Some(4));
        assert_eq!(by_html_id(&cache, "p").parent_heading_level, Some(4));
        let levels: Vec<u8> = cache.headings().iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_text_runs_merge_and_contrast() {
        let cache = build(
            r#"<body><p id="p" style="color:#000;background-color:#fff">Hello <!-- c --> world</p>
               <p id="gone" style="display:none">hidden</p></body>"#,
        );
        let p = by_html_id(&cache, "p");
        assert_eq!(p.text_runs.len(), 1);
        let run = cache.text_run(p.text_runs[0]).expect("run");
        assert_eq!(run.text, "Hello world");
        assert!((run.contrast_ratio - 21.0).abs() < 0.01);
        assert!(by_html_id(&cache, "gone").text_runs.is_empty());
        assert!(by_html_id(&cache, "gone").has_text_content);
    }

    #[test]
    fn test_background_inherited_from_ancestor() {
        let cache = build(
            r#"<body><div style="background:#000 url(bg.png)"><span id="s" style="color:#fff">x</span></div></body>"#,
        );
        let span = by_html_id(&cache, "s");
        let run = cache.text_run(span.text_runs[0]).expect("run");
        assert!((run.contrast_ratio - 21.0).abs() < 0.01);
        assert!(run.has_background_image);
    }

    #[test]
    fn test_category_indexes() {
        let cache = build(
            r#"<body><img src="a.png" alt="A"><a href="/x">X</a><a>no href</a>
               <ul><li><a href="/1">1</a></li><li><a href="/2">2</a></li></ul>
               <input type="text" id="t"><div role="slider" aria-valuenow="3">s</div>
               <table><caption>C</caption><tr><th>H</th></tr><tr><td>1</td></tr></table></body>"#,
        );
        assert_eq!(cache.images().len(), 1);
        assert_eq!(cache.links().len(), 3);
        assert_eq!(cache.controls().len(), 1);
        assert_eq!(cache.widgets().len(), 1);
        assert_eq!(cache.lists().len(), 1);
        assert_eq!(cache.lists()[0].item_count, 2);
        assert_eq!(cache.lists()[0].link_count, 2);
        let table = cache.tables()[0];
        assert_eq!((table.row_count, table.header_cell_count, table.has_caption), (2, 1, true));
        assert!(table.is_data_table());
    }

    #[test]
    fn test_table_cell_grid() {
        let cache = build(
            r#"<body><table><tr><th colspan="2">Name</th><th>Age</th></tr>
               <tr><td>A</td><td>B</td><td id="age">3</td></tr>
               <tr><td><table><tr><td id="inner">x</td></tr></table></td></tr></table></body>"#,
        );
        let outer = cache.tables()[0].element;
        let cells: Vec<(usize, usize, bool)> = cache
            .table_cells()
            .iter()
            .filter(|c| c.table == outer)
            .map(|c| (c.row, c.column, c.is_header))
            .collect();
        assert_eq!(cells, vec![(0, 0, true), (0, 2, true), (1, 0, false), (1, 1, false), (1, 2, false), (2, 0, false)]);

        let inner = cache
            .table_cells()
            .iter()
            .find(|c| c.element == by_html_id(&cache, "inner").id)
            .expect("inner cell");
        assert_eq!((inner.table, inner.row, inner.column), (cache.tables()[1].element, 0, 0));
        assert_eq!(cache.tables()[0].row_count, 3);
    }

    #[test]
    fn test_unstyled_node_is_hidden() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root(), "body", &[]);
        let detached = doc.append_element(body, "button", &[]);
        doc.append_text(detached, "Go");
        doc.clear_style(detached);
        let cache = SemanticCache::build(&doc, "", "", &ContrastConfig::default());
        let button = &cache.elements()[1];
        assert!(!button.is_visible_to_at);
        assert!(!button.is_visible_on_screen);
        assert!(cache.text_runs().is_empty());
    }

    #[test]
    fn test_content_flags() {
        let cache = build(r#"<body><button id="b"><svg><path d="M0"/></svg></button><h2 id="h"><span>Text</span></h2></body>"#);
        let button = by_html_id(&cache, "b");
        assert!(button.has_image_content);
        assert!(!button.has_text_content);
        let heading = by_html_id(&cache, "h");
        assert!(heading.has_text_content);
        assert!(!heading.has_own_text);
    }

    #[test]
    fn test_deep_nesting_builds() {
        let depth = 10_000;
        let markup = format!(
            "<body>{}<a href=\"/\">deep</a>{}</body>",
            "<div><span>x</span>".repeat(depth),
            "</div>".repeat(depth)
        );
        let cache = build(&markup);
        assert_eq!(cache.elements().len(), 2 * depth + 2);
        let link = cache.members(cache.links()).next().expect("link");
        assert_eq!(link.ordinal_position, 2 * depth + 2);
        assert!(cache.elements()[1].has_text_content);
        assert_eq!(cache.text_runs().len(), depth + 1);
    }

    #[test]
    fn test_text_split_by_child_elements() {
        let cache = build(r#"<body><p id="p">before <b>bold</b> after</p></body>"#);
        let p = by_html_id(&cache, "p");
        let texts: Vec<&str> = p.text_runs.iter().filter_map(|r| cache.text_run(*r)).map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["before", "after"]);
        assert!(p.has_own_text);
    }
}
