//! Page elements
//!
//! A small element tree: tag, id, class list, `data-*` attributes, content
//! and children. Content is either plain text (escaped on serialization) or
//! a markup fragment that replaces the element's subtree wholesale, the same
//! way `textContent` / `innerHTML` assignments behave in a browser.

use std::collections::BTreeMap;

use super::escape::{escape_html, strip_tags};

/// Element content
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Literal text
    Text(String),
    /// Markup fragment
    Html(String),
}

/// A node in the page tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    dataset: BTreeMap<String, String>,
    content: Content,
    children: Vec<Element>,
    scroll_top: usize,
}

impl Element {
    /// Create an element with the given tag name
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            dataset: BTreeMap::new(),
            content: Content::Empty,
            children: Vec::new(),
            scroll_top: 0,
        }
    }

    /// Builder method: set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method: add a class
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder method: set a `data-*` attribute
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder method: append a child
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Append a child node
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Read a `data-*` attribute
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    // ---- class list ----

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Space-separated class attribute
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Replace the whole class attribute
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name
            .split_whitespace()
            .map(str::to_string)
            .collect();
    }

    // ---- content ----

    /// Replace the subtree with literal text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.content = Content::Text(text.into());
    }

    /// Replace the subtree with a markup fragment
    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.children.clear();
        self.content = Content::Html(html.into());
        self.scroll_top = self.scroll_top.min(self.scroll_height());
    }

    /// Serialized content of this element
    pub fn inner_html(&self) -> String {
        let mut out = match &self.content {
            Content::Empty => String::new(),
            Content::Text(text) => escape_html(text),
            Content::Html(html) => html.clone(),
        };
        for child in &self.children {
            out.push_str(&child.outer_html());
        }
        out
    }

    /// Serialized element including its own tag
    pub fn outer_html(&self) -> String {
        let mut attrs = String::new();
        if let Some(id) = &self.id {
            attrs.push_str(&format!(r#" id="{}""#, escape_html(id)));
        }
        if !self.classes.is_empty() {
            attrs.push_str(&format!(r#" class="{}""#, escape_html(&self.class_name())));
        }
        for (key, value) in &self.dataset {
            attrs.push_str(&format!(r#" data-{}="{}""#, key, escape_html(value)));
        }
        format!("<{tag}{attrs}>{inner}</{tag}>", tag = self.tag, inner = self.inner_html())
    }

    /// Decoded text of the element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = match &self.content {
            Content::Empty => String::new(),
            Content::Text(text) => text.clone(),
            Content::Html(html) => strip_tags(html),
        };
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Readable lines of text: block and row boundaries become line breaks,
    /// table cells are separated by ` | `, blank lines are dropped.
    pub fn text_lines(&self) -> Vec<String> {
        let html = self
            .inner_html()
            .replace("</td>", " | ")
            .replace("</tr>", "\n")
            .replace("</div>", "\n")
            .replace("</button>", "\n");

        strip_tags(&html)
            .lines()
            .map(|line| {
                line.split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim_end_matches(" |")
                    .to_string()
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Number of `<tag ...>` openings in the serialized content
    pub fn count_tag(&self, tag: &str) -> usize {
        let html = self.inner_html();
        let open = format!("<{}", tag);
        html.match_indices(&open)
            .filter(|(i, _)| {
                matches!(
                    html[i + open.len()..].chars().next(),
                    Some('>') | Some(' ') | Some('\n') | Some('\t')
                )
            })
            .count()
    }

    // ---- scrolling ----

    /// Content height in lines
    pub fn scroll_height(&self) -> usize {
        let html = self.inner_html();
        if html.is_empty() {
            0
        } else {
            html.lines().count()
        }
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.scroll_height();
    }

    // ---- tree traversal ----

    pub(crate) fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }
        None
    }

    pub(crate) fn remove_descendant(&mut self, id: &str) -> Option<Element> {
        if let Some(pos) = self.children.iter().position(|c| c.id() == Some(id)) {
            return Some(self.children.remove(pos));
        }
        for child in self.children.iter_mut() {
            if let Some(removed) = child.remove_descendant(id) {
                return Some(removed);
            }
        }
        None
    }

    pub(crate) fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        for child in self.children.iter_mut() {
            child.visit_mut(f);
        }
    }

    pub(crate) fn visit(&self, f: &mut dyn FnMut(&Element)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}
