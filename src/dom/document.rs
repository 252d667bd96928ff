//! The dashboard page
//!
//! Loaders address elements by id, exactly like the host HTML page the
//! dashboard script populates. [`Document::dashboard_page`] builds that page.

use super::element::Element;
use super::error::{DomError, DomResult};
use crate::model::Country;

/// Ids of the account summary cards
pub const ACCOUNT_IDS: &[&str] = &[
    "total-asset",
    "total-asset-change",
    "cash",
    "stock-value",
    "profit-loss",
    "profit-loss-rate",
];

/// Ids of the system status panel
pub const STATUS_IDS: &[&str] = &[
    "scheduler-status",
    "last-update",
    "total-stocks",
    "korea-holdings",
    "usa-holdings",
];

pub const HOLDINGS_TABLE_ID: &str = "holdings-table";
pub const HOLDINGS_COUNT_ID: &str = "holdings-count";
pub const LOG_VIEWER_ID: &str = "log-viewer";
pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const TAB_BUTTON_CLASS: &str = "tab-button";

/// In-memory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty page (only `<body>`)
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    /// The dashboard host page with every element the loaders write to
    pub fn dashboard_page() -> Self {
        let mut doc = Self::new();

        let mut tabs = Element::new("nav").with_class("tabs");
        for country in Country::all() {
            let label = match country {
                Country::Kor => "국내",
                Country::Usa => "해외",
            };
            let mut button = Element::new("button")
                .with_class(TAB_BUTTON_CLASS)
                .with_data("country", country.code())
                .with_text(label);
            if *country == Country::default() {
                button.add_class("active");
            }
            tabs.append_child(button);
        }
        doc.append_to_body(tabs);

        let mut cards = Element::new("section").with_class("cards");
        for id in ACCOUNT_IDS {
            cards.append_child(Element::new("div").with_id(*id).with_text("-"));
        }
        doc.append_to_body(cards);

        doc.append_to_body(
            Element::new("section")
                .with_class("holdings")
                .with_child(Element::new("span").with_id(HOLDINGS_COUNT_ID).with_text("0개"))
                .with_child(Element::new("tbody").with_id(HOLDINGS_TABLE_ID)),
        );

        let mut status = Element::new("section").with_class("status");
        for id in STATUS_IDS {
            status.append_child(Element::new("span").with_id(*id).with_text("-"));
        }
        doc.append_to_body(status);

        doc.append_to_body(
            Element::new("div")
                .with_id(LOG_VIEWER_ID)
                .with_class("log-viewer"),
        );

        doc
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn append_to_body(&mut self, element: Element) {
        self.body.append_child(element);
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_mut(id)
    }

    /// Like [`Self::get_element_by_id_mut`] but a missing element is an error
    pub fn element_mut(&mut self, id: &str) -> DomResult<&mut Element> {
        self.body
            .find_mut(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    /// Set the text of an element by id
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> DomResult<()> {
        self.element_mut(id)?.set_text(text);
        Ok(())
    }

    /// Run `f` on every element carrying `class`
    pub fn for_each_with_class(&mut self, class: &str, mut f: impl FnMut(&mut Element)) {
        self.body.visit_mut(&mut |el| {
            if el.has_class(class) {
                f(el);
            }
        });
    }

    /// Detach an element (and its subtree) from the page
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        self.body.remove_descendant(id)
    }

    /// Country of the tab button currently marked active
    pub fn active_tab(&self) -> Option<&str> {
        let mut active = None;
        self.body.visit(&mut |el| {
            if active.is_none() && el.has_class(TAB_BUTTON_CLASS) && el.has_class("active") {
                active = el.data("country").map(str::to_string);
            }
        });
        active.and_then(|code| {
            Country::all()
                .iter()
                .map(Country::code)
                .find(|c| *c == code)
        })
    }

    /// Plain-text rendition of every element with an id, in page order
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        self.body.visit(&mut |el| {
            let Some(id) = el.id() else { return };
            if id == TOAST_CONTAINER_ID {
                return;
            }
            let lines = el.text_lines();
            match lines.len() {
                0 => out.push_str(&format!("{}:\n", id)),
                1 => out.push_str(&format!("{}: {}\n", id, lines[0])),
                _ => {
                    out.push_str(&format!("{}:\n", id));
                    for line in lines {
                        out.push_str(&format!("    {}\n", line));
                    }
                }
            }
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_page_has_all_ids() {
        let doc = Document::dashboard_page();
        for id in ACCOUNT_IDS.iter().chain(STATUS_IDS) {
            assert!(doc.get_element_by_id(id).is_some(), "missing #{}", id);
        }
        assert!(doc.get_element_by_id(HOLDINGS_TABLE_ID).is_some());
        assert!(doc.get_element_by_id(HOLDINGS_COUNT_ID).is_some());
        assert!(doc.get_element_by_id(LOG_VIEWER_ID).is_some());
        assert_eq!(doc.active_tab(), Some("KOR"));
    }

    #[test]
    fn test_missing_element() {
        let mut doc = Document::new();
        let err = doc.set_text("cash", "1").unwrap_err();
        assert_eq!(err, DomError::MissingElement("cash".to_string()));
    }

    #[test]
    fn test_for_each_with_class() {
        let mut doc = Document::dashboard_page();
        let mut seen = 0;
        doc.for_each_with_class(TAB_BUTTON_CLASS, |_| seen += 1);
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_snapshot_lists_ids() {
        let mut doc = Document::dashboard_page();
        doc.set_text("cash", "₩1,000").unwrap();
        let snap = doc.snapshot();
        assert!(snap.contains("cash: ₩1,000\n"));
        assert!(snap.contains("log-viewer:\n"));
    }
}
