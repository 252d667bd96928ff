//! In-memory Page Model
//!
//! The element tree the dashboard loaders render into.
//!
//! ## Components
//!
//! - **Element**: tag, id, class list, `data-*` attributes, text or markup content
//! - **Document**: the page body with id lookup and class queries
//! - **escape**: HTML escaping for untrusted text

mod document;
mod element;
mod error;
pub mod escape;

pub use document::{
    Document, ACCOUNT_IDS, HOLDINGS_COUNT_ID, HOLDINGS_TABLE_ID, LOG_VIEWER_ID, STATUS_IDS,
    TAB_BUTTON_CLASS, TOAST_CONTAINER_ID,
};
pub use element::{Content, Element};
pub use error::{DomError, DomResult};
pub use escape::escape_html;
