//! Toast Notifications
//!
//! Transient messages stacked in a `#toast-container` attached to the body.
//! Each toast runs through `Inserted → Shown → Hiding → Removed` on tokio
//! timers; the close control removes it at once.

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::ToastConfig;
use crate::dom::{Document, Element, TOAST_CONTAINER_ID};
use crate::render;

/// Toast flavour, selects styling class and icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Error => "⚠",
            ToastKind::Success => "✓",
            ToastKind::Info => "ⓘ",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Error => "error",
            ToastKind::Success => "success",
            ToastKind::Info => "info",
        }
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle position of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// In the DOM, not yet visible
    Inserted,
    /// `show` class applied
    Shown,
    /// Fading out, removal pending
    Hiding,
    /// Detached from the DOM
    Removed,
}

/// Element id of one toast node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    fn new() -> Self {
        Self(format!("toast-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const SHOW_CLASS: &str = "show";
const HIDING_CLASS: &str = "hiding";

/// Shows toasts in a shared document
#[derive(Clone)]
pub struct Notifier {
    document: Arc<RwLock<Document>>,
    config: ToastConfig,
}

impl Notifier {
    pub fn new(document: Arc<RwLock<Document>>, config: ToastConfig) -> Self {
        Self { document, config }
    }

    /// Append a toast and schedule its lifecycle
    ///
    /// Must be called within a tokio runtime.
    pub async fn show_toast(&self, message: &str, kind: ToastKind) -> ToastId {
        let id = ToastId::new();

        let mut toast = Element::new("div")
            .with_id(id.as_str())
            .with_class("toast")
            .with_class(&format!("toast-{}", kind));
        toast.set_inner_html(render::toast_body(kind.icon(), message));

        {
            let mut doc = self.document.write().await;
            match doc.get_element_by_id_mut(TOAST_CONTAINER_ID) {
                Some(container) => container.append_child(toast),
                None => doc.append_to_body(
                    Element::new("div")
                        .with_id(TOAST_CONTAINER_ID)
                        .with_child(toast),
                ),
            }
        }

        tokio::spawn(run_lifecycle(
            Arc::clone(&self.document),
            id.clone(),
            self.config.clone(),
        ));

        id
    }

    /// Log an error and show it as a toast
    pub async fn show_error(&self, message: &str) -> ToastId {
        tracing::error!("{}", message);
        self.show_toast(message, ToastKind::Error).await
    }

    pub async fn show_success(&self, message: &str) -> ToastId {
        self.show_toast(message, ToastKind::Success).await
    }

    /// Close control: remove the toast immediately
    pub async fn close(&self, id: &ToastId) -> bool {
        self.document.write().await.remove_element(id.as_str()).is_some()
    }

    /// Current lifecycle phase, read from the document
    pub async fn phase(&self, id: &ToastId) -> ToastPhase {
        let doc = self.document.read().await;
        match doc.get_element_by_id(id.as_str()) {
            None => ToastPhase::Removed,
            Some(el) if el.has_class(SHOW_CLASS) => ToastPhase::Shown,
            Some(el) if el.has_class(HIDING_CLASS) => ToastPhase::Hiding,
            Some(_) => ToastPhase::Inserted,
        }
    }

    /// Number of toasts currently attached
    pub async fn active_count(&self) -> usize {
        self.document
            .read()
            .await
            .get_element_by_id(TOAST_CONTAINER_ID)
            .map(|c| c.children().len())
            .unwrap_or(0)
    }
}

async fn run_lifecycle(document: Arc<RwLock<Document>>, id: ToastId, config: ToastConfig) {
    tokio::time::sleep(config.show_delay()).await;
    if !update_toast(&document, &id, |el| el.add_class(SHOW_CLASS)).await {
        return;
    }

    tokio::time::sleep(config.dwell()).await;
    if !update_toast(&document, &id, |el| {
        el.remove_class(SHOW_CLASS);
        el.add_class(HIDING_CLASS);
    })
    .await
    {
        return;
    }

    tokio::time::sleep(config.fade()).await;
    document.write().await.remove_element(id.as_str());
}

/// Apply `f` to the toast if it is still attached (it may have been closed)
async fn update_toast(
    document: &RwLock<Document>,
    id: &ToastId,
    f: impl FnOnce(&mut Element),
) -> bool {
    match document.write().await.get_element_by_id_mut(id.as_str()) {
        Some(el) => {
            f(el);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn notifier() -> (Notifier, Arc<RwLock<Document>>) {
        let doc = Arc::new(RwLock::new(Document::new()));
        (Notifier::new(Arc::clone(&doc), ToastConfig::default()), doc)
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_lifecycle() {
        let (notifier, doc) = notifier();

        let id = notifier.show_toast("x", ToastKind::Error).await;
        assert_eq!(notifier.phase(&id).await, ToastPhase::Inserted);
        {
            let doc = doc.read().await;
            let el = doc.get_element_by_id(id.as_str()).unwrap();
            assert_eq!(el.class_name(), "toast toast-error");
            assert!(el.inner_html().contains("⚠"));
        }

        sleep(Duration::from_millis(20)).await;
        assert_eq!(notifier.phase(&id).await, ToastPhase::Shown);

        sleep(Duration::from_millis(4000)).await;
        assert_eq!(notifier.phase(&id).await, ToastPhase::Hiding);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(notifier.phase(&id).await, ToastPhase::Removed);
        assert_eq!(notifier.active_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_container_and_stacking() {
        let (notifier, doc) = notifier();

        notifier.show_error("first").await;
        notifier.show_error("first").await;
        notifier.show_success("saved").await;
        assert_eq!(notifier.active_count().await, 3);

        let containers = doc
            .read()
            .await
            .body()
            .children()
            .iter()
            .filter(|c| c.id() == Some(TOAST_CONTAINER_ID))
            .count();
        assert_eq!(containers, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_removes_immediately() {
        let (notifier, _doc) = notifier();

        let id = notifier.show_toast("bye", ToastKind::Info).await;
        assert!(notifier.close(&id).await);
        assert_eq!(notifier.phase(&id).await, ToastPhase::Removed);
        assert!(!notifier.close(&id).await);

        // Timers keep running against a detached node without effect
        sleep(Duration::from_secs(5)).await;
        assert_eq!(notifier.active_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_is_escaped() {
        let (notifier, doc) = notifier();

        let id = notifier.show_error("<script>alert(1)</script>").await;
        let doc = doc.read().await;
        let html = doc.get_element_by_id(id.as_str()).unwrap().inner_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
