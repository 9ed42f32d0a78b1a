//! Selection controller — which service is active and what layout is loaded.
//!
//! Message-driven: `select()` issues a [`LayoutRequest`] tagged with a
//! monotonically increasing id; whoever performs the fetch hands back a
//! [`LayoutResponse`] with the same id. Only the response to the latest
//! request is applied, so overlapping fetches can resolve in any order.
//! The controller never fetches on its own, except through [`load`].
//!
//! [`load`]: SelectionController::load

use tracing::debug;

use crate::model::{ServiceNode, ServiceSummary};
use crate::source::{self, LayoutSource};

/// A layout fetch the caller should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRequest {
    pub request_id: u64,
    pub service_id: i64,
}

/// Result of a layout fetch. `layout: None` covers both failure and absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResponse {
    pub request_id: u64,
    pub layout: Option<ServiceNode>,
}

/// What the content area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguratorView<'a> {
    Loading,
    Layout(&'a ServiceNode),
    /// No selection, or the fetch produced nothing.
    NoLayout,
}

/// Selection state for one firmware's top-level services.
#[derive(Debug, Clone)]
pub struct SelectionController {
    services: Vec<ServiceSummary>,
    selected_service_id: Option<i64>,
    current_layout: Option<ServiceNode>,
    loading: bool,
    /// Id of the most recently issued request; 0 means none yet.
    latest_request: u64,
}

impl SelectionController {
    /// Select the first service, if any. No request is issued until
    /// [`initial_request`](Self::initial_request) is called.
    pub fn new(services: Vec<ServiceSummary>) -> Self {
        Self::starting_after(services, 0)
    }

    /// Like [`new`](Self::new), but request ids continue after
    /// `last_request_id`, so responses to requests issued by an earlier
    /// controller never match this one.
    pub fn starting_after(services: Vec<ServiceSummary>, last_request_id: u64) -> Self {
        let selected_service_id = services.first().map(|s| s.id);
        Self {
            services,
            selected_service_id,
            current_layout: None,
            loading: false,
            latest_request: last_request_id,
        }
    }

    /// Request for the initial selection, or `None` for an empty service list.
    pub fn initial_request(&mut self) -> Option<LayoutRequest> {
        self.selected_service_id.map(|id| self.select(id))
    }

    /// Make `service_id` active and start loading it. Re-selecting the active
    /// service refetches.
    pub fn select(&mut self, service_id: i64) -> LayoutRequest {
        if !self.services.iter().any(|s| s.id == service_id) {
            debug!("selecting service {service_id} outside the current service list");
        }
        self.latest_request += 1;
        self.selected_service_id = Some(service_id);
        self.loading = true;
        let request = LayoutRequest {
            request_id: self.latest_request,
            service_id,
        };
        debug!(
            "layout request {} for service {}",
            request.request_id, request.service_id
        );
        request
    }

    /// Apply a fetch result. Returns `false` if the response was stale and
    /// discarded.
    pub fn apply(&mut self, response: LayoutResponse) -> bool {
        if response.request_id != self.latest_request {
            debug!(
                "discarding stale layout response {} (latest {})",
                response.request_id, self.latest_request
            );
            return false;
        }
        self.current_layout = response.layout;
        self.loading = false;
        true
    }

    /// Select and fetch in one step through `source`.
    pub async fn load(&mut self, source: &dyn LayoutSource, service_id: i64) {
        let request = self.select(service_id);
        let layout = source::load_service_layout(source, request.service_id).await;
        self.apply(LayoutResponse {
            request_id: request.request_id,
            layout,
        });
    }

    /// Move the selection one entry down the list (saturating).
    pub fn select_next(&mut self) -> Option<LayoutRequest> {
        self.step(1)
    }

    /// Move the selection one entry up the list (saturating).
    pub fn select_previous(&mut self) -> Option<LayoutRequest> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<LayoutRequest> {
        if self.services.is_empty() {
            return None;
        }
        let last = self.services.len() - 1;
        let target = match self.selected_index() {
            Some(i) => i.saturating_add_signed(delta).min(last),
            None => 0,
        };
        if Some(target) == self.selected_index() {
            return None;
        }
        let id = self.services[target].id;
        Some(self.select(id))
    }

    /// Id of the most recently issued request.
    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub fn services(&self) -> &[ServiceSummary] {
        &self.services
    }

    pub fn selected_service_id(&self) -> Option<i64> {
        self.selected_service_id
    }

    /// Position of the active service in the list.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_service_id?;
        self.services.iter().position(|s| s.id == id)
    }

    pub fn current_layout(&self) -> Option<&ServiceNode> {
        self.current_layout.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> ConfiguratorView<'_> {
        if self.loading {
            return ConfiguratorView::Loading;
        }
        match &self.current_layout {
            Some(layout) => ConfiguratorView::Layout(layout),
            None => ConfiguratorView::NoLayout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Recloser, Translation};
    use crate::source::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn summary(id: i64) -> ServiceSummary {
        ServiceSummary {
            id,
            description_key: format!("SERVICE_{id}"),
            translations: vec![Translation::new("enUs", &format!("Service {id}"))],
        }
    }

    fn layout(id: i64) -> ServiceNode {
        ServiceNode {
            service_id: id,
            description_key: format!("SERVICE_{id}"),
            translations: vec![],
            features: vec![],
            children: vec![],
        }
    }

    /// Serves layouts for even ids, fails odd ids, counts calls.
    struct EvenSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LayoutSource for EvenSource {
        async fn fetch_inventory(&self) -> Result<Vec<Recloser>, SourceError> {
            Ok(vec![])
        }

        async fn fetch_service_summaries(
            &self,
            _firmware_id: i64,
        ) -> Result<Vec<ServiceSummary>, SourceError> {
            Ok(vec![])
        }

        async fn fetch_service_layout(
            &self,
            service_id: i64,
        ) -> Result<Option<ServiceNode>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if service_id % 2 == 0 {
                Ok(Some(layout(service_id)))
            } else {
                Err(SourceError::InvalidResponse("odd".into()))
            }
        }
    }

    #[test]
    fn initial_selection_is_first_service() {
        let mut c = SelectionController::new(vec![summary(4), summary(6)]);
        assert_eq!(c.selected_service_id(), Some(4));
        assert!(!c.is_loading());

        let req = c.initial_request().unwrap();
        assert_eq!(req.service_id, 4);
        assert!(c.is_loading());
        assert_eq!(c.view(), ConfiguratorView::Loading);
    }

    #[test]
    fn empty_list_selects_nothing() {
        let mut c = SelectionController::new(vec![]);
        assert_eq!(c.selected_service_id(), None);
        assert!(c.initial_request().is_none());
        assert!(!c.is_loading());
        assert_eq!(c.view(), ConfiguratorView::NoLayout);
    }

    #[test]
    fn response_replaces_layout_and_clears_loading() {
        let mut c = SelectionController::new(vec![summary(2)]);
        let req = c.initial_request().unwrap();
        assert!(c.apply(LayoutResponse {
            request_id: req.request_id,
            layout: Some(layout(2)),
        }));
        assert!(!c.is_loading());
        assert_eq!(c.view(), ConfiguratorView::Layout(&layout(2)));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut c = SelectionController::new(vec![summary(2), summary(4)]);
        let first = c.select(2);
        let second = c.select(4);
        assert!(second.request_id > first.request_id);

        // Second resolves first, then the stale first arrives.
        assert!(c.apply(LayoutResponse {
            request_id: second.request_id,
            layout: Some(layout(4)),
        }));
        assert!(!c.apply(LayoutResponse {
            request_id: first.request_id,
            layout: Some(layout(2)),
        }));
        assert_eq!(c.current_layout().map(|l| l.service_id), Some(4));
        assert_eq!(c.selected_service_id(), Some(4));
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut c = SelectionController::new(vec![summary(2), summary(4)]);
        let first = c.select(2);
        let _second = c.select(4);
        c.apply(LayoutResponse {
            request_id: first.request_id,
            layout: Some(layout(2)),
        });
        assert!(c.is_loading());
    }

    #[test]
    fn ids_continue_after_earlier_controller() {
        let mut earlier = SelectionController::new(vec![summary(2)]);
        let old = earlier.initial_request().unwrap();

        let mut c = SelectionController::starting_after(vec![summary(4)], earlier.latest_request());
        assert!(!c.is_loading());
        let req = c.initial_request().unwrap();
        assert!(req.request_id > old.request_id);
        assert_eq!(c.latest_request(), req.request_id);

        assert!(!c.apply(LayoutResponse {
            request_id: old.request_id,
            layout: Some(layout(2)),
        }));
        assert!(c.is_loading());
        assert!(c.current_layout().is_none());
    }

    #[test]
    fn failed_fetch_gives_no_layout() {
        let mut c = SelectionController::new(vec![summary(2)]);
        let req = c.initial_request().unwrap();
        c.apply(LayoutResponse {
            request_id: req.request_id,
            layout: None,
        });
        assert_eq!(c.view(), ConfiguratorView::NoLayout);
    }

    #[tokio::test]
    async fn load_uses_source_and_degrades() {
        let source = EvenSource {
            calls: AtomicUsize::new(0),
        };
        let mut c = SelectionController::new(vec![summary(2), summary(3)]);

        c.load(&source, 2).await;
        assert_eq!(c.current_layout().map(|l| l.service_id), Some(2));

        c.load(&source, 3).await;
        assert!(!c.is_loading());
        assert!(c.current_layout().is_none());
        assert_eq!(c.view(), ConfiguratorView::NoLayout);
    }

    #[tokio::test]
    async fn reselecting_same_service_refetches() {
        let source = EvenSource {
            calls: AtomicUsize::new(0),
        };
        let mut c = SelectionController::new(vec![summary(2)]);
        c.load(&source, 2).await;
        c.load(&source, 2).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(c.current_layout().map(|l| l.service_id), Some(2));
    }

    #[test]
    fn next_and_previous_saturate() {
        let mut c = SelectionController::new(vec![summary(1), summary(2), summary(3)]);
        assert!(c.select_previous().is_none());

        assert_eq!(c.select_next().map(|r| r.service_id), Some(2));
        assert_eq!(c.select_next().map(|r| r.service_id), Some(3));
        assert!(c.select_next().is_none());
        assert_eq!(c.selected_index(), Some(2));

        assert_eq!(c.select_previous().map(|r| r.service_id), Some(2));
    }

    #[test]
    fn next_from_foreign_selection_goes_to_first() {
        let mut c = SelectionController::new(vec![summary(1), summary(2)]);
        c.select(99);
        assert_eq!(c.selected_index(), None);
        assert_eq!(c.select_next().map(|r| r.service_id), Some(1));
    }

    #[test]
    fn navigation_on_empty_list_is_noop() {
        let mut c = SelectionController::new(vec![]);
        assert!(c.select_next().is_none());
        assert!(c.select_previous().is_none());
    }
}
