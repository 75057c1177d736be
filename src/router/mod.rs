//! The service router: locator resolution, service ownership, and
//! best-effort concurrent delivery with bounded wait time per backend.
//!
//! [`ServiceRouter`] resolves locator strings into initialized services
//! through an injected [`ServiceRegistry`], owns the resulting handles,
//! and fans each logical send out to all of them at once (see
//! [`fanout`]). One slow or broken backend never blocks or aborts the
//! others; every service contributes exactly one result per send.
//!
//! The router's own state (service list, message queue) is plain
//! unsynchronized memory: mutating it from several tasks at once
//! requires external synchronization. That is a usage contract, not an
//! oversight — the expected shape is one router per owner.

pub mod fanout;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::TannoyError;
use crate::locator::{extract_service_name, is_custom};
use crate::partition::MessageItem;
use crate::registry::ServiceRegistry;
use crate::service::{Params, Service};

pub use fanout::DispatchResult;

/// Default per-service send timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ServiceRouter {
    registry: Arc<ServiceRegistry>,
    services: Vec<Arc<dyn Service>>,
    queue: Vec<String>,
    timeout: Duration,
    span: tracing::Span,
}

impl ServiceRouter {
    /// A router with no services yet. Add them with
    /// [`add_service`](Self::add_service).
    #[must_use]
    pub fn new(registry: ServiceRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            services: Vec::new(),
            queue: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            span: tracing::Span::none(),
        }
    }

    /// A router initialized from a set of locators. The first locator
    /// that fails to resolve or initialize aborts construction.
    pub fn with_locators(
        registry: ServiceRegistry,
        locators: &[&str],
    ) -> Result<Self, TannoyError> {
        let mut router = Self::new(registry);
        for locator in locators {
            router.add_service(locator)?;
        }
        Ok(router)
    }

    /// Resolve a locator, initialize the matching service, and take
    /// ownership of it. On any failure nothing is appended.
    pub fn add_service(&mut self, locator: &str) -> Result<(), TannoyError> {
        let service = self.init_service(locator)?;
        self.services.push(Arc::from(service));
        Ok(())
    }

    /// Send one message to every owned service, blocking until each has
    /// either answered or timed out.
    ///
    /// Returns exactly one result per owned service, placed by the
    /// service's registration index regardless of the order in which
    /// services finished. An empty router fails fast with a single
    /// [`TannoyError::NoSenders`].
    pub async fn send(
        &self,
        message: &str,
        params: Option<&Params>,
    ) -> Vec<Result<(), TannoyError>> {
        if self.services.is_empty() {
            return vec![Err(TannoyError::NoSenders)];
        }

        let mut rx = self.send_async(message, params);
        let mut slots: Vec<Option<Result<(), TannoyError>>> =
            (0..self.services.len()).map(|_| None).collect();
        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(TannoyError::DispatchAborted {
                        service: self.services[index].id().to_string(),
                    })
                })
            })
            .collect()
    }

    /// Fan one message out without waiting. The channel yields exactly
    /// one index-tagged result per owned service, in completion order,
    /// then closes.
    pub fn send_async(
        &self,
        message: &str,
        params: Option<&Params>,
    ) -> mpsc::Receiver<DispatchResult> {
        let defensive;
        let params = match params {
            Some(params) => params,
            None => {
                defensive = Params::new();
                &defensive
            }
        };
        fanout::dispatch(&self.services, message, params, self.timeout, &self.span)
    }

    /// Send a pre-chunked message. Compatibility path: the items are
    /// concatenated back into one string before dispatch; per-chunk
    /// delivery is a service concern, not handled at this layer.
    pub async fn send_items(
        &self,
        items: &[MessageItem],
        params: Option<&Params>,
    ) -> Vec<Result<(), TannoyError>> {
        let message: String = items.iter().map(|item| item.text.as_str()).collect();
        self.send(&message, params).await
    }

    /// Append a message to the router's internal queue. No I/O happens
    /// until [`flush`](Self::flush).
    pub fn enqueue(&mut self, message: impl Into<String>) {
        self.queue.push(message.into());
    }

    /// Join all queued messages with newlines, send them as one
    /// message, and clear the queue regardless of the outcome.
    ///
    /// Per-service failures are logged and discarded: flush is meant to
    /// run as a scope-exit cleanup step, where queued diagnostics must
    /// go out on a best-effort basis even on early-return paths.
    pub async fn flush(&mut self, params: Option<&Params>) {
        if self.queue.is_empty() {
            return;
        }
        let message = self.queue.join("\n");
        self.queue.clear();

        let results = self.send(&message, params).await;
        let failures = results.iter().filter(|result| result.is_err()).count();
        if failures > 0 {
            tracing::warn!(failures, "flush discarded send failures");
        }
    }

    /// Resolve and initialize a service without taking ownership of it.
    pub fn locate(&self, locator: &str) -> Result<Box<dyn Service>, TannoyError> {
        self.init_service(locator)
    }

    /// One-shot delivery: resolve, initialize, and send immediately,
    /// without adding the service to the router. No timeout race is
    /// applied on this path.
    pub async fn route(&self, locator: &str, message: &str) -> Result<(), TannoyError> {
        let service = self.locate(locator)?;
        service.send(message, &Params::new()).await
    }

    /// Instantiate an uninitialized service for a canonical scheme.
    pub fn new_service(&self, scheme: &str) -> Result<Box<dyn Service>, TannoyError> {
        self.registry.create(scheme)
    }

    /// Canonical schemes this router can resolve, sorted.
    #[must_use]
    pub fn list_services(&self) -> Vec<&str> {
        self.registry.schemes()
    }

    /// Swap the span that every dispatch task runs under. The router
    /// rendition of "set the active logger at any time": services log
    /// through `tracing`, and this span is their shared context.
    pub fn set_logger(&mut self, span: tracing::Span) {
        self.span = span;
    }

    /// Change the per-service send timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Resolve a locator into an initialized service. A custom-shaped
    /// locator (literal scheme differs from the canonical one) is first
    /// handed to the service for translation into its canonical
    /// configuration form.
    fn init_service(&self, locator: &str) -> Result<Box<dyn Service>, TannoyError> {
        let (scheme, url) = extract_service_name(locator)?;
        let mut service = self.registry.create(&scheme)?;

        if is_custom(&scheme, &url) {
            let config_url = service.config_url_from_custom(&url)?;
            tracing::debug!(
                service = %scheme,
                custom = %url,
                converted = %config_url,
                "converted custom locator"
            );
            service.initialize(&config_url)?;
        } else {
            service.initialize(&url)?;
        }

        Ok(service)
    }
}

impl std::fmt::Debug for ServiceRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRouter")
            .field("services", &self.services.len())
            .field("queued", &self.queue.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}
