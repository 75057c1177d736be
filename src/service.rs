//! The capability contract every notification backend implements.
//!
//! A [`Service`] is one backend adapter: it decodes its configuration
//! from a locator URL once, then delivers messages on demand. Services
//! emit `tracing` events for observability; the router instruments
//! every dispatch with its own span, so embedders redirect service
//! output by swapping the router's span.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use crate::error::TannoyError;

/// Per-call override parameters (e.g. `title`, target channel).
///
/// Callees must never mutate a caller's map; the router hands each
/// dispatch task its own clone.
pub type Params = HashMap<String, String>;

// async_trait is required here because services are used as
// Box<dyn Service> / Arc<dyn Service> and native async fn in traits
// (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait Service: std::fmt::Debug + Send + Sync {
    /// Canonical scheme name, used for diagnostics and timeout errors.
    fn id(&self) -> &str;

    /// Parse and validate configuration from a canonical locator.
    /// Called exactly once, before the service is handed out.
    fn initialize(&mut self, locator: &Url) -> Result<(), TannoyError>;

    /// Deliver one message. `params` may override statically configured
    /// fields for this call only.
    async fn send(&self, message: &str, params: &Params) -> Result<(), TannoyError>;

    /// Translate a provider-native webhook URL into the canonical
    /// configuration locator. Only services reachable through a
    /// custom-shaped locator implement this; the default reports the
    /// capability as missing.
    fn config_url_from_custom(&self, custom: &Url) -> Result<Url, TannoyError> {
        let _ = custom;
        Err(TannoyError::CustomUrlUnsupported {
            scheme: self.id().to_string(),
        })
    }
}
