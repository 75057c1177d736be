//! Unified error types for tannoy.
//!
//! Defines [`TannoyError`], the crate-wide error enum covering every
//! failure class the router can surface: locator resolution, service
//! initialization, custom-URL translation, and per-service delivery
//! outcomes (including timeouts). Uses `thiserror` for `Display` and
//! `Error` derives; underlying causes are boxed as `#[source]` chains.

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TannoyError {
    /// Sending through a router that owns no services. The fail-fast
    /// guard for a misused (empty) router.
    #[error("error sending message: no senders")]
    NoSenders,

    /// No factory is registered for the locator's canonical scheme.
    #[error("unknown service '{scheme}' (no factory registered for this scheme)")]
    UnknownService { scheme: String },

    /// The locator string is not a parseable URL.
    #[error("failed to parse locator '{locator}': {source}")]
    LocatorParse {
        locator: String,
        #[source]
        source: url::ParseError,
    },

    /// A custom-shaped locator was supplied but the service cannot
    /// translate provider-native webhook URLs.
    #[error("service '{scheme}' does not support custom URLs")]
    CustomUrlUnsupported { scheme: String },

    /// The service's custom-URL translation itself failed.
    #[error("failed to convert custom URL for service '{scheme}': {source}")]
    CustomUrlConversion {
        scheme: String,
        #[source]
        source: BoxedCause,
    },

    /// The service rejected its decoded configuration during
    /// initialization.
    #[error("failed to initialize service '{scheme}': {message}")]
    InvalidConfig { scheme: String, message: String },

    /// The service did not answer before the router's configured
    /// timeout elapsed.
    #[error("failed to send: timed out waiting for service '{service}'")]
    Timeout { service: String },

    /// The service answered with a delivery failure.
    #[error("service '{service}' failed to send: {source}")]
    SendFailed {
        service: String,
        #[source]
        source: BoxedCause,
    },

    /// A dispatch task terminated (panicked) before reporting a result.
    #[error("service '{service}' dispatch task terminated without reporting a result")]
    DispatchAborted { service: String },
}

impl TannoyError {
    /// Wrap an arbitrary delivery failure from the named service.
    pub fn send_failed(service: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::SendFailed {
            service: service.into(),
            source: source.into(),
        }
    }

    /// True for the per-service timeout outcome.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
