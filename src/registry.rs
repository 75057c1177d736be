//! Explicit scheme → factory registry for service construction.
//!
//! The registry is built by whoever constructs the router and passed
//! in, keeping the router free of hidden global state and trivially
//! testable with mock factories.

use std::collections::HashMap;

use crate::error::TannoyError;
use crate::service::Service;
use crate::services::LogService;

/// Produces a fresh, uninitialized service instance.
pub type ServiceFactory = Box<dyn Fn() -> Box<dyn Service> + Send + Sync>;

#[derive(Default)]
pub struct ServiceRegistry {
    factories: HashMap<String, ServiceFactory>,
}

impl ServiceRegistry {
    /// An empty registry. Register factories before handing it to a
    /// router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in reference services
    /// (currently just `log`).
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("log", || Box::new(LogService::new()));
        registry
    }

    /// Register a factory for a canonical scheme. Re-registering a
    /// scheme replaces the previous factory.
    pub fn register<F>(&mut self, scheme: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Service> + Send + Sync + 'static,
    {
        self.factories.insert(scheme.into(), Box::new(factory));
    }

    /// Instantiate an uninitialized service for the scheme.
    pub fn create(&self, scheme: &str) -> Result<Box<dyn Service>, TannoyError> {
        self.factories
            .get(scheme)
            .map(|factory| factory())
            .ok_or_else(|| TannoyError::UnknownService {
                scheme: scheme.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(scheme)
    }

    /// Registered schemes, sorted for stable output.
    #[must_use]
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scheme_is_an_error() {
        let registry = ServiceRegistry::new();
        let err = registry.create("nope").unwrap_err();
        assert!(matches!(err, TannoyError::UnknownService { scheme } if scheme == "nope"));
    }

    #[test]
    fn builtin_registry_creates_log_service() {
        let registry = ServiceRegistry::with_builtin();
        assert!(registry.contains("log"));
        let service = registry.create("log").unwrap();
        assert_eq!(service.id(), "log");
    }

    #[test]
    fn service_handles_are_debug_formattable() {
        let registry = ServiceRegistry::with_builtin();
        let service = registry.create("log").unwrap();
        assert!(format!("{service:?}").contains("LogService"));
    }

    #[test]
    fn schemes_are_sorted() {
        let mut registry = ServiceRegistry::new();
        registry.register("zulip", || Box::new(LogService::new()));
        registry.register("discord", || Box::new(LogService::new()));
        registry.register("mail", || Box::new(LogService::new()));
        assert_eq!(registry.schemes(), vec!["discord", "mail", "zulip"]);
    }
}
