//! A service that delivers notifications to the log.
//!
//! Useful as a development sink, an audit trail, and as the smallest
//! possible reference implementation of the [`Service`] contract.
//! Locator form: `log://<label>`; an optional `title` query field (or
//! `title` param at send time) is attached to each event.

use async_trait::async_trait;
use tracing::info;
use url::Url;

use crate::error::TannoyError;
use crate::service::{Params, Service};

#[derive(Debug, Default)]
pub struct LogService {
    label: String,
    title: Option<String>,
}

impl LogService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Service for LogService {
    fn id(&self) -> &str {
        "log"
    }

    fn initialize(&mut self, locator: &Url) -> Result<(), TannoyError> {
        self.label = locator.host_str().unwrap_or("default").to_string();
        self.title = locator
            .query_pairs()
            .find(|(key, _)| key == "title")
            .map(|(_, value)| value.into_owned());
        Ok(())
    }

    async fn send(&self, message: &str, params: &Params) -> Result<(), TannoyError> {
        let title = params
            .get("title")
            .map(String::as_str)
            .or(self.title.as_deref())
            .unwrap_or("");
        info!(
            label = %self.label,
            title = %title,
            "{message}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initializes_from_locator_and_sends() {
        let mut service = LogService::new();
        let url = Url::parse("log://audit?title=Deploy").unwrap();
        service.initialize(&url).unwrap();
        assert_eq!(service.label, "audit");
        assert_eq!(service.title.as_deref(), Some("Deploy"));

        let params = Params::new();
        service.send("it works", &params).await.unwrap();
    }

    #[tokio::test]
    async fn title_param_overrides_configured_title() {
        let mut service = LogService::new();
        service.initialize(&Url::parse("log://x?title=A").unwrap()).unwrap();

        let mut params = Params::new();
        params.insert("title".into(), "B".into());
        // Override is consulted per call; configured title is untouched.
        service.send("hello", &params).await.unwrap();
        assert_eq!(service.title.as_deref(), Some("A"));
    }

    #[test]
    fn custom_urls_are_unsupported() {
        let service = LogService::new();
        let err = service
            .config_url_from_custom(&Url::parse("log+https://host").unwrap())
            .unwrap_err();
        assert!(matches!(err, TannoyError::CustomUrlUnsupported { .. }));
    }
}
