//! Tannoy is a notification routing and fan-out dispatch library.
//!
//! It resolves locator URLs into backend notification services through
//! an injected registry, owns the initialized services, and fans each
//! logical send out to all of them concurrently, racing every delivery
//! against a per-service timeout so one slow backend never blocks the
//! rest. A companion partitioner splits oversized messages into
//! provider-compliant chunks without breaking words mid-token.
//!
//! # Architecture
//!
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`locator`] -- Locator parsing and canonical scheme extraction,
//!   including `+`-prefixed custom webhook schemes.
//! - [`registry`] -- Explicit scheme-to-factory [`ServiceRegistry`]
//!   passed in at construction; no global mutable state.
//! - [`service`] -- The [`Service`] capability contract every backend
//!   implements, plus per-call [`Params`] overrides.
//! - [`services`] -- Built-in reference services (`log`).
//! - [`router`] -- [`ServiceRouter`]: service ownership, the message
//!   queue, and concurrent timeout-bounded dispatch.
//! - [`partition`] -- [`partition_message`] and
//!   [`message_items_from_lines`], the two chunking algorithms.
//!
//! # Example
//!
//! ```
//! use tannoy::{ServiceRegistry, ServiceRouter};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tannoy::TannoyError> {
//! let mut router = ServiceRouter::new(ServiceRegistry::with_builtin());
//! router.add_service("log://audit")?;
//!
//! // One result per owned service, by registration index.
//! let results = router.send("deploy finished", None).await;
//! assert_eq!(results.len(), 1);
//! assert!(results[0].is_ok());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod locator;
pub mod partition;
pub mod registry;
pub mod router;
pub mod service;
pub mod services;

pub use error::TannoyError;
pub use locator::extract_service_name;
pub use partition::{message_items_from_lines, partition_message, MessageItem, MessageLimit};
pub use registry::{ServiceFactory, ServiceRegistry};
pub use router::{ServiceRouter, DEFAULT_TIMEOUT};
pub use service::{Params, Service};
