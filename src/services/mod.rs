//! Built-in reference services.
//!
//! Real chat/webhook/mail backends live outside this crate; what ships
//! here is the minimal service useful on its own and in examples:
//! [`LogService`], which "delivers" through the `tracing` pipeline.

pub mod log;

pub use log::LogService;
