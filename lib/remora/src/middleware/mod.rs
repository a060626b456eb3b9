//! Tower middleware layers for the remora transport.
//!
//! Layers compose onto a transport at construction time through
//! [`crate::HttpTransportBuilder::layer`]. Instrumentation is therefore an
//! explicit, per-transport decorator chain; nothing here mutates global
//! state, and two transports can carry different instrumentation in the
//! same process.
//!
//! - [`LoggingLayer`] - dumps requests/responses via `tracing`
//! - [`RedirectLayer`] - follows 301/302/303/307/308 with a cap

mod logging;
mod redirect;

pub use logging::{Logging, LoggingLayer};
pub use redirect::{DEFAULT_MAX_REDIRECTS, Redirect, RedirectLayer};

// Re-export tower types for custom layer composition
pub use tower::{Layer, ServiceBuilder};
