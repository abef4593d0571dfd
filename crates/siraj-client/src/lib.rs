//! Transport layer for the SIRAJ Educational AI council client.
//!
//! Two clients against the same backend: [`SirajApiClient`] for one-shot
//! request/response operations, and [`CouncilStreamClient`] for streamed
//! council sessions over WebSocket. Endpoint settings come from
//! [`ClientConfig`].

pub mod api;
pub mod config;
pub mod stream;
pub mod types;

pub use api::SirajApiClient;
pub use config::ClientConfig;
pub use stream::{AUTO_RESET_DELAY, CouncilStreamClient, SessionUpdate};
