//! Domain layer for the SIRAJ Educational AI council client.
//!
//! This crate holds everything that is pure state: the archetype registry,
//! the council session model, the typed inbound event set, and the event
//! fold that drives a session through the Living Spiral phases. No I/O
//! happens here; the transport lives in `siraj-client`.

pub mod archetype;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::SirajError;
