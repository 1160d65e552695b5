//! Crate includes reusable utils shared by the keysweep crates and binaries.
//! Such as initializing the tracing framework.

pub mod logging;

// Re-export tracing crate for convenience.
pub use tracing;
