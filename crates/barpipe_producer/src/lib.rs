//! Producer-side support for the barpipe spool.
//!
//! A producer is an independent long-running process that owns one service
//! id. It registers a liveness record once at startup, then atomically
//! rewrites its block file on every status change and pokes the aggregator
//! awake. See `examples/clock.rs` for the whole contract in ~20 lines.

pub mod palette;
pub mod registration;
pub mod toggle;

pub use registration::*;
pub use toggle::*;
