//! qf-core: stable foundation for queueflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - timing (opt-in wall clock timers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::{QfError, QfResult};
pub use numeric::*;
pub use timing::Timer;
