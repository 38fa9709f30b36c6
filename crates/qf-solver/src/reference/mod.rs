//! Classical solvers used to cross-check the conditional recursion.
//!
//! - [`mva`]: exact MVA for networks whose load-dependent center has a
//!   constant service time
//! - [`convolution`]: Buzen's convolution with a load-dependent center
//!
//! Both share the input validation and visit-ratio rescaling of the main
//! solver and return [`crate::Metrics`] in the same center order.

pub mod convolution;
pub mod mva;

pub use convolution::convolution;
pub use mva::mva;
