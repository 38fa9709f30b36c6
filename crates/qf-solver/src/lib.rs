//! Conditional mean value analysis for closed queueing networks.
//!
//! The solver handles single-class networks with a think-time (delay) center,
//! any number of load-independent queueing centers and exactly one
//! load-dependent center. The load-dependent center is handled through a
//! table of flow-equivalent demands indexed by population and shift, which
//! is updated by throughput ratios rather than by products of service-time
//! ratios. This keeps the recursion stable when the service rate varies
//! steeply with population.
//!
//! # Example
//!
//! ```
//! use qf_solver::{Network, solve};
//!
//! let network = Network::new(3, vec![1.0, 0.5], vec![0.8, 0.8, 0.8], vec![1.0, 1.0, 1.0]);
//! let metrics = solve(&network).unwrap();
//!
//! assert_eq!(metrics.num_centers(), 3);
//! assert!(metrics.throughput[0] > 0.0);
//! ```

pub mod error;
pub mod extract;
pub mod network;
pub mod normalize;
pub mod recurrence;
pub mod reference;
pub mod solve;
pub mod tables;

pub use error::{ArgumentIssue, SolverError, SolverResult};
pub use extract::Metrics;
pub use network::{Network, multi_server_service};
pub use normalize::{NormalizedNetwork, normalize};
pub use recurrence::{LayerControl, LayerProgress};
pub use solve::{solve, solve_tables, solve_with_progress};
pub use tables::RecurrenceTables;
