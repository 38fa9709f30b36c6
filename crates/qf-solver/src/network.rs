//! Closed network description.

use crate::error::{ArgumentIssue, SolverError, SolverResult};
use qf_core::Real;

/// Single-class closed network with one delay center, `M-1` load-independent
/// centers and one load-dependent center.
///
/// Center order everywhere in this crate is: load-independent centers in
/// input order, then the load-dependent center. The delay center carries no
/// visit ratio of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    /// Number of circulating requests (N)
    pub population: usize,
    /// Per-visit service times of the load-independent centers (S)
    pub li_service: Vec<Real>,
    /// Per-visit service time of the load-dependent center when `t` requests
    /// are present, stored at index `t - 1` (Sld, length N)
    pub ld_service: Vec<Real>,
    /// Visit ratios, one per center; the last entry is the load-dependent center (V)
    pub visits: Vec<Real>,
    /// External think time (Z)
    pub think_time: Real,
}

impl Network {
    /// Create a network with zero think time. Inputs are validated when solved.
    pub fn new(
        population: usize,
        li_service: Vec<Real>,
        ld_service: Vec<Real>,
        visits: Vec<Real>,
    ) -> Self {
        Self {
            population,
            li_service,
            ld_service,
            visits,
            think_time: 0.0,
        }
    }

    pub fn with_think_time(mut self, think_time: Real) -> Self {
        self.think_time = think_time;
        self
    }

    /// Network whose load-dependent center is a `servers`-server station with
    /// per-request service time `service_time`.
    pub fn multi_server(
        population: usize,
        li_service: Vec<Real>,
        service_time: Real,
        servers: usize,
        visits: Vec<Real>,
    ) -> SolverResult<Self> {
        let ld_service = multi_server_service(service_time, servers, population)?;
        Ok(Self::new(population, li_service, ld_service, visits))
    }

    /// Number of queueing centers M (excludes the delay center).
    pub fn num_centers(&self) -> usize {
        self.li_service.len() + 1
    }
}

/// Per-population service times of a multi-server station:
/// `service_time / min(t, servers)` for `t = 1..=population`.
pub fn multi_server_service(
    service_time: Real,
    servers: usize,
    population: usize,
) -> SolverResult<Vec<Real>> {
    if servers == 0 {
        return Err(SolverError::InvalidArgument {
            param: "servers",
            issue: ArgumentIssue::Value {
                index: 0,
                value: 0.0,
                reason: "must be at least 1",
            },
        });
    }
    Ok((1..=population)
        .map(|t| service_time / t.min(servers) as Real)
        .collect())
}
