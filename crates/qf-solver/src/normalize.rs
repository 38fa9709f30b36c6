//! Input validation and visit-ratio rescaling.

use crate::error::{ArgumentIssue, SolverError, SolverResult};
use crate::network::Network;
use qf_core::Real;

/// Validated network with visit ratios rescaled so the load-dependent
/// center's ratio is exactly 1.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedNetwork {
    pub population: usize,
    pub think_time: Real,
    /// Service demands `S[i] * V[i]` of the load-independent centers
    pub li_demands: Vec<Real>,
    /// Per-population service times of the load-dependent center
    pub ld_service: Vec<Real>,
    /// Rescaled visit ratios; last entry is 1
    pub visits: Vec<Real>,
}

impl NormalizedNetwork {
    /// Number of queueing centers M.
    pub fn num_centers(&self) -> usize {
        self.visits.len()
    }
}

/// Validate `network` and build its rescaled demand description.
///
/// The caller's network is left untouched; rescaling happens on a copy.
pub fn normalize(network: &Network) -> SolverResult<NormalizedNetwork> {
    let m = network.num_centers();
    let n = network.population;

    if network.visits.len() != m {
        return Err(SolverError::InvalidArgument {
            param: "visits",
            issue: ArgumentIssue::Length {
                expected: m,
                actual: network.visits.len(),
            },
        });
    }
    if network.ld_service.len() != n {
        return Err(SolverError::InvalidArgument {
            param: "ld_service",
            issue: ArgumentIssue::Length {
                expected: n,
                actual: network.ld_service.len(),
            },
        });
    }

    check_non_negative("li_service", &network.li_service)?;
    check_non_negative("ld_service", &network.ld_service)?;
    check_non_negative("visits", &network.visits[..m - 1])?;
    check_non_negative("think_time", &[network.think_time])?;

    let ld_visits = network.visits[m - 1];
    if !ld_visits.is_finite() || ld_visits <= 0.0 {
        return Err(SolverError::InvalidVisitRatio { value: ld_visits });
    }

    let visits: Vec<Real> = network.visits.iter().map(|v| v / ld_visits).collect();
    let li_demands = network
        .li_service
        .iter()
        .zip(&visits)
        .map(|(s, v)| s * v)
        .collect();

    Ok(NormalizedNetwork {
        population: n,
        think_time: network.think_time,
        li_demands,
        ld_service: network.ld_service.clone(),
        visits,
    })
}

fn check_non_negative(param: &'static str, values: &[Real]) -> SolverResult<()> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(SolverError::InvalidArgument {
                param,
                issue: ArgumentIssue::Value {
                    index,
                    value,
                    reason: "must be finite",
                },
            });
        }
        if value < 0.0 {
            return Err(SolverError::InvalidArgument {
                param,
                issue: ArgumentIssue::Value {
                    index,
                    value,
                    reason: "must be non-negative",
                },
            });
        }
    }
    Ok(())
}
