//! Exact single-class MVA with load-independent centers only.

use crate::error::{SolverError, SolverResult};
use crate::extract::Metrics;
use crate::network::Network;
use crate::normalize::normalize;
use qf_core::{Real, Tolerances, nearly_equal};

/// Solve `network` with classical MVA, treating the load-dependent center as
/// a load-independent one.
///
/// Only valid when every entry of the load-dependent service table is the
/// same; anything else is rejected as [`SolverError::Unsupported`].
pub fn mva(network: &Network) -> SolverResult<Metrics> {
    let normalized = normalize(network)?;
    let m = normalized.num_centers();
    if normalized.population == 0 {
        return Ok(Metrics::zeros(m));
    }

    let s_ld = normalized.ld_service[0];
    let tol = Tolerances::default();
    if let Some(t) = normalized
        .ld_service
        .iter()
        .position(|&s| !nearly_equal(s, s_ld, tol))
    {
        return Err(SolverError::Unsupported {
            what: format!(
                "MVA needs a constant load-dependent service time (entry {} differs)",
                t + 1
            ),
        });
    }

    let mut demands = normalized.li_demands.clone();
    demands.push(s_ld);

    let mut queue = vec![0.0; m];
    let mut residence = vec![0.0; m];
    let mut x: Real = 0.0;
    for n in 1..=normalized.population {
        for (r, (d, q)) in residence.iter_mut().zip(demands.iter().zip(&queue)) {
            *r = d * (1.0 + q);
        }
        let total = normalized.think_time + residence.iter().sum::<Real>();
        if total == 0.0 {
            return Err(SolverError::NumericalDegeneracy {
                what: "zero total residence time",
                population: n,
                shift: 1,
            });
        }
        x = n as Real / total;
        for (q, r) in queue.iter_mut().zip(&residence) {
            *q = x * r;
        }
    }

    let visits = &normalized.visits;
    Ok(Metrics {
        utilization: demands.iter().map(|d| d * x).collect(),
        response_time: residence
            .iter()
            .zip(visits)
            .map(|(r, &v)| if v > 0.0 { r / v } else { 0.0 })
            .collect(),
        queue_length: queue,
        throughput: visits.iter().map(|v| x * v).collect(),
    })
}
