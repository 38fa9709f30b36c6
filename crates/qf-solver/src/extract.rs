//! Per-center metrics read from completed recurrence tables.

use crate::normalize::NormalizedNetwork;
use crate::tables::RecurrenceTables;
use qf_core::Real;
use serde::{Deserialize, Serialize};

/// Steady-state metrics, one entry per queueing center: load-independent
/// centers in input order, then the load-dependent center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub utilization: Vec<Real>,
    /// Response time per visit
    pub response_time: Vec<Real>,
    pub queue_length: Vec<Real>,
    pub throughput: Vec<Real>,
}

impl Metrics {
    /// All-zero metrics for `centers` centers.
    pub fn zeros(centers: usize) -> Self {
        Self {
            utilization: vec![0.0; centers],
            response_time: vec![0.0; centers],
            queue_length: vec![0.0; centers],
            throughput: vec![0.0; centers],
        }
    }

    pub fn num_centers(&self) -> usize {
        self.throughput.len()
    }

    /// Requests queued at the centers (excludes the delay center).
    pub fn total_queue_length(&self) -> Real {
        self.queue_length.iter().sum()
    }
}

/// Read final metrics from row `n = N`, shift `t = 1`, undoing the
/// visit-ratio rescaling.
///
/// Centers with a zero visit ratio are never visited and report zero
/// response time instead of dividing by zero.
pub fn extract(network: &NormalizedNetwork, tables: &RecurrenceTables) -> Metrics {
    let n = network.population;
    let m = network.num_centers();
    let xs = tables.throughput(n, 1);
    let mut metrics = Metrics::zeros(m);

    for c in 1..=m {
        let v = network.visits[c - 1];
        let demand = if c < m {
            network.li_demands[c - 1]
        } else {
            tables.demand(n, 1)
        };
        let i = c - 1;
        metrics.throughput[i] = xs * v;
        metrics.queue_length[i] = tables.queue(c, n, 1);
        metrics.response_time[i] = if v > 0.0 {
            tables.response(c, n, 1) / v
        } else {
            0.0
        };
        // U = D * X / V, with X = Xs * V
        metrics.utilization[i] = demand * xs;
    }

    metrics
}
