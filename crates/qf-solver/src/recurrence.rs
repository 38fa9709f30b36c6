//! Population-by-shift recurrence for the load-dependent center.
//!
//! Layer `n` reads only layer `n - 1` (shifts `t` and `t + 1`), so the tables
//! are filled bottom-up in ascending population and, within a layer, in
//! ascending shift. The flow-equivalent demand is carried forward as
//!
//! ```text
//! DM[1][t] = Sld[t]
//! DM[n][t] = Xs[n-1][t] / Xs[n-1][t+1] * DM[n-1][t]
//! ```
//!
//! which replaces the growing product of service-rate ratios used by plain
//! load-dependent MVA with a ratio of throughputs that are already bounded.

use crate::error::{SolverError, SolverResult};
use crate::normalize::NormalizedNetwork;
use crate::tables::RecurrenceTables;
use qf_core::Real;
use tracing::{debug, trace};

/// Reported after each completed population layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerProgress {
    /// Population of the layer just completed
    pub population: usize,
    /// Target population N
    pub target: usize,
    /// Throughput `Xs[n][1]` of the completed layer
    pub throughput: Real,
}

/// Returned by a progress callback to continue or stop the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerControl {
    Continue,
    Abort,
}

/// Fill the recurrence tables for `network`.
///
/// A completed layer is self-consistent, so aborting from the callback
/// between layers leaves nothing half-written.
pub fn fill_tables(
    network: &NormalizedNetwork,
    mut progress: Option<&mut dyn FnMut(LayerProgress) -> LayerControl>,
) -> SolverResult<RecurrenceTables> {
    let target = network.population;
    let m = network.num_centers();
    let z = network.think_time;
    let mut tables = RecurrenceTables::new(target, m);

    debug!(population = target, centers = m, "filling recurrence tables");

    for n in 1..=target {
        for t in 1..=(target - n + 1) {
            let dm = if n == 1 {
                network.ld_service[t - 1]
            } else {
                let next = tables.throughput(n - 1, t + 1);
                if next == 0.0 || !next.is_finite() {
                    return Err(SolverError::NumericalDegeneracy {
                        what: "zero or non-finite throughput in demand ratio",
                        population: n,
                        shift: t,
                    });
                }
                tables.throughput(n - 1, t) / next * tables.demand(n - 1, t)
            };
            tables.set_demand(n, t, dm);

            tables.set_response(0, n, t, z);
            let mut total = z;
            for (i, &d) in network.li_demands.iter().enumerate() {
                let c = i + 1;
                let r = d * (1.0 + tables.queue(c, n - 1, t));
                tables.set_response(c, n, t, r);
                total += r;
            }
            let r_ld = dm * (1.0 + tables.queue(m, n - 1, t + 1));
            tables.set_response(m, n, t, r_ld);
            total += r_ld;

            if total == 0.0 || !total.is_finite() {
                return Err(SolverError::NumericalDegeneracy {
                    what: "zero or non-finite total residence time",
                    population: n,
                    shift: t,
                });
            }
            let x = n as Real / total;
            tables.set_throughput(n, t, x);

            // Little's law per center
            for c in 1..=m {
                let q = x * tables.response(c, n, t);
                tables.set_queue(c, n, t, q);
            }
        }

        let throughput = tables.throughput(n, 1);
        trace!(population = n, throughput, "layer complete");

        if let Some(cb) = progress.as_mut() {
            let control = cb(LayerProgress {
                population: n,
                target,
                throughput,
            });
            if control == LayerControl::Abort {
                debug!(completed_layers = n, "recurrence aborted by caller");
                return Err(SolverError::Cancelled {
                    completed_layers: n,
                });
            }
        }
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;
    use crate::normalize::normalize;

    fn normalized(net: &Network) -> NormalizedNetwork {
        normalize(net).unwrap()
    }

    #[test]
    fn first_layer_demand_is_service_table() {
        let net = normalized(&Network::new(3, vec![1.0], vec![0.9, 0.45, 0.3], vec![1.0, 1.0]));
        let tables = fill_tables(&net, None).unwrap();
        assert_eq!(tables.demand(1, 1), 0.9);
        assert_eq!(tables.demand(1, 2), 0.45);
        assert_eq!(tables.demand(1, 3), 0.3);
    }

    #[test]
    fn two_server_station_alone() {
        // One two-server station with service time s, nothing else.
        // With two requests both servers are busy, so X = 2 / s.
        let s = 2.0;
        let net = normalized(&Network::new(2, vec![], vec![s, s / 2.0], vec![1.0]));
        let tables = fill_tables(&net, None).unwrap();
        assert!((tables.demand(2, 1) - s / 2.0).abs() < 1e-12);
        assert!((tables.response(1, 2, 1) - s).abs() < 1e-12);
        assert!((tables.throughput(2, 1) - 2.0 / s).abs() < 1e-12);
        assert!((tables.queue(1, 2, 1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn delay_response_is_think_time() {
        let net = normalized(
            &Network::new(2, vec![0.5], vec![1.0, 1.0], vec![1.0, 1.0]).with_think_time(3.0),
        );
        let tables = fill_tables(&net, None).unwrap();
        assert_eq!(tables.response(0, 1, 1), 3.0);
        assert_eq!(tables.response(0, 2, 1), 3.0);
    }

    #[test]
    fn all_zero_demands_are_degenerate() {
        let net = normalized(&Network::new(2, vec![0.0], vec![0.0, 0.0], vec![1.0, 1.0]));
        let err = fill_tables(&net, None).unwrap_err();
        assert!(matches!(
            err,
            SolverError::NumericalDegeneracy {
                population: 1,
                shift: 1,
                ..
            }
        ));
    }

    #[test]
    fn abort_stops_after_requested_layer() {
        let net = normalized(&Network::new(5, vec![1.0], vec![0.5; 5], vec![1.0, 1.0]));
        let mut seen = Vec::new();
        let mut cb = |p: LayerProgress| {
            seen.push(p.population);
            if p.population == 2 {
                LayerControl::Abort
            } else {
                LayerControl::Continue
            }
        };
        let err = fill_tables(&net, Some(&mut cb)).unwrap_err();
        assert_eq!(err, SolverError::Cancelled { completed_layers: 2 });
        assert_eq!(seen, vec![1, 2]);
    }
}
