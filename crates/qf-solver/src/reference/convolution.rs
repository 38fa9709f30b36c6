//! Buzen's convolution algorithm with one load-dependent center.
//!
//! Normalizing constants grow or shrink geometrically with the population,
//! so this is only reliable for moderate populations and service rates that
//! do not vary too steeply.

use crate::error::{SolverError, SolverResult};
use crate::extract::Metrics;
use crate::network::Network;
use crate::normalize::normalize;
use qf_core::{Real, ensure_finite};

/// Solve `network` via normalizing constants.
pub fn convolution(network: &Network) -> SolverResult<Metrics> {
    let normalized = normalize(network)?;
    let m = normalized.num_centers();
    let target = normalized.population;
    if target == 0 {
        return Ok(Metrics::zeros(m));
    }

    // Delay center: Z^k / k!
    let mut g = vec![1.0; target + 1];
    for k in 1..=target {
        g[k] = g[k - 1] * normalized.think_time / k as Real;
    }
    // Fold in load-independent centers: g(n) += d * g(n - 1)
    for &d in &normalized.li_demands {
        for n in 1..=target {
            g[n] += d * g[n - 1];
        }
    }

    // Load-dependent center: prod_{j <= k} Sld[j]
    let mut f_ld = vec![1.0; target + 1];
    for k in 1..=target {
        f_ld[k] = f_ld[k - 1] * normalized.ld_service[k - 1];
    }

    let big_g: Vec<Real> = (0..=target)
        .map(|n| (0..=n).map(|k| g[n - k] * f_ld[k]).sum::<Real>())
        .collect();
    let g_n = ensure_finite(big_g[target], "normalizing constant")?;
    if g_n == 0.0 {
        return Err(SolverError::NumericalDegeneracy {
            what: "zero normalizing constant",
            population: target,
            shift: 1,
        });
    }

    let x = big_g[target - 1] / g_n;

    let mut queue = Vec::with_capacity(m);
    for &d in &normalized.li_demands {
        let mut power = 1.0;
        let mut q = 0.0;
        for k in 1..=target {
            power *= d;
            q += power * big_g[target - k];
        }
        queue.push(q / g_n);
    }
    let marginal: Vec<Real> = (0..=target)
        .map(|k| f_ld[k] * g[target - k] / g_n)
        .collect();
    queue.push(
        marginal
            .iter()
            .enumerate()
            .map(|(k, p)| k as Real * p)
            .sum::<Real>(),
    );

    let mut utilization: Vec<Real> = normalized.li_demands.iter().map(|d| d * x).collect();
    utilization.push(1.0 - marginal[0]);

    let visits = &normalized.visits;
    let throughput: Vec<Real> = visits.iter().map(|v| x * v).collect();
    let response_time = queue
        .iter()
        .zip(&throughput)
        .map(|(q, &xc)| if xc > 0.0 { q / xc } else { 0.0 })
        .collect();

    Ok(Metrics {
        utilization,
        response_time,
        queue_length: queue,
        throughput,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_server_station_with_think_time() {
        // Machine-repairman: 2 requests, think time 1, one two-server station
        // with service time 1. States k = 0, 1, 2 at the station have weights
        // 1/2, 1, 1/2, so p = (1/4, 1/2, 1/4).
        let net = Network::multi_server(2, vec![], 1.0, 2, vec![1.0])
            .unwrap()
            .with_think_time(1.0);
        let metrics = convolution(&net).unwrap();
        assert!((metrics.queue_length[0] - 1.0).abs() < 1e-12);
        assert!((metrics.utilization[0] - 0.75).abs() < 1e-12);
        assert!((metrics.throughput[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_demands_are_degenerate() {
        let net = Network::new(1, vec![0.0], vec![0.0], vec![1.0, 1.0]);
        assert!(matches!(
            convolution(&net).unwrap_err(),
            SolverError::NumericalDegeneracy { .. }
        ));
    }
}
