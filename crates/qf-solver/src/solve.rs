//! High-level solver interface.

use crate::error::SolverResult;
use crate::extract::{Metrics, extract};
use crate::network::Network;
use crate::normalize::normalize;
use crate::recurrence::{LayerControl, LayerProgress, fill_tables};
use crate::tables::RecurrenceTables;
use tracing::debug;

/// Solve a network with the conditional MVA recursion.
///
/// This function:
/// 1. Validates the network and rescales visit ratios to the load-dependent center
/// 2. Fills the population-by-shift recurrence tables
/// 3. Extracts per-center utilization, response time, queue length and throughput
///
/// A network with zero population returns all-zero metrics without building tables.
pub fn solve(network: &Network) -> SolverResult<Metrics> {
    solve_with_progress(network, None)
}

/// Like [`solve`], calling `progress` after each population layer.
///
/// Returning [`LayerControl::Abort`] from the callback stops the run with
/// [`crate::SolverError::Cancelled`].
pub fn solve_with_progress(
    network: &Network,
    progress: Option<&mut dyn FnMut(LayerProgress) -> LayerControl>,
) -> SolverResult<Metrics> {
    solve_internal(network, progress).map(|(metrics, _)| metrics)
}

/// Solve and also return the filled tables, or `None` for zero population.
pub fn solve_tables(network: &Network) -> SolverResult<(Metrics, Option<RecurrenceTables>)> {
    solve_internal(network, None)
}

fn solve_internal(
    network: &Network,
    progress: Option<&mut dyn FnMut(LayerProgress) -> LayerControl>,
) -> SolverResult<(Metrics, Option<RecurrenceTables>)> {
    let normalized = normalize(network)?;

    if normalized.population == 0 {
        debug!("zero population, skipping recurrence");
        return Ok((Metrics::zeros(normalized.num_centers()), None));
    }

    let tables = fill_tables(&normalized, progress)?;
    let metrics = extract(&normalized, &tables);
    debug!(
        population = normalized.population,
        throughput = tables.throughput(normalized.population, 1),
        "conditional MVA solved"
    );
    Ok((metrics, Some(tables)))
}
