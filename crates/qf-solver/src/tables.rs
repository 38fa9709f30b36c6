//! Dense population-by-shift tables filled by the recurrence.
//!
//! All accessors take the population `n` in `0..=N` and the shift `t` in
//! `1..=N+1`. Cells outside the filled domain read as zero, which doubles as
//! the `n = 0` boundary.

use nalgebra::DMatrix;
use qf_core::Real;

/// Flow-equivalent demand, response time, queue length and throughput tables
/// of one recurrence run.
///
/// Center index `c` follows the recurrence numbering: 0 is the delay center,
/// `1..M-1` the load-independent centers and `M` the load-dependent center.
/// Queue lengths are not kept for the delay center.
#[derive(Clone, Debug)]
pub struct RecurrenceTables {
    population: usize,
    centers: usize,
    demand: DMatrix<Real>,
    throughput: DMatrix<Real>,
    response: Vec<DMatrix<Real>>,
    queue: Vec<DMatrix<Real>>,
}

impl RecurrenceTables {
    /// Zeroed tables for population `population` and `centers` queueing centers.
    pub fn new(population: usize, centers: usize) -> Self {
        let rows = population + 1;
        let cols = population + 1;
        Self {
            population,
            centers,
            demand: DMatrix::zeros(rows, cols),
            throughput: DMatrix::zeros(rows, cols),
            response: vec![DMatrix::zeros(rows, cols); centers + 1],
            queue: vec![DMatrix::zeros(rows, cols); centers],
        }
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Number of queueing centers M.
    pub fn centers(&self) -> usize {
        self.centers
    }

    /// Flow-equivalent demand `DM[n][t]`.
    pub fn demand(&self, n: usize, t: usize) -> Real {
        self.demand[(n, t - 1)]
    }

    /// System throughput `Xs[n][t]`.
    pub fn throughput(&self, n: usize, t: usize) -> Real {
        self.throughput[(n, t - 1)]
    }

    /// Residence time `R[c][n][t]`.
    pub fn response(&self, c: usize, n: usize, t: usize) -> Real {
        self.response[c][(n, t - 1)]
    }

    /// Queue length `Q[c][n][t]` for `c` in `1..=M`.
    pub fn queue(&self, c: usize, n: usize, t: usize) -> Real {
        self.queue[c - 1][(n, t - 1)]
    }

    pub(crate) fn set_demand(&mut self, n: usize, t: usize, value: Real) {
        self.demand[(n, t - 1)] = value;
    }

    pub(crate) fn set_throughput(&mut self, n: usize, t: usize, value: Real) {
        self.throughput[(n, t - 1)] = value;
    }

    pub(crate) fn set_response(&mut self, c: usize, n: usize, t: usize, value: Real) {
        self.response[c][(n, t - 1)] = value;
    }

    pub(crate) fn set_queue(&mut self, c: usize, n: usize, t: usize, value: Real) {
        self.queue[c - 1][(n, t - 1)] = value;
    }
}
