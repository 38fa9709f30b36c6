//! Solver output rendering.

use qf_core::Real;
use qf_solver::Metrics;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CenterReport {
    pub name: String,
    pub utilization: Real,
    pub response_time: Real,
    pub queue_length: Real,
    pub throughput: Real,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub model: String,
    pub population: usize,
    pub centers: Vec<CenterReport>,
}

impl Report {
    pub fn new(model: &str, population: usize, names: &[&str], metrics: &Metrics) -> Self {
        let centers = names
            .iter()
            .enumerate()
            .map(|(i, name)| CenterReport {
                name: name.to_string(),
                utilization: metrics.utilization[i],
                response_time: metrics.response_time[i],
                queue_length: metrics.queue_length[i],
                throughput: metrics.throughput[i],
            })
            .collect();
        Self {
            model: model.to_string(),
            population,
            centers,
        }
    }

    pub fn to_table(&self) -> String {
        let width = self
            .centers
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("Center".len());
        let mut out = String::new();
        let _ = writeln!(out, "{} (N = {})", self.model, self.population);
        let _ = writeln!(
            out,
            "{:<width$}  {:>12}  {:>12}  {:>12}  {:>12}",
            "Center", "Util", "Resp time", "Queue len", "Throughput"
        );
        for c in &self.centers {
            let _ = writeln!(
                out,
                "{:<width$}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}",
                c.name, c.utilization, c.response_time, c.queue_length, c.throughput
            );
        }
        out
    }
}
