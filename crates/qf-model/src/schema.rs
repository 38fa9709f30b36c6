//! Model schema definitions.

use qf_solver::{Network, SolverError, multi_server_service};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    pub version: u32,
    pub name: String,
    pub population: usize,
    #[serde(default)]
    pub think_time: f64,
    #[serde(default)]
    pub centers: Vec<CenterDef>,
    pub load_dependent: LoadDependentDef,
}

/// Load-independent queueing center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CenterDef {
    pub id: String,
    pub name: String,
    pub service_time: f64,
    #[serde(default = "default_visits")]
    pub visits: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadDependentDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_visits")]
    pub visits: f64,
    pub service: LoadDependentServiceDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LoadDependentServiceDef {
    /// Same service time at every population
    Constant { service_time: f64 },
    /// `service_time / min(t, servers)`
    MultiServer { service_time: f64, servers: usize },
    /// Explicit per-population service times, one per request
    Table { service_times: Vec<f64> },
}

fn default_visits() -> f64 {
    1.0
}

impl ModelDef {
    /// Build the solver network described by this model.
    pub fn to_network(&self) -> Result<Network, SolverError> {
        let n = self.population;
        let ld_service = match &self.load_dependent.service {
            LoadDependentServiceDef::Constant { service_time } => vec![*service_time; n],
            LoadDependentServiceDef::MultiServer {
                service_time,
                servers,
            } => multi_server_service(*service_time, *servers, n)?,
            LoadDependentServiceDef::Table { service_times } => service_times.clone(),
        };
        let li_service = self.centers.iter().map(|c| c.service_time).collect();
        let visits = self
            .centers
            .iter()
            .map(|c| c.visits)
            .chain(std::iter::once(self.load_dependent.visits))
            .collect();
        Ok(Network::new(n, li_service, ld_service, visits).with_think_time(self.think_time))
    }

    /// Center names in metric order: load-independent centers, then the
    /// load-dependent center.
    pub fn center_names(&self) -> Vec<&str> {
        self.centers
            .iter()
            .map(|c| c.name.as_str())
            .chain(std::iter::once(self.load_dependent.name.as_str()))
            .collect()
    }

    /// Whether the population can be changed without editing the service table.
    pub fn supports_population_override(&self) -> bool {
        !matches!(
            self.load_dependent.service,
            LoadDependentServiceDef::Table { .. }
        )
    }
}
