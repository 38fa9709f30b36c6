mod report;

use clap::{Parser, Subcommand, ValueEnum};
use qf_core::{Real, Timer, max_relative_error, worst_error};
use qf_model::ModelError;
use qf_solver::{LayerControl, LayerProgress, Metrics, Network, SolverError, reference};
use report::Report;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qf-cli")]
#[command(about = "QueueFlow CLI - Closed queueing network solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate model file syntax and values
    Validate {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
    },
    /// Solve a model with conditional MVA
    Solve {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Override the model population (not allowed for tabulated service times)
        #[arg(long)]
        population: Option<usize>,
    },
    /// Compare conditional MVA with a classical reference solver
    Compare {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
        /// Reference solver
        #[arg(long, value_enum, default_value_t = Method::Convolution)]
        method: Method,
        /// Maximum accepted relative deviation
        #[arg(long, default_value_t = 1e-5)]
        rel_tol: Real,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Mva,
    Convolution,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Population override not supported for model '{model}' (tabulated service times)")]
    PopulationOverride { model: String },

    #[error("{method:?} deviates by {deviation:.3e} (tolerance {tolerance:.1e})")]
    ToleranceExceeded {
        method: Method,
        deviation: Real,
        tolerance: Real,
    },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { model_path } => cmd_validate(&model_path),
        Commands::Solve {
            model_path,
            format,
            population,
        } => cmd_solve(&model_path, format, population),
        Commands::Compare {
            model_path,
            method,
            rel_tol,
        } => cmd_compare(&model_path, method, rel_tol),
    }
}

fn cmd_validate(model_path: &Path) -> CliResult<()> {
    println!("Validating model: {}", model_path.display());
    let model = qf_model::load(model_path)?;
    model.to_network()?;
    println!(
        "✓ Model is valid ({} centers, N = {})",
        model.center_names().len(),
        model.population
    );
    Ok(())
}

fn cmd_solve(
    model_path: &Path,
    format: OutputFormat,
    population: Option<usize>,
) -> CliResult<()> {
    let mut model = qf_model::load(model_path)?;
    if let Some(n) = population {
        if !model.supports_population_override() {
            return Err(CliError::PopulationOverride { model: model.name });
        }
        model.population = n;
    }

    let metrics = run_solver(&model.to_network()?)?;
    let report = Report::new(&model.name, model.population, &model.center_names(), &metrics);

    match format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Serialization(e.to_string()))?
        ),
        OutputFormat::Yaml => print!(
            "{}",
            serde_yaml::to_string(&report).map_err(|e| CliError::Serialization(e.to_string()))?
        ),
    }
    Ok(())
}

fn cmd_compare(model_path: &Path, method: Method, rel_tol: Real) -> CliResult<()> {
    let model = qf_model::load(model_path)?;
    let network = model.to_network()?;

    let cmva = run_solver(&network)?;
    let reference = match method {
        Method::Mva => reference::mva(&network)?,
        Method::Convolution => reference::convolution(&network)?,
    };

    let deviation = worst_deviation(&cmva, &reference);
    info!(?method, deviation, "comparison finished");
    println!(
        "{}: max relative deviation vs {:?} = {:.3e}",
        model.name, method, deviation
    );

    if deviation.is_nan() || deviation > rel_tol {
        return Err(CliError::ToleranceExceeded {
            method,
            deviation,
            tolerance: rel_tol,
        });
    }
    println!("✓ Within tolerance {:.1e}", rel_tol);
    Ok(())
}

fn run_solver(network: &Network) -> CliResult<Metrics> {
    let timer = Timer::start("conditional MVA");
    let mut on_layer = |p: LayerProgress| {
        debug!(
            population = p.population,
            target = p.target,
            throughput = p.throughput,
            "layer"
        );
        LayerControl::Continue
    };
    let metrics = qf_solver::solve_with_progress(network, Some(&mut on_layer))?;
    timer.stop_and_print();
    Ok(metrics)
}

fn worst_deviation(a: &Metrics, b: &Metrics) -> Real {
    [
        (&a.utilization, &b.utilization),
        (&a.response_time, &b.response_time),
        (&a.queue_length, &b.queue_length),
        (&a.throughput, &b.throughput),
    ]
    .into_iter()
    .map(|(x, y)| max_relative_error(x, y).unwrap_or(Real::INFINITY))
    .fold(0.0, worst_error)
}
