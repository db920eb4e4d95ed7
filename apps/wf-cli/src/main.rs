use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wf_app::{
    AppResult, RunRequest, RunResponse, analysis_service, project_service, run_service,
};
use wf_results::format_timestamp;

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(about = "WaterFlow CLI - distribution network simulation and leak detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Simulate the project's network and summarize the records
    Simulate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Seed for the random source (overrides the project)
        #[arg(long)]
        seed: Option<u64>,
        /// Generate the leak-free baseline
        #[arg(long)]
        no_leak: bool,
        /// Start of the usage summary window (YYYY-MM-DD HH:MM:SS)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End of the usage summary window (inclusive)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Print per-endpoint usage totals
        #[arg(long)]
        usage: bool,
    },
    /// Simulate, then check the records for flow that does not reconcile
    Detect {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Seed for the random source (overrides the project)
        #[arg(long)]
        seed: Option<u64>,
        /// Relative tolerance (overrides the project)
        #[arg(long, conflicts_with = "strict")]
        tolerance: Option<f64>,
        /// Compare junctions against all endpoints below them, without tolerance
        #[arg(long)]
        strict: bool,
        /// Number of findings to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Simulate {
            project_path,
            seed,
            no_leak,
            from,
            to,
            usage,
        } => {
            let window = match (from, to) {
                (Some(from), Some(to)) => Some(run_service::usage_window(&from, &to)?),
                _ => None,
            };
            let request = RunRequest {
                seed,
                leak_free: no_leak,
                usage_window: window,
            };
            cmd_simulate(&project_path, &request, usage)
        }
        Commands::Detect {
            project_path,
            seed,
            tolerance,
            strict,
            limit,
        } => cmd_detect(&project_path, seed, tolerance, strict, limit),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    // loading validates the schema and resolves the topology
    project_service::load_project(project_path)?;
    println!("✓ Project is valid");
    Ok(())
}

fn print_run(response: &RunResponse) {
    let net = &response.network;
    println!("✓ Simulation completed: {}", response.run_id);
    println!("  Seed: {}", response.seed);
    if let Some(master) = net.master {
        println!("  Master sensor: {}", master);
    }
    println!("  Local junctions: {}", net.local_junctions);
    println!("  Endpoints: {}", net.endpoints);
    for (category, count) in &net.per_category {
        println!("    {:<22} {}", category, count);
    }
    println!("  Records: {}", response.records.len());
}

fn cmd_simulate(project_path: &Path, request: &RunRequest, show_usage: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    println!("Simulating project: {}", project.name);

    let response = run_service::run_simulation(&project, request)?;
    print_run(&response);
    println!("  Usage digest: {}", response.usage_digest);

    if show_usage {
        println!("sensor_id,total");
        for entry in &response.usage {
            println!("{},{}", entry.sensor_id, entry.total);
        }
    }
    Ok(())
}

fn cmd_detect(
    project_path: &Path,
    seed: Option<u64>,
    tolerance: Option<f64>,
    strict: bool,
    limit: usize,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let request = RunRequest {
        seed,
        ..RunRequest::default()
    };
    let response = run_service::run_simulation(&project, &request)?;
    print_run(&response);

    let mode = analysis_service::detection_mode(&project, tolerance, strict);
    println!("Detection: {:?}", mode);
    let report = analysis_service::analyze_records(&response.records, mode)?;

    let Some(summary) = report.summary() else {
        println!("✓ No leaks detected");
        return Ok(());
    };

    println!("Findings: {}", report.len());
    for finding in report.findings.iter().take(limit) {
        println!(
            "  {}  junction {:>6}  flow {:>10.2}  discrepancy {:>10.2}  ({:.2}%)  {}",
            format_timestamp(&finding.timestamp),
            finding.junction_id,
            finding.junction_flow,
            finding.discrepancy,
            finding.percentage,
            finding.path
        );
    }
    if report.len() > limit {
        println!("  ... {} more", report.len() - limit);
    }

    println!("Summary:");
    println!("  First junction: {}", summary.first_junction);
    println!(
        "  Period: {} .. {}",
        format_timestamp(&summary.start),
        format_timestamp(&summary.end)
    );
    println!("  Total discrepancy: {:.2}", summary.total_discrepancy);
    println!("  Total flow: {:.2}", summary.total_flow);
    println!("  Leakage: {:.2}%", summary.percentage);
    let junctions: Vec<String> = summary.junctions.iter().map(|j| j.to_string()).collect();
    println!("  Junctions: {}", junctions.join(", "));
    Ok(())
}
