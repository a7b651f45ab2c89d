#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quadra_api::{Scalar, Settings, Status, Workspace};
use quadra_io::{read_json_problem, write_json_result};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadra")]
#[command(version, about = "Pure Rust ADMM solver for convex quadratic programs")]
struct Cli {
    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem from a JSON file.
    Solve {
        #[arg(long)]
        problem: PathBuf,
        /// Absolute and relative termination tolerance.
        #[arg(long)]
        tol: Option<f64>,
        #[arg(long)]
        max_iters: Option<usize>,
        /// Disable equilibration.
        #[arg(long)]
        no_scaling: bool,
        /// Disable solution polishing.
        #[arg(long)]
        no_polish: bool,
        /// Write the solution and run info to this JSON file.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the solution as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Validate a problem file without solving it.
    Check {
        #[arg(long)]
        problem: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_json);
    match cli.command {
        Commands::Solve {
            problem,
            tol,
            max_iters,
            no_scaling,
            no_polish,
            output,
            json,
        } => solve_command(problem, tol, max_iters, no_scaling, no_polish, output, json),
        Commands::Check { problem } => check_command(problem),
    }
}

fn initialize_tracing(log_json: bool) {
    if log_json {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .try_init()
            .ok();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .ok();
    }
}

#[allow(clippy::too_many_arguments)]
fn solve_command(
    path: PathBuf,
    tol: Option<f64>,
    max_iters: Option<usize>,
    no_scaling: bool,
    no_polish: bool,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut settings = Settings::<Scalar>::default();
    settings.verbose = true;
    if let Some(tolerance) = tol {
        settings.eps_abs = tolerance as Scalar;
        settings.eps_rel = tolerance as Scalar;
    }
    if let Some(iters) = max_iters {
        settings.max_iter = iters;
    }
    if no_scaling {
        settings.scaling = 0;
    }
    if no_polish {
        settings.polishing = false;
    }

    let data = read_json_problem(&path)?;
    let mut workspace =
        Workspace::setup(&data, &settings).with_context(|| format!("setup failed for {path:?}"))?;
    let status = workspace.solve();
    if status != Status::Solved {
        tracing::warn!(status = %status, "solver did not reach the requested accuracy");
    }

    if json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, workspace.solution())?;
        handle.write_all(b"\n")?;
        handle.flush()?;
    } else {
        let info = workspace.info();
        println!(
            "status: {} ({})\nobjective: {:.6}\niterations: {}\npri_res: {:.3e}\ndua_res: {:.3e}",
            info.status,
            info.status.code(),
            info.obj_val,
            info.iter,
            info.pri_res,
            info.dua_res
        );
    }
    if let Some(path) = output {
        write_json_result(path, workspace.solution(), workspace.info())?;
    }
    Ok(())
}

fn check_command(path: PathBuf) -> Result<()> {
    let data = read_json_problem(&path)?;
    data.validate()
        .with_context(|| format!("validation failed for {path:?}"))?;
    println!(
        "problem ok: {} variables, {} constraints, {} + {} nonzeros",
        data.n,
        data.m,
        data.p.nnz(),
        data.a.nnz()
    );
    Ok(())
}
