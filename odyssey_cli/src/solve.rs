use std::{path::PathBuf, time::Duration};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use odyssey_optimizer::{
    error::TourError,
    milp::milp_params::MilpParams,
    solver::{solver_params::TourSolverParams, tour_solver::TourSolver},
    tsp::tour::Tour,
};
use tracing::{info, warn};

use crate::{
    output::{tour_table, write_json},
    parsers,
    provider_args::ProviderArgs,
};

#[derive(Args)]
pub struct SolveArgs {
    #[command(flatten)]
    provider: ProviderArgs,

    /// Timeout for the solver (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// Maximum number of branch-and-bound nodes
    #[arg(long)]
    node_limit: Option<usize>,

    /// Write the tour as JSON to this file
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let locations = args.provider.load_locations()?;
    let provider = args.provider.build_provider(&locations)?;
    let matrix = args.provider.build_matrix(&locations, &provider)?;

    let solver = TourSolver::new(TourSolverParams {
        matrix: args.provider.matrix_params(),
        milp: MilpParams {
            time_limit: args.timeout,
            node_limit: args.node_limit,
            ..MilpParams::default()
        },
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})")?);
    spinner.set_message("Searching optimal tour");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = solver.solve_matrix(&matrix);
    spinner.finish_and_clear();

    let tour = match result {
        Ok(tour) => tour,
        Err(TourError::ModelTimeLimit {
            incumbent: Some(tour),
        }) => {
            warn!("Limit reached, the tour below is the best found but may not be optimal");
            tour
        }
        Err(error) => return Err(error.into()),
    };

    println!("{}", tour_table(&tour, &locations));
    info!(cost = tour.cost(), "Tour: {}", format_stops(&tour));

    if let Some(out) = args.out {
        write_json(&tour, &out)?;
        info!("Tour written to {}", out.display());
    }

    Ok(())
}

fn format_stops(tour: &Tour) -> String {
    tour.stops()
        .iter()
        .map(|stop| stop.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
