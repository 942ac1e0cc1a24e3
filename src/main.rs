use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use carshare_annealer::cancellation::CancellationToken;
use carshare_annealer::cli::Cli;
use carshare_annealer::config::Config;
use carshare_annealer::io::{parse_input, write_solution};
use carshare_annealer::worker_pool;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> carshare_annealer::Result<()> {
    let input_file = File::open(&cli.input)?;
    let problem = std::sync::Arc::new(parse_input(BufReader::new(input_file))?);

    info!(
        requests = problem.requests.len(),
        zones = problem.zones.len(),
        vehicles = problem.vehicles.len(),
        "parsed problem instance"
    );

    let config = Config::from_env();
    let cancellation = CancellationToken::new();
    cancellation
        .install_ctrlc_handler()
        .expect("failed to install Ctrl-C handler");
    cancellation.arm_timer(cli.runtime_seconds);

    let threads = cli.resolved_threads();
    let seed = cli.resolved_seed();
    info!(threads, seed, "starting worker pool");

    let restart_on_budget = cli.runtime_seconds > 0;
    let outcome = worker_pool::run(
        &problem,
        &config,
        &cancellation,
        threads,
        seed,
        restart_on_budget,
    )?;

    info!(
        worker_id = outcome.worker_id,
        cost = outcome.result.solution.cost,
        aborted = outcome.result.aborted,
        "best solution selected"
    );

    let mut output_file = File::create(&cli.output)?;
    write_solution(&mut output_file, &outcome.result.solution)?;

    let cost = outcome.result.solution.cost.unwrap_or(-1);
    let cost_label = if outcome.result.aborted {
        format!("cost={cost} (aborted)").yellow()
    } else {
        format!("cost={cost}").green()
    };
    println!(
        "solved: {cost_label} requests={} vehicles={} -> {}",
        problem.requests.len(),
        problem.vehicles.len(),
        cli.output.display()
    );
    info!(path = %cli.output.display(), "solution written");

    Ok(())
}
