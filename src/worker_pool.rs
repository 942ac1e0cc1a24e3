//! Runs N independent annealing jobs in parallel and picks the best.
//! Generalises the teacher's `par_iter`-based neighbour scoring
//! (`solver/tabu_search/neighborhood.rs::find_neighbours`) from
//! data-parallelism over a single solution's neighbours to
//! job-parallelism over independent annealing runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use crate::annealer::{self, AnnealResult};
use crate::cancellation::CancellationToken;
use crate::config::Config;
use crate::domain::{Problem, Solution};
use crate::error::Result;

pub struct WorkerOutcome {
    pub worker_id: usize,
    pub result: AnnealResult,
}

/// Spawn `threads` independent annealing jobs against the same
/// `problem`, each seeded deterministically from `base_seed` offset by
/// its worker id, and return the lowest-cost result. Ties break in
/// favour of the lower worker id (stable sort is enough: workers are
/// produced and collected in id order).
///
/// `restart_on_budget` mirrors §4.7's "start over with a fresh
/// annealer until cancellation arrives": when a wall-clock timer is
/// armed (`runtime_seconds > 0`), a worker whose cooling schedule
/// finishes before the timer fires restarts from a fresh greedy
/// assignment rather than idling, keeping the best result seen across
/// restarts. With no timer armed the schedule's own completion is the
/// only termination signal, so a worker runs exactly one annealer pass.
pub fn run(
    problem: &std::sync::Arc<Problem>,
    config: &Config,
    cancellation: &CancellationToken,
    threads: usize,
    base_seed: u64,
    restart_on_budget: bool,
) -> Result<WorkerOutcome> {
    let outcomes: Vec<Result<WorkerOutcome>> = (0..threads)
        .into_par_iter()
        .map(|worker_id| {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(worker_id as u64));
            let mut best: Option<AnnealResult> = None;
            loop {
                let result = annealer::run(problem, config, cancellation, &mut rng)?;
                let aborted = result.aborted;
                best = Some(match best {
                    None => result,
                    Some(current) if result.solution.cost <= current.solution.cost => result,
                    Some(current) => current,
                });
                if aborted || !restart_on_budget {
                    break;
                }
            }
            let result = best.expect("at least one annealer pass always runs");
            info!(
                worker_id,
                cost = result.solution.cost,
                iterations_run = result.iterations_run,
                "worker finished"
            );
            Ok(WorkerOutcome { worker_id, result })
        })
        .collect();

    let mut best: Option<WorkerOutcome> = None;
    for outcome in outcomes {
        let outcome = outcome?;
        best = Some(match best {
            None => outcome,
            Some(current) => {
                if solution_cost(&outcome.result.solution) < solution_cost(&current.result.solution) {
                    outcome
                } else {
                    current
                }
            }
        });
    }

    best.ok_or_else(|| crate::error::CarshareError::InvariantViolation("worker pool ran zero workers".into()))
}

fn solution_cost(solution: &Solution) -> i64 {
    solution.cost.unwrap_or(i64::MAX)
}
