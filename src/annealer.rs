//! The simulated-annealing search loop. Ported from
//! `original_source/CarSharing/Problem.py::Problem.run`.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, span, Level};

use std::sync::Arc;

use crate::cancellation::CancellationToken;
use crate::config::Config;
use crate::domain::{Problem, Solution};
use crate::error::Result;
use crate::evaluation::evaluate_and_cache;
use crate::moves;
use crate::repair::greedy_repair;

/// Outcome of one annealing run: the accepted solution when the loop
/// stopped, how many inner-loop iterations actually ran, and whether
/// cancellation cut the run short before the cooling schedule
/// completed.
pub struct AnnealResult {
    pub solution: Solution,
    pub iterations_run: u64,
    pub aborted: bool,
}

enum Move {
    MoveToNeighbour,
    NeighbourToSelf,
    ChangeCarInZone,
    UnassignRequest,
    UnassignCar,
}

/// The seven-entry move bag from the original: `unassign_request` and
/// `unassign_car` each appear twice, making them twice as likely to be
/// picked as the other three moves.
const MOVE_BAG: [Move; 7] = [
    Move::MoveToNeighbour,
    Move::NeighbourToSelf,
    Move::ChangeCarInZone,
    Move::UnassignRequest,
    Move::UnassignRequest,
    Move::UnassignCar,
    Move::UnassignCar,
];

/// Apply a randomly chosen move from [`MOVE_BAG`] to `solution`,
/// targeting a uniformly random currently-assigned request or car.
/// Returns `false` if the chosen target made no state change (an
/// empty `req_car`/`car_zone` map, or a move whose preconditions
/// weren't met) rather than retrying with a different move, matching
/// the original's one-shot-per-iteration behaviour.
fn apply_random_move(solution: &mut Solution, rng: &mut impl Rng) -> bool {
    let chosen = MOVE_BAG.choose(rng).expect("MOVE_BAG is non-empty");
    match chosen {
        Move::MoveToNeighbour => {
            if solution.req_car.is_empty() {
                return false;
            }
            let req_index = *solution.req_car.random_key(rng);
            moves::move_to_neighbour(solution, req_index, rng)
        }
        Move::NeighbourToSelf => {
            if solution.req_car.is_empty() {
                return false;
            }
            let req_index = *solution.req_car.random_key(rng);
            moves::neighbour_to_self(solution, req_index, rng)
        }
        Move::ChangeCarInZone => {
            if solution.req_car.is_empty() {
                return false;
            }
            let req_index = *solution.req_car.random_key(rng);
            moves::change_car_in_zone(solution, req_index, rng)
        }
        Move::UnassignRequest => {
            if solution.req_car.is_empty() {
                return false;
            }
            let req_index = *solution.req_car.random_key(rng);
            moves::unassign_request(solution, req_index, rng)
        }
        Move::UnassignCar => {
            if solution.car_zone.is_empty() {
                return false;
            }
            let car = solution.car_zone.random_key(rng).clone();
            moves::unassign_car(solution, &car, rng)
        }
    }
}

/// Runs one independent annealing search from an initial greedy
/// assignment, cooling geometrically from `config.t_max` down to
/// `config.t_min`, polling `cancellation` between moves.
///
/// `global_best` here follows the original naming exactly: it is the
/// last *accepted* working solution (whether by improvement or by the
/// Metropolis criterion), not the best solution ever observed over the
/// run. Delta-E is computed against this accepted incumbent, not
/// against a running best, and nothing saves the true best before it's
/// superseded. Preserved as-is: the final answer is whatever survived
/// the last acceptance, not a best-of-run snapshot.
pub fn run(
    problem: &Arc<Problem>,
    config: &Config,
    cancellation: &CancellationToken,
    rng: &mut impl Rng,
) -> Result<AnnealResult> {
    let run_span = span!(Level::INFO, "anneal_run", t_max = config.t_max, t_min = config.t_min);
    let _guard = run_span.enter();

    let mut solution = Solution::new(Arc::clone(problem));
    greedy_repair(&mut solution, rng);
    evaluate_and_cache(&mut solution)?;

    let mut global_best = solution.copy();
    let mut working = solution.copy();
    let mut temp = config.t_max;
    let mut iterations_run: u64 = 0;
    let mut aborted = false;

    // `>=`, matching `original_source/CarSharing/Problem.py::run`'s
    // `while temp >= t_min:` literally (a step that lands exactly on
    // `t_min` still runs once more before the loop exits).
    'cooling: while temp >= config.t_min {
        let temp_span = span!(Level::DEBUG, "temperature_step", temp);
        let _temp_guard = temp_span.enter();

        for _ in 0..config.iterations {
            if cancellation.is_cancelled() {
                aborted = true;
                break 'cooling;
            }

            if apply_random_move(&mut working, rng) {
                let (_, cost) = evaluate_and_cache(&mut working)?;
                let delta_e = cost - global_best.cost.expect("cost cached by evaluate_and_cache");

                if delta_e <= 0 {
                    global_best = working.copy();
                    solution = working.copy();
                } else if (-(delta_e as f64) / temp).exp() > rng.gen::<f64>() {
                    global_best = working.copy();
                    solution = working.copy();
                }
            }

            working = solution.copy();
            iterations_run += 1;
        }

        temp *= config.alpha;
        debug!(temp, iterations_run, "cooled one step");
    }

    info!(
        iterations_run,
        final_cost = global_best.cost,
        aborted,
        "annealing run finished"
    );

    Ok(AnnealResult {
        solution: global_best,
        iterations_run,
        aborted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Request, Zone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn tiny_problem() -> Arc<Problem> {
        let zone_a = Arc::new(Zone::new("A", HashSet::new()));
        let r1 = Request::new(
            "r1",
            Arc::clone(&zone_a),
            0,
            0,
            60,
            vec!["v1".to_string()],
            100,
            50,
            0,
        );
        Arc::new(Problem::new(
            vec![r1],
            vec![zone_a],
            vec!["v1".to_string()],
            1,
        ))
    }

    #[test]
    fn run_terminates_and_returns_a_feasible_solution() {
        let problem = tiny_problem();
        let config = Config {
            t_max: 10.0,
            t_min: 3.0,
            iterations: 20,
            alpha: 0.5,
        };
        let cancellation = CancellationToken::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let result = run(&problem, &config, &cancellation, &mut rng).unwrap();

        assert!(!result.aborted);
        assert_eq!(result.iterations_run, 40);
        assert!(result.solution.cost.is_some());
    }

    #[test]
    fn cancellation_cuts_the_run_short() {
        let problem = tiny_problem();
        let config = Config {
            t_max: 1000.0,
            t_min: 1.0,
            iterations: 5000,
            alpha: 0.65,
        };
        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = run(&problem, &config, &cancellation, &mut rng).unwrap();

        assert!(result.aborted);
        assert_eq!(result.iterations_run, 0);
    }
}
