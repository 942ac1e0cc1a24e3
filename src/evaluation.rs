//! `CostEvaluator`: feasibility and total cost of a candidate
//! assignment. Ported from
//! `original_source/CarSharing/Solution.py::feasible_cost`.

use crate::domain::Solution;
use crate::error::CarshareError;

/// `i64::MAX` stands in for `+infinity`: an infeasible solution's cost
/// is never otherwise used in arithmetic, since moves are designed to
/// never produce one.
pub const INFEASIBLE_COST: i64 = i64::MAX;

/// Returns `(feasible, cost)`. `cost == INFEASIBLE_COST` iff
/// `!feasible`. Never mutates `solution.cost` — callers that want the
/// cache populated use [`evaluate_and_cache`].
pub fn evaluate(solution: &Solution) -> (bool, i64) {
    let problem = &solution.problem;
    let mut cost: i64 = 0;

    for (&req_index, car) in solution.req_car.iter() {
        let request = &problem.requests[req_index];

        let zone = match solution.car_zone.get(car) {
            Some(zone) => zone,
            None => {
                // A car assigned to a request but missing from car_zone
                // is a program bug, not a feasibility question.
                return (false, INFEASIBLE_COST);
            }
        };

        if zone.id == request.zone.id {
            // own zone, no penalty
        } else if request.zone.neighbours.contains(&zone.id) {
            cost += request.penalty2 as i64;
        } else {
            return (false, INFEASIBLE_COST);
        }

        for other_index in problem.overlap.row(req_index) {
            if let Some(other_car) = solution.req_car.get(&other_index) {
                if other_car == car {
                    return (false, INFEASIBLE_COST);
                }
            }
        }
    }

    for req_index in 0..problem.requests.len() {
        if !solution.is_assigned(req_index) {
            cost += problem.requests[req_index].penalty1 as i64;
        }
    }

    (true, cost)
}

/// Like [`evaluate`] but also caches the result on `solution.cost`
/// and turns an invariant-1 violation into an error instead of a
/// silently infeasible cost, for callers (e.g. the annealer) that must
/// treat it as a program bug rather than a rejected move.
pub fn evaluate_and_cache(solution: &mut Solution) -> Result<(bool, i64), CarshareError> {
    for (_, car) in solution.req_car.iter() {
        if !solution.car_zone.contains_key(car) {
            return Err(CarshareError::InvariantViolation(format!(
                "car {car} assigned to a request but missing from car_zone"
            )));
        }
    }
    let (feasible, cost) = evaluate(solution);
    solution.cost = Some(cost);
    Ok((feasible, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Problem, Request, Zone};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn single_zone_problem() -> Arc<Problem> {
        let zone_a = Arc::new(Zone::new("A", HashSet::new()));
        let request = Request::new(
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
            vec![request],
            vec![zone_a],
            vec!["v1".to_string()],
            1,
        ))
    }

    #[test]
    fn scenario_s1_singleton_assigned_in_home_zone_is_free() {
        let problem = single_zone_problem();
        let mut solution = Solution::new(Arc::clone(&problem));
        solution
            .car_zone
            .insert("v1".to_string(), Arc::clone(&problem.zones[0]));
        solution.req_car.insert(0, "v1".to_string());

        let (feasible, cost) = evaluate(&solution);
        assert!(feasible);
        assert_eq!(cost, 0);
    }

    #[test]
    fn unassigned_request_incurs_penalty1() {
        let problem = single_zone_problem();
        let solution = Solution::new(Arc::clone(&problem));
        let (feasible, cost) = evaluate(&solution);
        assert!(feasible);
        assert_eq!(cost, 100);
    }

    #[test]
    fn neighbour_zone_incurs_penalty2() {
        let zone_a = Arc::new(Zone::new("A", HashSet::from(["B".to_string()])));
        let zone_b = Arc::new(Zone::new("B", HashSet::from(["A".to_string()])));
        let request = Request::new(
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
        let problem = Arc::new(Problem::new(
            vec![request],
            vec![zone_a, zone_b.clone()],
            vec!["v1".to_string()],
            1,
        ));
        let mut solution = Solution::new(Arc::clone(&problem));
        solution.car_zone.insert("v1".to_string(), zone_b);
        solution.req_car.insert(0, "v1".to_string());

        let (feasible, cost) = evaluate(&solution);
        assert!(feasible);
        assert_eq!(cost, 50);
    }

    #[test]
    fn far_zone_is_infeasible() {
        let zone_a = Arc::new(Zone::new("A", HashSet::new()));
        let zone_c = Arc::new(Zone::new("C", HashSet::new()));
        let request = Request::new(
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
        let problem = Arc::new(Problem::new(
            vec![request],
            vec![zone_a, zone_c.clone()],
            vec!["v1".to_string()],
            1,
        ));
        let mut solution = Solution::new(Arc::clone(&problem));
        solution.car_zone.insert("v1".to_string(), zone_c);
        solution.req_car.insert(0, "v1".to_string());

        let (feasible, cost) = evaluate(&solution);
        assert!(!feasible);
        assert_eq!(cost, INFEASIBLE_COST);
    }

    #[test]
    fn overlapping_requests_on_same_car_is_infeasible() {
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
        let r2 = Request::new(
            "r2",
            Arc::clone(&zone_a),
            0,
            30,
            60,
            vec!["v1".to_string()],
            100,
            50,
            1,
        );
        let problem = Arc::new(Problem::new(
            vec![r1, r2],
            vec![zone_a.clone()],
            vec!["v1".to_string()],
            1,
        ));
        let mut solution = Solution::new(Arc::clone(&problem));
        solution.car_zone.insert("v1".to_string(), zone_a);
        solution.req_car.insert(0, "v1".to_string());
        solution.req_car.insert(1, "v1".to_string());

        let (feasible, cost) = evaluate(&solution);
        assert!(!feasible);
        assert_eq!(cost, INFEASIBLE_COST);
    }
}
