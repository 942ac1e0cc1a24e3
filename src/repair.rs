//! Randomised greedy repair: fills in unassigned requests after a move
//! changes the assignment. Ported from
//! `original_source/CarSharing/Solution.py::greedy_assign`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Solution;

/// Re-run greedy assignment over every currently unassigned request, in
/// random order. Mutates `solution` in place; never produces an
/// infeasible assignment, only leaves requests unassigned when no
/// candidate car works.
pub fn greedy_repair(solution: &mut Solution, rng: &mut impl Rng) {
    let mut to_assign = solution.unassigned_indices();
    to_assign.shuffle(rng);
    greedy_assign(solution, &to_assign, rng);
}

/// Greedily assign each request index in `to_assign`, in the order
/// given. Used both by [`greedy_repair`] (random order) and by initial
/// solution construction (whatever order the caller chooses).
pub fn greedy_assign(solution: &mut Solution, to_assign: &[usize], rng: &mut impl Rng) {
    for &req_index in to_assign {
        let request = &solution.problem.requests[req_index];
        let mut selected_car: Option<String> = None;
        let mut free_cars: Vec<String> = Vec::new();
        let mut possible_neighbours: Vec<String> = Vec::new();

        for car in &request.candidate_vehicles {
            let zone = match solution.car_zone.get(car) {
                Some(zone) => zone,
                None => {
                    if !free_cars.contains(car) {
                        free_cars.push(car.clone());
                    }
                    continue;
                }
            };

            if zone.id == request.zone.id {
                if !solution.overlaps_car(car, req_index) {
                    selected_car = Some(car.clone());
                    break;
                }
            } else if request.zone.neighbours.contains(&zone.id)
                && !solution.overlaps_car(car, req_index)
                && !possible_neighbours.contains(car)
            {
                possible_neighbours.push(car.clone());
            }
        }

        let selected_car = match selected_car {
            Some(car) => car,
            None if !possible_neighbours.is_empty() => {
                possible_neighbours.choose(rng).unwrap().clone()
            }
            None if !free_cars.is_empty() => {
                let car = free_cars.choose(rng).unwrap().clone();
                let request_zone = solution.problem.requests[req_index].zone.clone();
                solution.car_zone.insert(car.clone(), request_zone);
                car
            }
            None => continue,
        };

        solution.req_car.insert(req_index, selected_car);
    }
}
