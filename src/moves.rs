//! Atomic mutation operators applied to a candidate [`Solution`] during
//! the annealing inner loop. Each returns `true` iff it actually
//! changed the solution; a `false` return means "try a different
//! move", not an error. Ported from the five mutator methods on
//! `original_source/CarSharing/Solution.py::Solution`.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Solution;
use crate::repair::greedy_repair;

/// M1: move a request to a car parked in a neighbouring zone. Never
/// moves back to the request's own zone, and never moves to another
/// car already in the same zone as the current one (that's M3's job).
pub fn move_to_neighbour(solution: &mut Solution, req_index: usize, rng: &mut impl Rng) -> bool {
    if !solution.is_assigned(req_index) {
        return false;
    }

    let current_car = solution.req_car.get(&req_index).unwrap().clone();
    let current_zone_id = solution.car_zone.get(&current_car).unwrap().id.clone();
    let request = &solution.problem.requests[req_index];
    let home_zone_id = request.zone.id.clone();
    let home_neighbours = request.zone.neighbours.clone();
    let candidates = request.candidate_vehicles.clone();

    let allowed_zone_ids: HashSet<String> = candidates
        .iter()
        .filter(|c| **c != current_car)
        .filter_map(|c| solution.car_zone.get(c).map(|z| z.id.clone()))
        .filter(|zone_id| {
            *zone_id != current_zone_id
                && *zone_id != home_zone_id
                && home_neighbours.contains(zone_id)
        })
        .collect();

    if allowed_zone_ids.is_empty() {
        return false;
    }

    let possible_cars: Vec<String> = candidates
        .iter()
        .filter(|c| **c != current_car)
        .filter(|c| {
            solution
                .car_zone
                .get(*c)
                .map(|z| allowed_zone_ids.contains(&z.id))
                .unwrap_or(false)
        })
        .filter(|c| !solution.overlaps_car(c, req_index))
        .cloned()
        .collect();

    let Some(picked_car) = possible_cars.choose(rng) else {
        return false;
    };

    solution.req_car.insert(req_index, picked_car.clone());
    greedy_repair(solution, rng);
    true
}

/// M2: move a request currently served from a neighbouring zone back
/// into a car parked in its own home zone, if one is free to take it.
pub fn neighbour_to_self(solution: &mut Solution, req_index: usize, rng: &mut impl Rng) -> bool {
    if !solution.is_assigned(req_index) {
        return false;
    }

    let current_car = solution.req_car.get(&req_index).unwrap().clone();
    let current_zone_id = solution.car_zone.get(&current_car).unwrap().id.clone();
    let request = &solution.problem.requests[req_index];
    let home_zone_id = request.zone.id.clone();

    if current_zone_id == home_zone_id {
        return false;
    }

    for car in request.candidate_vehicles.clone() {
        if car == current_car {
            continue;
        }
        let in_home_zone = solution
            .car_zone
            .get(&car)
            .map(|z| z.id == home_zone_id)
            .unwrap_or(false);
        if in_home_zone && !solution.overlaps_car(&car, req_index) {
            solution.req_car.insert(req_index, car);
            greedy_repair(solution, rng);
            return true;
        }
    }

    false
}

/// M3: swap the car serving a request for a different car parked in
/// the same zone as the current car.
pub fn change_car_in_zone(solution: &mut Solution, req_index: usize, rng: &mut impl Rng) -> bool {
    if !solution.is_assigned(req_index) {
        return false;
    }

    let current_car = solution.req_car.get(&req_index).unwrap().clone();
    let current_zone_id = solution.car_zone.get(&current_car).unwrap().id.clone();
    let candidates = solution.problem.requests[req_index]
        .candidate_vehicles
        .clone();

    for car in candidates {
        if car == current_car {
            continue;
        }
        let in_same_zone = solution
            .car_zone
            .get(&car)
            .map(|z| z.id == current_zone_id)
            .unwrap_or(false);
        if in_same_zone && !solution.overlaps_car(&car, req_index) {
            solution.req_car.insert(req_index, car);
            greedy_repair(solution, rng);
            return true;
        }
    }

    false
}

/// M4: unassign a single request, then let greedy repair try to place
/// others that may now have room.
pub fn unassign_request(solution: &mut Solution, req_index: usize, rng: &mut impl Rng) -> bool {
    if !solution.is_assigned(req_index) {
        return false;
    }
    solution.req_car.remove(&req_index);
    greedy_repair(solution, rng);
    true
}

/// M5: unassign a car entirely, freeing its zone claim and every
/// request it was serving, then repair.
pub fn unassign_car(solution: &mut Solution, car: &str, rng: &mut impl Rng) -> bool {
    if !solution.car_zone.contains_key(&car.to_string()) {
        return false;
    }
    solution.car_zone.remove(&car.to_string());
    let orphaned: Vec<usize> = solution.requests_for_car(car).collect();
    for req_index in orphaned {
        solution.req_car.remove(&req_index);
    }
    greedy_repair(solution, rng);
    true
}
