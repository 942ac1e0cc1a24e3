use std::sync::Arc;

use super::problem::Problem;
use super::zone::Zone;
use crate::random_map::RandomMap;

/// Mutable working state of the optimiser.
///
/// `req_car` is keyed by `Request::index` rather than the request
/// itself: cheaper to hash/clone, and the index is already a stable
/// identity for the lifetime of a `Problem`.
#[derive(Debug, Clone)]
pub struct Solution {
    pub problem: Arc<Problem>,
    pub car_zone: RandomMap<String, Arc<Zone>>,
    pub req_car: RandomMap<usize, String>,
    pub cost: Option<i64>,
}

impl Solution {
    pub fn new(problem: Arc<Problem>) -> Self {
        Solution {
            problem,
            car_zone: RandomMap::new(),
            req_car: RandomMap::new(),
            cost: None,
        }
    }

    /// Shallow copy: the two mappings get their spines duplicated;
    /// `Request`/`Zone` values stay shared via `Arc`/index. Used by
    /// moves that speculatively mutate a solution and roll back on
    /// failure.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn is_assigned(&self, request_index: usize) -> bool {
        self.req_car.contains_key(&request_index)
    }

    /// Requests not currently a key of `req_car`.
    pub fn unassigned_indices(&self) -> Vec<usize> {
        (0..self.problem.requests.len())
            .filter(|i| !self.is_assigned(*i))
            .collect()
    }

    /// Requests currently assigned to `car`.
    pub fn requests_for_car<'a>(&'a self, car: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.req_car
            .iter()
            .filter(move |(_, c)| c.as_str() == car)
            .map(|(&req_index, _)| req_index)
    }

    /// True if any request currently assigned to `car` overlaps
    /// `request_index` in time.
    pub fn overlaps_car(&self, car: &str, request_index: usize) -> bool {
        self.requests_for_car(car)
            .any(|other| self.problem.overlap.get(request_index, other))
    }
}
