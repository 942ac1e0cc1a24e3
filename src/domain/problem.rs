use std::collections::HashMap;
use std::sync::Arc;

use super::request::Request;
use super::zone::Zone;
use crate::overlap::OverlapIndex;

/// Immutable input, shared read-only across workers.
#[derive(Debug, Clone)]
pub struct Problem {
    pub requests: Vec<Request>,
    pub request_map: HashMap<String, usize>,
    pub zones: Vec<Arc<Zone>>,
    pub zone_map: HashMap<String, Arc<Zone>>,
    pub vehicles: Vec<String>,
    pub days: u32,
    pub overlap: OverlapIndex,
}

impl Problem {
    /// Build a `Problem` from already-resolved requests and zones
    /// (`Request::zone` must already point at an entry of `zones`).
    /// The overlap index is computed here from each request's
    /// `(real_start, real_end)` pair.
    pub fn new(
        requests: Vec<Request>,
        zones: Vec<Arc<Zone>>,
        vehicles: Vec<String>,
        days: u32,
    ) -> Self {
        let request_map = requests
            .iter()
            .map(|r| (r.id.clone(), r.index))
            .collect();
        let zone_map = zones
            .iter()
            .map(|z| (z.id.clone(), Arc::clone(z)))
            .collect();
        let intervals: Vec<(i64, i64)> = requests.iter().map(|r| (r.real_start, r.real_end)).collect();
        let overlap = OverlapIndex::build(&intervals);

        Problem {
            requests,
            request_map,
            zones,
            zone_map,
            vehicles,
            days,
            overlap,
        }
    }

    pub fn request_by_id(&self, id: &str) -> Option<&Request> {
        self.request_map.get(id).map(|&i| &self.requests[i])
    }
}
