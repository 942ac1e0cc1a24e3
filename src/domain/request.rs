use std::sync::Arc;

use super::zone::Zone;

/// A single reservation, immutable after load.
///
/// `real_start`/`real_end` are computed once at construction time,
/// mirroring `original_source/CarSharing/Request.py`.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: String,
    pub zone: Arc<Zone>,
    pub day: u32,
    pub start: u32,
    pub duration: u32,
    pub candidate_vehicles: Vec<String>,
    pub penalty1: u64,
    pub penalty2: u64,
    /// Dense 0..|R|-1 position, used to index `OverlapIndex` rows.
    pub index: usize,
    pub real_start: i64,
    pub real_end: i64,
}

const MINUTES_PER_DAY: i64 = 1440;

impl Request {
    pub fn new(
        id: impl Into<String>,
        zone: Arc<Zone>,
        day: u32,
        start: u32,
        duration: u32,
        candidate_vehicles: Vec<String>,
        penalty1: u64,
        penalty2: u64,
        index: usize,
    ) -> Self {
        let real_start = day as i64 * MINUTES_PER_DAY + start as i64;
        let real_end = real_start + duration as i64;
        Request {
            id: id.into(),
            zone,
            day,
            start,
            duration,
            candidate_vehicles,
            penalty1,
            penalty2,
            index,
            real_start,
            real_end,
        }
    }
}
