use std::collections::HashSet;

/// A geographic region. A vehicle lives in exactly one zone at a time.
/// A zone is never a member of its own `neighbours` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub neighbours: HashSet<String>,
}

impl Zone {
    pub fn new(id: impl Into<String>, neighbours: HashSet<String>) -> Self {
        Zone {
            id: id.into(),
            neighbours,
        }
    }

    /// True if `zone_id` is this zone's own id or one of its neighbours.
    pub fn accepts(&self, zone_id: &str) -> bool {
        zone_id == self.id || self.neighbours.contains(zone_id)
    }
}
