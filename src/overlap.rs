//! Precomputed symmetric conflict matrix between requests.
//!
//! For i < j, with `a`/`b` being requests i/j sorted so `a.real_start
//! <= b.real_start`: `overlap[i][j] = a.real_end >= b.real_start`
//! (closed interval — two back-to-back bookings touching at the
//! boundary minute count as overlapping). The diagonal is always
//! false.

use fixedbitset::FixedBitSet;
use itertools::Itertools;

#[derive(Debug, Clone)]
pub struct OverlapIndex {
    n: usize,
    bits: FixedBitSet,
}

impl OverlapIndex {
    /// `real_start`/`real_end` pairs, one per request, indexed densely
    /// by request index.
    pub fn build(intervals: &[(i64, i64)]) -> Self {
        let n = intervals.len();
        let mut bits = FixedBitSet::with_capacity(n * n);
        for (i, j) in (0..n).tuple_combinations() {
            let (i_start, i_end) = intervals[i];
            let (j_start, j_end) = intervals[j];
            let (earlier_end, later_start) = if i_start <= j_start {
                (i_end, j_start)
            } else {
                (j_end, i_start)
            };
            if earlier_end >= later_start {
                bits.insert(i * n + j);
                bits.insert(j * n + i);
            }
        }
        OverlapIndex { n, bits }
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        self.bits.contains(i * self.n + j)
    }

    /// Indices `j` with `overlap[i][j] = true`, cheap to iterate.
    pub fn row(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let start = i * self.n;
        (0..self.n).filter(move |&j| self.bits.contains(start + j))
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_false() {
        let idx = OverlapIndex::build(&[(0, 60), (30, 90)]);
        assert!(!idx.get(0, 0));
        assert!(!idx.get(1, 1));
    }

    #[test]
    fn symmetric_and_touching_is_overlap() {
        // request 0: [0, 60], request 1: [60, 120] -> touch at 60, closed interval overlaps.
        let idx = OverlapIndex::build(&[(0, 60), (60, 120)]);
        assert!(idx.get(0, 1));
        assert!(idx.get(1, 0));
    }

    #[test]
    fn disjoint_does_not_overlap() {
        let idx = OverlapIndex::build(&[(0, 59), (60, 120)]);
        assert!(!idx.get(0, 1));
        assert!(!idx.get(1, 0));
    }

    #[test]
    fn row_iteration_matches_get() {
        let idx = OverlapIndex::build(&[(0, 60), (30, 90), (200, 260)]);
        let row0: Vec<usize> = idx.row(0).collect();
        assert_eq!(row0, vec![1]);
        let row2: Vec<usize> = idx.row(2).collect();
        assert!(row2.is_empty());
    }
}
