//! Splits a `SearchBox` into contiguous X stripes, one per worker.
//!
//! Grounded on the shard-index splitting in
//! `src/clustering/bottom/producer.rs` (`beg = shard * n; end = beg +
//! n`), generalized from equal shards to the remainder-distributing
//! split `spec.md` §4.5 requires.

use crate::scan::SearchBox;

pub struct Partitioner;

impl Partitioner {
    /// Splits `box_`'s X extent into exactly `n` contiguous, non-
    /// overlapping stripes. The first `width % n` stripes get
    /// `ceil(width / n)` columns; the rest get `floor(width / n)`.
    /// Y and Z ranges are shared by every stripe unchanged.
    pub fn stripes(box_: &SearchBox, n: usize) -> Vec<SearchBox> {
        assert!(n >= 1, "worker count must be at least 1");
        let width = box_.x_count();
        let n = (n as u64).min(width.max(1)) as usize;
        let base = width / n as u64;
        let remainder = width % n as u64;

        let mut stripes = Vec::with_capacity(n);
        let mut x = box_.x_lo as i64;
        for i in 0..n {
            let columns = base + if (i as u64) < remainder { 1 } else { 0 };
            let x_lo = x as i32;
            let x_hi = (x + columns as i64 - 1) as i32;
            stripes.push(box_.with_x_range(x_lo, x_hi));
            x += columns as i64;
        }
        stripes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashVersion;

    fn box_(x_lo: i32, x_hi: i32) -> SearchBox {
        SearchBox { x_lo, x_hi, y_lo: 0, y_hi: 0, z_lo: 0, z_hi: 0, version: HashVersion::Modern }
    }

    #[test]
    fn covers_exactly_once_with_no_overlap() {
        for (lo, hi, n) in [(-100, 100, 7), (0, 0, 1), (0, 9, 3), (0, 9, 10), (0, 9, 16)] {
            let b = box_(lo, hi);
            let stripes = Partitioner::stripes(&b, n);
            let mut prev_hi: Option<i32> = None;
            let mut total: u64 = 0;
            for s in &stripes {
                assert!(s.x_lo <= s.x_hi);
                if let Some(p) = prev_hi {
                    assert_eq!(s.x_lo, p + 1, "stripes must be contiguous with no gap/overlap");
                }
                total += s.x_count();
                prev_hi = Some(s.x_hi);
            }
            assert_eq!(stripes.first().unwrap().x_lo, lo);
            assert_eq!(stripes.last().unwrap().x_hi, hi);
            assert_eq!(total, b.x_count());
        }
    }

    #[test]
    fn remainder_goes_to_first_workers() {
        let b = box_(0, 9); // width 10, n=3 -> 4,3,3
        let stripes = Partitioner::stripes(&b, 3);
        let widths: Vec<u64> = stripes.iter().map(|s| s.x_count()).collect();
        assert_eq!(widths, vec![4, 3, 3]);
    }

    #[test]
    fn worker_count_never_exceeds_width() {
        let b = box_(0, 2); // width 3
        let stripes = Partitioner::stripes(&b, 16);
        assert_eq!(stripes.len(), 3);
    }

    #[test]
    fn y_and_z_ranges_are_shared() {
        let b = SearchBox { x_lo: 0, x_hi: 9, y_lo: 5, y_hi: 20, z_lo: -3, z_hi: 3, version: HashVersion::Classic };
        for s in Partitioner::stripes(&b, 4) {
            assert_eq!(s.y_lo, b.y_lo);
            assert_eq!(s.y_hi, b.y_hi);
            assert_eq!(s.z_lo, b.z_lo);
            assert_eq!(s.z_hi, b.z_hi);
        }
    }
}
