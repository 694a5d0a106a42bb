// SPDX-License-Identifier: GPL-3.0-only

//! Range window parameters and the channel that carries them
//!
//! The viewer's input handling and the render loop run in different
//! execution contexts. The channel packs both bounds into one atomic
//! word so the render loop always snapshots a consistent (min, max)
//! pair - a reader can never observe the min of one update paired with
//! the max of another.

use super::constants::{DEPTH_RANGE_CEILING_M, DEPTH_RANGE_FLOOR_M};
use std::sync::atomic::{AtomicU64, Ordering};

/// The [min, max] depth window the mapping visualizes, in meters.
///
/// Invariant: `DEPTH_RANGE_FLOOR_M <= min_m <= max_m <= DEPTH_RANGE_CEILING_M`.
/// Constructed only through [`DepthRange::new`], which enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub min_m: f32,
    pub max_m: f32,
}

impl DepthRange {
    /// Build a range with both bounds clamped into the valid window and
    /// ordered. `max_m` is raised to `min_m` when the inputs are out of
    /// order. Non-finite inputs collapse to the floor.
    pub fn new(min_m: f32, max_m: f32) -> Self {
        // max/min rather than clamp: NaN falls through to the floor value
        let min_m = min_m.max(DEPTH_RANGE_FLOOR_M).min(DEPTH_RANGE_CEILING_M);
        let max_m = max_m.max(min_m).min(DEPTH_RANGE_CEILING_M);
        Self { min_m, max_m }
    }

    /// Window width in meters (zero when degenerate)
    pub fn span_m(&self) -> f32 {
        self.max_m - self.min_m
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::new(DEPTH_RANGE_FLOOR_M, DEPTH_RANGE_CEILING_M)
    }
}

const fn pack(min_m: f32, max_m: f32) -> u64 {
    ((min_m.to_bits() as u64) << 32) | max_m.to_bits() as u64
}

fn unpack(bits: u64) -> DepthRange {
    DepthRange {
        min_m: f32::from_bits((bits >> 32) as u32),
        max_m: f32::from_bits(bits as u32),
    }
}

/// Single-slot atomic holder for the current range window.
///
/// `set` may run on a different thread than `get`; because both bounds
/// live in one `AtomicU64`, `get` is tear-free by construction. There is
/// no queue: the latest write wins, which is exactly what a renderer
/// that only wants the current value needs. The partial setters are
/// read-modify-write and assume one conceptual writer (the input
/// handler), matching how the viewer uses them.
#[derive(Debug)]
pub struct DepthRangeChannel {
    packed: AtomicU64,
}

impl DepthRangeChannel {
    pub const fn new(min_m: f32, max_m: f32) -> Self {
        Self {
            packed: AtomicU64::new(pack(min_m, max_m)),
        }
    }

    /// Current window snapshot
    pub fn get(&self) -> DepthRange {
        unpack(self.packed.load(Ordering::Relaxed))
    }

    /// Replace the window. Bounds are clamped and ordered per
    /// [`DepthRange::new`].
    pub fn set(&self, min_m: f32, max_m: f32) {
        let range = DepthRange::new(min_m, max_m);
        self.packed
            .store(pack(range.min_m, range.max_m), Ordering::Relaxed);
    }

    /// Move only the near bound. Raising it past the current far bound
    /// drags the far bound along (the bound being set wins).
    pub fn set_min(&self, min_m: f32) {
        let cur = self.get();
        self.set(min_m, cur.max_m.max(min_m));
    }

    /// Move only the far bound. Lowering it past the current near bound
    /// drags the near bound along.
    pub fn set_max(&self, max_m: f32) {
        let cur = self.get();
        let max_m = max_m.max(DEPTH_RANGE_FLOOR_M).min(DEPTH_RANGE_CEILING_M);
        self.set(cur.min_m.min(max_m), max_m);
    }
}

impl Default for DepthRangeChannel {
    fn default() -> Self {
        Self::new(DEPTH_RANGE_FLOOR_M, DEPTH_RANGE_CEILING_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(range: DepthRange) {
        assert!(range.min_m >= DEPTH_RANGE_FLOOR_M);
        assert!(range.min_m <= range.max_m);
        assert!(range.max_m <= DEPTH_RANGE_CEILING_M);
    }

    #[test]
    fn test_new_orders_bounds() {
        let range = DepthRange::new(5.0, 3.0);
        assert_eq!(range.min_m, 5.0);
        assert_eq!(range.max_m, 5.0);
        assert_invariant(range);
    }

    #[test]
    fn test_new_clamps_to_window() {
        let range = DepthRange::new(-1.0, 100.0);
        assert_eq!(range.min_m, 0.0);
        assert_eq!(range.max_m, DEPTH_RANGE_CEILING_M);
    }

    #[test]
    fn test_new_rejects_nan() {
        let range = DepthRange::new(f32::NAN, f32::NAN);
        assert_invariant(range);
        assert!(range.min_m.is_finite() && range.max_m.is_finite());
    }

    #[test]
    fn test_channel_roundtrip() {
        let channel = DepthRangeChannel::default();
        channel.set(1.5, 4.5);
        let range = channel.get();
        assert_eq!(range.min_m, 1.5);
        assert_eq!(range.max_m, 4.5);
    }

    #[test]
    fn test_set_min_raises_max() {
        // Spec scenario: min set to 5 while max is 3 -> max is raised to 5
        let channel = DepthRangeChannel::new(0.0, 3.0);
        channel.set_min(5.0);
        let range = channel.get();
        assert_eq!(range.min_m, 5.0);
        assert_eq!(range.max_m, 5.0);
        assert_invariant(range);
    }

    #[test]
    fn test_set_max_lowers_min() {
        let channel = DepthRangeChannel::new(4.0, 6.0);
        channel.set_max(2.0);
        let range = channel.get();
        assert_eq!(range.min_m, 2.0);
        assert_eq!(range.max_m, 2.0);
        assert_invariant(range);
    }

    #[test]
    fn test_invariant_holds_after_any_set_order() {
        let channel = DepthRangeChannel::default();
        for (min, max) in [
            (3.0, 1.0),
            (-2.0, -1.0),
            (9.0, 10.0),
            (f32::NAN, 2.0),
            (2.0, f32::NAN),
            (0.0, 0.0),
        ] {
            channel.set(min, max);
            assert_invariant(channel.get());
        }
    }

    #[test]
    fn test_snapshot_is_consistent_across_threads() {
        use std::sync::Arc;

        // Writer flips between two windows; every reader snapshot must be
        // one of them, never a mix of both.
        let channel = Arc::new(DepthRangeChannel::default());
        let writer = {
            let channel = Arc::clone(&channel);
            std::thread::spawn(move || {
                for i in 0..10_000 {
                    if i % 2 == 0 {
                        channel.set(1.0, 2.0);
                    } else {
                        channel.set(3.0, 4.0);
                    }
                }
            })
        };
        for _ in 0..10_000 {
            let range = channel.get();
            let a = range.min_m == 1.0 && range.max_m == 2.0;
            let b = range.min_m == 3.0 && range.max_m == 4.0;
            let initial = range.min_m == DEPTH_RANGE_FLOOR_M && range.max_m == DEPTH_RANGE_CEILING_M;
            assert!(a || b || initial, "torn read: {:?}", range);
        }
        writer.join().unwrap();
    }
}
