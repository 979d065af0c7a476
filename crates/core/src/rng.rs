//! RNG module - tile shuffling and rotation assignment
//!
//! Each new game deals the tile set in a fresh random order and assigns every
//! tile a rotation value. The generator is `StdRng` (a cryptographically strong
//! ChaCha generator), seeded from the wall clock in play and from a fixed seed
//! in tests.

use std::time::{SystemTime, UNIX_EPOCH};

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tile::TileRecord;
use crate::types::MAX_UNTURNED_TILES;

/// Rotation value that results in no net turn once drawn
pub const UNTURNED: u8 = 3;

/// Seeded generator for dealing tiles
#[derive(Debug, Clone)]
pub struct TileRng {
    rng: StdRng,
    seed: u64,
}

impl TileRng {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the current time
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..max)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range(i + 1);
            slice.swap(i, j);
        }
    }

    /// Draw up to three distinct indices below `count`
    fn distinct3(&mut self, count: usize) -> ArrayVec<usize, 3> {
        let mut picked = ArrayVec::new();
        while picked.len() < picked.capacity() && picked.len() < count {
            let i = self.next_range(count);
            if !picked.contains(&i) {
                picked.push(i);
            }
        }
        picked
    }

    /// Assign a rotation value to each of `count` tiles.
    ///
    /// Three distinct tiles are forced to 0, 1 and 2. Every other tile draws
    /// from `0..=3`, except that once [`MAX_UNTURNED_TILES`] tiles hold 3 any
    /// further 3 is redrawn from `0..=2`.
    pub fn assign_rotations(&mut self, count: usize) -> Vec<u8> {
        let forced = self.distinct3(count);
        let mut unturned = 0usize;

        (0..count)
            .map(|i| {
                if let Some(value) = forced.iter().position(|&f| f == i) {
                    return value as u8;
                }
                let mut rotation = self.next_range(4) as u8;
                if rotation == UNTURNED {
                    if unturned == MAX_UNTURNED_TILES {
                        rotation = self.next_range(3) as u8;
                    } else {
                        unturned += 1;
                    }
                }
                rotation
            })
            .collect()
    }

    /// Shuffle `records` and stamp each with a freshly assigned rotation.
    ///
    /// Geometry is untouched; turns are applied when the records are drawn.
    pub fn deal(&mut self, records: &mut [TileRecord]) {
        self.shuffle(records);
        let rotations = self.assign_rotations(records.len());
        for (record, rotation) in records.iter_mut().zip(rotations) {
            record.rotation = rotation;
        }
    }
}

impl Default for TileRng {
    fn default() -> Self {
        Self::from_time()
    }
}

/// Milliseconds since the Unix epoch, for seeding a new session
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(rotations: &[u8], value: u8) -> usize {
        rotations.iter().filter(|&&r| r == value).count()
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = TileRng::new(12345);
        let mut rng2 = TileRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_range(1000), rng2.next_range(1000));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = TileRng::new(7);
        let mut items: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = TileRng::new(7);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut one = [9u8];
        rng.shuffle(&mut one);
        assert_eq!(one, [9]);
    }

    #[test]
    fn test_every_position_reachable() {
        let mut rng = TileRng::new(99);
        let mut seen = [[false; 16]; 16];
        for _ in 0..2000 {
            let mut items: Vec<usize> = (0..16).collect();
            rng.shuffle(&mut items);
            for (pos, &item) in items.iter().enumerate() {
                seen[item][pos] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&s| s)));
    }

    #[test]
    fn test_rotation_constraints_hold() {
        for seed in 0..500 {
            let mut rng = TileRng::new(seed);
            let rotations = rng.assign_rotations(16);
            assert_eq!(rotations.len(), 16);
            assert!(count_of(&rotations, 0) >= 1, "seed {seed}: no rotation 0");
            assert!(count_of(&rotations, 1) >= 1, "seed {seed}: no rotation 1");
            assert!(count_of(&rotations, 2) >= 1, "seed {seed}: no rotation 2");
            assert!(count_of(&rotations, UNTURNED) <= MAX_UNTURNED_TILES);
            assert!(rotations.iter().all(|&r| r <= 3));
        }
    }

    #[test]
    fn test_rotation_small_sets() {
        let mut rng = TileRng::new(3);
        assert!(rng.assign_rotations(0).is_empty());

        let mut two = rng.assign_rotations(2);
        two.sort_unstable();
        assert_eq!(two, vec![0, 1]);

        let mut three = rng.assign_rotations(3);
        three.sort_unstable();
        assert_eq!(three, vec![0, 1, 2]);
    }

    #[test]
    fn test_deal_keeps_geometry() {
        let mut records: Vec<TileRecord> = (0..16)
            .map(|id| {
                TileRecord::new(
                    id,
                    vec![crate::types::Segment::new(id, 0, 100 - id, 100)],
                )
            })
            .collect();
        let before = records.clone();

        let mut rng = TileRng::new(42);
        rng.deal(&mut records);

        for record in &records {
            let original = before.iter().find(|r| r.id == record.id).unwrap();
            assert_eq!(record.segments, original.segments);
        }
        let mut ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }
}
