use std::{
    f32::consts::TAU,
    hash::{Hash, Hasher},
};

use glam::Vec2;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;

/// Construct a random number generator seeded by a hashable value.
///
/// Same seed value gives the same sequence on every platform.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

pub trait RngExt {
    /// Roll against a probability.
    ///
    /// Probabilities at or below zero never hit, at or above one always hit.
    fn chance(&mut self, p: f32) -> bool;

    /// Unit vector pointing in a uniformly random direction.
    fn direction(&mut self) -> Vec2;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.gen_range(0.0..1.0) < p
        }
    }

    fn direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.gen_range(0.0..TAU))
    }
}
