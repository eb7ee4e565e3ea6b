//! Shuffle algorithm for queue randomization
//!
//! The shuffled queue is kept as a permutation of canonical slot positions, so
//! duplicate songs stay distinguishable and the canonical order is never touched.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform Fisher-Yates permutation of `0..len`
pub fn permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

/// Permutation of `0..len` with `pinned` moved to the front
///
/// The remaining slots are shuffled uniformly. A `pinned` outside `0..len` is
/// ignored and the whole range is shuffled.
pub fn pinned_permutation<R: Rng + ?Sized>(
    len: usize,
    pinned: Option<usize>,
    rng: &mut R,
) -> Vec<usize> {
    let Some(pinned) = pinned.filter(|&p| p < len) else {
        return permutation(len, rng);
    };

    let mut order = Vec::with_capacity(len);
    order.push(pinned);
    order.extend((0..len).filter(|&slot| slot != pinned));
    order[1..].shuffle(rng);
    order
}

/// Shuffle the part of `order` from `from` onward in place
///
/// Positions before `from` keep their slots.
pub fn shuffle_tail<R: Rng + ?Sized>(order: &mut [usize], from: usize, rng: &mut R) {
    if from < order.len() {
        order[from..].shuffle(rng);
    }
}
