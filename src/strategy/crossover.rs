//! # Crossover
//!
//! Recombination of two parent passwords into one child. Both variants keep
//! the child within `max_length`; neither can grow the child past the longer
//! parent, so length growth is left to mutation.

use crate::candidate::Password;
use crate::rng::RandomNumberGenerator;

/// The recombination operator used when refilling a population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// Each position of the common prefix comes from either parent with equal
    /// probability; the longer parent contributes its tail.
    #[default]
    Uniform,
    /// `p1[..cut] + p2[cut..]` with `cut` drawn from `0..=min(len1, len2)`.
    SinglePoint,
}

impl Crossover {
    /// Produces a child of `p1` and `p2` no longer than `max_length`.
    pub fn recombine(
        &self,
        p1: &Password,
        p2: &Password,
        max_length: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Password {
        let child = match self {
            Crossover::Uniform => uniform(p1, p2, rng),
            Crossover::SinglePoint => single_point(p1, p2, rng),
        };
        if child.len() > max_length {
            child.truncated(max_length)
        } else {
            child
        }
    }
}

fn uniform(p1: &Password, p2: &Password, rng: &mut RandomNumberGenerator) -> Password {
    let (a, b) = (p1.chars(), p2.chars());
    let shared = a.len().min(b.len());

    let mut chars = Vec::with_capacity(a.len().max(b.len()));
    for i in 0..shared {
        chars.push(if rng.gen_bool(0.5) { a[i] } else { b[i] });
    }
    let longer = if a.len() > b.len() { a } else { b };
    chars.extend_from_slice(&longer[shared..]);

    Password::new(chars)
}

fn single_point(p1: &Password, p2: &Password, rng: &mut RandomNumberGenerator) -> Password {
    let (a, b) = (p1.chars(), p2.chars());
    let cut = rng.gen_range_inclusive(0, a.len().min(b.len()));

    let mut chars = Vec::with_capacity(b.len());
    chars.extend_from_slice(&a[..cut]);
    chars.extend_from_slice(&b[cut..]);

    Password::new(chars)
}
