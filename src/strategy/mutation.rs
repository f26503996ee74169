//! # Mutation
//!
//! Mutation is the exception, not the default: a child is perturbed with
//! probability `mutation_rate` and otherwise passed through untouched. A
//! triggered mutation applies exactly one action, chosen uniformly from the
//! configured set.

use crate::candidate::Password;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A single perturbation of a password.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationAction {
    /// Append one character from the alphabet. The only way to grow a password.
    Extend,
    /// Shuffle a contiguous window of `2..=len-1` characters. No-op below length 3.
    Scramble,
    /// Replace one position with a character from the alphabet. No-op when empty.
    Substitute,
}

impl MutationAction {
    /// Actions enabled unless configured otherwise.
    pub const DEFAULT: [MutationAction; 2] = [MutationAction::Extend, MutationAction::Scramble];

    /// Applies this action to `password` and truncates to `max_length`.
    pub fn apply(
        self,
        password: &Password,
        alphabet: &[char],
        max_length: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Password {
        let mut chars = password.chars().to_vec();
        match self {
            MutationAction::Extend => {
                if let Some(c) = rng.choose(alphabet) {
                    chars.push(c);
                }
            }
            MutationAction::Scramble => {
                let len = chars.len();
                if len >= 3 {
                    let window = rng.gen_range_inclusive(2, len - 1);
                    let offset = rng.gen_range_inclusive(0, len - window);
                    rng.shuffle(&mut chars[offset..offset + window]);
                }
            }
            MutationAction::Substitute => {
                if !chars.is_empty() {
                    let pos = rng.gen_range_inclusive(0, chars.len() - 1);
                    if let Some(c) = rng.choose(alphabet) {
                        chars[pos] = c;
                    }
                }
            }
        }
        chars.truncate(max_length);
        Password::new(chars)
    }
}

/// Mutation operator bound to one run's alphabet and parameters.
#[derive(Debug, Clone)]
pub struct Mutation {
    rate: f64,
    actions: Vec<MutationAction>,
    alphabet: Vec<char>,
    max_length: usize,
}

impl Mutation {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `rate` is not within `[0, 1]`.
    pub fn new(
        rate: f64,
        actions: Vec<MutationAction>,
        alphabet: Vec<char>,
        max_length: usize,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(GeneticError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                rate
            )));
        }
        Ok(Self {
            rate,
            actions,
            alphabet,
            max_length,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the child, mutated with probability `rate`.
    pub fn mutate(&self, child: Password, rng: &mut RandomNumberGenerator) -> Password {
        if !rng.gen_bool(self.rate) {
            return if child.len() > self.max_length {
                child.truncated(self.max_length)
            } else {
                child
            };
        }
        match rng.choose(&self.actions) {
            Some(action) => action.apply(&child, &self.alphabet, self.max_length, rng),
            None => child.truncated(self.max_length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(password: &Password) -> Vec<char> {
        let mut chars = password.chars().to_vec();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn test_extend_appends_alphabet_char() {
        let mut rng = RandomNumberGenerator::from_seed(21);
        let alphabet: Vec<char> = "0123456789".chars().collect();
        let parent = Password::from("abc");

        let child = MutationAction::Extend.apply(&parent, &alphabet, 10, &mut rng);
        assert_eq!(child.len(), 4);
        assert_eq!(&child.chars()[..3], parent.chars());
        assert!(child.chars()[3].is_ascii_digit());
    }

    #[test]
    fn test_extend_respects_max_length() {
        let mut rng = RandomNumberGenerator::from_seed(22);
        let alphabet: Vec<char> = "xyz".chars().collect();
        let parent = Password::from("abcde");

        let child = MutationAction::Extend.apply(&parent, &alphabet, 5, &mut rng);
        assert_eq!(child, parent);
    }

    #[test]
    fn test_scramble_preserves_multiset() {
        let mut rng = RandomNumberGenerator::from_seed(23);
        let parent = Password::from("Hello, W0rld!");

        for _ in 0..100 {
            let child = MutationAction::Scramble.apply(&parent, &[], 64, &mut rng);
            assert_eq!(child.len(), parent.len());
            assert_eq!(sorted(&child), sorted(&parent));
        }
    }

    #[test]
    fn test_scramble_keeps_one_end_in_place() {
        let mut rng = RandomNumberGenerator::from_seed(24);
        let parent = Password::from("abcdefgh");

        for _ in 0..100 {
            let child = MutationAction::Scramble.apply(&parent, &[], 64, &mut rng);
            // window is at most len - 1 so the first or last char stays put
            assert!(child.chars()[0] == 'a' || child.chars()[7] == 'h');
        }
    }

    #[test]
    fn test_scramble_short_is_noop() {
        let mut rng = RandomNumberGenerator::from_seed(25);
        for text in ["", "a", "ab"] {
            let parent = Password::from(text);
            assert_eq!(MutationAction::Scramble.apply(&parent, &[], 64, &mut rng), parent);
        }
    }

    #[test]
    fn test_substitute_changes_at_most_one_position() {
        let mut rng = RandomNumberGenerator::from_seed(26);
        let alphabet: Vec<char> = "#".chars().collect();
        let parent = Password::from("aaaaaa");

        let child = MutationAction::Substitute.apply(&parent, &alphabet, 64, &mut rng);
        assert_eq!(child.len(), 6);
        assert_eq!(child.chars().iter().filter(|c| **c == '#').count(), 1);

        let empty = Password::default();
        assert_eq!(
            MutationAction::Substitute.apply(&empty, &alphabet, 64, &mut rng),
            empty
        );
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = RandomNumberGenerator::from_seed(27);
        let mutation = Mutation::new(0.0, MutationAction::DEFAULT.to_vec(), vec!['z'], 64).unwrap();
        let parent = Password::from("abcdefg");

        for _ in 0..200 {
            assert_eq!(mutation.mutate(parent.clone(), &mut rng), parent);
        }
    }

    #[test]
    fn test_full_rate_always_mutates() {
        let mut rng = RandomNumberGenerator::from_seed(28);
        let mutation = Mutation::new(1.0, vec![MutationAction::Extend], vec!['z'], 64).unwrap();
        let parent = Password::from("abc");

        for _ in 0..20 {
            assert_eq!(mutation.mutate(parent.clone(), &mut rng), Password::from("abcz"));
        }
    }

    #[test]
    fn test_mutate_truncates_unmutated_child() {
        let mut rng = RandomNumberGenerator::from_seed(29);
        let mutation = Mutation::new(0.0, MutationAction::DEFAULT.to_vec(), vec!['z'], 3).unwrap();

        let child = mutation.mutate(Password::from("abcdef"), &mut rng);
        assert_eq!(child, Password::from("abc"));
    }

    #[test]
    fn test_rate_outside_unit_interval_rejected() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let result = Mutation::new(rate, MutationAction::DEFAULT.to_vec(), vec!['z'], 8);
            assert!(matches!(result, Err(GeneticError::Configuration(_))));
        }
    }
}
