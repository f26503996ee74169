//! # Character Classes
//!
//! A password is built from up to four character classes. Each class owns a
//! fixed ASCII membership table so that coverage checks are a bit test per
//! character instead of a scan of the class's symbols.
//!
//! ## Example
//!
//! ```rust
//! use genpass::charset::{CharacterClass, CharacterClasses};
//!
//! let classes = CharacterClasses::from_iter([CharacterClass::Digits, CharacterClass::Lowercase]);
//!
//! assert_eq!(classes.alphabet().len(), 36);
//! assert_eq!(classes.coverage("abc123".chars()), 2);
//! assert_eq!(classes.coverage("ABC".chars()), 0);
//! ```

use std::fmt;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// One of the symbol sets a password may be required to use.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digits,
    Special,
}

impl CharacterClass {
    /// Every class, in alphabet order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digits,
        CharacterClass::Special,
    ];

    /// The symbols belonging to this class.
    pub fn symbols(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digits => DIGITS,
            CharacterClass::Special => SPECIAL,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Returns `true` if `c` is a member of this class.
    pub fn contains(self, c: char) -> bool {
        MembershipTable::for_class(self).contains(c)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Digits => "digits",
            CharacterClass::Special => "special",
        };
        f.write_str(name)
    }
}

/// 128-bit membership bitset over ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MembershipTable([u64; 2]);

impl MembershipTable {
    const fn from_symbols(symbols: &str) -> Self {
        let bytes = symbols.as_bytes();
        let mut words = [0u64; 2];
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i] as usize;
            words[b / 64] |= 1 << (b % 64);
            i += 1;
        }
        Self(words)
    }

    fn for_class(class: CharacterClass) -> &'static MembershipTable {
        match class {
            CharacterClass::Uppercase => &UPPERCASE_TABLE,
            CharacterClass::Lowercase => &LOWERCASE_TABLE,
            CharacterClass::Digits => &DIGITS_TABLE,
            CharacterClass::Special => &SPECIAL_TABLE,
        }
    }

    fn contains(&self, c: char) -> bool {
        if !c.is_ascii() {
            return false;
        }
        let b = c as usize;
        self.0[b / 64] & (1 << (b % 64)) != 0
    }
}

static UPPERCASE_TABLE: MembershipTable = MembershipTable::from_symbols(UPPERCASE);
static LOWERCASE_TABLE: MembershipTable = MembershipTable::from_symbols(LOWERCASE);
static DIGITS_TABLE: MembershipTable = MembershipTable::from_symbols(DIGITS);
static SPECIAL_TABLE: MembershipTable = MembershipTable::from_symbols(SPECIAL);

/// A set of active character classes.
///
/// The set may be empty as a value; configuration validation rejects an
/// empty set before a run starts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<CharacterClass>", into = "Vec<CharacterClass>"))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CharacterClasses {
    bits: u8,
}

impl CharacterClasses {
    /// The empty set.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// All four classes.
    pub fn all() -> Self {
        Self::from_iter(CharacterClass::ALL)
    }

    /// Returns a copy of the set with `class` added.
    pub fn with(mut self, class: CharacterClass) -> Self {
        self.insert(class);
        self
    }

    pub fn insert(&mut self, class: CharacterClass) {
        self.bits |= class.bit();
    }

    pub fn remove(&mut self, class: CharacterClass) {
        self.bits &= !class.bit();
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        self.bits & class.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates the active classes in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }

    /// The union of the active classes' symbols, in a fixed order.
    pub fn alphabet(&self) -> Vec<char> {
        self.iter().flat_map(|class| class.symbols().chars()).collect()
    }

    /// Counts the active classes that have at least one member in `chars`.
    pub fn coverage<I>(&self, chars: I) -> usize
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen = 0u8;
        for c in chars {
            for class in self.iter() {
                if class.contains(c) {
                    seen |= class.bit();
                }
            }
            if seen == self.bits {
                break;
            }
        }
        seen.count_ones() as usize
    }
}

impl FromIterator<CharacterClass> for CharacterClasses {
    fn from_iter<T: IntoIterator<Item = CharacterClass>>(iter: T) -> Self {
        let mut classes = Self::empty();
        for class in iter {
            classes.insert(class);
        }
        classes
    }
}

impl From<Vec<CharacterClass>> for CharacterClasses {
    fn from(classes: Vec<CharacterClass>) -> Self {
        classes.into_iter().collect()
    }
}

impl From<CharacterClasses> for Vec<CharacterClass> {
    fn from(classes: CharacterClasses) -> Self {
        classes.iter().collect()
    }
}

impl fmt::Debug for CharacterClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_tables() {
        for class in CharacterClass::ALL {
            for c in class.symbols().chars() {
                assert!(class.contains(c), "{} should contain {:?}", class, c);
            }
        }
        assert!(!CharacterClass::Digits.contains('a'));
        assert!(!CharacterClass::Special.contains(' '));
        assert!(!CharacterClass::Lowercase.contains('é'));
    }

    #[test]
    fn test_classes_are_disjoint() {
        let total: usize = CharacterClass::ALL
            .iter()
            .map(|class| class.symbols().len())
            .sum();
        assert_eq!(CharacterClasses::all().alphabet().len(), total);
    }

    #[test]
    fn test_alphabet_order_and_contents() {
        let classes = CharacterClasses::empty()
            .with(CharacterClass::Special)
            .with(CharacterClass::Digits);
        let alphabet: String = classes.alphabet().into_iter().collect();

        assert_eq!(alphabet, format!("{}{}", DIGITS, SPECIAL));
    }

    #[test]
    fn test_coverage_counts_only_active_classes() {
        let classes = CharacterClasses::from_iter([CharacterClass::Digits, CharacterClass::Uppercase]);

        assert_eq!(classes.coverage("aB3!".chars()), 2);
        assert_eq!(classes.coverage("ab!".chars()), 0);
        assert_eq!(classes.coverage("".chars()), 0);
        assert_eq!(CharacterClasses::all().coverage("aB3!".chars()), 4);
    }

    #[test]
    fn test_insert_remove_len() {
        let mut classes = CharacterClasses::empty();
        assert!(classes.is_empty());

        classes.insert(CharacterClass::Lowercase);
        classes.insert(CharacterClass::Lowercase);
        assert_eq!(classes.len(), 1);

        classes.remove(CharacterClass::Lowercase);
        assert!(classes.is_empty());
        assert!(classes.alphabet().is_empty());
    }
}
