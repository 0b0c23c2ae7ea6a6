use crate::error::{Error, Result};
use crate::mutator::{insert_digits, insert_symbols};
use crate::store::{PasswordRecord, RecordStore};
use crate::symbols::SymbolSource;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const MEDIUM_DIGITS: usize = 4;
pub const STRONG_SYMBOLS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Generated,
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Passwords {
    medium: String,
    strong: String,
    #[zeroize(skip)]
    origin: Origin,
}

impl Passwords {
    pub fn medium(&self) -> &str {
        &self.medium
    }

    pub fn strong(&self) -> &str {
        &self.strong
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

impl From<&PasswordRecord> for Passwords {
    fn from(record: &PasswordRecord) -> Self {
        Self {
            medium: record.medium().to_owned(),
            strong: record.strong().to_owned(),
            origin: Origin::Stored,
        }
    }
}

pub struct PasswordService<S, Y, R> {
    store: S,
    symbols: Y,
    rng: R,
}

impl<S, Y, R> PasswordService<S, Y, R>
where
    S: RecordStore,
    Y: SymbolSource,
    R: Rng,
{
    pub fn new(store: S, symbols: Y, rng: R) -> Self {
        Self {
            store,
            symbols,
            rng,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the passwords already recorded for `words`, or generates,
    /// records and returns a fresh pair.
    ///
    /// Nothing is written unless both passwords were built successfully.
    pub fn generate_or_retrieve(&mut self, words: &[String]) -> Result<Passwords> {
        if words.iter().all(|w| w.trim().is_empty()) {
            return Err(Error::EmptyInput);
        }

        let base: Vec<char> = words
            .iter()
            .flat_map(|w| w.chars())
            .filter(|&c| c != ' ')
            .collect();

        if let Some(record) = self.store.find_by_words(words)? {
            debug!(location = %self.store.location(), "Found stored passwords");
            return Ok(Passwords::from(&record));
        }

        let shuffled = self.shuffle(base);
        let medium = insert_digits(&shuffled, MEDIUM_DIGITS, &mut self.rng)?;
        let symbols = self.symbols.load_symbols()?;
        let strong = insert_symbols(&medium, STRONG_SYMBOLS, &symbols, &mut self.rng)?;

        let record = PasswordRecord::new(words.to_vec(), medium, strong);
        self.store.append(&record)?;
        info!(location = %self.store.location(), "Generated new passwords");

        let mut passwords = Passwords::from(&record);
        passwords.origin = Origin::Generated;
        Ok(passwords)
    }

    /// Shuffles the characters themselves; word boundaries are not kept.
    fn shuffle(&mut self, mut chars: Vec<char>) -> String {
        chars.shuffle(&mut self.rng);
        chars.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::symbols::{BuiltinSymbols, SymbolSet, parse_symbols};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct FixedSymbols(&'static str);

    impl SymbolSource for FixedSymbols {
        fn load_symbols(&self) -> Result<SymbolSet> {
            Ok(parse_symbols("fixed", self.0))
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn service(seed: u64) -> PasswordService<MemoryStore, BuiltinSymbols, StdRng> {
        PasswordService::new(MemoryStore::new(), BuiltinSymbols, StdRng::seed_from_u64(seed))
    }

    fn sorted(s: &str) -> Vec<char> {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn test_sun_moon_lengths() {
        let mut service = service(1);
        let passwords = service.generate_or_retrieve(&words(&["sun", "moon"])).unwrap();

        assert_eq!(passwords.medium().chars().count(), 11);
        assert_eq!(passwords.strong().chars().count(), 13);
        assert_eq!(passwords.origin(), Origin::Generated);

        let letters: String = passwords
            .medium()
            .chars()
            .filter(|c| !c.is_ascii_digit())
            .collect();
        assert_eq!(sorted(&letters), sorted("sunmoon"));
    }

    #[test]
    fn test_retrieval_is_idempotent() {
        let mut service = service(2);
        let key = words(&["sun", "moon"]);

        let first = service.generate_or_retrieve(&key).unwrap();
        let second = service.generate_or_retrieve(&key).unwrap();

        assert_eq!(first.medium(), second.medium());
        assert_eq!(first.strong(), second.strong());
        assert_eq!(second.origin(), Origin::Stored);
        assert_eq!(service.store().line_count(), 1);
    }

    #[test]
    fn test_distinct_words_get_distinct_records() {
        let mut service = service(3);
        let a = service.generate_or_retrieve(&words(&["river", "stone"])).unwrap();
        let b = service.generate_or_retrieve(&words(&["cloud", "ember"])).unwrap();

        assert_ne!(a.medium(), b.medium());
        assert_eq!(service.store().line_count(), 2);

        let again = service.generate_or_retrieve(&words(&["river", "stone"])).unwrap();
        assert_eq!(again.strong(), a.strong());
    }

    #[test]
    fn test_word_order_is_part_of_key() {
        let mut service = service(4);
        service.generate_or_retrieve(&words(&["sun", "moon"])).unwrap();
        let swapped = service.generate_or_retrieve(&words(&["moon", "sun"])).unwrap();

        assert_eq!(swapped.origin(), Origin::Generated);
        assert_eq!(service.store().line_count(), 2);
    }

    #[test]
    fn test_strong_extends_medium() {
        let mut service = PasswordService::new(
            MemoryStore::new(),
            FixedSymbols("!\n#\n"),
            StdRng::seed_from_u64(5),
        );
        let passwords = service.generate_or_retrieve(&words(&["lantern"])).unwrap();

        let stripped: String = passwords
            .strong()
            .chars()
            .filter(|c| *c != '!' && *c != '#')
            .collect();
        assert_eq!(stripped, passwords.medium());
    }

    #[test]
    fn test_spaces_are_removed_from_base() {
        let mut service = service(6);
        let passwords = service.generate_or_retrieve(&words(&["ice cream"])).unwrap();

        assert!(!passwords.medium().contains(' '));
        assert_eq!(passwords.medium().chars().count(), 8 + MEDIUM_DIGITS);
    }

    #[test]
    fn test_stored_record_is_returned_verbatim() {
        let store = MemoryStore::from_text("sun moon: s4unm1oo7n0 , s4u!nm1oo7n#0\n");
        let mut service = PasswordService::new(store, BuiltinSymbols, StdRng::seed_from_u64(7));
        let passwords = service.generate_or_retrieve(&words(&["sun", "moon"])).unwrap();

        assert_eq!(passwords.medium(), "s4unm1oo7n0");
        assert_eq!(passwords.strong(), "s4u!nm1oo7n#0");
        assert_eq!(service.store().line_count(), 1);
    }

    #[test]
    fn test_empty_words() {
        let mut service = service(8);
        assert!(matches!(
            service.generate_or_retrieve(&[]),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            service.generate_or_retrieve(&words(&["", "  "])),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            service.generate_or_retrieve(&words(&["\t"])),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            service.generate_or_retrieve(&words(&[" \t", "\n"])),
            Err(Error::EmptyInput)
        ));
        assert_eq!(service.store().line_count(), 0);
    }

    #[test]
    fn test_empty_symbols_writes_nothing() {
        let mut service = PasswordService::new(
            MemoryStore::new(),
            FixedSymbols("\n  \n"),
            StdRng::seed_from_u64(9),
        );
        let result = service.generate_or_retrieve(&words(&["sun", "moon"]));

        assert!(matches!(result, Err(Error::SymbolsUnavailable { .. })));
        assert_eq!(service.store().contents(), "");
    }

    #[test]
    fn test_same_seed_same_passwords() {
        let key = words(&["quiet", "harbor"]);
        let a = service(10).generate_or_retrieve(&key).unwrap();
        let b = service(10).generate_or_retrieve(&key).unwrap();
        assert_eq!(a, b);
    }
}
