use crate::error::{Error, Result};
use crate::symbols::SymbolSet;
use rand::Rng;

const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Inserts `count` random digits, one at a time, each at a random index of
/// the string as it stands after the previous insertion.
///
/// Indices are drawn from `0..len`, so nothing is ever appended past the
/// last character.
pub fn insert_digits<R: Rng + ?Sized>(base: &str, count: usize, rng: &mut R) -> Result<String> {
    insert_with(base, count, rng, |rng| {
        let digit = DIGITS[rng.random_range(0..DIGITS.len())];
        vec![digit]
    })
}

/// Same walk as [`insert_digits`], drawing each unit from `symbols`.
pub fn insert_symbols<R: Rng + ?Sized>(
    base: &str,
    count: usize,
    symbols: &SymbolSet,
    rng: &mut R,
) -> Result<String> {
    let units: Vec<Vec<char>> = symbols
        .as_slice()
        .iter()
        .filter(|symbol| !symbol.is_empty())
        .map(|symbol| symbol.chars().collect())
        .collect();

    if units.is_empty() {
        return Err(Error::symbols(symbols.origin(), "no symbols to draw from"));
    }

    insert_with(base, count, rng, |rng| {
        units[rng.random_range(0..units.len())].clone()
    })
}

fn insert_with<R, F>(base: &str, count: usize, rng: &mut R, mut unit: F) -> Result<String>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Vec<char>,
{
    if base.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut password: Vec<char> = base.chars().collect();
    for _ in 0..count {
        let index = rng.random_range(0..password.len());
        let inserted = unit(rng);
        password.splice(index..index, inserted);
    }

    Ok(password.into_iter().collect())
}
