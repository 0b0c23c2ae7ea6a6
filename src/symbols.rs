use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SYMBOLS_DATA: &str = include_str!("../assets/symbols.txt");

#[cfg(test)]
const EXPECTED_SHA256: &str = "405b864ed3850b405a70cd95d583ec7336ecc04268c96cb7e98776501a155da4";

/// Symbols available for strong passwords, in the order they were listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSet {
    origin: String,
    symbols: Vec<String>,
}

impl SymbolSet {
    pub fn new(origin: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            origin: origin.into(),
            symbols,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

/// Anything that can hand out a fresh symbol list on demand.
pub trait SymbolSource {
    fn load_symbols(&self) -> Result<SymbolSet>;
}

impl<T: SymbolSource + ?Sized> SymbolSource for Box<T> {
    fn load_symbols(&self) -> Result<SymbolSet> {
        (**self).load_symbols()
    }
}

/// One symbol per line, surrounding whitespace stripped, blank lines ignored.
pub fn parse_symbols(origin: &str, text: &str) -> SymbolSet {
    let symbols = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    SymbolSet::new(origin, symbols)
}

/// Symbol list read from disk on every call.
#[derive(Debug, Clone)]
pub struct FileSymbols {
    path: PathBuf,
}

impl FileSymbols {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SymbolSource for FileSymbols {
    fn load_symbols(&self) -> Result<SymbolSet> {
        let origin = self.path.display().to_string();
        let text =
            fs::read_to_string(&self.path).map_err(|e| Error::symbols(&origin, e.to_string()))?;

        let set = parse_symbols(&origin, &text);
        debug!(origin = %origin, count = set.len(), "Loaded symbols");
        Ok(set)
    }
}

/// The list compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSymbols;

impl SymbolSource for BuiltinSymbols {
    fn load_symbols(&self) -> Result<SymbolSet> {
        Ok(parse_symbols("built-in", SYMBOLS_DATA))
    }
}
