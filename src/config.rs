use crate::symbols::{BuiltinSymbols, FileSymbols, SymbolSource};
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "password_and_words.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub symbols_path: Option<PathBuf>,
    pub quiet: bool,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            symbols_path: None,
            quiet: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Default `tracing` filter directive when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn symbol_source(&self) -> Box<dyn SymbolSource> {
        match &self.symbols_path {
            Some(path) => Box::new(FileSymbols::new(path.clone())),
            None => Box::new(BuiltinSymbols),
        }
    }
}
