pub mod config;
pub mod error;
pub mod mutator;
pub mod service;
pub mod store;
pub mod symbols;
pub mod ui;

pub use error::{Error, Result};
pub use mutator::{insert_digits, insert_symbols};
pub use service::{MEDIUM_DIGITS, Origin, PasswordService, Passwords, STRONG_SYMBOLS};
pub use store::{FileStore, MemoryStore, PasswordRecord, RecordStore};
pub use symbols::{BuiltinSymbols, FileSymbols, SymbolSet, SymbolSource};
