//! Append-only ledger of word lists and the passwords generated for them.
//!
//! One record per line:
//!
//! ```text
//! word1 word2 ... wordN: medium_password , strong_password
//! ```

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

const FIELD_SEPARATOR: &str = ": ";
const PASSWORD_SEPARATOR: &str = " , ";
const WORD_SEPARATOR: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PasswordRecord {
    words: Vec<String>,
    medium: String,
    strong: String,
}

impl PasswordRecord {
    pub fn new(words: Vec<String>, medium: String, strong: String) -> Self {
        Self {
            words,
            medium,
            strong,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn medium(&self) -> &str {
        &self.medium
    }

    pub fn strong(&self) -> &str {
        &self.strong
    }
}

/// Parses one stored line. `line_no` is 1-based and only used for reporting.
pub fn parse_line(line_no: usize, line: &str) -> Result<PasswordRecord> {
    let line = line.trim_end_matches(['\n', '\r']);

    let (word_field, password_field) =
        line.split_once(FIELD_SEPARATOR).ok_or(Error::MalformedRecord {
            line: line_no,
            reason: "missing \": \" between words and passwords",
        })?;

    let (medium, strong) = password_field
        .trim()
        .split_once(PASSWORD_SEPARATOR)
        .ok_or(Error::MalformedRecord {
            line: line_no,
            reason: "missing \" , \" between passwords",
        })?;

    let words = word_field
        .trim()
        .split(WORD_SEPARATOR)
        .map(str::to_owned)
        .collect();

    Ok(PasswordRecord::new(
        words,
        medium.to_owned(),
        strong.to_owned(),
    ))
}

/// Renders a record as a single newline-terminated line.
pub fn format_line(record: &PasswordRecord) -> String {
    let words = record.words.join(" ");
    format!(
        "{}{}{}{}{}\n",
        words.trim(),
        FIELD_SEPARATOR,
        record.medium,
        PASSWORD_SEPARATOR,
        record.strong
    )
}

/// First record whose word list equals `words`, skipping lines that fail to parse.
fn find_in_lines<I>(lines: I, words: &[String]) -> io::Result<Option<PasswordRecord>>
where
    I: IntoIterator<Item = io::Result<Vec<u8>>>,
{
    for (index, line) in lines.into_iter().enumerate() {
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(_) => {
                warn!(
                    "Skipping stored record: {}",
                    Error::MalformedRecord {
                        line: index + 1,
                        reason: "not valid UTF-8",
                    }
                );
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(index + 1, &line) {
            Ok(record) if record.words == words => return Ok(Some(record)),
            Ok(_) => {}
            Err(e) => warn!("Skipping stored record: {}", e),
        }
    }

    Ok(None)
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

pub trait RecordStore {
    fn find_by_words(&self, words: &[String]) -> Result<Option<PasswordRecord>>;

    fn append(&mut self, record: &PasswordRecord) -> Result<()>;

    /// Human-readable location, for messages.
    fn location(&self) -> String;
}

/// Plain-text ledger on disk. A file that does not exist yet reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: io::Error) -> Error {
        Error::store(self.path.display().to_string(), source)
    }
}

impl RecordStore for FileStore {
    fn find_by_words(&self, words: &[String]) -> Result<Option<PasswordRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store does not exist yet");
                return Ok(None);
            }
            Err(e) => return Err(self.unavailable(e)),
        };

        let found = find_in_lines(BufReader::new(file).split(b'\n'), words)
            .map_err(|e| self.unavailable(e))?;
        debug!(path = %self.path.display(), hit = found.is_some(), "Scanned store");
        Ok(found)
    }

    fn append(&mut self, record: &PasswordRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let mut line = String::new();
        if !ends_with_newline(&mut file).map_err(|e| self.unavailable(e))? {
            line.push('\n');
        }
        line.push_str(&format_line(record));

        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| self.unavailable(e))?;

        info!(path = %self.path.display(), words = record.words.len(), "Appended record");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Same line format, kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: text.into(),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }
}

impl RecordStore for MemoryStore {
    fn find_by_words(&self, words: &[String]) -> Result<Option<PasswordRecord>> {
        let lines = self.contents.lines().map(|line| Ok(line.as_bytes().to_vec()));
        find_in_lines(lines, words).map_err(|e| Error::store(self.location(), e))
    }

    fn append(&mut self, record: &PasswordRecord) -> Result<()> {
        if !self.contents.is_empty() && !self.contents.ends_with('\n') {
            self.contents.push('\n');
        }
        self.contents.push_str(&format_line(record));
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
