use crate::service::{Origin, Passwords};
use anyhow::{Context, Result};
use console::Style;
use std::io::{self, BufRead, Write};
use unicode_normalization::UnicodeNormalization;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

impl DisplayOptions {
    pub fn detect(quiet: bool) -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
            quiet,
        }
    }
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

pub fn normalize_word(s: &str) -> String {
    s.trim().nfc().collect()
}

fn read_trimmed<R: BufRead>(input: &mut R, what: &str) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", what))?;

    if read == 0 {
        anyhow::bail!("Input ended before {} was given", what);
    }

    Ok(line.trim().to_string())
}

/// Asks for a word count until the answer parses.
pub fn prompt_word_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize> {
    loop {
        write!(output, "How many words do you want for your pass? ")?;
        output.flush()?;

        match read_trimmed(input, "a word count")?.parse::<usize>() {
            Ok(count) => return Ok(count),
            Err(_) => writeln!(output, "Oops! Please tell me a number")?,
        }
    }
}

pub fn prompt_words<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    count: usize,
) -> Result<Vec<String>> {
    let mut words = Vec::with_capacity(count);

    for index in 1..=count {
        write!(output, "Enter your no {} word: ", index)?;
        output.flush()?;

        let word = read_trimmed(input, &format!("word {}", index))?;
        words.push(normalize_word(&word));
    }

    Ok(words)
}

pub fn ask_user_words<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Vec<String>> {
    let count = prompt_word_count(input, output)?;
    prompt_words(input, output, count)
}

pub fn display_passwords<W: Write>(
    output: &mut W,
    passwords: &Passwords,
    location: &str,
    options: &DisplayOptions,
) -> io::Result<()> {
    let style = if options.color_support {
        Style::new().green().bold()
    } else {
        Style::new()
    };

    writeln!(
        output,
        "Your medium password is {}",
        style.apply_to(passwords.medium())
    )?;
    writeln!(
        output,
        "Your strong password is {}",
        style.apply_to(passwords.strong())
    )?;

    if !options.quiet {
        let (check_ok, _) = get_status_symbols(options.unicode_support);
        let status = match passwords.origin() {
            Origin::Generated => format!("Saved new passwords to {}", location),
            Origin::Stored => format!("Retrieved stored passwords from {}", location),
        };
        writeln!(output, "\n[{}] {}", check_ok, status)?;
    }

    Ok(())
}

/// Prints `error` and its causes behind the warning marker.
pub fn display_error<W: Write>(
    output: &mut W,
    error: &dyn std::error::Error,
    options: &DisplayOptions,
) -> io::Result<()> {
    let (_, check_warn) = get_status_symbols(options.unicode_support);
    let style = if options.color_support {
        Style::new().yellow()
    } else {
        Style::new()
    };

    writeln!(output, "{} {}", style.apply_to(format!("[{}]", check_warn)), error)?;

    let mut source = error.source();
    while let Some(cause) = source {
        writeln!(output, "    caused by: {}", cause)?;
        source = cause.source();
    }

    Ok(())
}
