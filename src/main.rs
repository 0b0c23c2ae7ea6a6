use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wordlock::config::{Config, DEFAULT_STORE_PATH};
use wordlock::store::{FileStore, RecordStore};
use wordlock::{PasswordService, ui};

#[derive(Parser)]
#[command(
    name = "wordlock",
    version,
    about = "Turns your words into a medium and a strong password, and remembers them"
)]
struct Cli {
    /// Ledger of word lists and their passwords
    #[arg(long, env = "WORDLOCK_STORE", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Symbol list, one per line (built-in list when omitted)
    #[arg(long, env = "WORDLOCK_SYMBOLS")]
    symbols: Option<PathBuf>,

    /// Print only the two passwords
    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Words to use instead of prompting for them
    words: Vec<String>,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            store_path: cli.store.clone(),
            symbols_path: cli.symbols.clone(),
            quiet: cli.quiet,
            verbosity: cli.verbose,
        }
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from(&cli);
    init_logging(&config);

    let words = if cli.words.is_empty() {
        let stdin = io::stdin();
        ui::ask_user_words(&mut stdin.lock(), &mut io::stdout())?
    } else {
        cli.words.iter().map(|w| ui::normalize_word(w)).collect()
    };

    let store = FileStore::new(&config.store_path);
    let location = store.location();
    let mut service = PasswordService::new(store, config.symbol_source(), rand::rng());

    let options = ui::DisplayOptions::detect(config.quiet);
    let passwords = match service.generate_or_retrieve(&words) {
        Ok(passwords) => passwords,
        Err(e) => {
            ui::display_error(&mut io::stderr(), &e, &options)
                .context("Failed to print error")?;
            std::process::exit(1);
        }
    };

    ui::display_passwords(&mut io::stdout(), &passwords, &location, &options)
        .context("Failed to print passwords")?;

    Ok(())
}
