use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tripbuddy::config::{Settings, TripPaths};
use tripbuddy::models::Currency;
use tripbuddy::repl::Repl;
use tripbuddy::services::ExpenseManager;
use tripbuddy::storage::SnapshotStore;

#[derive(Parser)]
#[command(
    name = "tripbuddy",
    version,
    about = "Track a trip budget and expenses from the terminal",
    long_about = "TripBuddy keeps a running budget for a trip. Record expenses, \
                  group them into categories and review spending in the \
                  currency of your choice. Type `tutorial` once inside."
)]
struct Cli {
    /// Directory holding config.json and tripbuddy.json
    #[arg(long, env = "TRIPBUDDY_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Do not save the trip when the session ends
    #[arg(long)]
    no_save: bool,

    /// Log filter (e.g. "debug"); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match &cli.data_dir {
        Some(dir) => TripPaths::with_base_dir(dir.clone()),
        None => TripPaths::new()?,
    };

    let settings = match Settings::load_or_create(&paths) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}; using default settings", e);
            Settings::default()
        }
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&settings.log_level));
    tracing::debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    let base_currency = settings.currency().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to {}", Currency::CANONICAL);
        Currency::CANONICAL
    });

    let store = SnapshotStore::new(paths.data_file());
    let (mut manager, can_save) = load_manager(&store, &settings, base_currency);

    let mut repl = Repl::new(io::stdin().lock(), io::stdout().lock());
    let session = repl.run(&mut manager);
    drop(repl);

    // Save what was done even if the session ended on an I/O error
    if settings.autosave && !cli.no_save && can_save {
        save_trip(&paths, &store, &settings, &manager)?;
    }

    session?;
    Ok(())
}

/// RUST_LOG wins over the flag/settings level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Restore the saved trip, or start a fresh one
///
/// Also returns whether the trip may be saved on exit. An unreadable file is
/// moved aside first; if that fails it must not be overwritten.
fn load_manager(
    store: &SnapshotStore,
    settings: &Settings,
    currency: Currency,
) -> (ExpenseManager, bool) {
    let fresh = || ExpenseManager::with_base_currency(settings.default_budget_money(), currency);

    let loaded = store.load().and_then(|snapshot| match snapshot {
        Some(snapshot) => ExpenseManager::restore(snapshot, currency).map(Some),
        None => Ok(None),
    });

    match loaded {
        Ok(Some(manager)) => (manager, true),
        Ok(None) => (fresh(), true),
        Err(e) => {
            println!("{}", e);
            tracing::warn!(error = %e, "starting with an empty trip");
            match store.set_aside() {
                Ok(backup) => {
                    println!("The unreadable file was kept as {}.", backup.display());
                    (fresh(), true)
                }
                Err(move_err) => {
                    tracing::warn!(error = %move_err, "saving disabled for this session");
                    println!(
                        "{} was left untouched; this session will not be saved.",
                        store.path().display()
                    );
                    (fresh(), false)
                }
            }
        }
    }
}

/// Write the trip, and a default `config.json` on first use
fn save_trip(
    paths: &TripPaths,
    store: &SnapshotStore,
    settings: &Settings,
    manager: &ExpenseManager,
) -> Result<()> {
    store
        .save(&manager.snapshot())
        .with_context(|| format!("Error saving data to {}", store.path().display()))?;

    if !paths.settings_file().exists() {
        settings.save(paths).with_context(|| {
            format!(
                "Error writing settings to {}",
                paths.settings_file().display()
            )
        })?;
    }
    Ok(())
}
