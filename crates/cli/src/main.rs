//! FixtureDB CLI: load test fixtures into an in-memory collection store.
//!
//! - `fixturedb load`: load the reference set (or `--file`), print the
//!   summary, verify per-collection counts
//! - `fixturedb dump`: print the reference set as a fixture file
//! - `fixturedb init-config`: write a default `fixturedb.toml`
//!
//! Exit codes: 0 on success, 1 on a load or usage error, 2 when a
//! collection count does not match its expectation.

mod commands;
mod format;

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use fixturedb_core::DuplicatePolicy;
use fixturedb_engine::{fixtures, FixtureStore, LoaderConfig, CONFIG_FILE_NAME};
use fixturedb_storage::MemoryStore;
use tracing::Level;

use commands::build_cli;
use format::{format_error, format_report, OutputMode};

const EXIT_LOAD_ERROR: i32 = 1;
const EXIT_COUNT_MISMATCH: i32 = 2;

fn main() {
    let matches = build_cli().get_matches();

    let exit_code = match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("(error) {:#}", e);
            EXIT_LOAD_ERROR
        }
    };
    process::exit(exit_code);
}

fn run(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("load", sub)) => {
            let config = load_config(sub)?;
            init_logging(sub, &config)?;
            run_load(sub, &config)
        }
        Some(("dump", _)) => {
            println!("{}", fixtures::to_fixture_json(&fixtures::reference_batches())?);
            Ok(0)
        }
        Some(("init-config", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            if LoaderConfig::write_default_if_missing(&path)? {
                println!("Wrote {}", path.display());
            } else {
                println!("{} already exists, left unchanged", path.display());
            }
            Ok(0)
        }
        Some((other, _)) => anyhow::bail!("unknown command '{}'", other),
        None => anyhow::bail!("no command given"),
    }
}

/// An explicit `--config` must exist; the implicit `./fixturedb.toml` is
/// optional.
fn load_config(matches: &ArgMatches) -> Result<LoaderConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => LoaderConfig::from_file(Path::new(path))
            .with_context(|| format!("loading config '{}'", path)),
        None => Ok(LoaderConfig::from_file_or_default(Path::new(
            CONFIG_FILE_NAME,
        ))?),
    }
}

fn init_logging(matches: &ArgMatches, config: &LoaderConfig) -> Result<()> {
    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(config.log_level.as_str());
    let level = Level::from_str(level)
        .map_err(|_| anyhow::anyhow!("invalid log level '{}'", level))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
    Ok(())
}

fn run_load(matches: &ArgMatches, config: &LoaderConfig) -> Result<i32> {
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let mut store = FixtureStore::from_config(Arc::new(MemoryStore::new()), config)?;
    if let Some(policy) = matches.get_one::<String>("on-duplicate") {
        store = store.with_policy(DuplicatePolicy::from_str(policy)?);
    }
    if matches.get_flag("clear") {
        store = store.with_clear_existing(true);
    }

    let (batches, expected) = match matches.get_one::<String>("file") {
        Some(path) => (
            fixtures::read_fixture_file(Path::new(path))?,
            config.expected.clone(),
        ),
        None if config.expected.is_empty() => (
            fixtures::reference_batches(),
            fixtures::reference_expectations(),
        ),
        None => (fixtures::reference_batches(), config.expected.clone()),
    };

    let runs = if matches.get_flag("twice") { 2 } else { 1 };
    let mut summaries = Vec::with_capacity(runs);
    for _ in 0..runs {
        match store.load_all(&batches) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                return Ok(EXIT_LOAD_ERROR);
            }
        }
    }

    let mismatches = store.verify(&expected)?;
    let report = format_report(&summaries, &mismatches, mode);
    if !report.is_empty() {
        println!("{}", report);
    }

    if mismatches.is_empty() {
        Ok(0)
    } else {
        Ok(EXIT_COUNT_MISMATCH)
    }
}
