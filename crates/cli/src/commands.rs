//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("fixturedb")
        .about("Load test fixtures into collection-scoped document stores")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Config file (default: ./fixturedb.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .help("Log level (overrides the config file)")
                .global(true),
        )
        .subcommand(build_load())
        .subcommand(build_dump())
        .subcommand(build_init_config())
}

fn build_load() -> Command {
    Command::new("load")
        .about("Load the reference fixtures (or a fixture file) and verify counts")
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .help("Fixture file: a JSON array of {collection, documents} batches"),
        )
        .arg(
            Arg::new("on-duplicate")
                .long("on-duplicate")
                .value_name("POLICY")
                .value_parser(["reject", "overwrite"])
                .help("What to do when a URI is already stored"),
        )
        .arg(
            Arg::new("clear")
                .long("clear")
                .help("Empty the target collections before loading")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("twice")
                .long("twice")
                .help("Run the load a second time against the same store")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue),
        )
}

fn build_dump() -> Command {
    Command::new("dump").about("Print the reference fixtures as a fixture file")
}

fn build_init_config() -> Command {
    Command::new("init-config")
        .about("Write a default config file if none exists")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Where to write it (default: ./fixturedb.toml)"),
        )
}
