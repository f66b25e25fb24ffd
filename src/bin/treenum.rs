//! Command-line interface for treenum
//! Converts a binary tree between its notations (prefix, bracket, decimal) and views it.
//!
//! Usage:
//!   treenum convert [`<input>`] [--format `<format>`]...  - Parse a tree and print it in other formats
//!   treenum list-formats                                - List all available formats
//!
//! Global options:
//!   --config `<path>`   Layer a TOML file over the built-in defaults (after ./treenum.toml)
//!   --fill `<mode>`     Fill mode used by treeviz output (all, frontier, none)
//!
//! Set RUST_LOG (e.g. `RUST_LOG=treenum=debug`) for diagnostics on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use treenum::formats::FormatRegistry;
use treenum::settings::{Sources, TreeConfig};

/// Optional per-directory configuration, layered before --config
const LOCAL_CONFIG: &str = "treenum.toml";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treenum=warn")),
        )
        .init();

    let matches = Command::new("treenum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert binary trees between notations and integer codes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("fill")
                .long("fill")
                .global(true)
                .help("Fill mode for treeviz output (all, frontier, none)"),
        )
        .subcommand(
            Command::new("convert")
                .about("Parse a tree and print it in the requested formats")
                .arg(
                    Arg::new("input")
                        .help("Tree in prefix, bracket or decimal notation (stdin when omitted)")
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .action(ArgAction::Append)
                        .help("Output format (repeatable; see list-formats)"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            handle_convert_command(convert_matches);
        }
        Some(("list-formats", list_matches)) => {
            handle_list_formats_command(list_matches);
        }
        _ => unreachable!(),
    }
}

fn load_config(matches: &ArgMatches) -> TreeConfig {
    let sources = Sources {
        local: Some(PathBuf::from(LOCAL_CONFIG)),
        explicit: matches.get_one::<String>("config").map(PathBuf::from),
        fill: matches.get_one::<String>("fill").cloned(),
    };
    debug!(?sources, "loading configuration");
    sources.load().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) {
    let config = load_config(matches);

    let input = match matches.get_one::<String>("input") {
        Some(input) => input.clone(),
        None => read_stdin(),
    };

    let tree = treenum::parse(&input).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    debug!(height = tree.height(), nodes = tree.node_count(), "parsed tree");

    let formats: Vec<String> = match matches.get_many::<String>("format") {
        Some(requested) => requested.cloned().collect(),
        None => config.output.formats.clone(),
    };

    // Render everything before printing so a bad format name leaves stdout empty
    let registry = FormatRegistry::new(config.layout.fill);
    let rendered = formats
        .iter()
        .map(|format| registry.render(&tree, format))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if let [output] = rendered.as_slice() {
        println!("{}", output.trim_end_matches('\n'));
        return;
    }
    for (format, output) in formats.iter().zip(&rendered) {
        let output = output.trim_end_matches('\n');
        if output.contains('\n') {
            println!("{}:\n{}", format, output);
        } else {
            println!("{}: {}", format, output);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let registry = FormatRegistry::new(config.layout.fill);

    println!("Available formats:\n");
    for format in registry.iter() {
        if format.round_trips() {
            println!("  {} (parseable)", format.name());
        } else {
            println!("  {}", format.name());
        }
        println!("    {}", format.summary());
    }
}

fn read_stdin() -> String {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        });
    input.trim_end_matches(['\n', '\r']).to_string()
}
