//! Command line front end for the radix sort engine
//!
//! Reads lines from files or standard input, sorts them as text or as signed
//! integers, and writes the result to standard output or a file.

use std::process;
use clap::{Arg, ArgAction, Command};

use radix_engine::{
    config::{EngineConfigBuilder, StringPadding},
    error::{SortError, SortResult},
    sort, EngineConfig, SortArgs,
};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("debug"));

    match run(&matches) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("radix-sort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run(matches: &clap::ArgMatches) -> SortResult<i32> {
    let (args, config) = parse_matches(matches)?;
    sort(&args, &config)
}

/// `RUST_LOG` wins; `--debug` only changes the default filter
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();
}

fn build_cli() -> Command {
    Command::new("radix-sort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("radix-sort [OPTION]... [FILE]...")
        .about("Sort lines of text files with radix sort")
        .long_about("Sort lines of text files with radix sort.\n\nLines are sorted as text by default (byte order, shorter lines first on a common prefix). With -n every line must hold one signed 64-bit integer.")

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Sort mode
        .arg(Arg::new("numeric-sort")
            .short('n')
            .long("numeric-sort")
            .help("Sort lines as signed integers")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))

        // I/O options
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("zero-terminated")
            .short('z')
            .long("zero-terminated")
            .help("Line delimiter is NUL, not newline")
            .action(ArgAction::SetTrue))

        // Engine options
        .arg(Arg::new("parallel")
            .long("parallel")
            .help("Number of counting workers for numeric digit passes")
            .value_name("N"))
        .arg(Arg::new("sequential")
            .long("sequential")
            .help("Run every digit pass on the calling thread")
            .action(ArgAction::SetTrue)
            .conflicts_with("parallel"))
        .arg(Arg::new("padding")
            .long("padding")
            .help("How shorter lines are padded for text sorting")
            .long_help("How shorter lines are padded for text sorting: 'end' ranks the end of a line below every character, 'space' pads with spaces (lines must not contain characters below space)")
            .value_name("MODE")
            .value_parser(["end", "space"]))
        .arg(Arg::new("numeric-threshold")
            .long("numeric-threshold")
            .help("Below this many lines numeric input is insertion sorted")
            .value_name("N"))
        .arg(Arg::new("string-threshold")
            .long("string-threshold")
            .help("Below this many lines text input is insertion sorted")
            .value_name("N"))

        .arg(Arg::new("debug")
            .long("debug")
            .help("Log engine decisions to stderr")
            .action(ArgAction::SetTrue))
}

fn parse_count(matches: &clap::ArgMatches, name: &str) -> SortResult<Option<usize>> {
    matches
        .get_one::<String>(name)
        .map(|value| {
            value
                .parse::<usize>()
                .map_err(|_| SortError::internal(&format!("invalid --{name} value: {value}")))
        })
        .transpose()
}

/// Parse arguments and engine configuration from command line matches
fn parse_matches(matches: &clap::ArgMatches) -> SortResult<(SortArgs, EngineConfig)> {
    let args = SortArgs {
        files: matches
            .get_many::<String>("files")
            .unwrap_or_default()
            .cloned()
            .collect(),
        output: matches.get_one::<String>("output").cloned(),
        numeric_sort: matches.get_flag("numeric-sort"),
        check: matches.get_flag("check"),
        zero_terminated: matches.get_flag("zero-terminated"),
    };

    let mut builder = EngineConfigBuilder::new();

    if matches.get_flag("sequential") {
        builder = builder.sequential();
    }
    if let Some(threads) = parse_count(matches, "parallel")? {
        builder = builder.threads(threads);
    }
    if let Some(threshold) = parse_count(matches, "numeric-threshold")? {
        builder = builder.numeric_threshold(threshold);
    }
    if let Some(threshold) = parse_count(matches, "string-threshold")? {
        builder = builder.string_threshold(threshold);
    }
    if let Some(padding) = matches.get_one::<String>("padding") {
        builder = builder.string_padding(padding.parse::<StringPadding>()?);
    }

    let config = builder.build()?;
    Ok((args, config))
}
