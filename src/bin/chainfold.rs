//! Command-line interface for chainfold
//! This binary compiles call chains given inline or read from files, in any of the
//! processor's stage/format views.
//!
//! Usage:
//!   chainfold compile `<source>` [--format `<format>`]   - Process one chain given as text
//!   chainfold execute `<path>` [--format `<format>`]     - Process each non-blank line of a file
//!   chainfold list-formats                             - List all available formats
//!
//! Both processing commands accept `--config <path>` and `--no-simplify`. Settings are
//! layered: built-in defaults, then `./chainfold.toml` if present, then `--config`, then
//! flags.
//!
//! `execute` prints one line per successfully processed input line. Lines that fail in
//! a structured format are reported on stderr as `path:line: error`, processing goes on,
//! and the exit status is 1.

use chainfold::chain::config::{ChainfoldConfig, Loader, LOCAL_CONFIG_FILE};
use chainfold::chain::pipeline::CompileOptions;
use chainfold::chain::processor::{
    available_formats, process_file, process_source, ProcessingSpec,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("chainfold")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile map/filter call chains into a canonical filter + map pair")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_processing_args(
            Command::new("compile")
                .about("Process a single call chain given on the command line")
                .arg(
                    Arg::new("source")
                        .help("Call chain source, e.g. 'map{(element+1)}'")
                        .required(true)
                        .index(1),
                ),
        ))
        .subcommand(with_processing_args(
            Command::new("execute")
                .about("Process every non-blank line of a file as a call chain")
                .arg(
                    Arg::new("path")
                        .help("Path to the file of call chains")
                        .required(true)
                        .index(1),
                ),
        ))
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("compile", compile_matches)) => {
            let config = load_config(compile_matches);
            let source = required(compile_matches, "source");
            handle_compile_command(source, &config);
        }
        Some(("execute", execute_matches)) => {
            let config = load_config(execute_matches);
            let path = required(execute_matches, "path");
            handle_execute_command(path, &config);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

/// Arguments shared by the processing subcommands
fn with_processing_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'canonical-simple', 'ast-json'); defaults to output.format"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("no-simplify")
                .long("no-simplify")
                .help("Fold the chain without running the algebraic simplifier")
                .action(ArgAction::SetTrue),
        )
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| {
            eprintln!("Error: missing argument '{}'", name);
            std::process::exit(2);
        })
}

/// Layer defaults, the local file, `--config` and flags, then start logging
fn load_config(matches: &ArgMatches) -> ChainfoldConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("no-simplify") {
        loader = loader
            .set_override("compile.simplify", false)
            .unwrap_or_else(|e| fail("Configuration error", e));
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .unwrap_or_else(|e| fail("Configuration error", e));
    }
    let config = loader
        .build()
        .unwrap_or_else(|e| fail("Configuration error", e));

    init_logging(&config.logging.level);
    debug!(?config, "configuration loaded");
    config
}

/// Install the stderr subscriber; `RUST_LOG` overrides the configured level
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn spec_and_options(config: &ChainfoldConfig) -> (ProcessingSpec, CompileOptions) {
    let spec = ProcessingSpec::from_string(&config.output.format)
        .unwrap_or_else(|e| fail("Format error", e));
    (spec, CompileOptions::from(&config.compile))
}

/// Handle the compile command
fn handle_compile_command(source: &str, config: &ChainfoldConfig) {
    let (spec, options) = spec_and_options(config);
    let output =
        process_source(source, &spec, options).unwrap_or_else(|e| fail("Processing error", e));
    println!("{}", output);
}

/// Handle the execute command
fn handle_execute_command(path: &str, config: &ChainfoldConfig) {
    let (spec, options) = spec_and_options(config);
    let outcomes =
        process_file(path, &spec, options).unwrap_or_else(|e| fail("Processing error", e));

    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(output) => println!("{}", output),
            Err(err) => {
                failed += 1;
                eprintln!("{}:{}: {}", path, outcome.line, err);
            }
        }
    }
    if failed > 0 {
        debug!(failed, "some lines failed to process");
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}

/// Report a fatal error and exit. Printed directly, since logging may not be set up yet
fn fail<E: std::fmt::Display>(context: &str, err: E) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}
