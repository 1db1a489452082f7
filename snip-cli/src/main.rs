//! Command-line interface for snip
//! This binary converts TextMate, Sublime Text and JSON snippets into JSON or Atom CSON.
//!
//! Usage:
//!   snip `<input>`... [-o json|cson] [-d `<dir>`] [--split | --merge]   - Convert snippet files
//!   snip --list-formats                                              - List all available formats
//!
//! Settings are layered: built-in defaults, then `./snip.toml` if present, then
//! `--config <file>`, then flags.

mod inputs;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use snip_babel::{Conversion, FormatRegistry, RunSummary};
use snip_config::{Loader, SnipConfig};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";
const LOCAL_CONFIG_FILE: &str = "snip.toml";

fn cli() -> Command {
    Command::new("snip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert editor snippets to JSON or Atom CSON")
        .arg_required_else_help(true)
        .arg(
            Arg::new("inputs")
                .help("Snippet files, directories or glob patterns")
                .num_args(1..)
                .required_unless_present("list-formats"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Read every input with this format instead of guessing from the extension")
                .value_parser(["textmate", "sublime", "json"]),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output format")
                .value_parser(["json", "cson"]),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('d')
                .help("Directory the converted files are written to"),
        )
        .arg(
            Arg::new("split")
                .long("split")
                .help("Write one file per snippet")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("merge")
                .long("merge")
                .help("Merge all inputs into one document before writing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("merge-name")
                .long("merge-name")
                .help("File name (without extension) of the merged output")
                .requires("merge"),
        )
        .arg(
            Arg::new("scope")
                .long("scope")
                .help("Scope applied to every input, replacing the one it declares"),
        )
        .arg(
            Arg::new("strict-dupes")
                .long("strict-dupes")
                .help("Fail when a trigger is defined twice")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-validation")
                .long("no-validation")
                .help("Skip well-formedness checks on input files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-tabstops")
                .long("no-tabstops")
                .help("Do not append a final $0 tab stop to CSON bodies")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-comment")
                .long("no-comment")
                .help("Omit the attribution comment/key in generated files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .long("silent")
                .short('s')
                .help("Print nothing, report failure through the exit code only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a snip.toml configuration file"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available input and output formats")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return ExitCode::SUCCESS;
    }

    let mut silent = matches.get_flag("silent");
    let result = load_config(&matches).and_then(|config| {
        silent = config.convert.silent;
        if !silent {
            init_logging();
        }
        handle_convert_command(&matches, &config)
    });

    match result {
        Ok(summary) => {
            tracing::info!(
                "Converted {} file(s), wrote {} file(s)",
                summary.inputs_read,
                summary.outputs_written
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            if !silent {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

/// Layer the config file and command-line flags over the built-in defaults.
fn load_config(matches: &ArgMatches) -> Result<SnipConfig> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let values = [
        ("from", "convert.input_format"),
        ("output", "convert.output_format"),
        ("scope", "convert.scope"),
        ("out-dir", "output.directory"),
        ("merge-name", "output.merge_name"),
    ];
    for (arg, key) in values {
        if let Some(value) = matches.get_one::<String>(arg) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }

    let switches = [
        ("split", "convert.split", true),
        ("merge", "convert.merge", true),
        ("strict-dupes", "convert.strict_duplicates", true),
        ("silent", "convert.silent", true),
        ("no-validation", "convert.validate", false),
        ("no-tabstops", "convert.auto_tabstops", false),
        ("no-comment", "convert.comment_header", false),
    ];
    for (arg, key, value) in switches {
        if matches.get_flag(arg) {
            loader = loader.set_override(key, value)?;
        }
    }

    loader.build().context("Failed to load configuration")
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &SnipConfig) -> Result<RunSummary> {
    let options = config.to_options();
    let args: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let sources = inputs::expand_inputs(&args, options.input_format)?;

    let mut conversion = Conversion::new(options);
    for source in &sources {
        conversion
            .convert(source)
            .with_context(|| format!("Failed to convert '{}'", source.path.display()))?;
    }
    Ok(conversion.finish()?)
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");

    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let directions = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "input, output",
            (true, false) => "input",
            (false, true) => "output",
            (false, false) => "none",
        };
        println!("  {name} ({directions})");
        println!("    {}", format.description());
        println!("    extensions: {}", format.extensions().join(", "));
        println!();
    }
}
