/*!
Main binary for srch.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::{self, IsTerminal, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use srch::commands::{self, search::Input, search::SearchOptions};
use srch::output::OutputOptions;
use srch::query::{Query, ValueMode};

/// Search JSON documents for values at a field path.
///
/// Example: `srch fieldOne.isPresent true data/*.json`
#[derive(Parser)]
#[command(
    name = "srch",
    version,
    about,
    arg_required_else_help = true,
    args_conflicts_with_subcommands = true,
    disable_help_subcommand = true
)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    /// Field path to search for. Only its tail needs to be given, e.g.
    /// "isPresent" matches "someList.1.fieldOne.isPresent". Segments made of
    /// digits are array indices. Put `--` before a path that starts with
    /// "generate", e.g. `srch -- generate x data.json`.
    #[arg(value_name = "SEARCH_PATH")]
    search_path: Option<String>,
    /// Pattern the value must match: a regex over the value's text, or a
    /// numeric range such as ">0<2" with --numeric
    #[arg(value_name = "SEARCH_TERM", allow_hyphen_values = true)]
    search_term: Option<String>,
    /// JSON files to search. If omitted, reads from STDIN
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
    /// Search this JSON string instead of files or STDIN
    #[arg(short, long, value_name = "JSON_STRING", conflicts_with = "files")]
    json_string: Option<String>,
    /// Interpret SEARCH_TERM as a numeric range, e.g. ">0<2" or "<=100"
    #[arg(short, long, action = ArgAction::SetTrue)]
    numeric: bool,
    /// Only report the first match of each input
    #[arg(short, long, action = ArgAction::SetTrue)]
    single: bool,
    /// Print the file containing each match instead of its path and value
    #[arg(short = 'p', long = "path", action = ArgAction::SetTrue)]
    file_path: bool,
    /// Separator between segments of SEARCH_PATH and of printed paths
    #[arg(short = 'f', long, value_name = "SEP", default_value = ".")]
    field_path_separator: String,
    /// Separator for printed paths, if different from the input separator
    #[arg(short, long, value_name = "SEP")]
    output_separator: Option<String>,
    /// Do not print the matched values
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    hide_value: bool,
    /// When to colorize the output
    #[arg(
        long,
        value_name = "WHEN",
        value_enum,
        default_value_t = ColorWhen::Auto
    )]
    color: ColorWhen,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// When to colorize the output.
#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    /// Colorize when STDOUT is a terminal and `NO_COLOR` is unset
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}

/// Available subcommands for `srch`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate man pages for srch to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Builds the query before touching any input, then searches the given
/// files, the inline JSON string, or STDIN. Exits with status 2 if any file
/// had to be skipped.
fn main() -> Result<ExitCode> {
    let mut args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command.take() {
        Some(Commands::Generate(cmd)) => {
            match cmd {
                GenerateCommand::Shell { shell } => {
                    commands::generate::generate_completions(
                        shell,
                        &mut Args::command(),
                        &mut stdout().lock(),
                    );
                }
                GenerateCommand::Man { output_dir } => {
                    for path in commands::generate::generate_man_pages(
                        &Args::command(),
                        output_dir,
                    )? {
                        println!("Generated: {}", path.display());
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        None => search(args),
    }
}

/// Run the default search command.
fn search(args: Args) -> Result<ExitCode> {
    let (Some(search_path), Some(search_term)) =
        (args.search_path, args.search_term)
    else {
        anyhow::bail!(
            "SEARCH_PATH and SEARCH_TERM are required unless using a subcommand"
        );
    };

    let mode =
        if args.numeric { ValueMode::Numeric } else { ValueMode::Regex };
    let query = Query::new(
        &search_path,
        &args.field_path_separator,
        &search_term,
        mode,
    )
    .context("Failed to parse query")?;

    let input = if let Some(json) = args.json_string {
        Input::Inline(json)
    } else if !args.files.is_empty() {
        Input::Files(args.files)
    } else {
        if io::stdin().is_terminal() {
            // No piped input and no file specified
            let mut cmd = Args::command();
            cmd.print_help()?;
            return Ok(ExitCode::SUCCESS);
        }
        Input::Stdin
    };

    let color = match args.color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => {
            stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    };
    colored::control::set_override(color);

    let options = SearchOptions {
        single: args.single,
        output: OutputOptions {
            separator: args
                .output_separator
                .unwrap_or(args.field_path_separator),
            hide_value: args.hide_value,
            file_only: args.file_path,
            color,
        },
    };

    let summary =
        commands::search::run(&query, &input, &options, &mut stdout().lock())?;
    log::debug!(
        "{} match(es), {} input(s) skipped",
        summary.matches,
        summary.skipped
    );

    if summary.skipped > 0 {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
