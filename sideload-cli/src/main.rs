//! Sideload CLI - Command-line tool for sideload normalization
//!
//! This binary provides command-line interfaces for:
//! - transform: apply a spec file to a JSON document
//! - get: read a single value with default fallback
//! - paths: list every leaf a property path visits

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use sideload_core::{for_each_property, get_value, Limits, PropertyPath};
use sideload_io::{load_spec, transform_reader, TransformOptions, TransformSummary};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sideload")]
#[command(about = "Normalize nested JSON into sideloaded collections")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a transformation spec to a JSON document
    ///
    /// Examples:
    ///   sideload transform books.json --spec books.toml
    ///   cat books.json | sideload transform - --spec books.json -o out.json --pretty
    Transform {
        /// Input file (JSON object or array), `-` for stdin
        input: PathBuf,
        /// Spec file (.toml or .json)
        #[arg(long)]
        spec: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
        /// Maximum nesting depth accepted in the input
        #[arg(long)]
        max_depth: Option<usize>,
        /// Show progress spinner while transforming
        #[arg(long)]
        progress: bool,
    },
    /// Read the value at a path
    ///
    /// Falsy values (false, 0, "") and missing values yield the default.
    Get {
        /// Input file, `-` for stdin
        input: PathBuf,
        /// Dot-separated property path
        #[arg(long)]
        path: PropertyPath,
        /// JSON value printed when nothing usable is found
        #[arg(long)]
        default: Option<String>,
    },
    /// Print every leaf a path visits as `{"key": ..., "value": ...}` lines
    Paths {
        /// Input file, `-` for stdin
        input: PathBuf,
        /// Dot-separated property path
        #[arg(long)]
        path: PropertyPath,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Transform {
            input,
            spec,
            output,
            pretty,
            max_depth,
            progress,
        } => {
            handle_transform(input, spec, output, pretty, max_depth, progress)?;
        }
        Commands::Get {
            input,
            path,
            default,
        } => {
            handle_get(input, path, default)?;
        }
        Commands::Paths { input, path } => {
            handle_paths(input, path)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_transform(
    input: PathBuf,
    spec_path: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
    max_depth: Option<usize>,
    show_progress: bool,
) -> Result<(), Box<dyn Error>> {
    let spec = load_spec(&spec_path)?;
    debug!(spec = %spec_path.display(), sideloads = spec.sideloads.len(), "loaded spec");

    let mut limits = Limits::default();
    if let Some(depth) = max_depth {
        limits.max_nesting_depth = depth;
    }
    let options = TransformOptions { limits, pretty };

    let reader = open_input(&input)?;
    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut progress_bar = show_progress.then(|| create_spinner("Transforming document"));
    let summary = transform_reader(reader, writer, &spec, &options)?;
    if let Some(pb) = progress_bar.take() {
        pb.finish_with_message(format!(
            "Transformed {} records into {} collections in {:.2?}",
            summary.top_level_elements,
            summary.collections.len(),
            summary.duration
        ));
    }

    if let Some(path) = &output {
        report_transform_summary(&summary, path)?;
    }
    Ok(())
}

fn report_transform_summary(summary: &TransformSummary, output: &Path) -> Result<(), Box<dyn Error>> {
    let mut stderr = std::io::stderr().lock();
    let collections = summary
        .collections
        .iter()
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(
        &mut stderr,
        "Wrote {} ({} input, records: {}, collections: [{}], elapsed: {:.2?})",
        output.display(),
        summary.shape.as_str(),
        summary.top_level_elements,
        collections,
        summary.duration
    )?;
    Ok(())
}

fn handle_get(
    input: PathBuf,
    path: PropertyPath,
    default: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let document = read_document(&input)?;
    let default = default
        .map(|raw| serde_json::from_str::<Value>(&raw))
        .transpose()
        .map_err(|err| format!("--default is not valid JSON: {}", err))?;

    match get_value(&document, &path, default.as_ref()) {
        Some(value) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", serde_json::to_string(value)?)?;
            Ok(())
        }
        None => Err(format!("No value at '{}'", path).into()),
    }
}

fn handle_paths(input: PathBuf, path: PropertyPath) -> Result<(), Box<dyn Error>> {
    let document = read_document(&input)?;
    let mut writer = BufWriter::new(std::io::stdout().lock());
    let mut lines = Vec::new();

    for_each_property(&document, std::slice::from_ref(&path), |value, _, key| {
        lines.push(json!({ "key": key, "value": value }));
    });
    for line in &lines {
        writeln!(writer, "{}", serde_json::to_string(line)?)?;
    }
    writer.flush()?;

    debug!(path = %path, visits = lines.len(), "listed paths");
    Ok(())
}

fn open_input(input: &Path) -> Result<Box<dyn Read>, Box<dyn Error>> {
    if input.as_os_str() == "-" {
        Ok(Box::new(std::io::stdin().lock()))
    } else {
        let file = File::open(input)
            .map_err(|err| format!("Failed to open {}: {}", input.display(), err))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn read_document(input: &Path) -> Result<Value, Box<dyn Error>> {
    let reader = open_input(input)?;
    let value = serde_json::from_reader(reader)
        .map_err(|err| format!("Failed to parse {}: {}", input.display(), err))?;
    Ok(value)
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn transform_args_parse() {
        let cli = Cli::try_parse_from([
            "sideload", "transform", "in.json", "--spec", "s.toml", "-o", "out.json", "--pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Transform {
                spec,
                output,
                pretty,
                ..
            } => {
                assert_eq!(spec, PathBuf::from("s.toml"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(pretty);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn malformed_path_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["sideload", "get", "in.json", "--path", "a..b"]).is_err());
    }
}
