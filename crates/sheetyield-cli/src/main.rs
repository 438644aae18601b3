//! Driver binary: loads a schema document, then for every declared scheme
//! opens its workbook(s), parses rows into records, builds the keyed store,
//! and emits the `.bytes` envelope and `.lua` text literal.

mod error;
mod scheme;
mod workbook;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sheetyield_descriptor::SchemaDocument;

/// Parse spreadsheet-backed schema documents into a binary envelope and a
/// text literal per scheme.
#[derive(Parser)]
#[command(name = "sheetyield", version, about)]
struct Cli {
    /// Path to the schema document (YAML or JSON).
    schema_path: Option<PathBuf>,

    /// Raise the log level to debug.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Lower the log level to warn.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a schema document, optionally printing its generated JSON Schema.
    Schema {
        /// Path to the schema document (YAML or JSON).
        path: PathBuf,
        /// Print the JSON Schema generated for the schema-document format itself.
        #[arg(long)]
        print: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let code = run(&cli);
    std::process::exit(code);
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_directive = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Exit codes: `0` success, `-1` schema document failed to load/parse/validate,
/// `-2` every scheme failed for a non-I/O reason, `-3` every scheme failed and
/// every failure was an I/O error writing its output artifacts.
fn run(cli: &Cli) -> i32 {
    if let Some(Command::Schema { path, print }) = &cli.command {
        return match run_schema_command(path, *print) {
            Ok(()) => 0,
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "schema command failed");
                -1
            }
        };
    }

    let Some(schema_path) = &cli.schema_path else {
        eprintln!("error: a schema path is required (see --help)");
        return -1;
    };

    let doc = match load_schema_document(schema_path) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::error!(
                error = %format!("{err:#}"),
                path = %schema_path.display(),
                "failed to load schema document"
            );
            return -1;
        }
    };

    let mut succeeded = 0usize;
    let mut io_only = true;

    for name in &doc.schemes {
        match scheme::run_scheme(&doc, name) {
            Ok(()) => {
                tracing::info!(scheme = name.as_str(), "wrote .bytes and .lua artifacts");
                succeeded += 1;
            }
            Err(err) => {
                io_only &= err.is_io();
                tracing::error!(
                    scheme = name.as_str(),
                    error = %err,
                    "scheme failed; continuing to the next scheme"
                );
            }
        }
    }

    if succeeded > 0 {
        0
    } else if io_only && !doc.schemes.is_empty() {
        -3
    } else {
        -2
    }
}

fn load_schema_document(path: &Path) -> anyhow::Result<SchemaDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema document `{}`", path.display()))?;
    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        SchemaDocument::from_json_str(&content)
            .with_context(|| format!("failed to parse `{}` as JSON", path.display()))
    } else {
        SchemaDocument::from_yaml_str(&content)
            .with_context(|| format!("failed to parse `{}` as YAML", path.display()))
    }
}

fn run_schema_command(path: &Path, print: bool) -> anyhow::Result<()> {
    let doc = load_schema_document(path)?;
    sheetyield_descriptor::validate_document(&doc)
        .with_context(|| format!("schema document `{}` failed validation", path.display()))?;
    println!(
        "schema document `{}` is valid ({} scheme(s))",
        path.display(),
        doc.schemes.len()
    );
    if print {
        println!("{}", sheetyield_descriptor::generate_schema_json_pretty());
    }
    Ok(())
}
