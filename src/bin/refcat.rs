//! Command-line query surface for the refactoring catalog.
//!
//! Loads one catalog document, validates it, and answers a single query per
//! invocation. Results go to stdout (text or `--json`); logs go to stderr.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use refcat::{
    CatalogStore, CoverageEntry, Entry, EntryCategory, EntryId, build_technique_coverage,
    default_catalog_path, lint_catalog, load_catalog, unremedied_smells,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "refcat",
    about = "Look up code smells and refactoring techniques",
    version
)]
struct Cli {
    /// Catalog document to load (defaults to $REFCAT_CATALOG or the bundled catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level; RUST_LOG overrides it when set
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one entry by id
    Get { id: String },
    /// List entries, optionally restricted to one category
    List {
        #[arg(long)]
        category: Option<EntryCategory>,
    },
    /// Entries referenced by an entry, in declared order
    Refs { id: String },
    /// Entries that reference an entry
    Referrers { id: String },
    /// Case-insensitive search over titles and bodies
    Search {
        #[arg(default_value = "")]
        text: String,
    },
    /// Check authoring conventions; exits 1 when anything is reported
    Lint,
    /// Which smells point at each technique
    Coverage,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let path = match &cli.catalog {
        Some(path) => path.clone(),
        None => default_catalog_path()?,
    };
    debug!(path = %path.display(), "resolved catalog path");
    let store = load_catalog(&path)?;
    let lookup = store.lookup();

    match &cli.command {
        Command::Get { id } => {
            let id = EntryId::from(id.as_str());
            let Some(entry) = store.get(&id) else {
                bail!("entry not found: {id}");
            };
            if cli.json {
                print_json(entry)?;
            } else {
                print_entry(entry);
            }
        }
        Command::List { category } => {
            let entries: Vec<&Entry> = match category {
                Some(category) => lookup.by_category(*category),
                None => store.all().collect(),
            };
            emit_list(&entries, cli.json)?;
        }
        Command::Refs { id } => {
            let entries = lookup.resolve_references(&EntryId::from(id.as_str()))?;
            emit_list(&entries, cli.json)?;
        }
        Command::Referrers { id } => {
            let entries = lookup.referrers(&EntryId::from(id.as_str()))?;
            emit_list(&entries, cli.json)?;
        }
        Command::Search { text } => {
            emit_list(&lookup.search(text), cli.json)?;
        }
        Command::Lint => run_lint(&store, cli.json)?,
        Command::Coverage => run_coverage(&store, cli.json)?,
    }
    Ok(())
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{rendered}");
    Ok(())
}

fn emit_list(entries: &[&Entry], as_json: bool) -> Result<()> {
    if as_json {
        return print_json(entries);
    }
    for entry in entries {
        println!("{:<32} {:<10} {}", entry.id, entry.category, entry.title);
    }
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("{} [{}]", entry.title, entry.category);
    println!("id: {}", entry.id);
    println!();
    println!("{}", entry.body.trim_end());
    for example in &entry.examples {
        println!();
        println!("--- {}", example.label);
        println!("{}", example.snippet.trim_end());
    }
    if !entry.references.is_empty() {
        println!();
        let refs: Vec<&str> = entry.references.iter().map(EntryId::as_str).collect();
        println!("see also: {}", refs.join(", "));
    }
}

#[derive(Serialize)]
struct LintReport<'a> {
    findings: &'a [String],
}

#[derive(Serialize)]
struct CoverageReport<'a> {
    techniques: &'a BTreeMap<String, CoverageEntry>,
    unremedied_smells: &'a [EntryId],
}

fn run_lint(store: &CatalogStore, as_json: bool) -> Result<()> {
    let findings = lint_catalog(store);
    if as_json {
        print_json(&LintReport {
            findings: &findings,
        })?;
    } else {
        for finding in &findings {
            println!("{finding}");
        }
    }
    if !findings.is_empty() {
        bail!("{} lint finding(s)", findings.len());
    }
    Ok(())
}

fn run_coverage(store: &CatalogStore, as_json: bool) -> Result<()> {
    let coverage = build_technique_coverage(store);
    let unremedied = unremedied_smells(store);
    if as_json {
        return print_json(&CoverageReport {
            techniques: &coverage,
            unremedied_smells: &unremedied,
        });
    }
    for (technique, entry) in &coverage {
        let smells = if entry.referenced {
            entry.smell_ids.join(", ")
        } else {
            "-".to_string()
        };
        println!("{technique:<32} {smells}");
    }
    for id in &unremedied {
        println!("unremedied smell: {id}");
    }
    Ok(())
}
