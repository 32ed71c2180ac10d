//! `docsearch`: upload documents and search them with combined lexical and
//! semantic matching.
//!
//! ```bash
//! docsearch search "water pump" --file notes.txt --dir ./manuals
//! docsearch search "water pump" --file inventory.csv --json
//! docsearch repl --file notes.txt
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docsearch_cli::output::{format_json, format_search, format_upload};
use docsearch_cli::repl::{Repl, HELP};
use docsearch_cli::upload::{collect_paths, upload_all};
use docsearch_core::config::{expand_path, Config};
use docsearch_core::traits::SearchEngine;
use docsearch_hybrid::HybridSearchEngine;

#[derive(Parser)]
#[command(name = "docsearch", version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload files, run one query and exit
    Search {
        query: String,
        /// File to upload (repeatable)
        #[arg(short, long = "file")]
        files: Vec<String>,
        /// Upload every supported file under this directory
        #[arg(short, long)]
        dir: Option<String>,
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Interactive session
    Repl {
        #[arg(short, long = "file")]
        files: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let engine = HybridSearchEngine::with_settings(config.engine()?);

    match cli.command {
        Command::Search { query, files, dir, json } => {
            let paths = collect_paths(&expand_all(&files), dir.map(expand_path).as_deref());
            upload_and_report(&engine, &paths, json)?;
            let resp = engine.search(&query)?;
            println!("{}", if json { format_json(&resp) } else { format_search(&resp) });
        }
        Command::Repl { files, json } => {
            upload_and_report(&engine, &expand_all(&files), json)?;
            let cwd = std::env::current_dir()?;
            println!("{HELP}");
            Repl::new(&engine, &cwd, json).run(std::io::stdin().lock(), std::io::stdout())?;
        }
    }
    Ok(())
}

fn expand_all(files: &[String]) -> Vec<PathBuf> {
    files.iter().map(expand_path).collect()
}

fn upload_and_report(engine: &dyn SearchEngine, paths: &[PathBuf], json: bool) -> Result<()> {
    for (path, result) in upload_all(engine, paths, !json)? {
        match result {
            Ok(resp) => println!("{}", if json { format_json(&resp) } else { format_upload(&resp) }),
            Err(e) => eprintln!("Failed to upload {}: {e}", path.display()),
        }
    }
    Ok(())
}
