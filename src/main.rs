use clap::{Parser, Subcommand};
use page_loader::fs_store::FsStore;
use page_loader::pipeline::Pipeline;
use page_loader::row::{self, ParsedLine};
use page_loader::store::NodeReader;
use page_loader::{config, model, report, search, stock};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "page-loader")]
#[command(about = "Bulk page creation for tree-structured content repositories")]
#[command(long_about = "\
Bulk page creation for tree-structured content repositories

Pages are described one per line, comma-delimited, no quoting:

  path,title[,template,tag[,publish]]

  /content/site/a,Title A                          # minimal
  /content/site/b,Title B,true                     # short form: third field is the publish flag
  /content/site/c,Title C,/templates/news,marketing/interest,true

Every input line yields exactly one report entry, keyed by the page path
(or the raw line when it could not be parsed). A failing row never stops
the batch.

The repository is a directory tree; each node is a directory with a
node.json properties file. Tags resolve under tags/, activation mirrors
pages under publish/. Run against an empty directory to start fresh.")]
#[command(version = version_string())]
struct Cli {
    /// Repository root (overrides the config file)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file path (default: page-loader.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create pages from a CSV file, one page per line
    Import {
        /// CSV file to ingest
        file: PathBuf,
        /// Print the raw JSON report instead of the formatted summary
        #[arg(long)]
        json: bool,
    },
    /// Create a single page from one comma-delimited row
    Create {
        /// Row in the import format: path,title[,template,tag[,publish]]
        row: String,
    },
    /// Full-text search below a subtree
    Search {
        /// Term to search for (case-insensitive)
        term: String,
        /// Subtree to search under
        #[arg(long, default_value = "/content")]
        base: String,
        /// Print the JSON envelope instead of one path per line
        #[arg(long)]
        json: bool,
    },
    /// Show a stock page's raw properties and its typed model
    Inspect {
        /// Stock page path, e.g. /content/ADBE
        path: String,
    },
    /// Check an imported stock price against alert thresholds
    StockCheck {
        /// Path of the lastTrade node the import just wrote
        #[arg(long)]
        payload: String,
        /// Threshold spec, one SYMBOL=price entry per line
        #[arg(long)]
        thresholds: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;
    let root = cli.root.unwrap_or_else(|| config.store.root.clone());
    let store = FsStore::open(root)?;

    match cli.command {
        Command::Import { file, json } => {
            let input = std::fs::read_to_string(&file)?;
            let pipeline = Pipeline::with_default_template(
                &store,
                &store,
                &store,
                config.default_template.as_str(),
            );
            let result = pipeline.run(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::print_report(&result);
            }
        }
        Command::Create { row } => {
            let pipeline = Pipeline::with_default_template(
                &store,
                &store,
                &store,
                config.default_template.as_str(),
            );
            let result = match row::parse_line(&row) {
                ParsedLine::Row(input) => pipeline.create(&input),
                ParsedLine::Malformed(_) => report::PageResult::Malformed,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Search { term, base, json } => {
            let results = search::full_text(&store, &base, &term)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for line in search::format_results(&results) {
                    println!("{line}");
                }
            }
        }
        Command::Inspect { path } => {
            let model = model::adapt_stock_page(&store, &path)?;
            let values = store.read(&format!("{path}/lastTrade"))?;
            for line in model::format_inspection(&path, &values, &model) {
                println!("{line}");
            }
        }
        Command::StockCheck { payload, thresholds } => {
            let alerts = stock::run_check(&store, &payload, &thresholds)?;
            for line in stock::format_alerts(&alerts) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
