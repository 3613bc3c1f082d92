use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::Parser;
use masterhub::core::config::{
    CliOverrides, DEFAULT_LOG_LEVEL, ResolvedConfig, load_config, resolve,
};
use masterhub::core::filter::SearchResults;
use masterhub::core::state::App;
use masterhub::core::store::{StoreError, TopicStore};
use masterhub::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const LOG_FILE: &str = "masterhub.log";

#[derive(Parser)]
#[command(
    name = "masterhub",
    about = "Terminal reference for Salesforce administration, development and architecture"
)]
struct Args {
    /// Content file to read instead of the built-in topics
    #[arg(long, value_name = "PATH")]
    topics: Option<PathBuf>,

    /// Topic to open on start-up
    #[arg(long, value_name = "ID")]
    topic: Option<String>,

    /// Reject content with any malformed, duplicate or unknown-section entry
    #[arg(long)]
    strict: bool,

    /// Validate the content, print what was found, and exit
    #[arg(long, conflicts_with = "search")]
    check: bool,

    /// Print the topics matching QUERY and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    init_logging(Path::new(LOG_FILE));
    log::info!("masterhub starting up");

    let file_config = load_config().unwrap_or_else(|e| fail(&format!("config: {e}")));
    let config = resolve(
        &file_config,
        &CliOverrides {
            topics_file: args.topics,
            default_topic: args.topic,
            strict: args.strict,
        },
    );

    apply_log_level(&config.log_level);
    log::debug!("Resolved config: {:?}", config);

    if args.check {
        return check(&config);
    }

    let store = load_store(&config).unwrap_or_else(|e| fail(&e.to_string()));

    if let Some(query) = args.search {
        print_search(&store, &query, config.preview_length);
        return Ok(());
    }

    let app = App::from_config(store, &config);
    tui::run(app, &config)
}

/// File logger in the working directory; the terminal belongs to the TUI.
///
/// Installed before config is read so config warnings reach the file. The
/// writer accepts every level and `log::max_level` does the filtering.
fn init_logging(path: &Path) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
    apply_log_level(DEFAULT_LOG_LEVEL);
}

fn apply_log_level(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("masterhub: unknown log level '{level}', using info");
        LevelFilter::Info
    });
    log::set_max_level(filter);
}

fn load_store(config: &ResolvedConfig) -> Result<TopicStore, StoreError> {
    let store = match &config.topics_file {
        Some(path) => TopicStore::load_file(path, config.strict)?,
        None => TopicStore::builtin(config.strict)?,
    };
    log::info!(
        "Loaded {} topics ({} diagnostics)",
        store.len(),
        store.diagnostics().len()
    );
    Ok(store)
}

fn content_source(config: &ResolvedConfig) -> String {
    match &config.topics_file {
        Some(path) => path.display().to_string(),
        None => "built-in content".to_string(),
    }
}

fn check(config: &ResolvedConfig) -> std::io::Result<()> {
    let source = content_source(config);
    match load_store(config) {
        Ok(store) => {
            println!("{}: {} topics", source, store.len());
            for diagnostic in store.diagnostics() {
                println!("  warning: {diagnostic}");
            }
            Ok(())
        }
        Err(StoreError::Invalid(diagnostics)) => {
            println!("{source}: rejected");
            for diagnostic in &diagnostics {
                println!("  error: {diagnostic}");
            }
            process::exit(1);
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn print_search(store: &TopicStore, query: &str, preview_length: usize) {
    let results = SearchResults::new(query, store.topics(), preview_length);
    if results.hits.is_empty() {
        eprintln!("No results found");
        return;
    }
    for hit in &results.hits {
        println!("{}\t{}\t{}", hit.id, hit.title, hit.section_label);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("masterhub: {message}");
    log::error!("{}", message);
    process::exit(1);
}
