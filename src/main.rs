use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linesearch::api::{create_router, AppState};
use linesearch::input::{read_stopwords, read_submission};
use linesearch::{split_documents, Normalizer, SearchEngine, SearchResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Find the lines of a document set that match a query", long_about = None)]
struct Cli {
    /// Stopword list to use instead of the built-in English one (one word per line)
    #[arg(long, global = true, env = "LINESEARCH_STOPWORDS")]
    stopwords: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the search form endpoint over HTTP
    Serve {
        #[arg(long, env = "LINESEARCH_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Index a document file (one document per line) and run a query
    Search {
        #[arg(short, long)]
        documents: PathBuf,

        #[arg(short, long)]
        query: String,

        #[arg(long)]
        json: bool,
    },
    /// Print the normalized terms of some text
    Normalize {
        text: String,

        #[arg(long)]
        json: bool,
    },
}

fn load_normalizer(stopwords: Option<&Path>) -> Result<Normalizer> {
    match stopwords {
        Some(path) => {
            let words = read_stopwords(path)
                .with_context(|| format!("Failed to load stopwords from {}", path.display()))?;
            tracing::info!(count = words.len(), "loaded custom stopwords");
            Ok(Normalizer::with_stopwords(words))
        }
        None => Ok(Normalizer::new()),
    }
}

fn print_results(results: &SearchResult) {
    for (doc_id, lines) in results {
        for line in lines {
            println!("{}\t{}", doc_id, line);
        }
    }
}

async fn serve(normalizer: Normalizer, addr: SocketAddr) -> Result<()> {
    let app = create_router(AppState::new(normalizer));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn run_search(normalizer: &Normalizer, path: &Path, query: &str, json: bool) -> Result<()> {
    let submission = read_submission(path)?;
    let documents = split_documents(&submission);

    let start = Instant::now();
    let engine = SearchEngine::build(normalizer, &documents);
    tracing::info!("Indexed {} documents in {:?}", documents.len(), start.elapsed());

    let start = Instant::now();
    let results = engine.search(query);
    tracing::info!("Search found {} documents in {:?}", results.len(), start.elapsed());

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    Ok(())
}

fn run_normalize(normalizer: &Normalizer, text: &str, json: bool) -> Result<()> {
    let terms = normalizer.normalize(text);

    if json {
        println!("{}", serde_json::to_string(&terms)?);
    } else {
        println!("{}", terms.join(" "));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linesearch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let normalizer = load_normalizer(cli.stopwords.as_deref())?;

    match cli.command {
        Command::Serve { addr } => serve(normalizer, addr).await,
        Command::Search {
            documents,
            query,
            json,
        } => run_search(&normalizer, &documents, &query, json),
        Command::Normalize { text, json } => run_normalize(&normalizer, &text, json),
    }
}
