use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docsift_core::config::Config;
use docsift_core::document_store::DocumentStore;
use docsift_pipeline::{default_segmenter, SentenceRetriever};
use docsift_text::PageMapper;

#[derive(Parser)]
#[command(name = "docsift", version, about = "Sentence-level BM25 retrieval over paginated documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the sentences of one document against a query
    Query {
        /// Directory with *.json / *.txt documents (defaults to data.documents_dir)
        #[arg(long)]
        docs: Option<PathBuf>,
        /// Document key (file name) inside the directory
        #[arg(long)]
        file: String,
        /// Number of sentences to return (defaults to retrieval.default_top_n)
        #[arg(long, short = 'n')]
        top_n: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List a document's sentences with span and page
    Sentences {
        #[arg(long)]
        docs: Option<PathBuf>,
        #[arg(long)]
        file: String,
    },
    /// List the documents in a directory
    List {
        #[arg(long)]
        docs: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let docs_dir = |docs: Option<PathBuf>| docs.unwrap_or_else(|| config.documents_dir());

    match cli.command {
        Commands::Query { docs, file, top_n, json, query } => {
            let store = load_store(&docs_dir(docs))?;
            let settings = config.settings();
            let retrieval = &settings.retrieval;
            let top_n = top_n.unwrap_or(retrieval.default_top_n).min(retrieval.max_top_n);
            let query = query.join(" ");
            let retriever = SentenceRetriever::from_store(&store, &file, settings)?;
            let results = retriever.predict(&query, top_n)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("🔍 \"{}\" in {} ({} sentences)", query, file, retriever.corpus().len());
                for (i, r) in results.iter().enumerate() {
                    println!("\n  {}. score={:.4}  page={}", i + 1, r.score, r.page);
                    println!("     {}", r.text);
                }
            }
        }
        Commands::Sentences { docs, file } => {
            let store = load_store(&docs_dir(docs))?;
            let document = store.get(&file)?;
            let segmenter = default_segmenter(config.settings());
            let sentences = PageMapper::new(&document.page_ranges).assign(segmenter.segment(&document.text));
            for (i, s) in sentences.iter().enumerate() {
                println!("{:>5}  [{}, {}]  page={}  {}", i, s.span.start, s.span.end, s.page, s.text);
            }
        }
        Commands::List { docs } => {
            let store = load_store(&docs_dir(docs))?;
            for name in store.filenames() {
                let pages = store.get(name).map(|d| d.page_count()).unwrap_or_default();
                println!("{}  ({} pages)", name, pages);
            }
            println!("📊 {} documents", store.len());
        }
    }
    Ok(())
}

fn load_store(dir: &std::path::Path) -> anyhow::Result<DocumentStore> {
    DocumentStore::load_dir(dir).with_context(|| format!("Failed to load documents from {}", dir.display()))
}
