//! Operator entry point: ingest PDFs named on the command line (URLs) or
//! found in a local directory (`--dir`).

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing_subscriber::FmtSubscriber;

use ragline::config::IngestConfig;
use ragline::embeddings::HttpEmbeddingProvider;
use ragline::extract::PdfExtractor;
use ragline::ingestion::cache::USER_AGENT;
use ragline::ingestion::{DocumentSource, discover_pdfs};
use ragline::pipeline::IngestionPipeline;
use ragline::stores::RestVectorIndex;
use ragline::types::IngestError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ingestion failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), IngestError> {
    // Config first: a missing credential must abort before any fetch.
    let config = IngestConfig::from_env()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let sources = parse_sources(&args)?;

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(120))
        .build()?;

    let embedder = Arc::new(HttpEmbeddingProvider::new(
        client.clone(),
        &config.embedding_url,
        &config.embedding_api_key,
        &config.embedding_model,
    ));
    let index = Arc::new(RestVectorIndex::new(
        client.clone(),
        &config.index_url,
        &config.index_api_key,
    ));
    let pipeline = IngestionPipeline::new(
        client,
        &config,
        Arc::new(PdfExtractor),
        embedder,
        index,
    );

    println!("Ingesting {} document(s) into '{}'", sources.len(), config.collection);

    let started = Instant::now();
    let report = pipeline.run(&sources).await?;

    println!("Ingestion complete!");
    println!("  documents processed : {}", report.documents);
    println!("  pages processed     : {}", report.pages);
    println!("  chunks upserted     : {}", report.chunks);
    println!(
        "  bytes downloaded    : {:.2} KB",
        report.bytes_downloaded as f64 / 1024.0
    );
    println!("  duration            : {:.1?}", started.elapsed());
    Ok(())
}

fn parse_sources(args: &[String]) -> Result<Vec<DocumentSource>, IngestError> {
    match args {
        [] => Err(IngestError::Config(
            "usage: ingest <url>... | ingest --dir <pdf-directory>".to_string(),
        )),
        [flag, dir] if flag == "--dir" => {
            let sources = discover_pdfs(Path::new(dir))?;
            if sources.is_empty() {
                return Err(IngestError::Config(format!("no PDF files found in {dir}")));
            }
            Ok(sources)
        }
        _ => args.iter().map(|arg| DocumentSource::parse(arg)).collect(),
    }
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
