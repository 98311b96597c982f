//! # Transcript-dl CLI
//!
//! Command-line interface for the transcript-dl library.
//! Collects video links, runs the batch on a worker task and renders its
//! progress and log lines.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use transcript_dl::{
    extract_video_id, parse_links, resolve_output_path, BatchProcessor, Error, FetchConfig,
    OverwriteBehavior, YouTubeFetcher, DEFAULT_FILENAME,
};

mod cli;

/// Command-line interface for transcript-dl
#[derive(Parser, Debug)]
#[command(name = "transcript-dl")]
#[command(about = "Batch video transcript downloader")]
#[command(long_about = "Downloads the captions of many videos into one text file:
  transcript-dl https://youtu.be/ID1 https://www.youtube.com/watch?v=ID2
  transcript-dl -i links.txt -d ~/notes -o lectures
  cat links.txt | transcript-dl -i -

Recognized links: youtube.com/watch?v=ID, youtube.com/embed/ID, youtu.be/ID
Links that cannot be parsed or have no captions are logged and skipped.

File Overwrite Behavior:
  By default the output file is replaced on every run
  --no-clobber                     # Never overwrite, fail if file exists")]
#[command(version = env!("TRANSCRIPT_DL_VERSION"))]
struct Cli {
    /// Video links (watch, embed or short links)
    links: Vec<String>,

    /// Read newline-separated links from a file, or "-" for stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Directory to save the transcript file in
    #[arg(short, long, default_value = ".")]
    dir: String,

    /// Output filename; ".txt" is appended when missing
    #[arg(short = 'o', long, default_value = DEFAULT_FILENAME)]
    filename: String,

    /// Preferred caption languages, most preferred first
    #[arg(short, long, value_delimiter = ',', default_value = "en")]
    languages: Vec<String>,

    /// Show the video IDs that would be fetched without downloading anything
    #[arg(long)]
    dry_run: bool,

    /// Never overwrite an existing output file
    #[arg(long)]
    no_clobber: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut logger = env_logger::Builder::from_default_env();
    logger.target(env_logger::Target::Stderr);
    if cli.verbose {
        logger.filter_module("transcript_dl", LevelFilter::Debug);
    }
    logger.init();

    if cli.verbose {
        eprintln!("📜 Transcript-dl v{} starting...", env!("TRANSCRIPT_DL_VERSION"));
    }

    let input = match cli.input.as_deref() {
        Some(source) => Some(read_input(source).await?),
        None => None,
    };
    let links = collect_links(&cli.links, input.as_deref());

    if cli.dry_run {
        show_dry_run(&links);
        return Ok(());
    }

    if links.is_empty() {
        return Err(Error::NoLinksProvided.into());
    }
    let path = resolve_output_path(&cli.dir, &cli.filename)?;

    let config = FetchConfig {
        languages: cli.languages.clone(),
        ..Default::default()
    };
    if cli.verbose {
        eprintln!(
            "🌐 Fetching captions from {} (languages: {})",
            config.watch_base_url,
            config.languages.join(", ")
        );
    }

    eprintln!("📁 Saving to: {}", path.display());

    run_batch(links, path, config, overwrite_behavior(cli.no_clobber)).await
}

/// Run the batch on a worker task and render its events on this one
async fn run_batch(
    links: Vec<String>,
    path: PathBuf,
    config: FetchConfig,
    overwrite: OverwriteBehavior,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let options = cli::channel_options(tx, overwrite);
    let progress_manager = cli::ProgressManager::new(&format!("🌐 Downloading {} transcript(s)", links.len()));

    let worker_path = path.clone();
    let worker = tokio::spawn(async move {
        let processor = BatchProcessor::new(YouTubeFetcher::with_config(config));
        processor.process_to_file(&links, &worker_path, &options).await
    });

    // Ends once the worker drops its options (and with them every sender)
    while let Some(event) = rx.recv().await {
        progress_manager.handle(event);
    }

    let summary = match worker.await.context("Batch worker panicked")? {
        Ok(summary) => summary,
        Err(e) => {
            progress_manager.abandon();
            return Err(e.into());
        }
    };
    progress_manager.finish("✅ Batch completed!");

    eprintln!(
        "📊 {} of {} transcript(s) added ({} unrecognized link(s), {} failed fetch(es))",
        summary.succeeded, summary.total, summary.unrecognized, summary.failed
    );
    eprintln!("✅ Transcripts downloaded to: {}", path.display());

    Ok(())
}

/// Read a link block from a file, or from stdin for "-"
async fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut block = String::new();
        tokio::io::stdin()
            .read_to_string(&mut block)
            .await
            .context("Failed to read links from stdin")?;
        Ok(block)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read links from {source}"))
    }
}

/// Positional links first, then the input block, blanks dropped
fn collect_links(positional: &[String], input: Option<&str>) -> Vec<String> {
    let mut links = parse_links(&positional.join("\n"));
    if let Some(block) = input {
        links.extend(parse_links(block));
    }
    links
}

fn overwrite_behavior(no_clobber: bool) -> OverwriteBehavior {
    if no_clobber {
        OverwriteBehavior::NeverOverwrite
    } else {
        OverwriteBehavior::Force
    }
}

/// Print the ID each link resolves to
fn show_dry_run(links: &[String]) {
    eprintln!("🔍 [DRY RUN] {} link(s)", links.len());
    for link in links {
        match extract_video_id(link) {
            Ok(video_id) => eprintln!("  {link} -> {video_id}"),
            Err(e) => eprintln!("  {link} -> skipped ({e})"),
        }
    }
}
