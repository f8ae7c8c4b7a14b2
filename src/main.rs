mod emit;
mod fetch;
mod parser;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::warn;

const DESCRIPTION_URL: &str = "http://findbugs.sourceforge.net/bugDescriptions.html";

#[derive(Parser)]
#[command(name = "findbugs_patterns", about = "FindBugs bug pattern scraper")]
struct Cli {
    /// Bug descriptions page to scrape
    #[arg(long, default_value = DESCRIPTION_URL)]
    url: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the pattern index and write patterns.json + description.json
    Generate,
    /// Write one markdown file per pattern with its full description text
    Docs {
        /// Directory for the generated markdown files
        #[arg(short, long, default_value = "docs/description")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    // A bare invocation runs the full generate pipeline.
    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            let html = fetch::page_text(&cli.url).await?;
            let patterns = parser::parse_patterns(&html)?;
            if patterns.is_empty() {
                warn!("No pattern headings found, writing empty outputs");
            }
            let (set, descriptions) = emit::build_outputs(&patterns);
            emit::write_json_files(Path::new("."), &set, &descriptions)?;
            println!(
                "Wrote {} patterns to {} and {}",
                patterns.len(),
                emit::PATTERNS_FILE,
                emit::DESCRIPTION_FILE,
            );
        }
        Commands::Docs { out_dir } => {
            let html = fetch::page_text(&cli.url).await?;
            let docs = parser::parse_docs(&html)?;
            if docs.is_empty() {
                warn!("No pattern headings found, nothing to write");
            }
            let written = emit::write_markdown_docs(&out_dir, &docs)?;
            println!("Wrote {} description files to {}", written, out_dir.display());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
