use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use folio_core::{ExtractionResult, Transaction};
use folio_ingest::Extractor;
use folio_cli::config::{self, Config};
use folio_cli::{AppState, VisionClient, build_router};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FOLIO_BUILD_SHA"), ")"),
    about = "Extract transactions from scanned bank statements"
)]
struct Cli {
    /// Config file (default: ~/.folio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP extraction service
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Extract transactions from page images on disk, in the order given
    Extract {
        /// Page images (JPEG), first page first
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Print the raw JSON result instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `extract --json` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = config::config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { bind } => {
            let cfg = config::load_config(&config_path)?;
            serve(cfg, bind).await?;
        }

        Command::Extract { images, json } => {
            let cfg = config::load_config(&config_path)?;
            extract_files(&cfg, &images, json).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if config::init_config(&config_path)? {
                    println!("Wrote {}", config_path.display());
                } else {
                    println!("Config already exists: {}", config_path.display());
                }
            }
            ConfigCommand::Show => {
                let cfg = config::load_config(&config_path)?;
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn build_extractor(cfg: &Config) -> Result<Extractor> {
    let client = VisionClient::from_config(&cfg.vision)?;
    Ok(Extractor::new(Arc::new(client)).with_pacing(cfg.extract.pacing()))
}

async fn serve(cfg: Config, bind: Option<String>) -> Result<()> {
    let extractor = build_extractor(&cfg)?;
    let state = AppState::new(extractor);
    let app = build_router(state, cfg.server.max_body_bytes());

    let addr = bind.unwrap_or(cfg.server.bind);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!(version = env!("CARGO_PKG_VERSION"), build = env!("FOLIO_BUILD_SHA"), "starting folio");
    info!("Listening on http://{addr}");
    info!("Extraction endpoint: POST http://{addr}/api/extract-transactions");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn read_image(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

async fn extract_files(cfg: &Config, paths: &[PathBuf], json: bool) -> Result<()> {
    let images = paths
        .iter()
        .map(|p| read_image(p))
        .collect::<Result<Vec<_>>>()?;

    let extractor = build_extractor(cfg)?;
    let result = extractor.extract(&images).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, paths.len());
    }
    Ok(())
}

fn print_summary(result: &ExtractionResult, pages: usize) {
    println!(
        "Parsed {} transactions from {} page(s)",
        result.transaction_count(),
        pages
    );
    match result.initial_balance {
        Some(b) => println!("Opening balance: {b:.2}\n"),
        None => println!("Opening balance: (not found)\n"),
    }

    for raw in &result.transactions {
        match Transaction::from_raw(raw) {
            Some(t) => println!(
                "{} | {:<10} | {:>10.2} | {}",
                t.date, t.category, t.amount, t.description
            ),
            None => println!("(unreadable) {}", raw.as_value()),
        }
    }

    let (income, spend) = result
        .transactions
        .iter()
        .filter_map(|r| r.amount())
        .fold((0.0, 0.0), |(inc, out), a| {
            if a >= 0.0 { (inc + a, out) } else { (inc, out - a) }
        });
    println!("\nCredits: {income:.2} | Debits: {spend:.2}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_image_encodes_and_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page1.jpg");
        std::fs::write(&page, b"ABC").unwrap();
        assert_eq!(read_image(&page).unwrap(), "QUJD");

        let missing = dir.path().join("absent.jpg");
        let err = read_image(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("absent.jpg"));
    }
}
