//! pixiv CLI - list, inspect and download works.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixiv::config::Config;
use pixiv::console::Console;
use pixiv::{Artwork, ListFilter, Pixiv};
use std::path::PathBuf;

/// Browse pixiv works from the command line.
#[derive(Parser, Debug)]
#[command(name = "pixiv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log requests and parsing steps.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a member's works.
    Works {
        /// Member ID.
        member_id: String,

        /// Only list one kind of work (illust, manga, ugoira).
        #[arg(long = "type", default_value = "all")]
        filter: ListFilter,

        /// Fetch each work to show its kind.
        #[arg(long)]
        resolve: bool,
    },

    /// Show a work's kind, author and tags.
    Show {
        /// Work ID.
        work_id: u64,
    },

    /// Download a work's original illustration.
    Download {
        /// Work ID.
        work_id: u64,

        /// Output file (defaults to the image's file name).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let console = Console::new();

    console.step("Loading configuration...");
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if !config.account.has_credentials() && config.account.cookie_file.is_none() {
        let config_path = match &args.config {
            Some(path) => path.clone(),
            None => Config::config_path()?,
        };
        console.warning(&format!(
            "No credentials configured. Please edit: {}",
            config_path.display()
        ));
        return Ok(());
    }

    console.step("Logging in...");
    let pixiv = Pixiv::connect(&config).await.context("Failed to log in")?;
    console.success("Logged in");

    match args.command {
        Command::Works {
            member_id,
            filter,
            resolve,
        } => list_works(&pixiv, &console, &member_id, filter, resolve).await,
        Command::Show { work_id } => show_work(&pixiv, &console, work_id).await,
        Command::Download { work_id, output } => {
            download_work(&pixiv, &console, work_id, output).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pixiv=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn list_works(
    pixiv: &Pixiv,
    console: &Console,
    member_id: &str,
    filter: ListFilter,
    resolve: bool,
) -> Result<()> {
    let member = pixiv.member_from_str(member_id)?;

    console.step(&format!("Fetching works of member {}...", member.id()));
    let works = member
        .works_of_type(filter)
        .await
        .context("Failed to fetch work listing")?;
    console.success(&format!("Found {} works", works.len()));

    for work in works {
        let id = work.id();
        let artwork = if resolve {
            match work.resolve().await {
                Ok(artwork) => artwork,
                Err(e) => {
                    console.error(&format!("{}: {}", id, e));
                    continue;
                }
            }
        } else {
            Artwork::from(work)
        };
        println!("{}\t{}", id, console.kind(artwork.kind()));
    }

    Ok(())
}

async fn show_work(pixiv: &Pixiv, console: &Console, work_id: u64) -> Result<()> {
    console.step(&format!("Fetching work {}...", work_id));
    let artwork = pixiv
        .fetch_work(work_id)
        .await
        .context("Failed to fetch work")?;

    let work = artwork.work();
    let author = work.author().await.context("Failed to read author")?;
    let tags = work.tags().await.context("Failed to read tags")?;

    console.section(&format!("Work {}", work_id));
    console.info(&format!("Kind: {}", console.kind(artwork.kind())));
    console.info(&format!("Author: {}", author.id()));
    console.info(&format!("Tags: {}", console.tags(tags)));
    console.info(&format!("Page: {}", work.url()));

    if let Some(illust) = artwork.as_illust() {
        let url = illust
            .original_illust_url()
            .await
            .context("Failed to read original image URL")?;
        console.info(&format!("Original: {}", url));
    }

    Ok(())
}

async fn download_work(
    pixiv: &Pixiv,
    console: &Console,
    work_id: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    console.step(&format!("Fetching work {}...", work_id));
    let artwork = pixiv
        .fetch_work(work_id)
        .await
        .context("Failed to fetch work")?;

    let Some(illust) = artwork.as_illust() else {
        anyhow::bail!(
            "Work {} is a {}, only illustrations can be downloaded",
            work_id,
            console.kind(artwork.kind())
        );
    };

    let url = illust.original_illust_url().await?.to_string();
    let output = output.unwrap_or_else(|| default_file_name(&url, work_id));

    console.step(&format!("Downloading {}...", url));
    let bytes = illust
        .original_illust()
        .await
        .context("Failed to download original image")?;

    tokio::fs::write(&output, bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    console.success(&format!(
        "Saved {} bytes to {}",
        bytes.len(),
        output.display()
    ));

    Ok(())
}

/// Last path segment of the image URL, or `<id>.img`.
fn default_file_name(url: &str, work_id: u64) -> PathBuf {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.img", work_id)))
}
