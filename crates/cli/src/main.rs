// ABOUTME: CLI for marquee: parses a dataset file into JSON lines, or scrapes a page into JSON.
// ABOUTME: Logs go to stderr through tracing-subscriber so stdout carries only JSON.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marquee_core::{
    Compression, Dataset, DatasetParser, DatasetRecord, NameBasics, TitleAkas, TitleBasics,
    TitleCrew, TitleEpisode, TitlePrincipalCrew, TitleRating,
};
use marquee_scrape::options::{DEFAULT_BASE_URL, DEFAULT_SUGGESTION_URL};
use marquee_scrape::Scraper;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Normalize IMDb datasets and pages into JSON.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(about = "Parse IMDb datasets or scrape IMDb pages and print JSON", long_about = None)]
struct Args {
    /// Log debug detail to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Output compact JSON instead of pretty (scrape commands only).
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    /// Site root to scrape pages from.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Root of the search suggestion feed.
    #[arg(long, global = true, default_value = DEFAULT_SUGGESTION_URL)]
    suggestion_url: String,

    /// Pause before each request, in milliseconds.
    #[arg(long, global = true, default_value_t = 1000)]
    rate_limit_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a tab-separated dataset and print one JSON object per row.
    Dataset {
        /// Dataset schema, e.g. `title-basics` or `name.basics`.
        schema: Dataset,
        /// Directory holding the published file, or the file itself with --file.
        path: PathBuf,
        /// The file has no header line.
        #[arg(long)]
        no_header: bool,
        /// The file is gzip-compressed.
        #[arg(long)]
        gzip: bool,
        /// Treat PATH as the dataset file instead of its directory.
        #[arg(long)]
        file: bool,
    },
    #[command(flatten)]
    Scrape(ScrapeCommand),
}

#[derive(Subcommand, Debug)]
enum ScrapeCommand {
    /// Scrape a title's main page.
    Title {
        id: String,
        #[arg(long)]
        taglines: bool,
    },
    /// Scrape a title's full cast and crew.
    Credits {
        id: String,
        /// Also fetch per-episode cast credits.
        #[arg(long)]
        episodes: bool,
        /// Group credits by job title.
        #[arg(long)]
        by_job: bool,
    },
    /// Scrape a person's bio page.
    Name {
        id: String,
        #[arg(long)]
        known_for: bool,
    },
    /// Scrape a person's filmography.
    NameCredits {
        id: String,
        #[arg(long)]
        episodes: bool,
    },
    /// List the titles a company is credited for.
    Company { id: String },
    /// Scrape the companies credited on a title.
    CompanyCredits { id: String },
    /// Scrape a title's technical specifications.
    TechSpecs { id: String },
    /// Query the search suggestions.
    Search { keyword: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    match args.command {
        Command::Dataset {
            schema,
            ref path,
            no_header,
            gzip,
            file,
        } => {
            let compression = if gzip {
                Compression::Gzip
            } else {
                Compression::Plain
            };
            let parser = DatasetParser::builder()
                .use_default_filenames(!file)
                .compression(compression)
                .build();
            let count = print_dataset(&parser, schema, path, !no_header)?;
            info!(dataset = %schema, rows = count, "dataset parsed");
            Ok(())
        }
        Command::Scrape(ref command) => {
            let scraper = Scraper::builder()
                .base_url(&args.base_url)
                .suggestion_url(&args.suggestion_url)
                .rate_limit(Duration::from_millis(args.rate_limit_ms))
                .build()?;
            scrape(&scraper, command, args.compact)
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("warn,marquee={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_dataset(
    parser: &DatasetParser,
    schema: Dataset,
    path: &Path,
    contains_headers: bool,
) -> Result<usize> {
    match schema {
        Dataset::TitleAkas => print_rows::<TitleAkas>(parser, path, contains_headers),
        Dataset::TitleBasics => print_rows::<TitleBasics>(parser, path, contains_headers),
        Dataset::TitleCrew => print_rows::<TitleCrew>(parser, path, contains_headers),
        Dataset::TitleEpisode => print_rows::<TitleEpisode>(parser, path, contains_headers),
        Dataset::TitlePrincipals => {
            print_rows::<TitlePrincipalCrew>(parser, path, contains_headers)
        }
        Dataset::TitleRatings => print_rows::<TitleRating>(parser, path, contains_headers),
        Dataset::NameBasics => print_rows::<NameBasics>(parser, path, contains_headers),
    }
}

fn print_rows<T: DatasetRecord + Serialize>(
    parser: &DatasetParser,
    path: &Path,
    contains_headers: bool,
) -> Result<usize> {
    let rows = parser.parse::<T>(path, contains_headers)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut count = 0;
    for row in rows {
        let row = row.with_context(|| format!("parsing {}", T::DATASET))?;
        serde_json::to_writer(&mut out, &row)?;
        out.write_all(b"\n")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

fn scrape(scraper: &Scraper, command: &ScrapeCommand, compact: bool) -> Result<()> {
    let output = match command {
        ScrapeCommand::Title { id, taglines } => {
            serde_json::to_value(scraper.get_title(id, *taglines)?)?
        }
        ScrapeCommand::Credits {
            id,
            episodes,
            by_job: true,
        } => serde_json::to_value(scraper.get_full_credits_by_job(id, *episodes)?)?,
        ScrapeCommand::Credits { id, episodes, .. } => {
            serde_json::to_value(scraper.get_full_credits(id, *episodes)?)?
        }
        ScrapeCommand::Name { id, known_for } => {
            serde_json::to_value(scraper.get_name(id, *known_for)?)?
        }
        ScrapeCommand::NameCredits { id, episodes } => {
            serde_json::to_value(scraper.get_name_credits(id, *episodes)?)?
        }
        ScrapeCommand::Company { id } => serde_json::to_value(scraper.get_company(id)?)?,
        ScrapeCommand::CompanyCredits { id } => {
            serde_json::to_value(scraper.get_company_credits(id)?)?
        }
        ScrapeCommand::TechSpecs { id } => serde_json::to_value(scraper.get_tech_specs(id)?)?,
        ScrapeCommand::Search { keyword } => {
            serde_json::to_value(scraper.get_search_results(keyword)?)?
        }
    };

    if compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}
