use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use watchfinder::debug;
use watchfinder::error::ScrapeError;
use watchfinder::output;
use watchfinder::pipeline::{run_pipeline, ScrapeOptions};
use watchfinder::progress::PageProgress;
use watchfinder::sites::{Site, DEFAULT_SITE};
use watchfinder::source::{LiveSource, SampleDirSource};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Watchfinder - listing scraper for watchcount.com")]
struct Args {
    /// Search query
    #[clap(short, long)]
    keywords: String,

    /// Number of result pages to request
    #[clap(short, long)]
    pages: usize,

    /// Keep only listings priced at or above this value
    #[clap(short, long, default_value = "0")]
    min_price: f64,

    /// Marketplace region code (e.g. EBAY_GB)
    #[clap(short, long, default_value = DEFAULT_SITE)]
    site: String,

    /// Execution mode; only "batch" is supported
    #[clap(long, default_value = "batch")]
    mode: String,

    /// Path to the JSON output file; omit to print to stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Read pre-captured result pages from this directory instead of the network
    #[clap(long)]
    sample_dir: Option<PathBuf>,

    /// Enable debug output
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    debug::set_verbose(args.verbose);

    // Reject bad configuration before any fetch happens.
    if args.mode != "batch" {
        return Err(ScrapeError::Config(format!(
            "unsupported mode '{}', only 'batch' is available",
            args.mode
        ))
        .into());
    }
    if args.pages == 0 {
        return Err(ScrapeError::Config("at least one page must be requested".to_string()).into());
    }
    if !args.min_price.is_finite() || args.min_price < 0.0 {
        return Err(ScrapeError::Config(format!(
            "minimum price must be a non-negative number, got {}",
            args.min_price
        ))
        .into());
    }

    let site = Site::from_code(&args.site)?;
    let options = ScrapeOptions {
        pages: args.pages,
        min_price: args.min_price,
        ..ScrapeOptions::default()
    };

    println!("Watchfinder - Listing Scraper for watchcount.com");
    println!("================================================");
    println!(
        "Searching '{}' on {} across {} page(s)",
        args.keywords, site.code, args.pages
    );

    let mut progress = PageProgress::new();
    let listings = match &args.sample_dir {
        Some(dir) => {
            let source = SampleDirSource::new(dir)?;
            run_pipeline(&source, &site, &options, Some(&mut progress))?
        }
        None => {
            let source = LiveSource::new(site, &args.keywords, args.min_price);
            run_pipeline(&source, &site, &options, Some(&mut progress))?
        }
    };

    match &args.output {
        Some(path) => {
            output::write_listings(&listings, path)?;
            println!("Saved {} listings to {}", listings.len(), path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&listings)?);
            println!("Fetched {} listings", listings.len());
        }
    }

    Ok(())
}
