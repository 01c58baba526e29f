use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use watchfinder::output;
use watchfinder::pipeline::{run_pipeline, ScrapeOptions};
use watchfinder::sites::{Site, DEFAULT_SITE};
use watchfinder::source::SampleDirSource;

/// Offline smoke check: replays captured sample pages through the full
/// pipeline and verifies the resulting item count.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Offline smoke check against captured sample pages")]
struct Args {
    /// Number of sample pages to run through the pipeline
    #[clap(short, long)]
    pages: usize,

    /// Exact number of items the run must produce
    #[clap(short, long)]
    expect: usize,

    /// Where to write the JSON document
    #[clap(short, long, default_value = "/tmp/results.json")]
    outfile: PathBuf,

    /// Directory of captured result pages
    #[clap(long, default_value = "sample_data")]
    sample_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let site = Site::from_code(DEFAULT_SITE)?;
    let source = SampleDirSource::new(&args.sample_dir)?;
    let options = ScrapeOptions {
        pages: args.pages,
        request_delay: Duration::ZERO,
        ..ScrapeOptions::default()
    };

    let listings = run_pipeline(&source, &site, &options, None)?;
    output::write_listings(&listings, &args.outfile)?;

    if listings.len() != args.expect {
        bail!("expected {} items, got {}", args.expect, listings.len());
    }

    println!("Fetched {} items", listings.len());
    Ok(())
}
