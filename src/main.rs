use chrono::NaiveDate;
use clap::Parser;
use std::process::ExitCode;

use apod_desktop::date::{resolve_apod_date, today};
use apod_desktop::{
    add_apod_to_cache, ApiConfig, ApodCache, ApodClient, ApodError, CacheConfig, CacheOutcome, ImageFetcher,
};

/// Downloads NASA's Astronomy Picture of the Day (APOD) from a specified date
/// and sets it as the desktop background image.
#[derive(Debug, Parser)]
#[command(name = "apod-desktop", version)]
struct Cli {
    /// APOD date (format: YYYY-MM-DD). Defaults to today.
    apod_date: Option<String>,
}

fn main() -> ExitCode {
    apod_desktop::init_tracing();
    let cli = Cli::parse();

    let date = match resolve_apod_date(cli.apod_date.as_deref(), today()) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Script execution aborted");
            return ExitCode::FAILURE;
        }
    };

    match run(date) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(date: NaiveDate) -> apod_desktop::Result<()> {
    let cache = ApodCache::open(&CacheConfig::from_env()?)?;
    println!("📁 Image cache: {}", cache.cache_dir().display());
    println!("📅 APOD date: {}", date);

    let client = ApodClient::new(ApiConfig::from_env()?)?;
    let fetcher = ImageFetcher::with_http(client.http().clone());

    let outcome = add_apod_to_cache(&cache, &client, &fetcher, date)?;
    let record = cache
        .get_by_id(outcome.id())?
        .ok_or(ApodError::Database(rusqlite::Error::QueryReturnedNoRows))?;

    match outcome {
        CacheOutcome::Added(_) => println!("✅ Added to cache: {}", record.title),
        CacheOutcome::AlreadyCached(_) => println!("📦 Already in cache: {}", record.title),
    }
    println!("   {}", record.image_path.display());

    fetcher.set_desktop_background(&record.image_path)?;
    println!("🖼️  Desktop background updated");

    Ok(())
}
