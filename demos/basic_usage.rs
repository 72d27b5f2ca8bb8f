extern crate bwt_scraper;

// You may want your own error setup in your own code; here we just use the
// scraper's error types.
use bwt_scraper::config::SiteConfig;
use bwt_scraper::csv_export::write_csv;
use bwt_scraper::error::*;
use bwt_scraper::fetch::HttpFetcher;
use bwt_scraper::runner::run_once;
use bwt_scraper::storage::JsonFileStore;

fn main() {
    match actual_main() {
        Ok(()) => {}
        Err(e) => {
            println!("\n{:?}\n", e);
            std::process::exit(1);
        }
    }
}

// We write a function so that we can return a `Result` and use `?`
fn actual_main() -> Result<()> {
    let config = SiteConfig::default();
    let fetcher = HttpFetcher::new();
    let mut store = JsonFileStore::new("latest_wait_times.json", "wait_times_history.jsonl");

    // Scrape and persist...
    let snapshot = run_once(&fetcher, &mut store, &config)?;
    println!("scraped {} ports at {}", snapshot.entries.len(), snapshot.scraped_at);

    // ...and show the tabular view.
    let mut csv = Vec::new();
    write_csv(&snapshot.entries, &mut csv)?;
    print!("{}", String::from_utf8_lossy(&csv));

    Ok(())
}
