//! One scrape invocation end to end: fetch, extract, snapshot, persist.

use crate::config::SiteConfig;
use crate::data_structs::Snapshot;
use crate::error::*;
use crate::fetch::Fetcher;
use crate::scrapers::wait_times::WaitTimesScraper;
use crate::storage::WaitTimeStore;

/// Runs one scrape invocation.
///
/// A fetch failure aborts before any storage write, and extraction errors do
/// the same: a partial or empty snapshot is never persisted. Once a snapshot
/// exists, both storage destinations get a write attempt even if the first
/// one fails -- the two can legitimately diverge, so neither failure may
/// hide the other's outcome.
pub fn run_once<F, S>(fetcher: &F, store: &mut S, config: &SiteConfig) -> Result<Snapshot>
    where F: Fetcher + ?Sized,
          S: WaitTimeStore + ?Sized {

    let scraped_at = Snapshot::now_micros();
    let html = fetcher.fetch(&config.url, &config.required_ids, config.timeout())?;

    let scraper = WaitTimesScraper::from(html);
    let snapshot = Snapshot::new(scraped_at, scraper.port_entries(config)?);

    let latest = store.upsert_latest(&snapshot);
    let history = store.append_history(&snapshot);

    match (latest, history) {
        (Ok(()), Ok(())) => Ok(snapshot),
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
        (Err(latest_err), Err(history_err)) => {
            Err(Error::with_chain(history_err, ErrorKind::Storage(format!(
                "both writes failed; latest: {}", latest_err))))
        }
    }
}
