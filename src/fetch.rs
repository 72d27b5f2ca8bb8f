//! Obtaining rendered dashboard HTML.
//!
//! The dashboard fills its results tables client-side, so a fetcher must not
//! hand back partial or still-loading HTML. The `Fetcher` trait captures
//! that contract; the built-in `HttpFetcher` satisfies it by polling until
//! the required elements show up. A headless-browser implementation can slot
//! in behind the same trait.

use crate::error::*;
use std::time::Duration;

/// A source of rendered dashboard HTML.
///
/// Implementations only return HTML in which every id in `required_ids` is
/// present, and collapse every underlying failure mode (network error, bad
/// status, crashed renderer, timeout) into `ErrorKind::FetchFailure` --
/// callers treat "fetch failed" uniformly regardless of cause.
pub trait Fetcher {
    fn fetch(&self, url: &str, required_ids: &[String], timeout: Duration) -> Result<String>;
}

#[cfg(feature = "http-client")]
pub use self::http::HttpFetcher;

#[cfg(feature = "http-client")]
mod http {
    use super::Fetcher;
    use crate::error::*;
    use reqwest::Client;
    use scraper::{Html, Selector};
    use std::io::Read;
    use std::thread;
    use std::time::{Duration, Instant};

    /// A quick, built-in way to grab rendered HTML from the live site.
    ///
    /// Repeats plain GETs until every required element id is present in the
    /// response or the deadline passes. Transient errors along the way are
    /// retried; only the deadline produces a failure.
    pub struct HttpFetcher {
        client: Client,
        poll_interval: Duration
    }

    impl HttpFetcher {
        /// Create a fetcher with reqwest's default `Client` config.
        #[inline]
        pub fn new() -> Self {
            Self {
                client: Client::new(),
                poll_interval: Duration::from_millis(500)
            }
        }

        /// Provide your own client for use by this struct.
        #[inline]
        pub fn with_client(client: Client) -> Self {
            Self {
                client,
                poll_interval: Duration::from_millis(500)
            }
        }

        fn get_string(&self, url: &str) -> Result<String> {
            let mut resp = self.client.get(url).send()
                .map_err(|e| ErrorKind::FetchFailure(e.to_string()))?;
            let status = resp.status();

            if !status.is_success() {
                bail!(ErrorKind::FetchFailure(format!("received status {}", status)));
            }

            let mut content = String::new();
            resp.read_to_string(&mut content)
                .map_err(|e| ErrorKind::FetchFailure(e.to_string()))?;

            Ok(content)
        }
    }

    fn ids_present(html: &str, ids: &[String]) -> bool {
        let doc = Html::parse_document(html);

        ids.iter().all(|id| {
            match Selector::parse(&format!("[id='{}']", id)) {
                Ok(sel) => doc.select(&sel).next().is_some(),
                Err(_) => false
            }
        })
    }

    impl Fetcher for HttpFetcher {
        fn fetch(&self, url: &str, required_ids: &[String], timeout: Duration) -> Result<String> {
            let deadline = Instant::now() + timeout;

            loop {
                if let Ok(html) = self.get_string(url) {
                    if ids_present(&html, required_ids) {
                        return Ok(html);
                    }
                }

                if Instant::now() >= deadline {
                    bail!(ErrorKind::FetchFailure(format!(
                        "required elements not present within {:?}", timeout)));
                }

                thread::sleep(self.poll_interval);
            }
        }
    }

    #[cfg(test)]
    mod test {
        use super::*;

        #[test]
        fn ids_present_checks_every_id() {
            let html = "<div id=\"resultsCanadian\"></div><div id=\"resultsMexican\"></div>";
            let both = vec!["resultsMexican".to_string(), "resultsCanadian".to_string()];
            let extra = vec!["resultsCanadian".to_string(), "resultsMartian".to_string()];

            assert!(ids_present(html, &both));
            assert!(!ids_present(html, &extra));
        }
    }
}
