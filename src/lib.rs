//! Scrapes U.S. land border crossing wait times from the CBP dashboard
//! (https://bwt.cbp.gov/) into typed per-port records.
//!
//! The dashboard renders two results tables (Canadian and Mexican border),
//! one row per port, with commercial / passenger / pedestrian delay cells in
//! fixed columns. `scrapers::wait_times` turns a rendered page into
//! `PortEntry` records, `runner::run_once` drives a whole invocation:
//! fetch, extract, snapshot, persist.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate if_chain;
extern crate chrono;
#[cfg(feature = "http-client")]
extern crate reqwest;
extern crate scraper;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate toml;

pub mod config;
pub mod csv_export;
pub mod data_structs;
pub mod error;
pub mod fetch;
pub mod runner;
pub mod scrapers;
pub mod storage;
