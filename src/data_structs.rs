use chrono::Utc;

/// One lane category's state (commercial, passenger or pedestrian) at a
/// given port, as displayed by the dashboard at scrape time.
///
/// Exactly one of three shapes holds:
///
/// * all fields `None` -- the source showed "N/A" or something unrecognized,
/// * only `lane_info` set -- the source showed "lanes closed" or
///   "update pending",
/// * all three fields set -- a real delay report.
#[derive(Debug, Default, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct CrossingStatus {
    /// Wall-clock label as displayed by the source, e.g. "2:45 PM".
    pub current_time: Option<String>,
    /// Human-readable delay duration, e.g. "15 minute delay".
    pub delay: Option<String>,
    /// Free-text lane status, lower-cased, e.g. "2 lanes open".
    pub lane_info: Option<String>,
}

/// One border crossing location: a data row in one of the results tables.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct PortEntry {
    /// Primary crossing name, e.g. "San Ysidro".
    pub port: String,
    /// Sub-crossing qualifier when the source nests a secondary label inside
    /// the port cell, e.g. "PedWest".
    pub crossing: Option<String>,
    pub commercial: CrossingStatus,
    pub passenger: CrossingStatus,
    pub pedestrian: CrossingStatus,
}

/// One point-in-time capture of all ports' wait-time data.
///
/// Entries follow table-then-row order (Canadian table first, then Mexican).
/// That ordering is an artifact of extraction, not a meaningful property,
/// but it is stable run to run.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    /// Microseconds since the Unix epoch.
    pub scraped_at: i64,
    pub entries: Vec<PortEntry>,
}

impl Snapshot {
    #[inline]
    pub fn new(scraped_at: i64, entries: Vec<PortEntry>) -> Self {
        Snapshot { scraped_at, entries }
    }

    /// The current time at the granularity snapshots are stamped with.
    #[inline]
    pub fn now_micros() -> i64 {
        Utc::now().timestamp_micros()
    }
}
