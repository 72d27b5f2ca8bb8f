//! Handles extraction of wait-time records from the dashboard's results tables.

use crate::config::{ColumnLayout, SiteConfig};
use crate::data_structs::{CrossingStatus, PortEntry};
use crate::error::*;
use crate::scrapers::load_sels;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

const WAIT_TIMES_SELECTORS_STR: &'static str = include_str!("../../selectors/wait_times.toml");

/// Handles extraction of wait-time records from a rendered dashboard page.
///
/// You can either provide your own HTML string (see the `From<String>` impl)
/// or use the `fetch::HttpFetcher`.
pub struct WaitTimesScraper {
    doc: Html
}

impl From<String> for WaitTimesScraper {
    fn from(html: String) -> Self {
        WaitTimesScraper {
            doc: Html::parse_document(&html)
        }
    }
}

impl WaitTimesScraper {
    /// Walks the configured results tables in order and returns one entry
    /// per data row, preserving table order then row order.
    ///
    /// A configured table id that is missing from the document is an
    /// `ExtractionError`; a present table with no data rows just contributes
    /// nothing.
    #[inline]
    pub fn port_entries(&self, config: &SiteConfig) -> Result<Vec<PortEntry>> {
        let sels = load_sels(WAIT_TIMES_SELECTORS_STR);
        let mut entries = vec![];

        for id in &config.table_ids {
            let table_sel = match Selector::parse(&format!("[id='{}']", id)) {
                Ok(sel) => sel,
                Err(_) => bail!(ErrorKind::ExtractionError(id.clone()))
            };
            let table = match self.doc.select(&table_sel).next() {
                Some(table) => table,
                None => bail!(ErrorKind::ExtractionError(id.clone()))
            };

            for row in table.select(&sels["rows"]) {
                if let Some(entry) = map_row(row, &config.columns, &sels)? {
                    entries.push(entry);
                }
            }
        }

        Ok(entries)
    }
}

/// Maps one table row to a `PortEntry`.
///
/// Rows with at most one cell are section headers or spacers; those yield
/// `Ok(None)` and the caller drops them.
pub fn map_row(row: ElementRef, layout: &ColumnLayout,
               sels: &HashMap<String, Selector>) -> Result<Option<PortEntry>> {

    let cells: Vec<ElementRef> = row.select(&sels["cells"]).collect();

    if cells.len() <= 1 {
        return Ok(None);
    }

    let port_cell = column(&cells, "port", layout.port)?;

    // At most one nested crossing label is supported; more than one means
    // we can no longer tell which text belongs to the port name.
    let crossing_labels: Vec<ElementRef> = port_cell.select(&sels["crossing"]).collect();
    if crossing_labels.len() > 1 {
        bail!(ErrorKind::MalformedCell(format!(
            "port cell carries {} crossing labels where at most 1 is supported",
            crossing_labels.len())));
    }

    let mut crossing = None;
    if_chain! {
        if let Some(label) = crossing_labels.first();
        let text = label.text().collect::<String>();
        if !text.trim().is_empty();

    then {
        crossing = Some(text.trim().to_string());
    }}

    let port = match port_cell.select(&sels["port_name"]).next() {
        Some(bold) => text_excluding_crossing(bold).trim().to_string(),
        None => bail!(ErrorKind::MalformedCell("port cell has no bold port name".into()))
    };

    Ok(Some(PortEntry {
        port,
        crossing,
        commercial: classify_cell(column(&cells, "commercial", layout.commercial)?, sels)?,
        passenger: classify_cell(column(&cells, "passenger", layout.passenger)?, sels)?,
        pedestrian: classify_cell(column(&cells, "pedestrian", layout.pedestrian)?, sels)?
    }))
}

/// Classifies one delay cell into a `CrossingStatus`.
///
/// Unrecognized content degrades to the all-`None` status. A cell that does
/// carry the delay sub-element but whose internal structure has drifted is a
/// hard `MalformedCell` error instead, so fields are never silently
/// mis-bound.
pub fn classify_cell(cell: ElementRef, sels: &HashMap<String, Selector>) -> Result<CrossingStatus> {
    let text = cell.text().collect::<String>();
    let text = text.trim();

    if text == "N/A" {
        return Ok(CrossingStatus::default());
    }

    if text == "Lanes Closed" || text == "Update Pending" {
        return Ok(CrossingStatus {
            lane_info: Some(text.to_lowercase()),
            ..CrossingStatus::default()
        });
    }

    let delay_elem = match cell.select(&sels["delay"]).next() {
        Some(elem) => elem,
        None => return Ok(CrossingStatus::default())
    };

    // A delay cell holds exactly five child nodes:
    // time text, <br>, delay <span>, <br>, lane text.
    let parts: Vec<_> = cell.children().collect();
    if parts.len() != 5 {
        bail!(ErrorKind::MalformedCell(format!(
            "delay cell has {} child nodes where 5 were expected", parts.len())));
    }

    let time_raw = match parts[0].value().as_text() {
        Some(text) => text.to_string(),
        None => bail!(ErrorKind::MalformedCell(
            "delay cell does not start with a time label".into()))
    };
    let lane_raw = match parts[4].value().as_text() {
        Some(text) => text.to_string(),
        None => bail!(ErrorKind::MalformedCell(
            "delay cell does not end with lane info".into()))
    };

    let current_time = {
        let trimmed = time_raw.trim();
        trimmed.strip_prefix("At ").unwrap_or(trimmed).trim().to_string()
    };
    // The source pluralizes single-lane counts ("1 lanes open"); correct
    // that, and expand its abbreviated "min".
    let lane_info = lane_raw.trim().to_lowercase().replace("1 lanes", "1 lane");
    let delay = delay_elem.text().collect::<String>().trim().replace("min", "minute");

    Ok(CrossingStatus {
        current_time: Some(current_time),
        delay: Some(delay),
        lane_info: Some(lane_info)
    })
}

/// Column lookup by logical name; a short row means the page layout drifted.
fn column<'a>(cells: &[ElementRef<'a>], name: &str, index: usize) -> Result<ElementRef<'a>> {
    match cells.get(index) {
        Some(cell) => Ok(*cell),
        None => bail!(ErrorKind::MalformedCell(format!(
            "row has {} cells but the {} column is at index {}",
            cells.len(), name, index)))
    }
}

/// Text of the port-name element with any nested crossing label left out.
fn text_excluding_crossing(elem: ElementRef) -> String {
    let mut out = String::new();

    for child in elem.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(inner) = ElementRef::wrap(child) {
            if inner.value().name() != "i" {
                out.push_str(&text_excluding_crossing(inner));
            }
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SiteConfig;

    const TEST_DATA_DASHBOARD: &'static str = include_str!("../../test_data/bwt.cbp.gov.html");

    fn sels() -> HashMap<String, Selector> {
        load_sels(WAIT_TIMES_SELECTORS_STR)
    }

    fn classify(cell_inner: &str) -> Result<CrossingStatus> {
        let doc = Html::parse_document(&format!(
            "<table><tbody><tr><td>{}</td></tr></tbody></table>", cell_inner));
        let td = doc.select(&Selector::parse("td").unwrap()).next().unwrap();

        classify_cell(td, &sels())
    }

    fn map_single_row(row_html: &str) -> Result<Option<PortEntry>> {
        let doc = Html::parse_document(&format!(
            "<table><tbody>{}</tbody></table>", row_html));
        let tr = doc.select(&Selector::parse("tr").unwrap()).next().unwrap();

        map_row(tr, &SiteConfig::default().columns, &sels())
    }

    /// An 11-column data row with only the port cell of interest.
    fn row_with_port_cell(port_cell: &str) -> String {
        format!("<tr><td>{}</td><td></td><td></td><td>N/A</td><td></td><td></td>\
                 <td>N/A</td><td></td><td></td><td></td><td>N/A</td></tr>", port_cell)
    }

    fn status(time: &str, delay: &str, lane: &str) -> CrossingStatus {
        CrossingStatus {
            current_time: Some(time.into()),
            delay: Some(delay.into()),
            lane_info: Some(lane.into())
        }
    }

    fn lane_only(lane: &str) -> CrossingStatus {
        CrossingStatus {
            lane_info: Some(lane.into()),
            ..CrossingStatus::default()
        }
    }

    #[test]
    fn na_cell_is_all_none() {
        assert_eq!(classify("N/A").unwrap(), CrossingStatus::default());
    }

    #[test]
    fn closed_and_pending_cells_set_lane_info_only() {
        assert_eq!(classify("Lanes Closed").unwrap(), lane_only("lanes closed"));
        assert_eq!(classify("Update Pending").unwrap(), lane_only("update pending"));
    }

    #[test]
    fn delay_cell_is_fully_populated() {
        let got = classify("At 2:45 PM<br/><span class=\"delay\">15 min delay</span>\
                            <br/>2 LANES OPEN").unwrap();

        assert_eq!(got, status("2:45 PM", "15 minute delay", "2 lanes open"));
    }

    #[test]
    fn single_lane_count_is_singularized() {
        let got = classify("At 9:00 AM<br/><span>5 min delay</span><br/>1 lanes open")
            .unwrap();

        assert_eq!(got.lane_info.unwrap(), "1 lane open");
    }

    #[test]
    fn classification_is_idempotent() {
        let cell = "At 2:45 PM<br/><span>15 min delay</span><br/>2 LANES OPEN";

        assert_eq!(classify(cell).unwrap(), classify(cell).unwrap());
    }

    #[test]
    fn unrecognized_cell_degrades_to_all_none() {
        assert_eq!(classify("Coming Soon").unwrap(), CrossingStatus::default());
        assert_eq!(classify("").unwrap(), CrossingStatus::default());
    }

    #[test]
    fn drifted_delay_cell_is_a_hard_error() {
        // Lane info node missing: three child nodes instead of five.
        let err = classify("At 2:45 PM<br/><span>15 min delay</span>").unwrap_err();

        match *err.kind() {
            ErrorKind::MalformedCell(_) => {}
            ref other => panic!("unexpected error: {:?}", other)
        }
    }

    #[test]
    fn spacer_row_is_skipped() {
        let skipped = map_single_row(
            "<tr><td colspan=\"11\">British Columbia / Washington</td></tr>").unwrap();

        assert_eq!(skipped, None);
    }

    #[test]
    fn crossing_label_is_split_from_port_name() {
        let entry = map_single_row(
            &row_with_port_cell("<b>San Ysidro<i>PedWest</i></b>")).unwrap().unwrap();

        assert_eq!(entry.port, "San Ysidro");
        assert_eq!(entry.crossing.as_deref(), Some("PedWest"));
    }

    #[test]
    fn port_without_crossing_label() {
        let entry = map_single_row(
            &row_with_port_cell("<b>Peace Arch</b>")).unwrap().unwrap();

        assert_eq!(entry.port, "Peace Arch");
        assert_eq!(entry.crossing, None);
    }

    #[test]
    fn multiple_crossing_labels_are_rejected() {
        let err = map_single_row(
            &row_with_port_cell("<b>Otay Mesa<i>East</i><i>West</i></b>")).unwrap_err();

        match *err.kind() {
            ErrorKind::MalformedCell(_) => {}
            ref other => panic!("unexpected error: {:?}", other)
        }
    }

    #[test]
    fn missing_table_is_an_extraction_error() {
        let scraper = WaitTimesScraper::from(String::from(
            "<table id=\"resultsCanadian\"><tbody></tbody></table>"));
        let err = scraper.port_entries(&SiteConfig::default()).unwrap_err();

        match *err.kind() {
            ErrorKind::ExtractionError(ref id) => assert_eq!(id, "resultsMexican"),
            ref other => panic!("unexpected error: {:?}", other)
        }
    }

    #[test]
    fn present_but_empty_table_yields_no_entries() {
        let scraper = WaitTimesScraper::from(String::from(
            "<table id=\"resultsCanadian\"><tbody></tbody></table>\
             <table id=\"resultsMexican\"><tbody></tbody></table>"));

        assert_eq!(scraper.port_entries(&SiteConfig::default()).unwrap(), vec![]);
    }

    #[test]
    fn dashboard_fixture_end_to_end() {
        let scraper = WaitTimesScraper::from(String::from(TEST_DATA_DASHBOARD));
        let entries = scraper.port_entries(&SiteConfig::default()).unwrap();

        assert_eq!(entries, vec![
            PortEntry {
                port: "Peace Arch".into(),
                crossing: None,
                commercial: status("2:45 PM", "15 minute delay", "2 lanes open"),
                passenger: CrossingStatus::default(),
                pedestrian: lane_only("lanes closed")
            },
            PortEntry {
                port: "Pacific Highway".into(),
                crossing: None,
                commercial: lane_only("update pending"),
                passenger: status("9:00 AM", "5 minute delay", "1 lane open"),
                pedestrian: CrossingStatus::default()
            },
            PortEntry {
                port: "San Ysidro".into(),
                crossing: Some("PedWest".into()),
                commercial: CrossingStatus::default(),
                passenger: status("11:30 AM", "45 minute delay", "12 lanes open"),
                pedestrian: lane_only("update pending")
            }
        ]);
    }
}
