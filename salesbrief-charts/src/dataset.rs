//! Chart dataset cleaning and aggregation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Records ──────────────────────────────────────────────────────────────────

/// The view of an opportunity the chart tool works from. Field names match
/// the Salesforce records the fetch tool emits, so records can be handed
/// over as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRecord {
    #[serde(rename = "Amount", default)]
    pub amount: Option<f64>,
    #[serde(rename = "StageName", default)]
    pub stage: Option<String>,
    #[serde(rename = "CloseDate", default)]
    pub close_date: Option<String>,
}

/// A record that survived cleaning: a parsed close date plus the fields the
/// charts read.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub amount: Option<f64>,
    pub stage: Option<String>,
    pub close_date: NaiveDate,
}

/// Year-month key for the time series.
pub type Month = (i32, u32);

// ── Parsers ──────────────────────────────────────────────────────────────────

///// Parse close dates: ISO first, then the formats Salesforce exports use.
pub fn parse_close_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%b %d, %Y") {
        return Some(d);
    }

    None
}

/// Keep records with a present, parseable close date. Both charts are
/// computed from this one cleaned set. Drops are silent; the count is logged
/// at debug level.
pub fn clean_records(records: &[ChartRecord]) -> Vec<CleanRecord> {
    let cleaned: Vec<CleanRecord> = records
        .iter()
        .filter_map(|r| {
            let close_date = r.close_date.as_deref().and_then(parse_close_date)?;
            Some(CleanRecord { amount: r.amount, stage: r.stage.clone(), close_date })
        })
        .collect();

    let dropped = records.len() - cleaned.len();
    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept = cleaned.len(),
            "dropped records without a usable close date"
        );
    }
    cleaned
}

// ── Aggregation ──────────────────────────────────────────────────────────────

/// Sum amounts per calendar month of close date, missing amounts as zero.
/// The map iterates in chronological order.
pub fn monthly_totals(records: &[CleanRecord]) -> BTreeMap<Month, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        let key = (record.close_date.year(), record.close_date.month());
        *totals.entry(key).or_insert(0.0) += record.amount.unwrap_or(0.0);
    }
    totals
}

/// Count records per stage, missing stages under `N/A`. Sorted by descending
/// count, ties by name, so slice order is deterministic.
pub fn stage_counts(records: &[CleanRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let stage = record.stage.clone().unwrap_or_else(|| "N/A".to_string());
        *counts.entry(stage).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: Option<f64>, stage: Option<&str>, close_date: Option<&str>) -> ChartRecord {
        ChartRecord {
            amount,
            stage: stage.map(str::to_string),
            close_date: close_date.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_close_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        assert_eq!(parse_close_date("2024-02-20"), Some(expected));
        assert_eq!(parse_close_date("02/20/2024"), Some(expected));
        assert_eq!(parse_close_date("Feb 20, 2024"), Some(expected));
        assert_eq!(parse_close_date(" 2024-02-20 "), Some(expected));

        assert_eq!(parse_close_date(""), None);
        assert_eq!(parse_close_date("soon"), None);
        assert_eq!(parse_close_date("2024-13-01"), None);
    }

    #[test]
    fn test_clean_drops_missing_and_unparseable_dates() {
        let records = vec![
            record(Some(100.0), Some("Closed Won"), Some("2024-01-15")),
            record(Some(200.0), Some("Prospecting"), None),
            record(Some(300.0), Some("Prospecting"), Some("")),
            record(Some(400.0), Some("Prospecting"), Some("not a date")),
        ];

        let cleaned = clean_records(&records);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].amount, Some(100.0));
    }

    #[test]
    fn test_monthly_totals_sums_per_month() {
        let records = clean_records(&[
            record(Some(100.0), Some("Closed Won"), Some("2024-01-15")),
            record(Some(200.0), Some("Prospecting"), Some("2024-01-20")),
            record(Some(50.0), Some("Prospecting"), Some("2024-03-02")),
            record(None, Some("Prospecting"), Some("2024-03-09")),
        ]);

        let totals = monthly_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&(2024, 1)], 300.0);
        assert_eq!(totals[&(2024, 3)], 50.0);

        let months: Vec<Month> = totals.keys().copied().collect();
        assert_eq!(months, vec![(2024, 1), (2024, 3)]);
    }

    #[test]
    fn test_monthly_totals_ordering_across_years() {
        let records = clean_records(&[
            record(Some(1.0), None, Some("2024-01-05")),
            record(Some(2.0), None, Some("2023-12-31")),
        ]);

        let months: Vec<Month> = monthly_totals(&records).keys().copied().collect();
        assert_eq!(months, vec![(2023, 12), (2024, 1)]);
    }

    #[test]
    fn test_stage_counts_order_and_na_bucket() {
        let records = clean_records(&[
            record(Some(1.0), Some("Prospecting"), Some("2024-01-01")),
            record(Some(1.0), Some("Prospecting"), Some("2024-01-02")),
            record(Some(1.0), Some("Closed Won"), Some("2024-01-03")),
            record(Some(1.0), None, Some("2024-01-04")),
        ]);

        let counts = stage_counts(&records);
        assert_eq!(
            counts,
            vec![
                ("Prospecting".to_string(), 2),
                ("Closed Won".to_string(), 1),
                ("N/A".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_stage_counts_ties_break_by_name() {
        let records = clean_records(&[
            record(Some(1.0), Some("Negotiation"), Some("2024-01-01")),
            record(Some(1.0), Some("Closed Won"), Some("2024-01-02")),
        ]);

        let counts = stage_counts(&records);
        assert_eq!(counts[0].0, "Closed Won");
        assert_eq!(counts[1].0, "Negotiation");
    }

    #[test]
    fn test_end_to_end_scenario_aggregates() {
        // Three records, the third with no amount and no close date.
        let records = vec![
            record(Some(100.0), Some("Closed Won"), Some("2024-01-15")),
            record(Some(200.0), Some("Prospecting"), Some("2024-01-20")),
            record(None, Some("Closed Won"), None),
        ];

        let cleaned = clean_records(&records);
        assert_eq!(cleaned.len(), 2);

        let totals = monthly_totals(&cleaned);
        assert_eq!(totals[&(2024, 1)], 300.0);

        let counts = stage_counts(&cleaned);
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|(_, c)| *c == 1));
    }

    #[test]
    fn test_chart_record_parses_full_salesforce_records() {
        let payload = serde_json::json!([{
            "Id": "006A",
            "Name": "Renewal",
            "Amount": 1200.5,
            "StageName": "Negotiation",
            "CloseDate": "2024-06-30",
            "Account": {"Name": "Globex"}
        }, {
            "StageName": "Prospecting"
        }]);

        let records: Vec<ChartRecord> = serde_json::from_value(payload).unwrap();
        assert_eq!(records[0].amount, Some(1200.5));
        assert_eq!(records[0].close_date.as_deref(), Some("2024-06-30"));
        assert!(records[1].amount.is_none());
        assert!(records[1].close_date.is_none());
    }
}
