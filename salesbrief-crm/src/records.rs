//! Opportunity records and the text summary contract.

use serde::{Deserialize, Serialize};

/// Fixed SOQL issued by the fetch tool. One bulk query with one level of
/// related-object dereference for the account name.
pub const OPPORTUNITY_QUERY: &str =
    "SELECT Id, Name, Amount, StageName, CloseDate, Account.Name FROM Opportunity";

/// Sentinel returned when the org has no opportunity records.
pub const NO_OPPORTUNITIES: &str = "No Opportunities found.";

/// One opportunity row as returned by the REST query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount")]
    pub amount: Option<f64>,
    #[serde(rename = "StageName")]
    pub stage: Option<String>,
    #[serde(rename = "CloseDate")]
    pub close_date: Option<String>,
    #[serde(rename = "Account")]
    pub account: Option<AccountRef>,
}

/// Related account, dereferenced one level in the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRef {
    #[serde(rename = "Name")]
    pub name: Option<String>,
}

/// Wire shape of the REST query endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub total_size: u32,
    pub done: bool,
    #[serde(default)]
    pub next_records_url: Option<String>,
    pub records: Vec<Opportunity>,
}

/// All records from a query plus the org-reported total.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub total_size: u32,
    pub records: Vec<Opportunity>,
}

impl Opportunity {
    /// Account name when the related account was returned.
    pub fn account_name(&self) -> Option<&str> {
        self.account.as_ref().and_then(|a| a.name.as_deref())
    }
}

/// Render the fixed multi-line summary for a record set.
///
/// Missing amount, stage, close date, or account render as `N/A`. An empty
/// set yields the no-opportunities sentinel.
pub fn format_summary(records: &[Opportunity]) -> String {
    if records.is_empty() {
        return NO_OPPORTUNITIES.to_string();
    }

    let mut summary = String::from("Opportunities with Account Summary:\n\n");
    for opp in records {
        let amount = opp.amount.map_or_else(|| "N/A".to_string(), |a| a.to_string());
        let stage = opp.stage.as_deref().unwrap_or("N/A");
        let close_date = opp.close_date.as_deref().unwrap_or("N/A");
        let account = opp.account_name().unwrap_or("N/A");
        summary.push_str(&format!(
            "- Opportunity Name: {}, Account Name: {}, Amount: {}, Stage: {}, Close Date: {}\n",
            opp.name, account, amount, stage, close_date
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opportunity(
        name: &str,
        amount: Option<f64>,
        stage: Option<&str>,
        close_date: Option<&str>,
        account: Option<&str>,
    ) -> Opportunity {
        Opportunity {
            id: format!("006{}", name),
            name: name.to_string(),
            amount,
            stage: stage.map(str::to_string),
            close_date: close_date.map(str::to_string),
            account: account.map(|n| AccountRef { name: Some(n.to_string()) }),
        }
    }

    #[test]
    fn test_empty_set_yields_sentinel() {
        assert_eq!(format_summary(&[]), "No Opportunities found.");
    }

    #[test]
    fn test_summary_line_format() {
        let records = vec![opportunity(
            "Big Deal",
            Some(5000.0),
            Some("Prospecting"),
            Some("2024-03-01"),
            Some("Acme"),
        )];
        let summary = format_summary(&records);

        assert!(summary.starts_with("Opportunities with Account Summary:\n\n"));
        assert!(summary.contains(
            "- Opportunity Name: Big Deal, Account Name: Acme, Amount: 5000, \
             Stage: Prospecting, Close Date: 2024-03-01\n"
        ));
    }

    #[test]
    fn test_missing_fields_render_na() {
        let records = vec![opportunity("Bare", None, None, None, None)];
        let summary = format_summary(&records);

        assert!(summary.contains(
            "- Opportunity Name: Bare, Account Name: N/A, Amount: N/A, \
             Stage: N/A, Close Date: N/A\n"
        ));
    }

    #[test]
    fn test_account_without_name_renders_na() {
        let mut record = opportunity("Deal", Some(10.0), Some("Closed Won"), None, None);
        record.account = Some(AccountRef { name: None });
        let summary = format_summary(&[record]);
        assert!(summary.contains("Account Name: N/A"));
    }

    #[test]
    fn test_three_record_scenario() {
        let records = vec![
            opportunity("First", Some(100.0), Some("Closed Won"), Some("2024-01-15"), Some("A")),
            opportunity("Second", Some(200.0), Some("Prospecting"), Some("2024-01-20"), Some("B")),
            opportunity("Third", None, Some("Closed Won"), None, Some("C")),
        ];
        let summary = format_summary(&records);

        let lines: Vec<&str> = summary.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("Amount: N/A"));
        assert!(lines[2].contains("Close Date: N/A"));
    }

    #[test]
    fn test_deserializes_rest_payload() {
        let payload = serde_json::json!({
            "totalSize": 1,
            "done": true,
            "records": [{
                "attributes": {"type": "Opportunity", "url": "/services/data/v59.0/sobjects/Opportunity/0065f00000"},
                "Id": "0065f00000",
                "Name": "Renewal",
                "Amount": 1200.5,
                "StageName": "Negotiation",
                "CloseDate": "2024-06-30",
                "Account": {
                    "attributes": {"type": "Account"},
                    "Name": "Globex"
                }
            }]
        });

        let response: QueryResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.total_size, 1);
        assert!(response.done);
        assert!(response.next_records_url.is_none());
        let opp = &response.records[0];
        assert_eq!(opp.name, "Renewal");
        assert_eq!(opp.amount, Some(1200.5));
        assert_eq!(opp.account_name(), Some("Globex"));
    }

    #[test]
    fn test_deserializes_null_account() {
        let payload = serde_json::json!({
            "totalSize": 1,
            "done": true,
            "records": [{
                "Id": "0065f00001",
                "Name": "Orphan",
                "Amount": null,
                "StageName": "Prospecting",
                "CloseDate": null,
                "Account": null
            }]
        });

        let response: QueryResponse = serde_json::from_value(payload).unwrap();
        let opp = &response.records[0];
        assert!(opp.amount.is_none());
        assert!(opp.close_date.is_none());
        assert!(opp.account_name().is_none());
    }

    #[test]
    fn test_serializes_with_salesforce_field_names() {
        let record = opportunity("Deal", Some(7.5), Some("Closed Won"), Some("2024-02-01"), None);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Name"], "Deal");
        assert_eq!(value["Amount"], 7.5);
        assert_eq!(value["StageName"], "Closed Won");
        assert_eq!(value["CloseDate"], "2024-02-01");
    }
}
