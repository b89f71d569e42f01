//! Fetch-then-export flows for bulk transaction details.

use backoffice::export::{export_file_name, to_csv, write_csv_file};
use backoffice::resources::credit_total;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestFixture;

fn detail(id: &str, mode: &str, name: &str, account: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "bulkTransactionId": "bt_42",
        "amount": 1410,
        "tag": "New",
        "bulkTransactionStatus": "Completed",
        "investor": "RAI1671",
        "investorName": name,
        "account": account,
        "accountName": account,
        "transactionMode": mode,
        "createdAt": "2025-06-24T09:24:50.236Z"
    })
}

#[tokio::test]
async fn test_export_bulk_transaction_details() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/bulk-transactions/bt_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "bulkTransactionId": "bt_42",
                "transactionType": "Profit",
                "bulkTransactionStatus": "Completed",
                "date": "24-06-2025"
            }
        })))
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bulk-transactions/bt_42/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                detail("d1", "Debit", "PATEL VINABEN ANIRUDHA", "AINFINITY"),
                detail("c1", "Credit", "PATEL VINABEN ANIRUDHA", "Patel, Vinaben"),
            ]
        })))
        .mount(&fixture.server)
        .await;

    let summary = fixture.client.bulk_transaction_summary("bt_42").await.expect("summary");
    assert_eq!(summary.transaction_type.as_deref(), Some("Profit"));

    let details = fixture.client.bulk_transaction_details("bt_42");
    details.mount().await;
    let view = details.state();
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.pagination.total_results, 2);
    assert!((credit_total(&view.items) - 1410.0).abs() < f64::EPSILON);

    let csv = to_csv(&view.items).expect("csv");
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].contains("\"Patel, Vinaben\""));

    let dir = tempfile::tempdir().expect("tempdir");
    let name = export_file_name(
        &details.resource().export_prefix(),
        NaiveDate::from_ymd_opt(2025, 6, 24).expect("date"),
    );
    assert_eq!(name, "bulk-transaction-bt_42-2025-06-24.csv");
    write_csv_file(dir.path().join(&name), &view.items).expect("write");
    assert!(dir.path().join(name).exists());
}

#[tokio::test]
async fn test_missing_summary_is_an_error() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/bulk-transactions/bt_404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Bulk transaction not found"
        })))
        .mount(&fixture.server)
        .await;

    let err = fixture.client.bulk_transaction_summary("bt_404").await.unwrap_err();
    assert_eq!(err.kind(), backoffice::ErrorKind::NotFound);
    assert_eq!(err.message(), "Bulk transaction not found");
}
