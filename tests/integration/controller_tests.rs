//! Controller behavior against a mock admin API.

use std::time::Duration;

use backoffice::pagination::{QueryUpdate, ViewStatus};
use backoffice::resources::{PayoutFiltersPatch, TransactionFiltersPatch};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestFixture, investor_page};

const INVESTORS: &str = "/investor/admin/getAllInvestors";

async fn mount_investor_pages(fixture: &TestFixture) {
    for (page, first, last) in [(1, 1, 10), (2, 11, 20), (3, 21, 25)] {
        Mock::given(method("GET"))
            .and(path(INVESTORS))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(investor_page(first, last, page, 3, 25)),
            )
            .mount(&fixture.server)
            .await;
    }
}

#[tokio::test]
async fn test_paging_through_twenty_five_investors() {
    let fixture = TestFixture::start().await;
    mount_investor_pages(&fixture).await;
    let investors = fixture.client.investors();

    investors.mount().await;
    let view = investors.state();
    assert_eq!(view.status(), ViewStatus::Ready);
    assert_eq!(view.items.len(), 10);
    assert_eq!(view.pagination.total_pages, 3);
    assert!(view.has_next());
    assert!(!view.has_prev());

    investors.next_page().await;
    investors.next_page().await;
    let view = investors.state();
    assert_eq!(view.items.len(), 5);
    assert_eq!(view.items[0].id, "inv_21");
    assert!(!view.has_next());
    assert!(view.has_prev());

    investors.next_page().await;
    assert_eq!(investors.state().pagination.current_page, 3);
}

#[tokio::test]
async fn test_filter_change_from_page_three_returns_to_first_page() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/transaction/admin/getAllTransactions"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [], "page": 3, "totalPages": 3, "totalResults": 25, "limit": 10
        })))
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transaction/admin/getAllTransactions"))
        .and(query_param("page", "1"))
        .and(query_param("transactionStatusId", "1"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "_id": "tx_1", "amount": 250, "transactionStatus": "Pending" }],
            "page": 1,
            "totalPages": 1,
            "totalResults": 1,
            "limit": 10
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let transactions = fixture.client.transactions();
    transactions.set_filters(QueryUpdate::new().page(3)).await;
    transactions
        .set_filters(QueryUpdate::new().filters(
            TransactionFiltersPatch::default().transaction_status_id(Some(1)),
        ))
        .await;

    let view = transactions.state();
    assert_eq!(view.query.page, 1);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn test_slow_older_response_is_discarded() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path(INVESTORS))
        .and(query_param_is_missing("search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(investor_page(1, 10, 1, 3, 25))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path(INVESTORS))
        .and(query_param("search", "investor7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(investor_page(7, 7, 1, 1, 1)))
        .mount(&fixture.server)
        .await;

    let investors = fixture.client.investors();
    let first = investors.mount();
    let second = investors.set_filters(QueryUpdate::new().search("investor7"));
    tokio::join!(first, second);

    let view = investors.state();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, "inv_7");
    assert_eq!(view.query.search, "investor7");
    assert!(!view.loading);
}

#[tokio::test]
async fn test_server_error_keeps_last_page() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/payout/admin/getAllPayouts"))
        .and(query_param_is_missing("payoutStatusId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "results": [{ "_id": "p1", "amount": 900 }],
                "page": 1, "totalPages": 1, "totalResults": 1, "limit": 10
            }
        })))
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payout/admin/getAllPayouts"))
        .and(query_param("payoutStatusId", "4"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "Payout service is down" })),
        )
        .mount(&fixture.server)
        .await;

    let payouts = fixture.client.payouts();
    payouts.mount().await;
    payouts
        .set_filters(QueryUpdate::new().filters(PayoutFiltersPatch::default().payout_status_id(Some(4))))
        .await;

    let view = payouts.state();
    assert_eq!(view.status(), ViewStatus::Stale);
    assert_eq!(view.error.as_deref(), Some("Payout service is down"));
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.query.filters.payout_status_id, Some(4));
}

#[tokio::test]
async fn test_refetch_twice_yields_same_state() {
    let fixture = TestFixture::start().await;
    mount_investor_pages(&fixture).await;
    let investors = fixture.client.investors();

    investors.mount().await;
    let before = investors.state();
    investors.refetch().await;
    investors.refetch().await;
    let after = investors.state();

    assert_eq!(before.items, after.items);
    assert_eq!(before.pagination, after.pagination);
    assert_eq!(before.query, after.query);
}

#[tokio::test]
async fn test_empty_listing() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/bulk-transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "results": [], "page": 1, "totalPages": 0, "totalResults": 0, "limit": 10 }
        })))
        .mount(&fixture.server)
        .await;

    let batches = fixture.client.bulk_transactions();
    batches.mount().await;

    let view = batches.state();
    assert_eq!(view.status(), ViewStatus::Empty);
    assert!(!view.has_next());
    assert!(!view.has_prev());
}

#[tokio::test]
async fn test_unexpected_body_is_reported() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/transaction/admin/getPendingTransactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .mount(&fixture.server)
        .await;

    let pending = fixture.client.pending_transactions();
    pending.mount().await;

    let view = pending.state();
    assert_eq!(view.status(), ViewStatus::Failed);
    assert_eq!(view.error.as_deref(), Some("Failed to fetch pending transactions"));
}

#[tokio::test]
async fn test_add_funds_sends_fixed_type() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/transaction/admin/getAddWithdrawRequest"))
        .and(query_param("transactionTypeId", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [], "page": 1, "totalPages": 1, "totalResults": 0, "limit": 10
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let requests = fixture.client.add_funds();
    requests.mount().await;
    assert_eq!(requests.state().error, None);
}
