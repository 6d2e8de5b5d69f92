//! End-to-end pipeline test: mock provider -> fetch -> allocate -> spreadsheet.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use equiweight::allocator::{self, PortfolioRequest};
use equiweight::config::ProviderConfig;
use equiweight::quotes::{IexProvider, QuoteFetcher};
use equiweight::report;

#[tokio::test]
async fn fetch_allocate_and_emit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stable/stock/market/batch/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "A": { "quote": { "latestPrice": 10.0, "marketCap": 1.0e9 } },
            "B": { "quote": { "latestPrice": 20.0, "marketCap": 2.0e9 } },
            "C": { "quote": { "latestPrice": 40.0, "marketCap": 4.0e9 } },
        })))
        .mount(&server)
        .await;

    let provider = IexProvider::new(ProviderConfig::new(server.uri(), "Tpk_test"));
    let fetcher = QuoteFetcher::new(provider, 100, HashSet::new());

    let symbols: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    let quotes = fetcher.fetch(&symbols).await.unwrap();
    assert_eq!(quotes.len(), 3);

    let request = PortfolioRequest::new(dec!(100)).unwrap();
    let rows = allocator::allocate(&request, &quotes).unwrap();

    let shares: Vec<u64> = rows.iter().map(|r| r.shares_to_buy).collect();
    assert_eq!(shares, vec![3, 1, 0]);

    let spend: Decimal = rows
        .iter()
        .map(|r| Decimal::from(r.shares_to_buy) * r.price)
        .sum();
    assert_eq!(spend, dec!(50));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("recommended_trades.xlsx");
    report::write_report(&rows, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}
