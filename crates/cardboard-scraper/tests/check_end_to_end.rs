//! End-to-end check of a wishlist against a mocked Shopify store.

use cardboard_core::{Game, StoreConfig, DEFAULT_MAX_MATCHES};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cardboard_scraper::{Checker, Store, StoreClient, DEFAULT_MAX_CONCURRENT_GAMES};

#[tokio::test]
async fn wishlist_against_fake_shopify_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/suggest.json"))
        .and(query_param("q", "Catan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": { "results": { "products": [
                {"title": "Catan", "url": "/products/catan", "price": "$39.99", "available": true}
            ] } }
        })))
        .mount(&server)
        .await;

    let cfg: StoreConfig = serde_json::from_value(json!({
        "id": "fake",
        "name": "FakeStore",
        "enabled": true,
        "type": "shopify",
        "baseURL": server.uri()
    }))
    .expect("store document");
    let client = StoreClient::new(5, "cardboard-test/0.1").expect("client");
    let checker = Checker::new(
        vec![Store::from_config(&cfg, DEFAULT_MAX_MATCHES)],
        client,
        DEFAULT_MAX_CONCURRENT_GAMES,
    );

    let response = checker
        .run(&[Game {
            name: "Catan".to_string(),
            priority: 1,
        }])
        .await;

    assert_eq!(response.results.len(), 1);
    let game = &response.results[0];
    assert_eq!(game.name, "Catan");
    assert_eq!(game.results.len(), 1);

    let verdict = &game.results[0];
    assert_eq!(verdict.store, "FakeStore");
    assert!(verdict.found);
    assert!(verdict.in_stock);
    assert_eq!(verdict.price, "$39.99");
    assert!((verdict.price_num - 39.99).abs() < f64::EPSILON);

    assert_eq!(response.summary.len(), 1);
    assert_eq!(response.summary["FakeStore"], 1);
}
