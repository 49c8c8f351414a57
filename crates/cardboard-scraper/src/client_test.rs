use super::*;

#[test]
fn extract_store_origin_strips_path() {
    assert_eq!(
        extract_store_origin("https://www.boardgamebliss.com/collections/all"),
        "https://www.boardgamebliss.com"
    );
}

#[test]
fn extract_store_origin_bare_domain() {
    assert_eq!(
        extract_store_origin("https://store.401games.ca"),
        "https://store.401games.ca"
    );
}

#[test]
fn extract_store_origin_keeps_explicit_port() {
    assert_eq!(
        extract_store_origin("http://127.0.0.1:40123/shop"),
        "http://127.0.0.1:40123"
    );
}

#[test]
fn join_base_avoids_double_slash() {
    assert_eq!(
        join_base("https://levalet.com/", "/fr/catalogsearch/result/?q=x"),
        "https://levalet.com/fr/catalogsearch/result/?q=x"
    );
    assert_eq!(
        join_base("https://levalet.com", "search?q=x"),
        "https://levalet.com/search?q=x"
    );
}

#[test]
fn resolve_product_url_handles_each_form() {
    let base = "https://www.boardgamebliss.com/collections/all";
    assert_eq!(
        resolve_product_url(base, "/products/catan?_pos=1"),
        "https://www.boardgamebliss.com/products/catan?_pos=1"
    );
    assert_eq!(
        resolve_product_url(base, "//cdn.example.com/catan"),
        "https://cdn.example.com/catan"
    );
    assert_eq!(
        resolve_product_url(base, "https://other.example.com/catan"),
        "https://other.example.com/catan"
    );
    assert_eq!(resolve_product_url(base, ""), "");
}

#[test]
fn encode_query_escapes_spaces_and_punctuation() {
    assert_eq!(encode_query("Ticket to Ride"), "Ticket%20to%20Ride");
    assert_eq!(encode_query("Catan: 5-6"), "Catan%3A%205%2D6");
}

#[test]
fn search_url_substitutes_first_placeholder_only() {
    assert_eq!(
        search_url("https://shop.example.com", "/search?q={query}&alt={query}", "Azul"),
        "https://shop.example.com/search?q=Azul&alt={query}"
    );
}

#[test]
fn new_client_builds_with_valid_settings() {
    assert!(StoreClient::new(15, "cardboard-test/1.0").is_ok());
}
