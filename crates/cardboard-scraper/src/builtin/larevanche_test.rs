use super::*;

fn store() -> LaRevanche {
    LaRevanche::new(BASE_URL).expect("valid base")
}

const PAGE: &str = r#"<html><head><script>
gtag('event', 'view_item_list', {"items":[{"item_id":"LR-100","item_name":"Catan [Français]","price":54.95},{"item_id":"LR-200","item_name":"Azul","price":39}]});
</script></head><body>
<div class="product" data-id="LR-100">
  <a href="https://boutique.larevanche.ca/fc/catan-francais.html">Catan</a>
  <span>54,95 $</span>
</div>
<div class="product" data-id="LR-200">
  <span>39,00 $</span>
</div>
</body></html>"#;

const SOLD_OUT_PAGE: &str = r#"<script>
gtag('event', 'view_item_list', {"items":[{"item_id":"LR-300","item_name":"Arcs","price":89.99}]});
</script>
<div class="product" data-id="LR-300"><span class="badge">Hors stock</span></div>"#;

#[test]
fn search_url_encodes_game_name() {
    assert_eq!(
        store().search_url("Sky Team"),
        "https://boutique.larevanche.ca/search?q=Sky%20Team"
    );
}

#[test]
fn page_without_item_list_has_no_listings() {
    assert!(store().parse_listings("<html>nothing here</html>").is_empty());
}

#[test]
fn reads_item_triples_in_order() {
    let listings = store().parse_listings(PAGE);
    let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Catan [Français]", "Azul"]);
}

#[test]
fn formats_price_with_two_decimals() {
    let listings = store().parse_listings(PAGE);
    assert_eq!(listings[0].price, "$54.95");
    assert_eq!(listings[1].price, "$39.00");
    assert!((listings[1].price_num - 39.0).abs() < f64::EPSILON);
}

#[test]
fn resolves_url_by_slug() {
    let listings = store().parse_listings(PAGE);
    assert_eq!(
        listings[0].url,
        "https://boutique.larevanche.ca/fc/catan-francais.html"
    );
}

#[test]
fn unresolved_url_falls_back_to_search() {
    let listings = store().parse_listings(PAGE);
    assert_eq!(
        listings[1].url,
        "https://boutique.larevanche.ca/search?q=Azul"
    );
}

#[test]
fn hors_stock_near_item_id_marks_out_of_stock() {
    let listings = store().parse_listings(SOLD_OUT_PAGE);
    assert_eq!(listings.len(), 1);
    assert!(!listings[0].in_stock);
}

#[test]
fn items_without_stock_label_are_in_stock() {
    let listings = store().parse_listings(PAGE);
    assert!(listings.iter().all(|l| l.in_stock));
}

#[test]
fn slugify_normalizes_language_tags_and_punctuation() {
    assert_eq!(slugify("Catan [Français]"), "catan-francais");
    assert_eq!(slugify("Wingspan: Asia [Anglais]"), "wingspan-asia-anglais");
    assert_eq!(slugify("  7 Wonders!! "), "7-wonders");
}

#[test]
fn contains_near_respects_window() {
    let text = format!("ANCHOR{}Hors stock", " ".repeat(20));
    assert!(contains_near(&text, "ANCHOR", "Hors stock", 30));
    assert!(!contains_near(&text, "ANCHOR", "Hors stock", 10));
    assert!(!contains_near(&text, "MISSING", "Hors stock", 1000));
}

#[test]
fn contains_near_is_safe_on_multibyte_boundaries() {
    let text = "ééééé ANCHOR ééééé";
    assert!(!contains_near(text, "ANCHOR", "Hors stock", 4));
    assert!(contains_near(text, "ANCHOR", "é", 4));
}
