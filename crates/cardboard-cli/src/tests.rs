use std::collections::BTreeMap;

use cardboard_core::{CheckResponse, GameResult, StoreResult};
use clap::Parser;

use super::*;

#[test]
fn parses_check_with_multiple_games() {
    let cli = Cli::try_parse_from(["cardboard-cli", "check", "Catan", "Ticket to Ride"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Check { ref games, json: false }) if games == &["Catan", "Ticket to Ride"]
    ));
}

#[test]
fn check_requires_a_game() {
    assert!(Cli::try_parse_from(["cardboard-cli", "check"]).is_err());
}

#[test]
fn parses_check_json_flag() {
    let cli = Cli::try_parse_from(["cardboard-cli", "check", "--json", "Azul"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Check { json: true, .. })));
}

#[test]
fn parses_wishlist_with_path() {
    let cli = Cli::try_parse_from(["cardboard-cli", "wishlist", "--path", "/tmp/games.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Wishlist { path: Some(ref p), json: false }) if p == std::path::Path::new("/tmp/games.json")
    ));
}

#[test]
fn parses_wishlist_without_path() {
    let cli = Cli::try_parse_from(["cardboard-cli", "wishlist"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Wishlist { path: None, .. })
    ));
}

#[test]
fn parses_stores_command() {
    let cli = Cli::try_parse_from(["cardboard-cli", "stores"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Stores)));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["cardboard-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn games_from_names_skips_blanks_and_numbers_priorities() {
    let games = check::games_from_names(&[
        "Catan".to_string(),
        "   ".to_string(),
        " Azul ".to_string(),
    ]);
    let got: Vec<(&str, i32)> = games.iter().map(|g| (g.name.as_str(), g.priority)).collect();
    assert_eq!(got, vec![("Catan", 1), ("Azul", 2)]);
}

#[test]
fn load_wishlist_reads_saved_file() {
    let path = std::env::temp_dir().join(format!("cardboard-cli-wishlist-{}.json", std::process::id()));
    std::fs::write(&path, r#"[{"name":"Catan","priority":1}]"#).expect("write");

    let games = check::load_wishlist(&path).expect("load");
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].name, "Catan");
    let _ = std::fs::remove_file(path);
}

#[test]
fn load_wishlist_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("cardboard-cli-definitely-missing.json");
    let err = check::load_wishlist(&path).expect_err("missing file");
    assert!(format!("{err:#}").contains("reading wishlist"));
}

#[test]
fn report_shows_each_verdict_and_summary() {
    let in_stock = StoreResult {
        store: "Board Game Bliss".to_string(),
        found: true,
        in_stock: true,
        price: "$39.99".to_string(),
        price_num: 39.99,
        title: "Catan".to_string(),
        ..StoreResult::default()
    };
    let out_of_stock = StoreResult {
        in_stock: false,
        store: "401 Games".to_string(),
        ..in_stock.clone()
    };
    let response = CheckResponse {
        results: vec![GameResult {
            name: "Catan".to_string(),
            results: vec![
                in_stock,
                out_of_stock,
                StoreResult::not_found("La Pioche"),
                StoreResult::failed("La Revanche", "timed out"),
            ],
        }],
        summary: BTreeMap::from([
            ("401 Games".to_string(), 0),
            ("Board Game Bliss".to_string(), 1),
            ("La Pioche".to_string(), 0),
            ("La Revanche".to_string(), 0),
        ]),
    };

    let report = check::format_report(&response);
    assert!(report.starts_with("Catan\n"));
    assert!(report.contains("in stock"));
    assert!(report.contains("out of stock"));
    assert!(report.contains("not found"));
    assert!(report.contains("error: timed out"));
    assert!(report.contains("In stock per store"));
    let bliss_line = report
        .lines()
        .rev()
        .find(|l| l.contains("Board Game Bliss"))
        .expect("summary line");
    assert!(bliss_line.trim_end().ends_with('1'));
}
