//! Command handlers for `check`, `wishlist` and `stores`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use cardboard_core::{AppConfig, CheckResponse, Game, RegistryLoader, StoreResult};
use cardboard_scraper::{load_stores, Checker, StoreCheck, StoreClient};

fn build_checker(config: &AppConfig) -> anyhow::Result<Checker> {
    let loader = RegistryLoader::new(config.config_dir.clone());
    let stores = load_stores(&loader);
    let client = StoreClient::new(config.request_timeout_secs, &config.user_agent)
        .context("building HTTP client")?;
    Ok(Checker::new(stores, client, config.max_concurrent_games))
}

/// Turns command-line names into games, in argument order.
pub(crate) fn games_from_names(names: &[String]) -> Vec<Game> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .zip(1..)
        .map(|(name, priority)| Game {
            name: name.to_owned(),
            priority,
        })
        .collect()
}

/// Reads a wishlist file written by the server.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON game list.
pub(crate) fn load_wishlist(path: &Path) -> anyhow::Result<Vec<Game>> {
    let data = std::fs::read(path)
        .with_context(|| format!("reading wishlist {}", path.display()))?;
    let games: Vec<Game> = serde_json::from_slice(&data)
        .with_context(|| format!("parsing wishlist {}", path.display()))?;
    tracing::debug!(path = %path.display(), games = games.len(), "loaded wishlist");
    Ok(games)
}

/// Checks `games` and prints the verdicts.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or JSON output fails.
pub(crate) async fn run_check(config: &AppConfig, games: &[Game], json: bool) -> anyhow::Result<()> {
    let checker = build_checker(config)?;
    let response = checker.run(games).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_report(&response));
    }
    Ok(())
}

/// Prints the configured stores in check order.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub(crate) fn run_stores(config: &AppConfig) -> anyhow::Result<()> {
    let checker = build_checker(config)?;
    println!("{:<24}{:<15}BASE URL", "STORE", "TYPE");
    for store in checker.stores() {
        println!("{:<24}{:<15}{}", store.name(), store.kind(), store.base_url());
    }
    Ok(())
}

fn verdict(result: &StoreResult) -> String {
    match (&result.error, result.found, result.in_stock) {
        (Some(e), _, _) => format!("error: {e}"),
        (None, false, _) => "not found".to_owned(),
        (None, true, true) => "in stock".to_owned(),
        (None, true, false) => "out of stock".to_owned(),
    }
}

/// Renders one block per game followed by the per-store in-stock summary.
pub(crate) fn format_report(response: &CheckResponse) -> String {
    let mut out = String::new();

    for game in &response.results {
        let _ = writeln!(out, "{}", game.name);
        for result in &game.results {
            let _ = writeln!(
                out,
                "  {:<24}{:<14}{:<10}{}",
                result.store,
                verdict(result),
                result.price,
                result.title
            );
        }
        out.push('\n');
    }

    out.push_str("In stock per store\n");
    for (store, count) in &response.summary {
        let _ = writeln!(out, "  {store:<24}{count}");
    }
    out
}
