//! Title matching and candidate ranking shared by every store.
//!
//! All stores run the same pipeline over whatever listings they extract:
//! drop excluded titles, keep fuzzy matches in source order, cap the list,
//! then promote an exact title match if one exists. Keeping the policy here
//! makes verdicts comparable across Shopify, JSON and HTML sources.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ProductMatch, StoreResult};

/// Candidates kept per store before ranking when the registry does not say otherwise.
pub const DEFAULT_MAX_MATCHES: usize = 5;

/// Title substrings that mark a listing as something other than the base game.
const EXCLUDED_TERMS: [&str; 4] = ["pre-order", "preorder", "extension", "expansion"];

static WORD_SPLITTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-:,()\[\]]+").expect("valid regex"));

fn split_words(s: &str) -> impl Iterator<Item = &str> {
    WORD_SPLITTER.split(s).filter(|w| !w.is_empty())
}

/// Returns `true` when every word of `search` appears as a complete word in
/// `title`, ignoring case and word order.
///
/// Words are split on whitespace, `-`, `:`, `,`, parentheses and brackets, so
/// `"go"` matches `"Go Fish"` but not `"Gobblet Gobblers"`. A search with no
/// words matches nothing.
#[must_use]
pub fn fuzzy_match(search: &str, title: &str) -> bool {
    let search_lower = search.to_lowercase();
    let title_lower = title.to_lowercase();
    let title_words: HashSet<&str> = split_words(&title_lower).collect();

    let mut search_words = split_words(&search_lower).peekable();
    if search_words.peek().is_none() {
        return false;
    }
    search_words.all(|w| title_words.contains(w))
}

/// Returns `true` for pre-orders, expansions and extensions.
#[must_use]
pub fn should_exclude(title: &str) -> bool {
    let lower = title.to_lowercase();
    EXCLUDED_TERMS.iter().any(|term| lower.contains(term))
}

/// Case-insensitive equality after trimming surrounding whitespace.
#[must_use]
pub fn exact_title_match(search: &str, title: &str) -> bool {
    search.trim().to_lowercase() == title.trim().to_lowercase()
}

/// Best-effort numeric price from a display string such as `"$1,024.99 CAD"`.
///
/// Strips `$`, `,` and `CAD`, then reads the leading decimal number.
/// Anything unreadable yields `0.0`.
#[must_use]
pub fn parse_price(text: &str) -> f64 {
    let cleaned = text.replace(['$', ','], "").replace("CAD", "");
    let cleaned = cleaned.trim();

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in cleaned.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return 0.0;
    }
    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

/// Filters listings down to at most `max` candidates for `game_name`,
/// preserving source order.
pub fn select_candidates<I>(game_name: &str, listings: I, max: usize) -> Vec<ProductMatch>
where
    I: IntoIterator<Item = ProductMatch>,
{
    listings
        .into_iter()
        .filter(|p| !should_exclude(&p.title) && fuzzy_match(game_name, &p.title))
        .take(max)
        .collect()
}

/// Keeps only the first exact title match when there is one; otherwise the
/// candidates are returned untouched.
#[must_use]
pub fn rank_candidates(game_name: &str, candidates: Vec<ProductMatch>) -> Vec<ProductMatch> {
    match candidates
        .iter()
        .position(|c| exact_title_match(game_name, &c.title))
    {
        Some(idx) => candidates.into_iter().skip(idx).take(1).collect(),
        None => candidates,
    }
}

/// Ranks `candidates` and builds the store verdict whose top-level fields
/// mirror the first kept candidate.
#[must_use]
pub fn build_store_result(
    store: &str,
    game_name: &str,
    candidates: Vec<ProductMatch>,
) -> StoreResult {
    let matches = rank_candidates(game_name, candidates);
    let Some(first) = matches.first() else {
        return StoreResult::not_found(store);
    };

    StoreResult {
        store: store.to_string(),
        found: true,
        in_stock: first.in_stock,
        price: first.price.clone(),
        price_num: first.price_num,
        url: first.url.clone(),
        title: first.title.clone(),
        error: None,
        matches,
    }
}

#[cfg(test)]
#[path = "matching_test.rs"]
mod tests;
