//! Regex-driven scraping of HTML search result pages.

use cardboard_core::{
    parse_price, CaptureGroups, PriceCaptureMode, ProductMatch, ScraperConfig, StockLogic,
};
use regex::{Captures, Regex};

use crate::client::{resolve_product_url, search_url};
use crate::error::ScraperError;

#[derive(Debug, Clone)]
struct PriceRegex {
    re: Regex,
    groups: PriceCaptureMode,
}

/// HTML search page split into product cards by a configured pattern.
#[derive(Debug, Clone)]
pub struct HtmlScraperStrategy {
    search_path: String,
    card_splitter: Regex,
    title_patterns: Vec<Regex>,
    title_groups: CaptureGroups,
    price_patterns: Vec<PriceRegex>,
    price_prefix: String,
    out_of_stock_indicators: Vec<String>,
    in_stock_indicators: Vec<String>,
    stock_logic: StockLogic,
}

fn compile(pattern: &str) -> Result<Regex, ScraperError> {
    Regex::new(pattern).map_err(|e| ScraperError::InvalidPattern {
        pattern: pattern.to_owned(),
        source: e,
    })
}

fn group_text<'h>(caps: &Captures<'h>, idx: usize) -> &'h str {
    caps.get(idx).map_or("", |m| m.as_str())
}

impl HtmlScraperStrategy {
    /// Compiles every pattern in the scraper block.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] for the first pattern that does
    /// not compile, including an empty card splitter.
    pub fn new(cfg: &ScraperConfig) -> Result<Self, ScraperError> {
        if cfg.card_splitter.is_empty() {
            return Err(ScraperError::InvalidPattern {
                pattern: String::new(),
                source: regex::Error::Syntax("card splitter must not be empty".to_owned()),
            });
        }

        let title_patterns = cfg
            .title_patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        let price_patterns = cfg
            .price_patterns
            .iter()
            .map(|p| {
                Ok(PriceRegex {
                    re: compile(&p.pattern)?,
                    groups: p.groups,
                })
            })
            .collect::<Result<Vec<_>, ScraperError>>()?;

        Ok(Self {
            search_path: cfg.search_path.clone(),
            card_splitter: compile(&cfg.card_splitter)?,
            title_patterns,
            title_groups: cfg.title_groups,
            price_patterns,
            price_prefix: cfg.price_prefix.clone(),
            out_of_stock_indicators: cfg.out_of_stock_indicators.clone(),
            in_stock_indicators: cfg.in_stock_indicators.clone(),
            stock_logic: cfg.stock_logic,
        })
    }

    #[must_use]
    pub fn search_url(&self, base_url: &str, game_name: &str) -> String {
        search_url(base_url, &self.search_path, game_name)
    }

    /// Splits `html` into cards and extracts one listing per card with a
    /// matching title pattern. The segment before the first card is skipped.
    #[must_use]
    pub fn parse_listings(&self, base_url: &str, html: &str) -> Vec<ProductMatch> {
        self.card_splitter
            .split(html)
            .skip(1)
            .filter_map(|card| self.parse_card(base_url, card))
            .collect()
    }

    fn parse_card(&self, base_url: &str, card: &str) -> Option<ProductMatch> {
        let caps = self.title_patterns.iter().find_map(|re| re.captures(card))?;
        let title = group_text(&caps, self.title_groups.title).trim().to_owned();
        let url = resolve_product_url(base_url, group_text(&caps, self.title_groups.url));
        let (price, price_num) = self.extract_price(card);

        Some(ProductMatch {
            title,
            url,
            price,
            price_num,
            in_stock: self.determine_stock(card),
        })
    }

    /// First price pattern that matches wins. Unmatched cards get an empty
    /// price.
    fn extract_price(&self, card: &str) -> (String, f64) {
        for PriceRegex { re, groups } in &self.price_patterns {
            let Some(caps) = re.captures(card) else {
                continue;
            };
            let group_count = caps.len();

            if groups.amount > 0 && groups.amount < group_count {
                let amount = parse_price(group_text(&caps, groups.amount));
                return (format!("{}{amount:.2}", self.price_prefix), amount);
            }

            if groups.dollars > 0
                && groups.cents > 0
                && groups.dollars < group_count
                && groups.cents < group_count
            {
                let joined = format!(
                    "{}.{}",
                    group_text(&caps, groups.dollars),
                    group_text(&caps, groups.cents)
                );
                return (format!("{}{joined}", self.price_prefix), parse_price(&joined));
            }
        }
        (String::new(), 0.0)
    }

    fn determine_stock(&self, card: &str) -> bool {
        if self
            .out_of_stock_indicators
            .iter()
            .any(|i| card.contains(i.as_str()))
        {
            return false;
        }

        match self.stock_logic {
            StockLogic::InStockRequired => self
                .in_stock_indicators
                .iter()
                .any(|i| card.contains(i.as_str())),
            StockLogic::OutOfStock => true,
        }
    }
}

#[cfg(test)]
#[path = "html_scraper_test.rs"]
mod tests;
