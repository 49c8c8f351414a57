pub mod app_config;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod registry;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use matching::{
    build_store_result, exact_title_match, fuzzy_match, parse_price, select_candidates,
    should_exclude, DEFAULT_MAX_MATCHES,
};
pub use models::{CheckRequest, CheckResponse, Game, GameResult, ProductMatch, StoreResult};
pub use registry::{
    CaptureGroups, DefaultConfig, JsonApiConfig, JsonFieldMap, PriceCaptureMode, PricePattern,
    RegistryLoader, ScraperConfig, ShopifyConfig, StockLogic, StoreConfig, StoreRef, StoreType,
    StoresConfig,
};
