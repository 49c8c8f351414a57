pub mod builtin;
pub mod checker;
pub mod client;
pub mod error;
pub mod store;
pub mod strategy;
pub mod types;

pub use checker::{Checker, DEFAULT_MAX_CONCURRENT_GAMES};
pub use client::StoreClient;
pub use error::ScraperError;
pub use store::{builtin_stores, load_stores, Store, StoreCheck, StoreTarget};
pub use strategy::Strategy;
