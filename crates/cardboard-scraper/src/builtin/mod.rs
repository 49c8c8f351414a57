//! Hand-written stores that do not fit a config-driven strategy.

pub mod larevanche;

pub use larevanche::LaRevanche;
