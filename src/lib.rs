//! Supply-chain analytics pipeline: load a static CSV dataset, normalize it
//! to the canonical vocabulary, apply a user-selected filter set, and derive
//! row metrics, scalar KPIs, and grouped report tables. The binary in
//! `main.rs` wraps this in an interactive menu; everything here is a pure
//! function of (dataset, filter set).

pub mod filter;
pub mod loader;
pub mod metrics;
pub mod normalize;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;
