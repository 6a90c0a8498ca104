//! Cross-border vehicle arbitrage desk.
//!
//! The pricing core lives in [`domain`]: [`domain::compute_profit_breakdown`]
//! turns a listing and an exchange rate into a landed-cost breakdown, and
//! [`domain::market_confidence`] scores the resulting deal. Everything in
//! [`infra`] only supplies inputs to those functions.

pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod report;
pub mod util;
