//! Data processing for EV fire statistics.
//!
//! This crate turns raw records into the shapes the dashboard charts
//! consume: [`normalize`] derives year keys and applies the one-time place
//! whitelist, [`filter`] evaluates user filter selections, and
//! [`aggregate`] holds the grouping/ratio/growth primitives every series
//! is built from.

pub mod aggregate;
pub mod filter;
pub mod normalize;
