//! Core types and trait definitions for Chorus.
//!
//! This crate holds the enrichment pipeline (sentiment scoring and category
//! classification), the filter shared by every read path, and the metrics
//! aggregator. It is deliberately free of HTTP and database dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod category;
pub mod enrich;
pub mod error;
pub mod event;
pub mod feedback;
pub mod filter;
pub mod location;
pub mod metrics;
pub mod sentiment;
pub mod store;

pub use error::{Error, Result};
