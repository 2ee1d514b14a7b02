//! Service layer for the feed aggregator.
//!
//! This module contains the business logic for:
//! - Feed fetching (`FeedFetcher`, `HttpFeedFetcher`)
//! - RSS/Atom parsing (`parse_feed`)
//! - Aggregation and health checks (`FeedAggregator`)
//! - Feed URL discovery (`FeedDiscoveryService`)

mod aggregator;
#[cfg(feature = "discover")]
mod discovery;
mod fetcher;
pub mod parser;

pub use aggregator::{Aggregation, FeedAggregator, HealthReport, SourceFailure, SourceHealth};
#[cfg(feature = "discover")]
pub use discovery::{FeedDiscoveryService, find_alternate_link};
pub use fetcher::{FeedFetcher, HttpFeedFetcher};
pub use parser::parse_feed;
