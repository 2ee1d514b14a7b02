// src/models/mod.rs

//! Domain models for the feed aggregator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod item;
mod record;
mod source;

// Re-export all public types
pub use config::{
    AggregateConfig, Config, FetchConfig, FieldNames, MissingFieldPolicy, PathsConfig,
    RenderConfig,
};
pub use item::FeedItem;
pub use record::{FeedRecord, PLACEHOLDER_LINK, PLACEHOLDER_TITLE};
pub use source::FeedSource;
