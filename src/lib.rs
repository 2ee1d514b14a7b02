// src/lib.rs

//! feedpage: RSS/Atom aggregation into a static, searchable news page

pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
