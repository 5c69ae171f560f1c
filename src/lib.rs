//! SegmentForge: A Rust CLI application for customer segmentation using RFM scoring
//!
//! This library provides functionality for RFM (Recency, Frequency, Monetary)
//! analysis on customer transaction data, scoring each metric into quintiles
//! and mapping score pairs to named marketing segments via an ordered rule table.

pub mod cli;
pub mod data;
pub mod export;
pub mod metrics;
pub mod pipeline;
pub mod scoring;
pub mod segments;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{clean_records, load_records, CleanedTransaction, RawRecord};
pub use metrics::{compute_customer_metrics, CustomerMetrics};
pub use pipeline::run_pipeline;
pub use scoring::{score_customers, ScoredCustomer};
pub use segments::{classify, classify_customers, Segment, SegmentedCustomer};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
