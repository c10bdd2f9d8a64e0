//! # Salesboard Dataset
//!
//! This crate owns the ingestion side of the pipeline: it reads the raw sales
//! CSV, cleans and types the rows, derives the analysis features, and caches
//! the resulting table per source file.
//!
//! ## Architectural Principles
//!
//! - **All-or-nothing loading:** `load_sales` either returns a fully prepared
//!   table or a `DatasetError`. Callers never see half-parsed data.
//! - **Immutability:** a prepared table is never mutated after it is built;
//!   the cache hands out shared references.

pub mod cache;
pub mod error;
pub mod loader;
pub mod prepare;

// Re-export the key components to create a clean, public-facing API.
pub use cache::DatasetCache;
pub use error::DatasetError;
pub use loader::load_sales;
pub use prepare::prepare;
