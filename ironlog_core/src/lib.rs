#![forbid(unsafe_code)]

//! Core domain model and ingestion logic for Ironlog.
//!
//! This crate provides:
//! - Domain types (users, weigh-ins, workouts)
//! - File loading and JSON decoding
//! - Document store backends (MongoDB, JSON Lines)
//! - Bulk document insertion
//! - The demo ingestion run

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod ingest;
pub mod store;
pub mod mongo;
pub mod jsonl;
pub mod inserter;
pub mod demo;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, StoreBackend};
pub use ingest::{decode, load_entities, load_file};
pub use store::{StoreConnection, StoreConnector};
pub use mongo::MongoConnector;
pub use jsonl::JsonlConnector;
pub use inserter::insert_documents;
pub use demo::{peek, run_demo, DemoSummary};
