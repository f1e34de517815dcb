//! # Episode DataStore
//!
//! This module provides functionality for interacting with a Postgres database
//! to store and retrieve podcast/video episodes and the results of their
//! transcript-analysis pipeline.
//!
//! The module uses sqlx for database operations and provides an abstraction layer
//! for the create/complete/fail lifecycle of an episode record.

mod datastore;
mod domain;

pub use datastore::postgres::PgDataStore;
pub use datastore::DataStore;
pub use domain::{CompletedAnalysis, Episode, NewEpisode, ProcessingStatus, SourceType};
