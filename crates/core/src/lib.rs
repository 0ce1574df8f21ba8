//! Core domain logic for the Cromos <-> Denea synchronization service.
//!
//! This crate is pure: no I/O, no HTTP, no async. It provides:
//!
//! - The normalized vendor record type ([`ProductRecord`]).
//! - Format parsers for the three Denea feed shapes (CSV, XML, API JSON).
//! - The typed run accumulator ([`RunTally`]) that enforces the
//!   processed = updated + errors counter invariant.
//! - Wire model types shared with the store client ([`SkuMapping`],
//!   [`RunStatus`], [`SyncReport`]).
//! - Webhook HMAC-SHA256 signature verification ([`signature`]).
//!
//! Keeping this crate free of internal dependencies lets the API server,
//! the sync engine, and the CLI all consume it directly.

pub mod error;
pub mod model;
pub mod parsers;
pub mod record;
pub mod signature;
pub mod tally;

pub use error::ParseError;
pub use model::{ItemError, MappingStatus, RunStatus, SkuMapping, SyncReport};
pub use record::ProductRecord;
pub use tally::RunTally;
