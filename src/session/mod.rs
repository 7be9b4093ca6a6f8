//! High-level orchestration of one import run.
//!
//! This module wires the matcher, projector, merge engine, and store
//! together behind a two-phase API: [`ImportSession::run`] computes the
//! merged edges and their conflict protocols without touching the store,
//! and [`ImportSession::commit`] writes them back as one optimistic batch.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wayfuse::config::ConflationConfig;
//! use wayfuse::format::FormatTag;
//! use wayfuse::session::ImportSession;
//!
//! let session = ImportSession::new(FormatTag::Agency, matcher, store, ConflationConfig::new());
//! let outcome = session.run(&features)?;
//! for (edge, protocol) in &outcome.protocols {
//!     println!("{}: {} conflicts", edge, protocol.len());
//! }
//! session.commit(outcome)?;
//! ```

mod run;
mod stats;

pub use run::{ImportSession, RunOutcome, SessionError};
pub use stats::RunStats;
