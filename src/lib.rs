//! Wayfuse - attribute conflation for linear road and path networks
//!
//! This library merges externally delivered attribute data (surface,
//! facility type, safety strips, widths) onto the edges of an existing
//! network model. Incoming geometries are projected onto their network
//! counterparts as fractional ranges, assigned a side of the way where the
//! attribute calls for one, and merged into gap-free segment sequences.
//! Disagreements between deliveries are resolved deterministically and
//! recorded in per-edge conflict protocols rather than raised as errors.
//!
//! # High-Level API
//!
//! For most use cases, the [`session`] module provides the entry point:
//!
//! ```ignore
//! use std::sync::Arc;
//! use wayfuse::config::ConflationConfig;
//! use wayfuse::format::FormatTag;
//! use wayfuse::session::ImportSession;
//!
//! let session = ImportSession::new(FormatTag::Agency, matcher, store, ConflationConfig::new());
//! let outcome = session.run(&features)?;
//! session.commit(outcome)?;
//! ```

pub mod config;
pub mod conflict;
pub mod feature;
pub mod format;
pub mod geom;
pub mod logging;
pub mod mapping;
pub mod merge;
pub mod network;
pub mod projection;
pub mod range;
pub mod session;
pub mod side;

/// Version of the wayfuse library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
