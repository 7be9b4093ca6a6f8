//! The import session: match, project, merge, commit.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use super::stats::RunStats;
use crate::config::ConflationConfig;
use crate::conflict::ConflictProtocol;
use crate::feature::ImportedFeature;
use crate::format::{create_adapter, FormatAdapter, FormatTag};
use crate::mapping::{build_edge_mappings, EdgeMapping};
use crate::merge::{MergeEngine, MergeError};
use crate::network::{EdgeId, EdgeStore, NetworkEdge, StoreError};
use crate::projection::{project_feature, EdgeProjection, MatchProvider, SearchContext};
use crate::side::RTreeAdjacencyIndex;

/// Errors that abort a whole run.
///
/// Semantic disagreements between fragments are not errors; they land in
/// the per-edge [`ConflictProtocol`] instead.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The persistence boundary refused a load or a write-back.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// An edge merge hit a structural problem.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),
}

/// Everything one run produced, held apart from the store until committed.
#[derive(Debug)]
pub struct RunOutcome {
    /// Mutated working copies of every touched edge, in id order.
    pub edges: Vec<NetworkEdge>,
    /// Conflict protocol per touched edge, including empty ones.
    pub protocols: BTreeMap<EdgeId, ConflictProtocol>,
    /// Counters for the whole run.
    pub stats: RunStats,
}

/// High-level entry point for one import run.
///
/// Wires the matcher, the store, and the merge engine together behind a
/// two-phase API: [`run`](ImportSession::run) produces a [`RunOutcome`]
/// without touching the store, and [`commit`](ImportSession::commit)
/// writes the mutated edges back as one batch. Between the two phases a
/// caller can inspect the conflict protocols and decide not to commit.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use wayfuse::config::ConflationConfig;
/// use wayfuse::format::FormatTag;
/// use wayfuse::session::ImportSession;
///
/// let session = ImportSession::new(FormatTag::Agency, matcher, store, ConflationConfig::new());
/// let outcome = session.run(&features)?;
/// println!("{}", outcome.stats);
/// session.commit(outcome)?;
/// ```
pub struct ImportSession {
    /// Delivery-format adapter shared with the merge engine.
    adapter: Arc<dyn FormatAdapter>,
    /// Finds the network counterpart of each imported feature.
    matcher: Arc<dyn MatchProvider>,
    /// Owns the canonical edge state.
    store: Arc<dyn EdgeStore>,
    /// Tolerances and side-resolution knobs.
    config: ConflationConfig,
    /// Applies fragments edge by edge.
    engine: MergeEngine,
}

impl ImportSession {
    /// Create a session for one delivery format.
    pub fn new(
        format: FormatTag,
        matcher: Arc<dyn MatchProvider>,
        store: Arc<dyn EdgeStore>,
        config: ConflationConfig,
    ) -> Self {
        let adapter = create_adapter(format);
        let engine = MergeEngine::new(adapter.clone(), config);
        Self {
            adapter,
            matcher,
            store,
            config,
            engine,
        }
    }

    /// Run the full pipeline over `features` without writing anything back.
    ///
    /// Features the matcher cannot place are counted and skipped. Edges are
    /// loaded once into a detached working set; each edge is then merged
    /// independently, so the per-edge work runs on the rayon pool.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when the matcher references an edge the
    /// store does not have, and [`MergeError`] for structural mapping
    /// problems. Both abort the run with nothing written.
    pub fn run(&self, features: &[ImportedFeature]) -> Result<RunOutcome, SessionError> {
        let mut matched = Vec::new();
        let mut unmatched = 0usize;
        for feature in features {
            let context = SearchContext::for_feature(feature);
            match self.matcher.match_feature(feature.geometry(), &context) {
                Some(found) => matched.push((feature, found)),
                None => {
                    unmatched += 1;
                    debug!(
                        "feature {} from {} has no network counterpart",
                        feature.id(),
                        feature.source()
                    );
                }
            }
        }

        // One load per referenced edge; the copies are detached, so the
        // store stays untouched until commit.
        let mut edge_ids = BTreeSet::new();
        for (_, found) in &matched {
            edge_ids.extend(found.edge_ids.iter().copied());
        }
        let mut working: BTreeMap<EdgeId, NetworkEdge> = BTreeMap::new();
        for id in edge_ids {
            working.insert(id, self.store.load(id)?);
        }

        let adjacency = RTreeAdjacencyIndex::new(working.values().cloned().collect());

        let eps = self.config.tolerance().snap_eps();
        let mut projected: Vec<(&ImportedFeature, Vec<EdgeProjection>)> = Vec::new();
        let mut projections = 0usize;
        for (feature, found) in &matched {
            let ranges = project_feature(feature, found, &working, eps);
            projections += ranges.len();
            projected.push((feature, ranges));
        }
        let mappings = build_edge_mappings(&projected, self.adapter.as_ref());
        let fragments = mappings.iter().map(|m| m.fragments.len()).sum();

        // Mappings come back in id order and each one owns its edge
        // exclusively, which is what makes the parallel merge safe.
        let mut jobs: Vec<(NetworkEdge, EdgeMapping)> = Vec::new();
        for mapping in mappings {
            match working.remove(&mapping.edge_id) {
                Some(edge) => jobs.push((edge, mapping)),
                None => debug!("mapping for unloaded edge {} dropped", mapping.edge_id),
            }
        }

        let merged: Result<Vec<(NetworkEdge, ConflictProtocol)>, MergeError> = jobs
            .into_par_iter()
            .map(|(mut edge, mapping)| {
                let mut protocol = ConflictProtocol::new();
                self.engine
                    .merge_mapping(&mut edge, &mapping, &adjacency, &mut protocol)?;
                Ok((edge, protocol))
            })
            .collect();
        let merged = merged?;

        let mut edges = Vec::with_capacity(merged.len());
        let mut protocols = BTreeMap::new();
        let mut conflicts = 0usize;
        for (edge, protocol) in merged {
            conflicts += protocol.len();
            protocols.insert(edge.id(), protocol);
            edges.push(edge);
        }

        let stats = RunStats {
            features_total: features.len(),
            features_unmatched: unmatched,
            projections,
            fragments,
            edges_touched: edges.len(),
            conflicts,
        };
        info!("run complete: {}", stats);

        Ok(RunOutcome {
            edges,
            protocols,
            stats,
        })
    }

    /// Write the outcome's edges back as a single batch.
    ///
    /// # Errors
    ///
    /// [`StoreError::VersionConflict`] when any edge changed underneath the
    /// run. The whole batch is abandoned and can be retried from fresh
    /// loads.
    pub fn commit(&self, outcome: RunOutcome) -> Result<(), SessionError> {
        let count = outcome.edges.len();
        self.store.replace_all(outcome.edges)?;
        info!("committed {} edges", count);
        Ok(())
    }
}
