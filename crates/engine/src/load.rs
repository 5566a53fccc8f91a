//! Multi-batch loading and post-load verification
//!
//! `load_all` runs batches in sequence under one `LoadId`. Per-document
//! failures accumulate in the summary; the first batch-level error stops the
//! load and is returned wrapped in `Error::LoadAborted`.

use std::collections::BTreeMap;

use fixturedb_core::{Error, LoadId, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, warn};

use crate::batch::{Batch, BatchResult, InsertFailure};
use crate::store::FixtureStore;

/// Aggregate outcome of `FixtureStore::load_all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Correlation id of this load
    pub load_id: LoadId,
    /// Documents inserted per collection, summed over batches
    pub per_collection_inserted: BTreeMap<String, usize>,
    /// Documents inserted overall
    pub total_inserted: usize,
    /// Documents that failed overall
    pub total_failed: usize,
    /// Per-batch results, in batch order
    pub batches: Vec<BatchResult>,
}

impl LoadSummary {
    fn new(load_id: LoadId) -> Self {
        Self {
            load_id,
            per_collection_inserted: BTreeMap::new(),
            total_inserted: 0,
            total_failed: 0,
            batches: Vec::new(),
        }
    }

    fn absorb(&mut self, result: BatchResult) {
        *self
            .per_collection_inserted
            .entry(result.collection.clone())
            .or_insert(0) += result.inserted_count;
        self.total_inserted += result.inserted_count;
        self.total_failed += result.failures.len();
        self.batches.push(result);
    }

    /// Every failure from every batch, in order
    pub fn failures(&self) -> impl Iterator<Item = &InsertFailure> {
        self.batches.iter().flat_map(|b| b.failures.iter())
    }

    /// Whether no document failed
    pub fn is_clean(&self) -> bool {
        self.total_failed == 0
    }
}

/// A collection whose live count differs from the expected count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    /// Collection name
    pub collection: String,
    /// Expected count
    pub expected: usize,
    /// Count found in the store
    pub actual: usize,
}

impl FixtureStore {
    /// Insert each batch in order and aggregate the results.
    ///
    /// When the store is configured with `clear_existing`, every collection
    /// named by `batches` is emptied first.
    ///
    /// # Errors
    ///
    /// `Error::ClearFailed` if clearing the target collections fails; no
    /// batch is attempted. Otherwise `Error::LoadAborted` wrapping the first
    /// batch-level error. Batches after the failing one are not attempted;
    /// documents inserted before it remain in the store.
    pub fn load_all(&self, batches: &[Batch]) -> Result<LoadSummary> {
        let load_id = LoadId::new();
        let span = info_span!("load", %load_id);
        let _enter = span.enter();

        info!(target: "fixturedb::load", batches = batches.len(), "Starting fixture load");

        match self.run_batches(load_id, batches) {
            Ok(summary) => {
                self.log_summary(&summary);
                Ok(summary)
            }
            Err(e) => {
                error!(target: "fixturedb::load", error = %e, "Fixture load failed");
                Err(e)
            }
        }
    }

    fn run_batches(&self, load_id: LoadId, batches: &[Batch]) -> Result<LoadSummary> {
        let abort = |batch: usize, collection: &str, source: Error| Error::LoadAborted {
            load_id,
            batch,
            collection: collection.to_string(),
            source: Box::new(source),
        };

        if self.clear_existing() {
            let mut targets: Vec<&str> = batches.iter().map(|b| b.collection.as_str()).collect();
            targets.sort_unstable();
            targets.dedup();
            self.clear_collections(targets.as_slice())
                .map_err(|e| Error::ClearFailed {
                    load_id,
                    collections: targets.iter().map(|c| c.to_string()).collect(),
                    source: Box::new(e),
                })?;
        }

        let mut summary = LoadSummary::new(load_id);
        for (i, batch) in batches.iter().enumerate() {
            let result = self
                .insert_batch(&batch.documents, &batch.collection)
                .map_err(|e| abort(i, &batch.collection, e))?;
            info!(
                target: "fixturedb::load",
                collection = %batch.collection,
                inserted = result.inserted_count,
                "Inserted documents into collection"
            );
            summary.absorb(result);
        }
        Ok(summary)
    }

    fn log_summary(&self, summary: &LoadSummary) {
        info!(
            target: "fixturedb::load",
            total_inserted = summary.total_inserted,
            total_failed = summary.total_failed,
            "Fixture load complete"
        );
        for (collection, inserted) in &summary.per_collection_inserted {
            match self.count(collection) {
                Ok(count) => info!(
                    target: "fixturedb::load",
                    collection = %collection,
                    inserted,
                    count,
                    "Verification count"
                ),
                Err(e) => warn!(
                    target: "fixturedb::load",
                    collection = %collection,
                    error = %e,
                    "Verification count unavailable"
                ),
            }
        }
    }

    /// Compare live counts against `expected`.
    ///
    /// Returns the collections that differ, sorted by name. An empty result
    /// means every expectation holds.
    pub fn verify(&self, expected: &BTreeMap<String, usize>) -> Result<Vec<CountMismatch>> {
        let mut mismatches = Vec::new();
        for (collection, &want) in expected {
            let actual = self.count(collection)?;
            if actual != want {
                warn!(
                    target: "fixturedb::load",
                    collection = %collection,
                    expected = want,
                    actual,
                    "Collection count mismatch"
                );
                mismatches.push(CountMismatch {
                    collection: collection.clone(),
                    expected: want,
                    actual,
                });
            }
        }
        Ok(mismatches)
    }
}
