//! In-memory dataset store.
//!
//! RULE: A Dataset is built completely, then published. Readers take an
//! `Arc` snapshot and never see a half-loaded state. The only mutation is a
//! wholesale swap under the write lock; collections are never appended to
//! after publication.

use crate::{
    error::{InsightError, InsightResult},
    loader::DatasetLoader,
    record::{AccountInsight, AccountRecord, InvalidRow},
};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// The three collections produced by one load.
/// `records[i]` and `insights[i]` describe the same source row.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Dataset {
    pub records:      Vec<AccountRecord>,
    pub insights:     Vec<AccountInsight>,
    pub invalid_rows: Vec<InvalidRow>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records_loaded(&self) -> usize {
        self.records.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_rows.len()
    }

    /// True when the load produced no rows of any kind.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.insights.is_empty() && self.invalid_rows.is_empty()
    }
}

#[derive(Debug)]
pub struct DatasetStore {
    current: RwLock<Arc<Dataset>>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new(Dataset::empty())
    }
}

impl DatasetStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// Build a store from a first load.
    pub fn load(loader: &DatasetLoader) -> InsightResult<Self> {
        Ok(Self::new(loader.load()?))
    }

    /// The dataset as of now. Stays valid across later reloads.
    pub fn snapshot(&self) -> InsightResult<Arc<Dataset>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| InsightError::StorePoisoned)
    }

    /// Re-run the loader and publish the result.
    /// On a loader error the previous dataset stays in place.
    pub fn reload(&self, loader: &DatasetLoader) -> InsightResult<Arc<Dataset>> {
        let fresh = loader.load()?;
        self.replace(fresh)
    }

    /// Publish a pre-built dataset, returning it as the new snapshot.
    pub fn replace(&self, dataset: Dataset) -> InsightResult<Arc<Dataset>> {
        let fresh = Arc::new(dataset);
        let mut guard = self.current.write().map_err(|_| InsightError::StorePoisoned)?;
        *guard = Arc::clone(&fresh);
        log::debug!(
            "Dataset swapped: {} records, {} invalid rows",
            fresh.records_loaded(),
            fresh.invalid_count()
        );
        Ok(fresh)
    }
}
