//! Single-flight cache for the boundary document.
//!
//! Both the globe overlays and the inset maps need the same boundary. Whoever
//! asks first triggers the fetch; everyone else waits on the same result.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::boundary::types::BoundaryDataset;

#[derive(Debug, Clone, Default)]
pub enum CacheState {
    #[default]
    Empty,
    Loading,
    Ready(Arc<BoundaryDataset>),
    Failed(String),
}

/// What a consumer should do after asking the cache.
#[derive(Debug, Clone)]
pub enum CacheRequest {
    /// Caller must issue the one and only fetch.
    Fetch,
    Pending,
    Ready(Arc<BoundaryDataset>),
    /// Fetch failed; the data stays unavailable for this session.
    Unavailable,
}

#[derive(Resource, Debug, Default)]
pub struct BoundaryDataCache {
    state: CacheState,
    fetches_issued: u32,
    loaded_at: Option<DateTime<Utc>>,
}

impl BoundaryDataCache {
    pub fn request(&mut self) -> CacheRequest {
        match &self.state {
            CacheState::Empty => {
                self.state = CacheState::Loading;
                self.fetches_issued += 1;
                CacheRequest::Fetch
            }
            CacheState::Loading => CacheRequest::Pending,
            CacheState::Ready(dataset) => CacheRequest::Ready(dataset.clone()),
            CacheState::Failed(_) => CacheRequest::Unavailable,
        }
    }

    /// Resolve the in-flight fetch. Results arriving when nothing is in flight are dropped.
    pub fn complete(&mut self, result: Result<BoundaryDataset, String>) {
        if !matches!(self.state, CacheState::Loading) {
            warn!("Boundary result arrived with no fetch in flight, ignoring");
            return;
        }
        self.state = match result {
            Ok(dataset) => {
                let now = Utc::now();
                info!(
                    "Boundary cached at {} ({} rings)",
                    now.format("%Y-%m-%d %H:%M:%S UTC"),
                    dataset.ring_count()
                );
                self.loaded_at = Some(now);
                CacheState::Ready(Arc::new(dataset))
            }
            Err(error) => CacheState::Failed(error),
        };
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn dataset(&self) -> Option<Arc<BoundaryDataset>> {
        match &self.state {
            CacheState::Ready(dataset) => Some(dataset.clone()),
            _ => None,
        }
    }

    pub fn fetches_issued(&self) -> u32 {
        self.fetches_issued
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}
