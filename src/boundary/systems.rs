//! Boundary worker systems.

use bevy::prelude::*;
use std::sync::Arc;

use crate::boundary::cache::{BoundaryDataCache, CacheRequest};
use crate::boundary::fetcher::start_boundary_worker;
use crate::boundary::types::{BoundaryChannels, BoundaryCommand, BoundaryDataset, BoundaryResult};

pub fn setup_boundary_worker(mut commands: Commands) {
    let channels = start_boundary_worker();
    println!("[INIT] Boundary worker started");
    commands.insert_resource(channels);
}

pub fn apply_boundary_results(
    mut cache: ResMut<BoundaryDataCache>,
    channels: Option<Res<BoundaryChannels>>,
) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        match msg {
            BoundaryResult::Loaded { dataset } => {
                info!(
                    "Boundary loaded: {} geometries, {} rings",
                    dataset.geometries.len(),
                    dataset.ring_count()
                );
                cache.complete(Ok(dataset));
            }
            BoundaryResult::Error { error } => {
                warn!("Boundary unavailable, overlays and inset maps stay empty: {}", error);
                cache.complete(Err(error));
            }
        }
    }
}

/// Ask the cache for the boundary on behalf of a consumer.
///
/// The first caller sends the fetch to the worker. Returns the dataset once it
/// has loaded, `None` while pending or after a failure.
pub fn acquire_boundary(
    cache: &mut BoundaryDataCache,
    channels: Option<&BoundaryChannels>,
    url: &str,
) -> Option<Arc<BoundaryDataset>> {
    match cache.request() {
        CacheRequest::Fetch => {
            let sent = channels.is_some_and(|channels| {
                channels
                    .cmd_tx
                    .send(BoundaryCommand::Fetch {
                        url: url.to_string(),
                    })
                    .is_ok()
            });
            if !sent {
                cache.complete(Err("boundary worker unavailable".to_string()));
            }
            None
        }
        CacheRequest::Ready(dataset) => Some(dataset),
        CacheRequest::Pending | CacheRequest::Unavailable => None,
    }
}
