//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::network::Network;

/// Shared application state.
///
/// A single reader-writer lock serializes registry mutations and gives path
/// queries a consistent snapshot of every line.
#[derive(Clone, Default)]
pub struct AppState {
    /// The station and line registry
    pub network: Arc<RwLock<Network>>,
}

impl AppState {
    /// Create app state around a network.
    pub fn new(network: Network) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
        }
    }
}
