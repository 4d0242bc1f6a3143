//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they depend
//! only on the workflow services and remain testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::{LeaderboardNotifier, RecordStore};
use crate::domain::{ConsumptionService, DirectoryService, PurchaseService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub purchases: PurchaseService,
    pub consumption: ConsumptionService,
    pub directory: DirectoryService,
}

impl HttpState {
    /// Wire every workflow service over one store and one fan-out port.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn LeaderboardNotifier>) -> Self {
        Self {
            purchases: PurchaseService::new(Arc::clone(&store), Arc::clone(&notifier)),
            consumption: ConsumptionService::new(Arc::clone(&store), Arc::clone(&notifier)),
            directory: DirectoryService::new(store, notifier),
        }
    }
}
