//! Consumption workflow.
//!
//! Marks a previously purchased, not-yet-eaten unit as eaten and increments
//! the owner's running eaten-count. The record patch and the count update
//! are separate store calls with no transactional boundary, matching the
//! purchase workflow's inherited gap.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, instrument};

use crate::domain::error::Error;
use crate::domain::ports::{Filter, LeaderboardNotifier, RecordStore, decode_row};
use crate::domain::purchase::PurchaseRecord;
use crate::domain::purchase_service::{RECORDS_TABLE, USERS_TABLE};
use crate::domain::user::User;

/// Validated consumption input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeRequest {
    /// Purchase record to mark as eaten.
    pub record_id: i64,
    /// User whose eaten-count is incremented.
    pub user_id: i64,
}

/// Consumption workflow service.
#[derive(Clone)]
pub struct ConsumptionService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn LeaderboardNotifier>,
}

impl ConsumptionService {
    /// Create the service over a record store and the fan-out port.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn LeaderboardNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Run the consumption workflow.
    ///
    /// # Errors
    /// - `InvalidRequest` when no pending record with the given id exists.
    ///   A record that was already consumed and one that never existed are
    ///   reported identically; the original system does not distinguish the
    ///   two and neither does this one.
    /// - `NotFound` when the user row backing the eaten-count is missing.
    /// - `StoreFailure` when the record store fails mid-workflow; steps
    ///   already applied are not rolled back.
    #[instrument(skip(self), fields(record_id = request.record_id, user_id = request.user_id))]
    pub async fn log_eaten(&self, request: ConsumeRequest) -> Result<(), Error> {
        let record = self.fetch_pending_record(request.record_id).await?;

        self.store
            .update(
                RECORDS_TABLE,
                &Filter::new().eq("id", record.id),
                json!({ "eaten_at": Utc::now() }),
            )
            .await?;

        let user = self.fetch_user(request.user_id).await?;
        self.store
            .update(
                USERS_TABLE,
                &Filter::new().eq("id", user.id),
                json!({ "number_of_pizza_eaten": user.pizzas_eaten + 1 }),
            )
            .await?;

        debug!(eaten = user.pizzas_eaten + 1, "consumption logged");
        self.notifier.leaderboard_changed();

        Ok(())
    }

    async fn fetch_pending_record(&self, record_id: i64) -> Result<PurchaseRecord, Error> {
        let rows = self
            .store
            .select(
                RECORDS_TABLE,
                &Filter::new().eq("id", record_id).is_null("eaten_at"),
            )
            .await?;
        let row = rows.into_iter().next().ok_or_else(|| {
            Error::invalid_request(format!("No uneaten slice found with slice id {record_id}"))
        })?;
        Ok(decode_row(row)?)
    }

    async fn fetch_user(&self, user_id: i64) -> Result<User, Error> {
        let rows = self
            .store
            .select(USERS_TABLE, &Filter::new().eq("id", user_id))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found("User not found"))?;
        Ok(decode_row(row)?)
    }
}

#[cfg(test)]
#[path = "consumption_service_tests.rs"]
mod tests;
