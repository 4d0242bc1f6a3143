//! Purchase workflow.
//!
//! Validates a purchase request, prices it against current slice data,
//! checks and debits the coin balance, and records one pending
//! consumption row per unit purchased.
//!
//! The balance debit and the row inserts are separate store calls with no
//! transactional boundary: a failure between them leaves the user debited
//! with fewer rows than purchased. That gap is inherited from the original
//! system and is deliberately left open here.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::domain::error::Error;
use crate::domain::ports::{Filter, LeaderboardNotifier, RecordStore, decode_row};
use crate::domain::slice::PizzaSlice;
use crate::domain::user::User;

pub(crate) const USERS_TABLE: &str = "users";
pub(crate) const SLICES_TABLE: &str = "pizza_slices";
pub(crate) const RECORDS_TABLE: &str = "user_slices";

/// One requested line of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
pub struct LineItem {
    /// Slice to buy.
    pub slice_id: i64,
    /// Number of units, at least 1.
    pub quantity: u32,
}

/// Validated purchase input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// Buying user.
    pub user_id: i64,
    /// Requested lines; must be non-empty.
    pub items: Vec<LineItem>,
}

impl PurchaseRequest {
    fn validate(&self) -> Result<(), Error> {
        if self.items.is_empty() {
            return Err(Error::invalid_request("items must not be empty"));
        }
        if self.items.iter().any(|item| item.quantity == 0) {
            return Err(Error::invalid_request("quantity must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// Coins debited from the balance.
    pub total_cost: i64,
    /// Pending consumption rows created.
    pub units: u32,
}

/// Purchase workflow service.
#[derive(Clone)]
pub struct PurchaseService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn LeaderboardNotifier>,
}

impl PurchaseService {
    /// Create the service over a record store and the fan-out port.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn LeaderboardNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Run the purchase workflow.
    ///
    /// # Errors
    /// - `InvalidRequest` for empty items, a zero quantity, or a total that
    ///   overflows.
    /// - `NotFound` when the user or any requested slice does not exist.
    /// - `InsufficientFunds` when the balance cannot cover the total.
    /// - `StoreFailure` when the record store fails; steps already applied
    ///   are not rolled back.
    #[instrument(skip(self), fields(user_id = request.user_id))]
    pub async fn purchase(&self, request: PurchaseRequest) -> Result<PurchaseReceipt, Error> {
        request.validate()?;

        let user = self.fetch_user(request.user_id).await?;
        let total_cost = self.total_cost(&request.items).await?;

        if user.coins < total_cost {
            return Err(Error::insufficient_funds("Not enough coins"));
        }

        self.store
            .update(
                USERS_TABLE,
                &Filter::new().eq("id", user.id),
                json!({ "coins": user.coins - total_cost }),
            )
            .await?;

        let mut units: u32 = 0;
        for item in &request.items {
            for _ in 0..item.quantity {
                self.store
                    .insert(
                        RECORDS_TABLE,
                        json!({
                            "user_id": user.id,
                            "slice_id": item.slice_id,
                            "purchased_at": Utc::now(),
                            "eaten_at": null,
                        }),
                    )
                    .await?;
                units += 1;
            }
        }

        debug!(total_cost, units, "purchase recorded");
        self.notifier.leaderboard_changed();

        Ok(PurchaseReceipt { total_cost, units })
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

    async fn total_cost(&self, items: &[LineItem]) -> Result<i64, Error> {
        let mut total: i64 = 0;
        for item in items {
            let rows = self
                .store
                .select(SLICES_TABLE, &Filter::new().eq("id", item.slice_id))
                .await?;
            let row = rows.into_iter().next().ok_or_else(|| {
                Error::not_found(format!("Pizza slice {} not found", item.slice_id))
            })?;
            let slice: PizzaSlice = decode_row(row)?;
            let line = slice
                .price
                .checked_mul(i64::from(item.quantity))
                .ok_or_else(|| Error::invalid_request("total cost overflows"))?;
            total = total
                .checked_add(line)
                .ok_or_else(|| Error::invalid_request("total cost overflows"))?;
        }
        Ok(total)
    }
}

#[cfg(test)]
#[path = "purchase_service_tests.rs"]
mod tests;
