//! Read-side directory and user administration.
//!
//! Everything here is either a plain projection over the record store
//! (user listings, purchase histories, slices, the leaderboard) or a
//! single-row administrative mutation (create and delete user). User
//! creation broadcasts a leaderboard signal, matching the original
//! system's behaviour on registration.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::domain::error::Error;
use crate::domain::leaderboard::{LeaderboardEntry, rank_users};
use crate::domain::ports::{Filter, LeaderboardNotifier, RecordStore, decode_row, decode_rows};
use crate::domain::purchase::{HistoryEntry, HistorySummary, PurchaseRecord};
use crate::domain::purchase_service::{RECORDS_TABLE, SLICES_TABLE, USERS_TABLE};
use crate::domain::slice::PizzaSlice;
use crate::domain::user::{STARTING_COINS, User, UserWithHistory};

/// Registration input for a new user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    /// Display name; must not be blank.
    pub name: String,
    /// Age in years.
    pub age: u16,
    /// Self-reported gender.
    pub gender: String,
}

impl NewUser {
    fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_request("name must not be empty"));
        }
        Ok(())
    }
}

/// Read-side and administrative service.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn LeaderboardNotifier>,
}

impl DirectoryService {
    /// Create the service over a record store and the fan-out port.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn LeaderboardNotifier>) -> Self {
        Self { store, notifier }
    }

    /// All users ordered by name, each joined with their purchase history.
    ///
    /// # Errors
    /// `StoreFailure` when any of the underlying reads fail.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserWithHistory>, Error> {
        let mut users: Vec<User> = decode_rows(
            self.store.select(USERS_TABLE, &Filter::new()).await?,
        )?;
        users.sort_by(|a, b| a.name.cmp(&b.name));

        let slice_names = self.slice_names().await?;
        let mut listed = Vec::with_capacity(users.len());
        for user in users {
            let records = self.records_for(user.id).await?;
            let history = records
                .into_iter()
                .map(|record| HistorySummary {
                    slice_name: slice_name(&slice_names, record.slice_id),
                    timestamp: record.purchased_at,
                })
                .collect();
            listed.push(UserWithHistory { user, history });
        }
        Ok(listed)
    }

    /// Purchase history for one user, including consumption timestamps.
    ///
    /// # Errors
    /// `StoreFailure` when the underlying reads fail.
    #[instrument(skip(self))]
    pub async fn user_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>, Error> {
        let slice_names = self.slice_names().await?;
        let records = self.records_for(user_id).await?;
        Ok(records
            .into_iter()
            .map(|record| HistoryEntry {
                id: record.id,
                slice_name: slice_name(&slice_names, record.slice_id),
                purchased_at: record.purchased_at,
                eaten_at: record.eaten_at,
            })
            .collect())
    }

    /// The ranked leaderboard view, recomputed from stored eaten-counts.
    ///
    /// # Errors
    /// `StoreFailure` when the underlying read fails.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, Error> {
        let eaters: Vec<User> = decode_rows(
            self.store
                .select(USERS_TABLE, &Filter::new().gt("number_of_pizza_eaten", 0))
                .await?,
        )?;
        Ok(rank_users(eaters))
    }

    /// All purchasable slices.
    ///
    /// # Errors
    /// `StoreFailure` when the underlying read fails.
    pub async fn list_slices(&self) -> Result<Vec<PizzaSlice>, Error> {
        Ok(decode_rows(
            self.store.select(SLICES_TABLE, &Filter::new()).await?,
        )?)
    }

    /// Register a user with the starting balance and a zero eaten-count.
    ///
    /// # Errors
    /// - `InvalidRequest` when the name is blank.
    /// - `StoreFailure` when the insert fails.
    #[instrument(skip(self), fields(name = %new_user.name))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        new_user.validate()?;
        let row = self
            .store
            .insert(
                USERS_TABLE,
                json!({
                    "name": new_user.name,
                    "age": new_user.age,
                    "gender": new_user.gender,
                    "coins": STARTING_COINS,
                    "number_of_pizza_eaten": 0,
                }),
            )
            .await?;
        let user = decode_row(row)?;
        self.notifier.leaderboard_changed();
        Ok(user)
    }

    /// Remove a user row.
    ///
    /// # Errors
    /// - `NotFound` when no row matched the id.
    /// - `StoreFailure` when the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i64) -> Result<(), Error> {
        let removed = self
            .store
            .delete(USERS_TABLE, &Filter::new().eq("id", user_id))
            .await?;
        if removed.is_empty() {
            return Err(Error::not_found("User not found"));
        }
        Ok(())
    }

    async fn slice_names(&self) -> Result<HashMap<i64, String>, Error> {
        let slices: Vec<PizzaSlice> = decode_rows(
            self.store.select(SLICES_TABLE, &Filter::new()).await?,
        )?;
        Ok(slices
            .into_iter()
            .map(|slice| (slice.id, slice.name))
            .collect())
    }

    async fn records_for(&self, user_id: i64) -> Result<Vec<PurchaseRecord>, Error> {
        Ok(decode_rows(
            self.store
                .select(RECORDS_TABLE, &Filter::new().eq("user_id", user_id))
                .await?,
        )?)
    }
}

fn slice_name(names: &HashMap<i64, String>, slice_id: i64) -> String {
    names
        .get(&slice_id)
        .cloned()
        .unwrap_or_else(|| format!("slice {slice_id}"))
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
