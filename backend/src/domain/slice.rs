//! Pizza slice reference data.

use serde::{Deserialize, Serialize};

/// A purchasable pizza unit with a fixed price. Immutable reference data;
/// rows decode straight from the `pizza_slices` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PizzaSlice {
    /// Store-assigned identifier.
    pub id: i64,
    /// Flavour name shown in purchase histories.
    pub name: String,
    /// Price in coins, always positive.
    pub price: i64,
}
