//! Domain entities, ports, and workflow services.
//!
//! Purpose: define the strongly typed entities stored in the record store,
//! the driven ports the workflows call through, and the services that carry
//! the multi-step state transitions (purchase and consumption) plus the
//! read-side projections. Everything here is transport agnostic; inbound
//! adapters translate [`Error`] into protocol-specific envelopes.

pub mod consumption_service;
pub mod directory_service;
pub mod error;
pub mod leaderboard;
pub mod ports;
pub mod purchase;
pub mod purchase_service;
pub mod slice;
pub mod user;

pub use self::consumption_service::{ConsumeRequest, ConsumptionService};
pub use self::directory_service::{DirectoryService, NewUser};
pub use self::error::{Error, ErrorCode};
pub use self::leaderboard::{LeaderboardEntry, rank_users};
pub use self::purchase::{HistoryEntry, HistorySummary, PurchaseRecord};
pub use self::purchase_service::{LineItem, PurchaseReceipt, PurchaseRequest, PurchaseService};
pub use self::slice::PizzaSlice;
pub use self::user::{STARTING_COINS, User, UserWithHistory};
