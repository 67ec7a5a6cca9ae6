//! # openlot-types
//!
//! Shared types, errors, and configuration for the **OpenLot**
//! escrow-and-settlement engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`ContractAddr`], [`TokenId`], [`AssetRef`]
//! - **Call context**: [`CallCtx`] (caller, attached payment, logical time)
//! - **Transfer plan**: [`AssetMove`], [`TransferBatch`], [`CashMove`], [`SettlementPlan`]
//! - **Registry**: [`PlatformRegistry`] (moderators, fee rate, pause flag)
//! - **Events**: [`MarketEvent`]
//! - **Errors**: [`OpenlotError`] with `OL_ERR_` prefix codes
//! - **Constants**: fee scale and platform defaults

pub mod asset;
pub mod constants;
pub mod ctx;
pub mod error;
pub mod event;
pub mod ids;
pub mod registry;
pub mod transfer;

// Re-export all primary types at crate root for ergonomic imports:
//   use openlot_types::{AccountId, AssetRef, SettlementPlan, ...};

pub use asset::*;
pub use ctx::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use registry::*;
pub use transfer::*;

// Constants are accessed via `openlot_types::constants::FOO`
// (not re-exported to avoid name collisions).
