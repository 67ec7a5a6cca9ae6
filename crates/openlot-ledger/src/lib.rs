//! # openlot-ledger
//!
//! The asset-transfer gateway consumed by the settlement engines, plus an
//! in-memory ledger implementing it.
//!
//! ## Gateway contract
//!
//! An engine operation hands the gateway one [`SettlementPlan`] holding
//! every asset batch and cash payment the operation wants, in a single call.
//! The gateway either applies the whole plan or rejects it and applies
//! nothing. Engines commit their own state only after the gateway call
//! returns `Ok`, which makes every public operation all-or-nothing: a
//! rejected transfer leaves the listing/auction/option state bit-identical
//! to its pre-call value.

pub mod memory;

#[cfg(any(test, feature = "test-helpers"))]
pub mod fault;

pub use memory::MemoryLedger;

#[cfg(any(test, feature = "test-helpers"))]
pub use fault::FailingGateway;

use openlot_types::{Result, SettlementPlan};

/// Executes a staged settlement plan atomically.
///
/// Implementations must guarantee: if `execute` returns an error, no move
/// in the plan has taken effect.
pub trait SettlementGateway {
    fn execute(&mut self, plan: &SettlementPlan) -> Result<()>;
}
