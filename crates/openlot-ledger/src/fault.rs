//! Fault-injecting gateway for atomicity tests.
//!
//! Wraps a real gateway and rejects plans on command, so tests can verify
//! that a mid-operation transfer failure leaves engine state untouched.

use openlot_types::{OpenlotError, Result, SettlementPlan};

use crate::SettlementGateway;

/// Gateway wrapper that fails after a configurable number of successful
/// calls.
pub struct FailingGateway<G> {
    inner: G,
    calls: usize,
    fail_from: usize,
}

impl<G: SettlementGateway> FailingGateway<G> {
    /// Reject every plan.
    pub fn fail_always(inner: G) -> Self {
        Self::fail_from(inner, 0)
    }

    /// Let the first `n` calls through, reject every call after that.
    pub fn fail_from(inner: G, n: usize) -> Self {
        Self {
            inner,
            calls: 0,
            fail_from: n,
        }
    }

    /// The wrapped gateway, for balance inspection after the fault.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut G {
        &mut self.inner
    }
}

impl<G: SettlementGateway> SettlementGateway for FailingGateway<G> {
    fn execute(&mut self, plan: &SettlementPlan) -> Result<()> {
        let call = self.calls;
        self.calls += 1;
        if call >= self.fail_from {
            return Err(OpenlotError::TransferRejected {
                reason: format!("injected fault at call {call}"),
            });
        }
        self.inner.execute(plan)
    }
}
