//! Per-operation call context.
//!
//! Every public operation is invoked by a caller identity with an attached
//! payment and a logical "current time". The context is read once per
//! operation; engines never poll a live clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Cash};

/// The implicit inputs of one operation: who calls, how much cash is
/// attached, and what the logical timestamp is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CallCtx {
    /// Identity of the calling party.
    pub caller: AccountId,
    /// Cash attached to the call, in the smallest unit.
    pub paid: Cash,
    /// Logical timestamp of the operation.
    pub now: DateTime<Utc>,
}

impl CallCtx {
    /// Context with no attached payment at the UNIX epoch.
    #[must_use]
    pub fn new(caller: AccountId) -> Self {
        Self {
            caller,
            paid: 0,
            now: DateTime::UNIX_EPOCH,
        }
    }

    /// Attach a payment to the call.
    #[must_use]
    pub fn with_payment(mut self, paid: Cash) -> Self {
        self.paid = paid;
        self
    }

    /// Set the logical timestamp.
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Set the logical timestamp from seconds since the UNIX epoch.
    /// Convenient in tests that use small scenario timelines.
    #[must_use]
    pub fn at_secs(self, secs: i64) -> Self {
        self.at(DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH))
    }
}
