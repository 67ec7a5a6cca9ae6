//! Platform registry: moderator set, fee rate, pause flag.
//!
//! The registry is an external collaborator of the engines. Engines only
//! consult its read-side predicates ([`PlatformRegistry::fee_rate_ppm`],
//! [`PlatformRegistry::fee_recipient`],
//! [`PlatformRegistry::accepting_new_orders`]), never its mutable state.
//! Mutation entry points are simple membership-guarded writes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{AccountId, MarketEvent, OpenlotError, Result, constants};

/// Moderator set, platform fee rate, fee recipient, and pause flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRegistry {
    moderators: HashSet<AccountId>,
    fee_rate_ppm: u32,
    fee_recipient: AccountId,
    paused: bool,
}

impl PlatformRegistry {
    /// Registry with one initial moderator and the default fee rate.
    #[must_use]
    pub fn new(initial_moderator: AccountId, fee_recipient: AccountId) -> Self {
        Self {
            moderators: HashSet::from([initial_moderator]),
            fee_rate_ppm: constants::DEFAULT_PLATFORM_FEE_PPM,
            fee_recipient,
            paused: false,
        }
    }

    // -----------------------------------------------------------------
    // Read-side predicates consumed by the engines
    // -----------------------------------------------------------------

    #[must_use]
    pub fn is_moderator(&self, id: AccountId) -> bool {
        self.moderators.contains(&id)
    }

    /// Current platform fee rate in parts-per-million. Always
    /// `< FEE_SCALE`, so the counterparty share of a settlement is
    /// positive whenever the amount is.
    #[must_use]
    pub fn fee_rate_ppm(&self) -> u32 {
        self.fee_rate_ppm
    }

    #[must_use]
    pub fn fee_recipient(&self) -> AccountId {
        self.fee_recipient
    }

    /// Whether new listings, auctions, and option deals may be opened.
    #[must_use]
    pub fn accepting_new_orders(&self) -> bool {
        !self.paused
    }

    // -----------------------------------------------------------------
    // Mutation entry points (moderator-guarded)
    // -----------------------------------------------------------------

    pub fn add_moderator(&mut self, caller: AccountId, moderator: AccountId) -> Result<MarketEvent> {
        self.require_moderator(caller)?;
        self.moderators.insert(moderator);
        Ok(MarketEvent::ModeratorAdded { moderator })
    }

    pub fn remove_moderator(
        &mut self,
        caller: AccountId,
        moderator: AccountId,
    ) -> Result<MarketEvent> {
        self.require_moderator(caller)?;
        if !self.moderators.remove(&moderator) {
            return Err(OpenlotError::UnknownModerator(moderator));
        }
        Ok(MarketEvent::ModeratorRemoved { moderator })
    }

    /// Update the platform fee rate. Rates at or above the full scale are
    /// rejected so fee settlement always leaves the counterparty a positive
    /// remainder.
    pub fn update_platform_fees(&mut self, caller: AccountId, rate_ppm: u32) -> Result<MarketEvent> {
        self.require_moderator(caller)?;
        if u64::from(rate_ppm) >= constants::FEE_SCALE {
            return Err(OpenlotError::InvalidFeeRate { rate_ppm });
        }
        self.fee_rate_ppm = rate_ppm;
        tracing::info!(rate_ppm, "platform fee rate updated");
        Ok(MarketEvent::PlatformFeesUpdated { fee_rate_ppm: rate_ppm })
    }

    pub fn toggle_pause(&mut self, caller: AccountId) -> Result<MarketEvent> {
        self.require_moderator(caller)?;
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "pause flag toggled");
        Ok(MarketEvent::PauseToggled { paused: self.paused })
    }

    fn require_moderator(&self, caller: AccountId) -> Result<()> {
        if self.is_moderator(caller) {
            Ok(())
        } else {
            Err(OpenlotError::NotModerator(caller))
        }
    }
}
