//! The call-option escrow state machine.
//!
//! Two states: [`OptionState::Inactive`] (no bought option outstanding) and
//! [`OptionState::Active`] (an option has been bought and awaits execution).
//! The instance is reusable: once execution flips it back to `Inactive`, a
//! new `init_option` fully overwrites the previous deal.
//!
//! Custody invariant: the escrow account holds `escrow_amount` units of the
//! underlying from `init_option` until `execute_option` releases them to
//! exactly one of {writer, buyer}.

use chrono::{DateTime, Utc};
use openlot_ledger::SettlementGateway;
use openlot_types::{
    AccountId, CallCtx, Cash, ContractAddr, MarketEvent, OpenlotError, PlatformRegistry, Result,
    SettlementPlan, TokenId,
};
use serde::{Deserialize, Serialize};

/// Whether a bought option is outstanding.
///
/// Deliberately *not* called "paused": the platform-wide pause flag lives in
/// the registry and means something else entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionState {
    /// No bought option outstanding; new deals may be initialized.
    Inactive,
    /// An option has been bought and awaits execution.
    Active,
}

/// Deal terms as supplied to `init_option`. Trusted as given by the
/// initializing party; no time or price validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealTerms {
    /// The option writer, who escrows the underlying.
    pub creator: AccountId,
    /// Contract of the underlying (semi-fungible) token.
    pub token: ContractAddr,
    pub token_id: TokenId,
    /// Units of the underlying escrowed for the deal.
    pub escrow_amount: u128,
    /// Strike price per unit, in the smallest cash unit. Fractional strike
    /// prices are not representable.
    pub strike_price: Cash,
    pub expire_time: DateTime<Utc>,
    /// In-kind premium: units of the underlying the buyer forwards to the
    /// writer at purchase. A consideration amount, not a rate.
    pub premium_units: u128,
}

/// The recorded deal: terms plus the buyer once one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub terms: DealTerms,
    pub buyer: Option<AccountId>,
}

impl Deal {
    /// The cash leg exchanged at execution: `escrow_amount * strike_price`.
    ///
    /// # Errors
    /// Returns [`OpenlotError::AmountOverflow`] if the product does not fit
    /// in `u128`. Settlement amounts are never truncated.
    pub fn notional(&self) -> Result<Cash> {
        self.terms
            .escrow_amount
            .checked_mul(self.terms.strike_price)
            .ok_or(OpenlotError::AmountOverflow)
    }
}

/// One per-deal escrow instance.
#[derive(Debug, Clone)]
pub struct CallOption {
    /// Account under which the escrowed underlying and the notional are held.
    custody: AccountId,
    state: OptionState,
    deal: Option<Deal>,
}

impl CallOption {
    #[must_use]
    pub fn new(custody: AccountId) -> Self {
        Self {
            custody,
            state: OptionState::Inactive,
            deal: None,
        }
    }

    #[must_use]
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    #[must_use]
    pub fn state(&self) -> OptionState {
        self.state
    }

    #[must_use]
    pub fn deal(&self) -> Option<&Deal> {
        self.deal.as_ref()
    }

    /// Open a new deal: pull `escrow_amount` units of the underlying from
    /// the caller into custody and record the terms. Fully overwrites any
    /// previous (settled or unbought) deal.
    ///
    /// # Errors
    /// - `PausedOrNotAccepting` if the platform is paused or a bought
    ///   option is still awaiting execution
    pub fn init_option(
        &mut self,
        ctx: &CallCtx,
        registry: &PlatformRegistry,
        terms: DealTerms,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        if !registry.accepting_new_orders() || self.state == OptionState::Active {
            return Err(OpenlotError::PausedOrNotAccepting);
        }

        let mut plan = SettlementPlan::new();
        plan.move_asset(
            &terms.token,
            ctx.caller,
            self.custody,
            terms.token_id,
            terms.escrow_amount,
        );
        gateway.execute(&plan)?;

        let creator = terms.creator;
        self.deal = Some(Deal { terms, buyer: None });
        tracing::info!(creator = %creator, "option deal initialized");
        Ok(MarketEvent::OptionInitialized { creator })
    }

    /// Buy the open option. The attached payment must equal the notional
    /// exactly; the in-kind premium moves from the buyer's own holdings to
    /// the writer, and the notional is held in custody until execution.
    ///
    /// # Errors
    /// - `NotActive` if no deal has been initialized
    /// - `PausedOrNotAccepting` if a bought option is already outstanding
    /// - `AmountOverflow` if `escrow_amount * strike_price` overflows
    /// - `InsufficientAmount` if the payment differs from the notional
    pub fn buy_option(
        &mut self,
        ctx: &CallCtx,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        if self.state == OptionState::Active {
            return Err(OpenlotError::PausedOrNotAccepting);
        }
        let deal = self.deal.as_ref().ok_or(OpenlotError::NotActive)?;
        let notional = deal.notional()?;
        if ctx.paid != notional {
            return Err(OpenlotError::InsufficientAmount {
                required: notional,
                paid: ctx.paid,
            });
        }

        let mut plan = SettlementPlan::new();
        plan.move_asset(
            &deal.terms.token,
            ctx.caller,
            deal.terms.creator,
            deal.terms.token_id,
            deal.terms.premium_units,
        );
        plan.pay(ctx.caller, self.custody, notional);
        gateway.execute(&plan)?;

        // Gateway succeeded, so the deal is still present.
        if let Some(deal) = self.deal.as_mut() {
            deal.buyer = Some(ctx.caller);
        }
        self.state = OptionState::Active;
        tracing::info!(buyer = %ctx.caller, notional, "option bought");
        Ok(MarketEvent::OptionBought { buyer: ctx.caller })
    }

    /// Execute the bought option at or after expiry against a
    /// caller-supplied settlement price (trusted input; there is no oracle).
    ///
    /// `strike_price > settlement_price` finishes in the money for the
    /// buyer under this convention: the buyer takes the cash leg and the
    /// writer takes back the underlying. Otherwise the legs swap.
    ///
    /// # Errors
    /// - `NotActive` if no bought option is outstanding
    /// - `NotExpired` if called before the deal's expiry time
    /// - `AmountOverflow` if the notional overflows
    pub fn execute_option(
        &mut self,
        ctx: &CallCtx,
        settlement_price: Cash,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        if self.state != OptionState::Active {
            return Err(OpenlotError::NotActive);
        }
        let deal = self.deal.as_ref().ok_or(OpenlotError::NotActive)?;
        let buyer = deal.buyer.ok_or(OpenlotError::NotActive)?;
        if ctx.now < deal.terms.expire_time {
            return Err(OpenlotError::NotExpired {
                expires_at: deal.terms.expire_time,
            });
        }
        let notional = deal.notional()?;

        let (cash_to, asset_to) = if deal.terms.strike_price > settlement_price {
            (buyer, deal.terms.creator)
        } else {
            (deal.terms.creator, buyer)
        };

        let mut plan = SettlementPlan::new();
        plan.pay(self.custody, cash_to, notional);
        plan.move_asset(
            &deal.terms.token,
            self.custody,
            asset_to,
            deal.terms.token_id,
            deal.terms.escrow_amount,
        );
        gateway.execute(&plan)?;

        self.state = OptionState::Inactive;
        tracing::info!(
            settlement_price,
            cash_to = %cash_to,
            asset_to = %asset_to,
            "option executed"
        );
        Ok(MarketEvent::OptionExecuted {
            settlement_price,
            cash_to,
            asset_to,
        })
    }
}
