//! Timed English-auction state machine, keyed by asset identity.
//!
//! A fresh auction starts with `current_price = 0` and the creator as
//! `highest_bidder`, the sentinel meaning "no real bid yet". Every
//! successful bid strictly raises `current_price` and refunds the displaced
//! bidder; equal bids are rejected, so ties are impossible. Settlement is
//! caller-triggered, never time-triggered: an auction past its end time
//! stays escrowed until someone settles or the creator cancels.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use openlot_ledger::SettlementGateway;
use openlot_types::{
    AccountId, AssetRef, CallCtx, Cash, MarketEvent, OpenlotError, PlatformRegistry, Result,
    SettlementPlan, constants,
};
use serde::{Deserialize, Serialize};

use crate::fees;

/// One live auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionListing {
    pub creator: AccountId,
    pub asset: AssetRef,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Highest accepted bid so far; zero until the first bid.
    pub current_price: Cash,
    /// The party owed a refund if outbid. Equals `creator` while no real
    /// bid exists.
    pub highest_bidder: AccountId,
}

impl AuctionListing {
    /// Whether a real bid has replaced the creator sentinel.
    #[must_use]
    pub fn has_real_bid(&self) -> bool {
        self.highest_bidder != self.creator
    }
}

/// The Auction Engine: owns the auctions-by-asset store exclusively.
#[derive(Debug, Clone)]
pub struct AuctionHouse {
    /// Account under which escrowed units and bid cash are held.
    custody: AccountId,
    auctions: HashMap<AssetRef, AuctionListing>,
}

impl AuctionHouse {
    #[must_use]
    pub fn new(custody: AccountId) -> Self {
        Self {
            custody,
            auctions: HashMap::new(),
        }
    }

    #[must_use]
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    #[must_use]
    pub fn get(&self, asset: &AssetRef) -> Option<&AuctionListing> {
        self.auctions.get(asset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }

    /// Open an auction over one unit of `asset` with the given bidding
    /// window. Escrows the unit from the caller into custody.
    ///
    /// # Errors
    /// - `PausedOrNotAccepting` if the platform is paused
    /// - `InvalidCreator` if the caller is not the named creator
    /// - `AlreadyCreated` if a live auction exists for this asset
    pub fn create_auction(
        &mut self,
        ctx: &CallCtx,
        registry: &PlatformRegistry,
        creator: AccountId,
        asset: AssetRef,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        if !registry.accepting_new_orders() {
            return Err(OpenlotError::PausedOrNotAccepting);
        }
        if ctx.caller != creator {
            return Err(OpenlotError::InvalidCreator { caller: ctx.caller });
        }
        if self.auctions.contains_key(&asset) {
            return Err(OpenlotError::AlreadyCreated(asset));
        }

        let mut plan = SettlementPlan::new();
        plan.move_asset(
            &asset.contract,
            ctx.caller,
            self.custody,
            asset.token_id,
            constants::UNIT,
        );
        gateway.execute(&plan)?;

        self.auctions.insert(
            asset.clone(),
            AuctionListing {
                creator,
                asset: asset.clone(),
                start_time,
                end_time,
                current_price: 0,
                highest_bidder: creator,
            },
        );
        tracing::info!(%asset, %start_time, %end_time, "auction created");
        Ok(MarketEvent::AuctionCreated { asset, creator })
    }

    /// Place a bid. The attached payment must strictly exceed the current
    /// price and the logical time must fall inside the bidding window. The
    /// displaced bidder (if any) is refunded their full previous bid.
    ///
    /// # Errors
    /// - `InvalidAuction` if no live auction exists
    /// - `InsufficientAmount` if the payment does not strictly exceed the
    ///   current price
    /// - `NotStarted` / `Ended` if `now` is outside the bidding window
    pub fn bid(
        &mut self,
        ctx: &CallCtx,
        asset: &AssetRef,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        let auction = self
            .auctions
            .get(asset)
            .ok_or_else(|| OpenlotError::InvalidAuction(asset.clone()))?;
        if ctx.paid <= auction.current_price {
            return Err(OpenlotError::InsufficientAmount {
                required: auction.current_price,
                paid: ctx.paid,
            });
        }
        if ctx.now < auction.start_time {
            return Err(OpenlotError::NotStarted {
                starts_at: auction.start_time,
            });
        }
        if ctx.now > auction.end_time {
            return Err(OpenlotError::Ended {
                ended_at: auction.end_time,
            });
        }

        let mut plan = SettlementPlan::new();
        plan.pay(ctx.caller, self.custody, ctx.paid);
        if auction.has_real_bid() {
            plan.pay(self.custody, auction.highest_bidder, auction.current_price);
        }
        gateway.execute(&plan)?;

        let auction = self
            .auctions
            .get_mut(asset)
            .ok_or_else(|| OpenlotError::InvalidAuction(asset.clone()))?;
        auction.current_price = ctx.paid;
        auction.highest_bidder = ctx.caller;
        tracing::info!(%asset, bid = ctx.paid, bidder = %ctx.caller, "new highest bid");
        Ok(MarketEvent::NewBid {
            asset: asset.clone(),
            bidder: ctx.caller,
            bid: ctx.paid,
        })
    }

    /// Cancel an auction. Only the creator may cancel; the current high
    /// bid (if any) is refunded and the escrowed unit returns to the
    /// creator.
    ///
    /// # Errors
    /// - `InvalidAuction` if no live auction exists
    /// - `InvalidCreator` if the caller is not the auction's creator
    pub fn cancel_auction(
        &mut self,
        ctx: &CallCtx,
        asset: &AssetRef,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        let auction = self
            .auctions
            .get(asset)
            .ok_or_else(|| OpenlotError::InvalidAuction(asset.clone()))?;
        if auction.creator != ctx.caller {
            return Err(OpenlotError::InvalidCreator { caller: ctx.caller });
        }

        let mut plan = SettlementPlan::new();
        if auction.current_price > 0 {
            plan.pay(self.custody, auction.highest_bidder, auction.current_price);
        }
        plan.move_asset(
            &asset.contract,
            self.custody,
            auction.creator,
            asset.token_id,
            constants::UNIT,
        );
        gateway.execute(&plan)?;

        self.auctions.remove(asset);
        tracing::info!(%asset, "auction canceled");
        Ok(MarketEvent::AuctionCanceled { asset: asset.clone() })
    }

    /// Settle an auction: the escrowed unit goes to the highest bidder and
    /// the winning bid is split between the platform and the *caller* of
    /// settlement, whoever that is, not the auction's creator. In practice
    /// creators settle their own auctions.
    ///
    /// Any party may settle; there is no time gate.
    ///
    /// # Errors
    /// - `InvalidAuction` if no live auction exists
    pub fn settle_auction(
        &mut self,
        ctx: &CallCtx,
        registry: &PlatformRegistry,
        asset: &AssetRef,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        let auction = self
            .auctions
            .get(asset)
            .ok_or_else(|| OpenlotError::InvalidAuction(asset.clone()))?;

        let split = fees::split(auction.current_price, registry.fee_rate_ppm())?;
        let winner = auction.highest_bidder;
        let price = auction.current_price;

        let mut plan = SettlementPlan::new();
        plan.move_asset(
            &asset.contract,
            self.custody,
            winner,
            asset.token_id,
            constants::UNIT,
        );
        plan.pay(self.custody, registry.fee_recipient(), split.platform);
        plan.pay(self.custody, ctx.caller, split.remainder);
        gateway.execute(&plan)?;

        self.auctions.remove(asset);
        tracing::info!(%asset, price, winner = %winner, settler = %ctx.caller, "auction settled");
        Ok(MarketEvent::AuctionSettled {
            asset: asset.clone(),
            winner,
            price,
        })
    }
}
