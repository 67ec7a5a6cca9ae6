//! Fixed-price sale state machine, keyed by asset identity.
//!
//! A listing exists iff the book's custody account holds exactly one unit
//! of that asset on the creator's behalf. `put_on_sale` escrows the unit
//! and inserts the record; `collect` and `cancel_sale` release it and
//! remove the record. At most one live listing per [`AssetRef`].

use std::collections::HashMap;

use openlot_ledger::SettlementGateway;
use openlot_types::{
    AccountId, AssetRef, CallCtx, Cash, MarketEvent, OpenlotError, PlatformRegistry, Result,
    SettlementPlan, constants,
};
use serde::{Deserialize, Serialize};

use crate::fees;

/// One live fixed-price listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub creator: AccountId,
    pub asset: AssetRef,
    pub price: Cash,
}

/// The Listing Manager: owns the listings-by-asset store exclusively.
#[derive(Debug, Clone)]
pub struct ListingBook {
    /// Account under which escrowed units are held.
    custody: AccountId,
    listings: HashMap<AssetRef, Listing>,
}

impl ListingBook {
    #[must_use]
    pub fn new(custody: AccountId) -> Self {
        Self {
            custody,
            listings: HashMap::new(),
        }
    }

    #[must_use]
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    #[must_use]
    pub fn get(&self, asset: &AssetRef) -> Option<&Listing> {
        self.listings.get(asset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// List one unit of `asset` at `price`. Escrows the unit from the
    /// caller into custody.
    ///
    /// # Errors
    /// - `PausedOrNotAccepting` if the platform is paused
    /// - `InvalidCreator` if the caller is not the named creator
    /// - `AlreadyListed` if a live listing exists for this asset
    pub fn put_on_sale(
        &mut self,
        ctx: &CallCtx,
        registry: &PlatformRegistry,
        creator: AccountId,
        asset: AssetRef,
        price: Cash,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        if !registry.accepting_new_orders() {
            return Err(OpenlotError::PausedOrNotAccepting);
        }
        if ctx.caller != creator {
            return Err(OpenlotError::InvalidCreator { caller: ctx.caller });
        }
        if self.listings.contains_key(&asset) {
            return Err(OpenlotError::AlreadyListed(asset));
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

        self.listings.insert(
            asset.clone(),
            Listing {
                creator,
                asset: asset.clone(),
                price,
            },
        );
        tracing::info!(%asset, price, "listing created");
        Ok(MarketEvent::ListCreated { asset, creator, price })
    }

    /// Buy the listed unit. Requires the attached payment to equal the
    /// price exactly; releases the unit to the caller and splits the price
    /// between the platform and the creator.
    ///
    /// # Errors
    /// - `NotListed` if no live listing exists
    /// - `InsufficientPayment` if the attached payment differs from the price
    pub fn collect(
        &mut self,
        ctx: &CallCtx,
        registry: &PlatformRegistry,
        asset: &AssetRef,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        let listing = self
            .listings
            .get(asset)
            .ok_or_else(|| OpenlotError::NotListed(asset.clone()))?;
        if ctx.paid != listing.price {
            return Err(OpenlotError::InsufficientPayment {
                price: listing.price,
                paid: ctx.paid,
            });
        }

        let split = fees::split(listing.price, registry.fee_rate_ppm())?;
        let creator = listing.creator;
        let price = listing.price;

        let mut plan = SettlementPlan::new();
        plan.move_asset(
            &asset.contract,
            self.custody,
            ctx.caller,
            asset.token_id,
            constants::UNIT,
        );
        plan.pay(ctx.caller, registry.fee_recipient(), split.platform);
        plan.pay(ctx.caller, creator, split.remainder);
        gateway.execute(&plan)?;

        self.listings.remove(asset);
        tracing::info!(%asset, price, buyer = %ctx.caller, "listing collected");
        Ok(MarketEvent::TokenCollected {
            asset: asset.clone(),
            buyer: ctx.caller,
            price,
        })
    }

    /// Cancel a listing. Only the creator may cancel; the escrowed unit
    /// returns to them and no funds move.
    ///
    /// # Errors
    /// - `NotListed` if no live listing exists
    /// - `InvalidCreator` if the caller is not the listing's creator
    pub fn cancel_sale(
        &mut self,
        ctx: &CallCtx,
        asset: &AssetRef,
        gateway: &mut dyn SettlementGateway,
    ) -> Result<MarketEvent> {
        let listing = self
            .listings
            .get(asset)
            .ok_or_else(|| OpenlotError::NotListed(asset.clone()))?;
        if listing.creator != ctx.caller {
            return Err(OpenlotError::InvalidCreator { caller: ctx.caller });
        }

        let mut plan = SettlementPlan::new();
        plan.move_asset(
            &asset.contract,
            self.custody,
            listing.creator,
            asset.token_id,
            constants::UNIT,
        );
        gateway.execute(&plan)?;

        self.listings.remove(asset);
        tracing::info!(%asset, "listing canceled");
        Ok(MarketEvent::ListCanceled { asset: asset.clone() })
    }
}
