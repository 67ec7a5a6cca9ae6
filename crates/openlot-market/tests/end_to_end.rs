//! End-to-end marketplace scenarios across both engines and the ledger.
//!
//! These tests exercise full operation sequences (list/collect/cancel and
//! create/bid/settle) against the in-memory ledger, and verify the
//! atomicity contract with a fault-injecting gateway: a rejected transfer
//! must leave engine state bit-identical to its pre-call value.

use chrono::DateTime;
use openlot_ledger::{FailingGateway, MemoryLedger};
use openlot_market::{AuctionHouse, ListingBook};
use openlot_types::{AccountId, AssetRef, CallCtx, MarketEvent, OpenlotError, PlatformRegistry};

struct Marketplace {
    registry: PlatformRegistry,
    book: ListingBook,
    house: AuctionHouse,
    ledger: MemoryLedger,
    admin: AccountId,
    platform: AccountId,
    alice: AccountId,
    bob: AccountId,
    carol: AccountId,
    dave: AccountId,
}

impl Marketplace {
    fn new() -> Self {
        let admin = AccountId::new();
        let platform = AccountId::new();
        let custody = AccountId::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        let carol = AccountId::new();
        let dave = AccountId::new();

        let mut ledger = MemoryLedger::new();
        ledger.deposit_cash(bob, 10_000_000);
        ledger.deposit_cash(carol, 10_000_000);
        ledger.deposit_cash(dave, 10_000_000);

        Self {
            registry: PlatformRegistry::new(admin, platform),
            book: ListingBook::new(custody),
            house: AuctionHouse::new(custody),
            ledger,
            admin,
            platform,
            alice,
            bob,
            carol,
            dave,
        }
    }

    fn total_cash(&self) -> u128 {
        self.ledger.total_cash_supply()
    }
}

// =============================================================================
// Scenario: fixed-price sale at the default 2% fee rate
// =============================================================================
#[test]
fn e2e_fixed_price_sale() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 0);
    m.ledger.deposit_asset(m.alice, &asset, 1);
    let supply_before = m.total_cash();

    // Alice lists at 1,000,000.
    let ctx = CallCtx::new(m.alice);
    let event = m
        .book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 1_000_000, &mut m.ledger)
        .unwrap();
    assert_eq!(event.tag(), "LIST_CREATED");

    // Bob collects, paying exactly the price.
    let ctx = CallCtx::new(m.bob).with_payment(1_000_000);
    let event = m
        .book
        .collect(&ctx, &m.registry, &asset, &mut m.ledger)
        .unwrap();
    assert_eq!(event.tag(), "TOKEN_COLLECTED");

    // Platform 20,000, Alice 980,000, Bob the asset; listing removed.
    assert_eq!(m.ledger.cash_balance(m.platform), 20_000);
    assert_eq!(m.ledger.cash_balance(m.alice), 980_000);
    assert_eq!(m.ledger.asset_balance(m.bob, &asset), 1);
    assert!(m.book.is_empty());

    // Settlement only moved value between parties.
    assert_eq!(m.total_cash(), supply_before);
    assert_eq!(m.ledger.total_asset_supply(&asset), 1);
}

// =============================================================================
// Scenario: auction lifecycle with a displaced bidder and caller-paid settle
// =============================================================================
#[test]
fn e2e_auction_lifecycle() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 1);
    m.ledger.deposit_asset(m.bob, &asset, 1);
    let supply_before = m.total_cash();

    // Bob opens the auction with window [0, 10].
    let ctx = CallCtx::new(m.bob);
    m.house
        .create_auction(
            &ctx,
            &m.registry,
            m.bob,
            asset.clone(),
            DateTime::from_timestamp(0, 0).unwrap(),
            DateTime::from_timestamp(10, 0).unwrap(),
            &mut m.ledger,
        )
        .unwrap();

    // Carol bids 2,000,000 at t=1.
    let ctx = CallCtx::new(m.carol).with_payment(2_000_000).at_secs(1);
    m.house.bid(&ctx, &asset, &mut m.ledger).unwrap();

    // Dave bids 3,000,000 at t=2; Carol is refunded in full.
    let ctx = CallCtx::new(m.dave).with_payment(3_000_000).at_secs(2);
    m.house.bid(&ctx, &asset, &mut m.ledger).unwrap();
    assert_eq!(m.ledger.cash_balance(m.carol), 10_000_000);

    // Carol settles at t=11: asset to Dave, platform share on 3,000,000,
    // remainder to Carol, the settler, not creator Bob.
    let ctx = CallCtx::new(m.carol).at_secs(11);
    let event = m
        .house
        .settle_auction(&ctx, &m.registry, &asset, &mut m.ledger)
        .unwrap();
    assert!(matches!(event, MarketEvent::AuctionSettled { price: 3_000_000, .. }));

    assert_eq!(m.ledger.asset_balance(m.dave, &asset), 1);
    assert_eq!(m.ledger.cash_balance(m.platform), 60_000);
    assert_eq!(m.ledger.cash_balance(m.carol), 12_940_000);
    // Creator Bob receives nothing from settlement; his starting balance
    // is untouched.
    assert_eq!(m.ledger.cash_balance(m.bob), 10_000_000);
    assert!(m.house.is_empty());

    assert_eq!(m.total_cash(), supply_before);
    assert_eq!(m.ledger.total_asset_supply(&asset), 1);
}

// =============================================================================
// Uniqueness: one engine's escrow excludes the other's
// =============================================================================
#[test]
fn e2e_listed_asset_cannot_also_be_auctioned() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 2);
    m.ledger.deposit_asset(m.alice, &asset, 1);

    let ctx = CallCtx::new(m.alice);
    m.book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 500, &mut m.ledger)
        .unwrap();

    // The unit is escrowed, so a second listing and an auction over the
    // same asset both fail, one in the map and one in the gateway.
    let err = m
        .book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 500, &mut m.ledger)
        .unwrap_err();
    assert!(matches!(err, OpenlotError::AlreadyListed(_)));

    let err = m
        .house
        .create_auction(
            &ctx,
            &m.registry,
            m.alice,
            asset.clone(),
            DateTime::UNIX_EPOCH,
            DateTime::UNIX_EPOCH,
            &mut m.ledger,
        )
        .unwrap_err();
    assert!(matches!(err, OpenlotError::InsufficientAssetUnits { .. }));

    assert_eq!(m.book.len(), 1);
    assert!(m.house.is_empty());
}

// =============================================================================
// Atomicity: a rejected transfer leaves engine state untouched
// =============================================================================
#[test]
fn e2e_collect_rollback_on_gateway_failure() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 3);
    m.ledger.deposit_asset(m.alice, &asset, 1);

    let ctx = CallCtx::new(m.alice);
    m.book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 1_000_000, &mut m.ledger)
        .unwrap();
    let listing_before = m.book.get(&asset).cloned().unwrap();

    let mut gateway = FailingGateway::fail_always(m.ledger);
    let ctx = CallCtx::new(m.bob).with_payment(1_000_000);
    let err = m
        .book
        .collect(&ctx, &m.registry, &asset, &mut gateway)
        .unwrap_err();
    assert!(matches!(err, OpenlotError::TransferRejected { .. }));

    // The listing is still live and identical; no balances moved.
    assert_eq!(m.book.get(&asset), Some(&listing_before));
    assert_eq!(gateway.inner().cash_balance(m.alice), 0);
    assert_eq!(gateway.inner().cash_balance(m.bob), 10_000_000);
    assert_eq!(gateway.inner().asset_balance(m.bob, &asset), 0);
}

#[test]
fn e2e_put_on_sale_rollback_on_gateway_failure() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 4);
    m.ledger.deposit_asset(m.alice, &asset, 1);

    let mut gateway = FailingGateway::fail_always(m.ledger);
    let ctx = CallCtx::new(m.alice);
    let err = m
        .book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 1, &mut gateway)
        .unwrap_err();
    assert!(matches!(err, OpenlotError::TransferRejected { .. }));

    assert!(m.book.is_empty());
    assert_eq!(gateway.inner().asset_balance(m.alice, &asset), 1);
}

#[test]
fn e2e_settle_rollback_on_gateway_failure() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 5);
    m.ledger.deposit_asset(m.bob, &asset, 1);

    let ctx = CallCtx::new(m.bob);
    m.house
        .create_auction(
            &ctx,
            &m.registry,
            m.bob,
            asset.clone(),
            DateTime::from_timestamp(0, 0).unwrap(),
            DateTime::from_timestamp(10, 0).unwrap(),
            &mut m.ledger,
        )
        .unwrap();
    let ctx = CallCtx::new(m.carol).with_payment(2_000_000).at_secs(1);
    m.house.bid(&ctx, &asset, &mut m.ledger).unwrap();
    let auction_before = m.house.get(&asset).cloned().unwrap();

    let mut gateway = FailingGateway::fail_always(m.ledger);
    let ctx = CallCtx::new(m.dave).at_secs(11);
    let err = m
        .house
        .settle_auction(&ctx, &m.registry, &asset, &mut gateway)
        .unwrap_err();
    assert!(matches!(err, OpenlotError::TransferRejected { .. }));

    assert_eq!(m.house.get(&asset), Some(&auction_before));
    assert_eq!(gateway.inner().cash_balance(m.dave), 10_000_000);
    assert_eq!(gateway.inner().asset_balance(m.dave, &asset), 0);
}

#[test]
fn e2e_bid_rollback_on_gateway_failure() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 6);
    m.ledger.deposit_asset(m.bob, &asset, 1);

    let ctx = CallCtx::new(m.bob);
    m.house
        .create_auction(
            &ctx,
            &m.registry,
            m.bob,
            asset.clone(),
            DateTime::from_timestamp(0, 0).unwrap(),
            DateTime::from_timestamp(10, 0).unwrap(),
            &mut m.ledger,
        )
        .unwrap();
    let auction_before = m.house.get(&asset).cloned().unwrap();

    let mut gateway = FailingGateway::fail_always(m.ledger);
    let ctx = CallCtx::new(m.carol).with_payment(2_000_000).at_secs(1);
    let err = m.house.bid(&ctx, &asset, &mut gateway).unwrap_err();
    assert!(matches!(err, OpenlotError::TransferRejected { .. }));

    assert_eq!(m.house.get(&asset), Some(&auction_before));
    assert_eq!(gateway.inner().cash_balance(m.carol), 10_000_000);
}

// =============================================================================
// Refund completeness: every displaced bidder gets their bid back once
// =============================================================================
#[test]
fn e2e_every_displaced_bidder_made_whole() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 7);
    m.ledger.deposit_asset(m.bob, &asset, 1);
    let supply_before = m.total_cash();

    let ctx = CallCtx::new(m.bob);
    m.house
        .create_auction(
            &ctx,
            &m.registry,
            m.bob,
            asset.clone(),
            DateTime::from_timestamp(0, 0).unwrap(),
            DateTime::from_timestamp(10, 0).unwrap(),
            &mut m.ledger,
        )
        .unwrap();

    // Carol and Dave trade the lead back and forth; each displacement
    // refunds the loser in full before the new bid is recorded.
    let bidders = [m.carol, m.dave, m.carol, m.dave, m.carol];
    for (i, bidder) in bidders.iter().enumerate() {
        let bid = 1_000_000 * (i as u128 + 1);
        let ctx = CallCtx::new(*bidder).with_payment(bid).at_secs(1 + i as i64);
        m.house.bid(&ctx, &asset, &mut m.ledger).unwrap();
    }

    // Final high bid is Carol's 5,000,000; Dave is fully refunded.
    assert_eq!(m.ledger.cash_balance(m.dave), 10_000_000);
    assert_eq!(m.ledger.cash_balance(m.carol), 5_000_000);
    assert_eq!(m.ledger.cash_balance(m.house.custody()), 5_000_000);
    assert_eq!(m.total_cash(), supply_before);

    // Cancel refunds the standing high bid too.
    let ctx = CallCtx::new(m.bob);
    m.house.cancel_auction(&ctx, &asset, &mut m.ledger).unwrap();
    assert_eq!(m.ledger.cash_balance(m.carol), 10_000_000);
    assert_eq!(m.ledger.asset_balance(m.bob, &asset), 1);
}

// =============================================================================
// Registry interaction: fee updates and the pause flag
// =============================================================================
#[test]
fn e2e_updated_fee_rate_applies_to_settlement() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 8);
    m.ledger.deposit_asset(m.alice, &asset, 1);

    m.registry.update_platform_fees(m.admin, 1_200).unwrap();

    let ctx = CallCtx::new(m.alice);
    m.book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 1_000_000, &mut m.ledger)
        .unwrap();
    let ctx = CallCtx::new(m.bob).with_payment(1_000_000);
    m.book.collect(&ctx, &m.registry, &asset, &mut m.ledger).unwrap();

    // 1,200 ppm of 1,000,000 = 1,200.
    assert_eq!(m.ledger.cash_balance(m.platform), 1_200);
    assert_eq!(m.ledger.cash_balance(m.alice), 998_800);
}

#[test]
fn e2e_pause_blocks_new_orders_but_not_settlement() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 9);
    m.ledger.deposit_asset(m.alice, &asset, 1);

    let ctx = CallCtx::new(m.alice);
    m.book
        .put_on_sale(&ctx, &m.registry, m.alice, asset.clone(), 1_000, &mut m.ledger)
        .unwrap();

    m.registry.toggle_pause(m.admin).unwrap();

    // New listings are blocked...
    let other = AssetRef::new("KT1Quilt", 10);
    m.ledger.deposit_asset(m.alice, &other, 1);
    let err = m
        .book
        .put_on_sale(&ctx, &m.registry, m.alice, other, 1_000, &mut m.ledger)
        .unwrap_err();
    assert!(matches!(err, OpenlotError::PausedOrNotAccepting));

    // ...but an existing listing still settles.
    let ctx = CallCtx::new(m.bob).with_payment(1_000);
    m.book.collect(&ctx, &m.registry, &asset, &mut m.ledger).unwrap();
    assert_eq!(m.ledger.asset_balance(m.bob, &asset), 1);
}

// =============================================================================
// An auction past its end time stays escrowed until someone acts
// =============================================================================
#[test]
fn e2e_expired_auction_waits_for_settlement_call() {
    let mut m = Marketplace::new();
    let asset = AssetRef::new("KT1Quilt", 11);
    m.ledger.deposit_asset(m.bob, &asset, 1);

    let ctx = CallCtx::new(m.bob);
    m.house
        .create_auction(
            &ctx,
            &m.registry,
            m.bob,
            asset.clone(),
            DateTime::from_timestamp(0, 0).unwrap(),
            DateTime::from_timestamp(10, 0).unwrap(),
            &mut m.ledger,
        )
        .unwrap();
    let ctx = CallCtx::new(m.carol).with_payment(2_000_000).at_secs(1);
    m.house.bid(&ctx, &asset, &mut m.ledger).unwrap();

    // Long past the end time: bidding is closed but the auction is live
    // and the unit still escrowed.
    let ctx = CallCtx::new(m.dave).with_payment(3_000_000).at_secs(1_000);
    let err = m.house.bid(&ctx, &asset, &mut m.ledger).unwrap_err();
    assert!(matches!(err, OpenlotError::Ended { .. }));
    assert_eq!(m.house.len(), 1);
    assert_eq!(m.ledger.asset_balance(m.house.custody(), &asset), 1);

    // Settlement at any later time releases it.
    let ctx = CallCtx::new(m.dave).at_secs(1_000_000);
    m.house
        .settle_auction(&ctx, &m.registry, &asset, &mut m.ledger)
        .unwrap();
    assert_eq!(m.ledger.asset_balance(m.carol, &asset), 1);
}
