//! # openlot-market
//!
//! Marketplace settlement engines: the fixed-price **Listing Manager** and
//! the timed English **Auction Engine**, plus the pure fee-settlement
//! arithmetic both share.
//!
//! Both engines follow the same operation shape:
//! validate preconditions → stage a [`openlot_types::SettlementPlan`] →
//! hand it to the gateway → commit the engine's own state → emit one event.
//! A gateway rejection aborts before the commit, so no partial listing or
//! auction state is ever observable.

pub mod auction;
pub mod fees;
pub mod listing;

pub use auction::{AuctionHouse, AuctionListing};
pub use fees::{FeeSplit, split};
pub use listing::{Listing, ListingBook};
