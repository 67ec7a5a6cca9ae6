//! Events emitted by settlement operations.
//!
//! Events are consumed by off-system observers only and carry no core
//! semantics. Each successful operation returns exactly one event; the
//! tags are stable so downstream indexers keep working.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetRef, Cash};

/// One emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    ListCreated {
        asset: AssetRef,
        creator: AccountId,
        price: Cash,
    },
    ListCanceled {
        asset: AssetRef,
    },
    TokenCollected {
        asset: AssetRef,
        buyer: AccountId,
        price: Cash,
    },
    AuctionCreated {
        asset: AssetRef,
        creator: AccountId,
    },
    NewBid {
        asset: AssetRef,
        bidder: AccountId,
        bid: Cash,
    },
    AuctionCanceled {
        asset: AssetRef,
    },
    AuctionSettled {
        asset: AssetRef,
        winner: AccountId,
        price: Cash,
    },
    OptionInitialized {
        creator: AccountId,
    },
    OptionBought {
        buyer: AccountId,
    },
    OptionExecuted {
        settlement_price: Cash,
        cash_to: AccountId,
        asset_to: AccountId,
    },
    ModeratorAdded {
        moderator: AccountId,
    },
    ModeratorRemoved {
        moderator: AccountId,
    },
    PlatformFeesUpdated {
        fee_rate_ppm: u32,
    },
    PauseToggled {
        paused: bool,
    },
}

impl MarketEvent {
    /// Stable tag for off-system observers.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ListCreated { .. } => "LIST_CREATED",
            Self::ListCanceled { .. } => "LIST_CANCELED",
            Self::TokenCollected { .. } => "TOKEN_COLLECTED",
            Self::AuctionCreated { .. } => "AUCTION_CREATED",
            Self::NewBid { .. } => "NEW_BID",
            Self::AuctionCanceled { .. } => "AUCTION_CANCELED",
            Self::AuctionSettled { .. } => "AUCTION_SETTLED",
            Self::OptionInitialized { .. } => "INIT_OPTION",
            Self::OptionBought { .. } => "BUY_OPTION",
            Self::OptionExecuted { .. } => "EXECUTE_OPTION",
            Self::ModeratorAdded { .. } => "MODERATOR_ADDED",
            Self::ModeratorRemoved { .. } => "MODERATOR_REMOVED",
            Self::PlatformFeesUpdated { .. } => "UPDATE_PLATFORM_FEES",
            Self::PauseToggled { .. } => "TOGGLE_PAUSE",
        }
    }
}

impl fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_stable() {
        let ev = MarketEvent::ListCreated {
            asset: AssetRef::new("KT1Quilt", 0),
            creator: AccountId::new(),
            price: 1,
        };
        assert_eq!(ev.tag(), "LIST_CREATED");
        assert_eq!(ev.to_string(), "LIST_CREATED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let ev = MarketEvent::NewBid {
            asset: AssetRef::new("KT1Quilt", 1),
            bidder: AccountId::new(),
            bid: 2_000_000,
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
