//! Error types for the OpenLot settlement engine.
//!
//! All errors use the `OL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Listing errors
//! - 2xx: Auction errors
//! - 3xx: Option escrow errors
//! - 4xx: Ledger / gateway errors
//! - 5xx: Arithmetic errors
//! - 6xx: Registry errors
//!
//! Every error is a named precondition violation that aborts the entire
//! operation with zero side effects. There are no recoverable errors and no
//! retry logic inside the core.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{AccountId, AssetRef, Cash};

/// Central error enum for all OpenLot operations.
#[derive(Debug, Error)]
pub enum OpenlotError {
    // =================================================================
    // Listing Errors (1xx)
    // =================================================================
    /// The caller is not the creator named in the request.
    #[error("OL_ERR_100: Invalid creator: caller {caller} is not the creator")]
    InvalidCreator { caller: AccountId },

    /// A live listing already exists for this asset.
    #[error("OL_ERR_101: Asset already listed: {0}")]
    AlreadyListed(AssetRef),

    /// No live listing exists for this asset.
    #[error("OL_ERR_102: Asset not listed: {0}")]
    NotListed(AssetRef),

    /// The attached payment does not match the listing price.
    #[error("OL_ERR_103: Insufficient payment: price {price}, paid {paid}")]
    InsufficientPayment { price: Cash, paid: Cash },

    // =================================================================
    // Auction Errors (2xx)
    // =================================================================
    /// A live auction already exists for this asset.
    #[error("OL_ERR_200: Auction already created: {0}")]
    AlreadyCreated(AssetRef),

    /// No live auction exists for this asset.
    #[error("OL_ERR_201: Invalid auction: {0}")]
    InvalidAuction(AssetRef),

    /// The attached amount does not meet what the operation requires
    /// (a bid must strictly exceed the current price; an option premium
    /// must equal the notional exactly).
    #[error("OL_ERR_202: Insufficient amount: required {required}, paid {paid}")]
    InsufficientAmount { required: Cash, paid: Cash },

    /// The auction window has not opened yet.
    #[error("OL_ERR_203: Auction not started: opens at {starts_at}")]
    NotStarted { starts_at: DateTime<Utc> },

    /// The auction window has closed for bidding.
    #[error("OL_ERR_204: Auction ended: closed at {ended_at}")]
    Ended { ended_at: DateTime<Utc> },

    // =================================================================
    // Option Escrow Errors (3xx)
    // =================================================================
    /// The instance is not accepting new deal orders: either the platform
    /// pause flag is set, or a bought option is still awaiting execution.
    #[error("OL_ERR_300: Not accepting new option orders")]
    PausedOrNotAccepting,

    /// Execution was attempted before the option's expiry time.
    #[error("OL_ERR_301: Option not expired: expires at {expires_at}")]
    NotExpired { expires_at: DateTime<Utc> },

    /// The operation needs a bought option (or, for `buy`, an initialized
    /// deal) and there is none.
    #[error("OL_ERR_302: Option not active")]
    NotActive,

    // =================================================================
    // Ledger / Gateway Errors (4xx)
    // =================================================================
    /// The sender does not hold enough units of the asset to move.
    #[error("OL_ERR_400: Insufficient asset units of {asset}: needed {needed}, held {held}")]
    InsufficientAssetUnits {
        asset: AssetRef,
        needed: u128,
        held: u128,
    },

    /// The sender does not hold enough cash to move.
    #[error("OL_ERR_401: Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: Cash, available: Cash },

    /// The gateway rejected the transfer for an external reason.
    #[error("OL_ERR_402: Transfer rejected: {reason}")]
    TransferRejected { reason: String },

    // =================================================================
    // Arithmetic Errors (5xx)
    // =================================================================
    /// A cash multiplication overflowed. Always aborts the operation;
    /// amounts are never truncated.
    #[error("OL_ERR_500: Amount overflow")]
    AmountOverflow,

    // =================================================================
    // Registry Errors (6xx)
    // =================================================================
    /// The caller is not in the moderator set.
    #[error("OL_ERR_600: Not a moderator: {0}")]
    NotModerator(AccountId),

    /// The target of a removal is not in the moderator set.
    #[error("OL_ERR_601: Address is not a moderator: {0}")]
    UnknownModerator(AccountId),

    /// A fee rate at or above the full scale would leave the counterparty
    /// with nothing (or less).
    #[error("OL_ERR_602: Invalid fee rate: {rate_ppm} ppm")]
    InvalidFeeRate { rate_ppm: u32 },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenlotError>;
