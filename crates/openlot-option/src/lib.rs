//! # openlot-option
//!
//! European-style call-option escrow: one [`CallOption`] instance per deal,
//! implementing a cash-or-asset settlement at or after expiry.
//!
//! Lifecycle: `init_option` escrows the underlying from the writer and
//! records the deal terms; `buy_option` collects the notional
//! (`escrow_amount * strike_price`) from the buyer and forwards the in-kind
//! premium to the writer; `execute_option` compares a caller-supplied
//! settlement price against the strike and routes the cash leg to exactly
//! one of {writer, buyer} and the asset leg to exactly the other.

pub mod escrow;

pub use escrow::{CallOption, Deal, DealTerms, OptionState};
