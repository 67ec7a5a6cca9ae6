//! System-wide constants for the OpenLot settlement engine.

use crate::asset::Cash;

/// Denominator of the platform fee rate: rates are expressed in
/// parts-per-million of the settled amount.
pub const FEE_SCALE: u64 = 1_000_000;

/// Platform fee rate a fresh registry starts with (2%).
pub const DEFAULT_PLATFORM_FEE_PPM: u32 = 20_000;

/// Transfer amount for a non-fungible unit. Listings and auctions always
/// escrow and release exactly one unit.
pub const UNIT: Cash = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenLot";
