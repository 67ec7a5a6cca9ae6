//! Asset identity and cash amounts.
//!
//! An [`AssetRef`] names a unique asset class (an external token contract
//! plus a token id inside it) and is the lookup key for listings and
//! auctions. Equality is structural.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cash amount in the smallest unit of the platform currency.
///
/// All settlement arithmetic on `Cash` uses `checked_*` operations; overflow
/// is a hard failure, never a silent truncation.
pub type Cash = u128;

/// Address of an external token contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ContractAddr(pub String);

impl ContractAddr {
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token class identifier inside a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a unique asset class: `{contract, token_id}`.
///
/// Used as the key of the listing and auction stores. At most one live
/// listing and one live auction may exist per `AssetRef` at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetRef {
    pub contract: ContractAddr,
    pub token_id: TokenId,
}

impl AssetRef {
    #[must_use]
    pub fn new(contract: impl Into<String>, token_id: u64) -> Self {
        Self {
            contract: ContractAddr::new(contract),
            token_id: TokenId(token_id),
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.contract, self.token_id)
    }
}
