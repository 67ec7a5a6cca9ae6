//! In-memory asset and cash ledger.
//!
//! Executes a [`SettlementPlan`] by applying every move to a staged copy of
//! the books and swapping it in only if the whole plan succeeds. Checked
//! arithmetic throughout: an underfunded debit or an overflowing credit
//! rejects the plan.
//!
//! The deposit and balance helpers exist for harness and test code; the
//! engines themselves only ever see the [`SettlementGateway`] trait.

use std::collections::HashMap;

use openlot_types::{
    AccountId, AssetRef, Cash, ContractAddr, OpenlotError, Result, SettlementPlan, TokenId,
};

use crate::SettlementGateway;

/// Key of one asset holding: which token class, held by whom.
type AssetKey = (ContractAddr, TokenId, AccountId);

/// In-memory books: per-account cash and per-(contract, token, account)
/// asset units.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    cash: HashMap<AccountId, Cash>,
    assets: HashMap<AssetKey, u128>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit cash to an account.
    pub fn deposit_cash(&mut self, account: AccountId, amount: Cash) {
        *self.cash.entry(account).or_default() += amount;
    }

    /// Credit asset units to an account.
    pub fn deposit_asset(&mut self, account: AccountId, asset: &AssetRef, amount: u128) {
        *self
            .assets
            .entry((asset.contract.clone(), asset.token_id, account))
            .or_default() += amount;
    }

    #[must_use]
    pub fn cash_balance(&self, account: AccountId) -> Cash {
        self.cash.get(&account).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn asset_balance(&self, account: AccountId, asset: &AssetRef) -> u128 {
        self.assets
            .get(&(asset.contract.clone(), asset.token_id, account))
            .copied()
            .unwrap_or_default()
    }

    /// Total cash across all accounts. Settlement only moves cash between
    /// accounts, so this is invariant under `execute`.
    #[must_use]
    pub fn total_cash_supply(&self) -> Cash {
        self.cash.values().sum()
    }

    /// Total units of one asset class across all accounts.
    #[must_use]
    pub fn total_asset_supply(&self, asset: &AssetRef) -> u128 {
        self.assets
            .iter()
            .filter(|((contract, token_id, _), _)| {
                *contract == asset.contract && *token_id == asset.token_id
            })
            .map(|(_, units)| units)
            .sum()
    }

    fn apply(
        cash: &mut HashMap<AccountId, Cash>,
        assets: &mut HashMap<AssetKey, u128>,
        plan: &SettlementPlan,
    ) -> Result<()> {
        for batch in &plan.batches {
            for mv in &batch.moves {
                let key = (batch.contract.clone(), mv.token_id, mv.from);
                let held = assets.get(&key).copied().unwrap_or_default();
                if held < mv.amount {
                    return Err(OpenlotError::InsufficientAssetUnits {
                        asset: AssetRef {
                            contract: batch.contract.clone(),
                            token_id: mv.token_id,
                        },
                        needed: mv.amount,
                        held,
                    });
                }
                assets.insert(key, held - mv.amount);

                let to_key = (batch.contract.clone(), mv.token_id, mv.to);
                let credited = assets
                    .get(&to_key)
                    .copied()
                    .unwrap_or_default()
                    .checked_add(mv.amount)
                    .ok_or(OpenlotError::AmountOverflow)?;
                assets.insert(to_key, credited);
            }
        }

        for mv in &plan.cash {
            let available = cash.get(&mv.from).copied().unwrap_or_default();
            if available < mv.amount {
                return Err(OpenlotError::InsufficientFunds {
                    needed: mv.amount,
                    available,
                });
            }
            cash.insert(mv.from, available - mv.amount);

            let credited = cash
                .get(&mv.to)
                .copied()
                .unwrap_or_default()
                .checked_add(mv.amount)
                .ok_or(OpenlotError::AmountOverflow)?;
            cash.insert(mv.to, credited);
        }

        Ok(())
    }
}

impl SettlementGateway for MemoryLedger {
    /// Apply the plan all-or-nothing: stage on a copy of the books, commit
    /// only if every move succeeds.
    fn execute(&mut self, plan: &SettlementPlan) -> Result<()> {
        let mut cash = self.cash.clone();
        let mut assets = self.assets.clone();

        Self::apply(&mut cash, &mut assets, plan)?;

        self.cash = cash;
        self.assets = assets;
        tracing::debug!(
            batches = plan.batches.len(),
            cash_moves = plan.cash.len(),
            "settlement plan committed"
        );
        Ok(())
    }
}
