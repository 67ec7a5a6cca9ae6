//! The staged transfer plan handed to the settlement gateway.
//!
//! Each engine operation assembles one [`SettlementPlan`] describing every
//! asset and cash movement it wants, then hands the whole plan to the
//! gateway in a single call. The gateway contract is all-or-nothing: either
//! the full plan takes effect, or it is rejected and the enclosing operation
//! aborts with no state change.
//!
//! Asset moves against the same token contract are batched into one
//! [`TransferBatch`] so the gateway issues one instruction per contract.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Cash, ContractAddr, TokenId};

/// One "move N units of token T from A to B" instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMove {
    pub from: AccountId,
    pub to: AccountId,
    pub token_id: TokenId,
    pub amount: u128,
}

/// A batch of moves against one token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBatch {
    pub contract: ContractAddr,
    pub moves: Vec<AssetMove>,
}

/// A direct payment of cash-denominated value to a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashMove {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Cash,
}

/// Everything one operation wants executed, staged before any state commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub batches: Vec<TransferBatch>,
    pub cash: Vec<CashMove>,
}

impl SettlementPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an asset move. Zero-amount moves are dropped; moves against the
    /// same contract as the previous one join its batch.
    pub fn move_asset(
        &mut self,
        contract: &ContractAddr,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
        amount: u128,
    ) {
        if amount == 0 {
            return;
        }
        let mv = AssetMove {
            from,
            to,
            token_id,
            amount,
        };
        match self.batches.last_mut() {
            Some(batch) if batch.contract == *contract => batch.moves.push(mv),
            _ => self.batches.push(TransferBatch {
                contract: contract.clone(),
                moves: vec![mv],
            }),
        }
    }

    /// Stage a cash payment. Zero-amount payments are dropped.
    pub fn pay(&mut self, from: AccountId, to: AccountId, amount: Cash) {
        if amount == 0 {
            return;
        }
        self.cash.push(CashMove { from, to, amount });
    }

    /// Whether the plan stages no movement at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.cash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_contract_moves_share_a_batch() {
        let contract = ContractAddr::new("KT1Quilt");
        let (a, b, c) = (AccountId::new(), AccountId::new(), AccountId::new());

        let mut plan = SettlementPlan::new();
        plan.move_asset(&contract, a, b, TokenId(0), 1);
        plan.move_asset(&contract, a, c, TokenId(1), 1);

        assert_eq!(plan.batches.len(), 1);
        assert_eq!(plan.batches[0].moves.len(), 2);
    }

    #[test]
    fn different_contracts_get_separate_batches() {
        let (a, b) = (AccountId::new(), AccountId::new());

        let mut plan = SettlementPlan::new();
        plan.move_asset(&ContractAddr::new("KT1Quilt"), a, b, TokenId(0), 1);
        plan.move_asset(&ContractAddr::new("KT1Other"), a, b, TokenId(0), 1);

        assert_eq!(plan.batches.len(), 2);
    }

    #[test]
    fn zero_amount_moves_are_dropped() {
        let (a, b) = (AccountId::new(), AccountId::new());

        let mut plan = SettlementPlan::new();
        plan.move_asset(&ContractAddr::new("KT1Quilt"), a, b, TokenId(0), 0);
        plan.pay(a, b, 0);

        assert!(plan.is_empty());
    }

    #[test]
    fn pay_stages_cash_move() {
        let (a, b) = (AccountId::new(), AccountId::new());

        let mut plan = SettlementPlan::new();
        plan.pay(a, b, 500);

        assert_eq!(plan.cash, vec![CashMove { from: a, to: b, amount: 500 }]);
    }
}
