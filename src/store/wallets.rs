//! Wallet mutations
//!
//! A wallet that still funds expenses cannot be deleted.

use tracing::debug;

use super::LedgerStore;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Wallet, WalletId};

/// Input for creating a wallet
#[derive(Debug, Clone)]
pub struct NewWallet {
    /// Caller-chosen id; one is generated when `None`
    pub id: Option<WalletId>,
    pub name: String,
    pub balance: Money,
    pub currency: String,
}

impl NewWallet {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            balance: Money::zero(),
            currency: currency.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<WalletId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }
}

/// Partial update for a wallet
#[derive(Debug, Clone, Default)]
pub struct WalletPatch {
    pub name: Option<String>,
    pub balance: Option<Money>,
    pub currency: Option<String>,
}

impl LedgerStore {
    /// Create a wallet
    pub fn add_wallet(&self, input: NewWallet) -> LedgerResult<Wallet> {
        let mut data = self.write()?;

        let wallet = Wallet {
            id: input.id.unwrap_or_default(),
            name: input.name.trim().to_string(),
            balance: input.balance,
            currency: input.currency.trim().to_uppercase(),
        };

        wallet
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if data.wallet(&wallet.id).is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Wallet",
                identifier: wallet.id.to_string(),
            });
        }

        debug!(wallet_id = %wallet.id, "wallet added");
        data.wallets.push(wallet.clone());
        Ok(wallet)
    }

    /// Rename a wallet or record a new balance
    pub fn update_wallet(&self, id: &WalletId, patch: WalletPatch) -> LedgerResult<Wallet> {
        let mut data = self.write()?;
        let index = data
            .wallets
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| LedgerError::wallet_not_found(id.to_string()))?;

        let mut wallet = data.wallets[index].clone();
        if let Some(name) = patch.name {
            wallet.name = name.trim().to_string();
        }
        if let Some(balance) = patch.balance {
            wallet.balance = balance;
        }
        if let Some(currency) = patch.currency {
            wallet.currency = currency.trim().to_uppercase();
        }

        wallet
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        debug!(wallet_id = %id, "wallet updated");
        data.wallets[index] = wallet.clone();
        Ok(wallet)
    }

    /// Delete a wallet that no expense references
    pub fn delete_wallet(&self, id: &WalletId) -> LedgerResult<()> {
        let mut data = self.write()?;
        let index = data
            .wallets
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| LedgerError::wallet_not_found(id.to_string()))?;

        let in_use = data.expenses.iter().filter(|e| &e.wallet_id == id).count();
        if in_use > 0 {
            return Err(LedgerError::Validation(format!(
                "Cannot delete wallet '{}' - it is used by {} expenses",
                data.wallets[index].name, in_use
            )));
        }

        data.wallets.remove(index);
        debug!(wallet_id = %id, "wallet deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::seeded_store;
    use super::*;

    #[test]
    fn test_add_wallet() {
        let store = seeded_store();
        let wallet = store
            .add_wallet(NewWallet::new("Travel Card", "eur").balance(Money::from_cents(90000)))
            .unwrap();

        assert_eq!(wallet.currency, "EUR");
        assert_eq!(wallet.balance.cents(), 90000);
        assert_eq!(store.wallets().unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_invalid_wallets() {
        let store = seeded_store();
        assert!(store
            .add_wallet(NewWallet::new(" ", "USD"))
            .unwrap_err()
            .is_validation());
        assert!(store
            .add_wallet(NewWallet::new("Cash 2", "USD").with_id("cash"))
            .unwrap_err()
            .is_validation());
        assert!(store
            .add_wallet(NewWallet::new("Odd", "US"))
            .unwrap_err()
            .is_validation());
        assert_eq!(store.wallets().unwrap().len(), 1);
    }

    #[test]
    fn test_update_balance() {
        let store = seeded_store();
        let wallet = store
            .update_wallet(
                &WalletId::from("cash"),
                WalletPatch {
                    balance: Some(Money::from_cents(4200)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(wallet.balance.cents(), 4200);
        assert_eq!(wallet.name, "Cash");
    }

    #[test]
    fn test_delete_in_use_wallet_rejected() {
        let store = seeded_store();
        let err = store.delete_wallet(&WalletId::from("cash")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.wallets().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unused_wallet() {
        let store = seeded_store();
        let wallet = store.add_wallet(NewWallet::new("Spare", "USD")).unwrap();
        store.delete_wallet(&wallet.id).unwrap();
        assert!(store.delete_wallet(&wallet.id).unwrap_err().is_not_found());
    }
}
