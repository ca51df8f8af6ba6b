//! Wallet model
//!
//! Wallets are funding sources (cash, cards, bank accounts). The balance is
//! display data maintained outside the ledger; recording an expense never
//! changes it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;

/// A funding source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: WalletId,

    /// Wallet name (e.g., "Main Card")
    pub name: String,

    /// Current balance as reported by the user
    #[serde(default)]
    pub balance: Money,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Wallet {
    /// Create a new wallet with a generated id and zero balance
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self::with_id(WalletId::new(), name, currency)
    }

    /// Create a wallet with a caller-chosen id
    pub fn with_id(
        id: impl Into<WalletId>,
        name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: Money::zero(),
            currency: currency.into().trim().to_uppercase(),
        }
    }

    /// Set the starting balance
    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    /// Validate the wallet
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.id.is_blank() {
            return Err(WalletValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }

        if !is_currency_code(&self.currency) {
            return Err(WalletValidationError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }
}

/// Three ASCII uppercase letters, e.g. "EUR"
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.currency)
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyId,
    EmptyName,
    InvalidCurrency(String),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Wallet id cannot be empty"),
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::InvalidCurrency(code) => {
                write!(f, "Invalid currency code '{}' (expected e.g. USD)", code)
            }
        }
    }
}

impl std::error::Error for WalletValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_wallet() {
        let wallet = Wallet::new("Cash", "usd");
        assert_eq!(wallet.currency, "USD");
        assert!(wallet.balance.is_zero());
        assert!(wallet.validate().is_ok());
    }

    #[test]
    fn test_with_balance() {
        let wallet = Wallet::with_id("card", "Main Card", "EUR").with_balance(Money::from_cents(250000));
        assert_eq!(wallet.balance.cents(), 250000);
        assert_eq!(wallet.to_string(), "Main Card (EUR)");
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Wallet::with_id("cash", "", "USD").validate(),
            Err(WalletValidationError::EmptyName)
        );
        assert_eq!(
            Wallet::with_id("cash", "Cash", "dollars").validate(),
            Err(WalletValidationError::InvalidCurrency("DOLLARS".into()))
        );
    }
}
