//! Core data models for account management

use serde::{Deserialize, Serialize};

/// A bank account as stored by the Accounts API
///
/// Every mutation after creation sends the complete record back, so this is
/// also the body of `POST` and `PUT` requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, a stringified integer assigned on creation
    pub id: String,
    /// Three uppercase letters, e.g. "USD"
    pub currency: String,
    /// Current balance. Plain floating point, no decimal guarantees.
    pub balance: f64,
}

impl Account {
    pub fn new(id: impl Into<String>, currency: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            balance,
        }
    }

    /// Case-insensitive substring match on the currency code
    pub fn currency_matches(&self, needle: &str) -> bool {
        self.currency.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Numeric value of the id, if it is a stringified integer
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

/// Account fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAccount {
    pub currency: String,
    pub balance: f64,
}

impl ValidAccount {
    /// Build the full record for the given id
    pub fn with_id(self, id: impl Into<String>) -> Account {
        Account::new(id, self.currency, self.balance)
    }
}

/// A validated request to move money between two accounts
///
/// Never persisted: it is turned into two account replacements and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferIntent {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: f64,
}

/// The two records written back by a completed transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    /// Source account after the debit
    pub from: Account,
    /// Destination account after the credit
    pub to: Account,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_json_shape() {
        let account = Account::new("1", "USD", 100.0);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json, serde_json::json!({"id": "1", "currency": "USD", "balance": 100.0}));

        let parsed: Account =
            serde_json::from_str(r#"{"id":"2","currency":"EUR","balance":200}"#).unwrap();
        assert_eq!(parsed, Account::new("2", "EUR", 200.0));
    }

    #[test]
    fn test_currency_matches_ignores_case() {
        let account = Account::new("1", "USD", 1.0);
        assert!(account.currency_matches("us"));
        assert!(account.currency_matches("sD"));
        assert!(account.currency_matches(""));
        assert!(!account.currency_matches("eur"));
    }

    #[test]
    fn test_numeric_id() {
        assert_eq!(Account::new("42", "USD", 1.0).numeric_id(), Some(42));
        assert_eq!(Account::new("abc", "USD", 1.0).numeric_id(), None);
    }
}
