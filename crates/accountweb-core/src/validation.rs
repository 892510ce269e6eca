//! Field validation for the account and transfer forms
//!
//! Each failing field reports exactly one message. The transfer rules do not
//! compare the two selected accounts; rejecting a transfer to the same
//! account is a runtime check of the transfer flow, not a form error.

use crate::models::{TransferIntent, ValidAccount};

fn currency_regex() -> &'static regex::Regex {
    static CURRENCY: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    CURRENCY.get_or_init(|| regex::Regex::new(r"^[A-Z]{3}$").unwrap())
}

/// Form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Currency,
    Balance,
    FromAccountId,
    ToAccountId,
    Amount,
}

impl Field {
    /// Name of the field in submitted forms
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Currency => "currency",
            Field::Balance => "balance",
            Field::FromAccountId => "from_account_id",
            Field::ToAccountId => "to_account_id",
            Field::Amount => "amount",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency" => Ok(Field::Currency),
            "balance" => Ok(Field::Balance),
            "from_account_id" => Ok(Field::FromAccountId),
            "to_account_id" => Ok(Field::ToAccountId),
            "amount" => Ok(Field::Amount),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// A message attached to one form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All field errors of one validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: String) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for the given field, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Set or clear the message of one field, keeping the others
    pub fn set(&mut self, field: Field, message: Option<String>) {
        self.errors.retain(|e| e.field != field);
        if let Some(message) = message {
            self.push(field, message);
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn check_currency(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("Currency is required".to_string());
    }
    if !currency_regex().is_match(raw) {
        return Err("Currency must be in three uppercase letters format for example: USD".to_string());
    }
    Ok(raw.to_string())
}

fn check_positive_number(raw: &str, label: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", label));
    }
    let value: f64 = match trimmed.parse() {
        Ok(v) if f64::is_finite(v) => v,
        _ => return Err(format!("{} must be a number", label)),
    };
    if value < 0.0 {
        return Err(format!("{} must be a positive number", label));
    }
    if value <= 0.0 {
        return Err(format!("{} must be greater than 0", label));
    }
    Ok(value)
}

fn check_selected(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Account is required".to_string());
    }
    Ok(trimmed.to_string())
}

/// Validate the fields of the creation and edit forms
pub fn validate_account(currency: &str, balance: &str) -> Result<ValidAccount, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let currency = check_currency(currency).map_err(|m| errors.push(Field::Currency, m));
    let balance = check_positive_number(balance, "Balance").map_err(|m| errors.push(Field::Balance, m));

    match (currency, balance) {
        (Ok(currency), Ok(balance)) => Ok(ValidAccount { currency, balance }),
        _ => Err(errors),
    }
}

/// Validate the fields of the transfer form
pub fn validate_transfer(
    from_account_id: &str,
    to_account_id: &str,
    amount: &str,
) -> Result<TransferIntent, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let from = check_selected(from_account_id).map_err(|m| errors.push(Field::FromAccountId, m));
    let to = check_selected(to_account_id).map_err(|m| errors.push(Field::ToAccountId, m));
    let amount = check_positive_number(amount, "Amount").map_err(|m| errors.push(Field::Amount, m));

    match (from, to, amount) {
        (Ok(from_account_id), Ok(to_account_id), Ok(amount)) => Ok(TransferIntent {
            from_account_id,
            to_account_id,
            amount,
        }),
        _ => Err(errors),
    }
}

/// Check a single field on blur. Returns the message if the value is invalid.
pub fn validate_field(field: Field, value: &str) -> Option<String> {
    let result = match field {
        Field::Currency => check_currency(value).map(|_| ()),
        Field::Balance => check_positive_number(value, "Balance").map(|_| ()),
        Field::Amount => check_positive_number(value, "Amount").map(|_| ()),
        Field::FromAccountId | Field::ToAccountId => check_selected(value).map(|_| ()),
    };
    result.err()
}
