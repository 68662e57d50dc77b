use rust_decimal::Decimal;
use thiserror::Error;

pub type AccountId = u32;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Insufficient funds")]
    InsufficientFunds,
}

/// A persisted bank account record. The store owns the canonical copy,
/// callers work on clones and write them back through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }

    /// Removes `amount` from the balance. The balance is never allowed
    /// to go negative, so the check and the mutation live together here.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }
}
