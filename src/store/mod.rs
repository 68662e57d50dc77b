use crate::account::{Account, AccountId};
use thiserror::Error;

pub mod in_memory_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Account {0} not found")]
    NotFound(AccountId),
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Keyed read/write access to account records.
///
/// Inside a transaction boundary the same contract applies, but writes
/// stay invisible to other readers until the transaction commits.
pub trait AccountStore {
    /// Fails with [`StoreError::NotFound`] if no account has this id.
    fn get(&self, id: AccountId) -> Result<Account, StoreError>;

    /// Upserts the record, overwriting any prior value for its id.
    fn put(&mut self, account: Account) -> Result<(), StoreError>;
}

/// Unit-of-work wrapper: every write performed by `work` commits as one
/// unit when `work` returns `Ok`, and is discarded entirely when it
/// returns `Err`. The error is re-raised to the caller unchanged.
///
/// Nested transactions are not supported, and implementations only need
/// to allow one transaction in flight per store instance.
pub trait TransactionBoundary {
    fn run_in_transaction<T, E>(
        &self,
        work: impl FnOnce(&mut dyn AccountStore) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>;
}

impl<B: TransactionBoundary> TransactionBoundary for &B {
    fn run_in_transaction<T, E>(
        &self,
        work: impl FnOnce(&mut dyn AccountStore) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        (**self).run_in_transaction(work)
    }
}
