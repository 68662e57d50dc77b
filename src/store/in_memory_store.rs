use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::account::{Account, AccountId};

use super::{AccountStore, StoreError, TransactionBoundary};

/// Account store backed by a mutex-guarded map.
///
/// A transaction holds the lock from first read to commit, so concurrent
/// transactions against the same store are serialized and no reader can
/// observe a half-applied group of writes.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    /// Inserts an account directly into committed state. Meant for
    /// populating the store before any transfer runs.
    pub fn seed(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.locked()?;
        accounts.insert(account.id, account);
        Ok(())
    }

    /// Reads committed state, ignoring any transaction in flight.
    pub fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        let accounts = self.locked()?;
        accounts.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn locked(&self) -> Result<MutexGuard<'_, HashMap<AccountId, Account>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|_| StoreError::Storage("account store lock poisoned".to_string()))
    }
}

/// Store view handed to transactional work: reads fall through to
/// committed state, writes are staged until commit.
struct TransactionScope<'a> {
    committed: &'a HashMap<AccountId, Account>,
    staged: HashMap<AccountId, Account>,
}

impl AccountStore for TransactionScope<'_> {
    fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        self.staged
            .get(&id)
            .or_else(|| self.committed.get(&id))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn put(&mut self, account: Account) -> Result<(), StoreError> {
        self.staged.insert(account.id, account);
        Ok(())
    }
}

impl TransactionBoundary for InMemoryAccountStore {
    fn run_in_transaction<T, E>(
        &self,
        work: impl FnOnce(&mut dyn AccountStore) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut accounts = self.locked().map_err(E::from)?;
        let mut scope = TransactionScope {
            committed: &*accounts,
            staged: HashMap::new(),
        };
        let outcome = work(&mut scope);
        let TransactionScope { staged, .. } = scope;
        match outcome {
            Ok(value) => {
                tracing::debug!(writes = staged.len(), "committing transaction");
                accounts.extend(staged);
                Ok(value)
            }
            Err(err) => {
                // staged writes are simply dropped
                tracing::debug!(discarded = staged.len(), "rolling back transaction");
                Err(err)
            }
        }
    }
}
