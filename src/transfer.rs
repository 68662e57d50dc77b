use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::{
    account::{AccountError, AccountId},
    store::{StoreError, TransactionBoundary},
};

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error("Cannot transfer from an account to itself")]
    SameAccount,
    #[error("Transfer amount must be positive")]
    NonPositiveAmount,
}

/// One requested balance movement. Lives only for the duration of a
/// single `transfer` call and is never persisted.
#[derive(Debug, Clone, Copy)]
pub struct TransferRequest {
    pub from_id: AccountId,
    pub to_id: AccountId,
    pub amount: Decimal,
}

/// Moves money between two accounts atomically: debit and credit either
/// both commit or neither does.
pub struct TransferService<B> {
    boundary: B,
}

impl<B> TransferService<B>
where
    B: TransactionBoundary,
{
    pub fn new(boundary: B) -> Self {
        Self { boundary }
    }

    pub fn transfer(&self, request: TransferRequest) -> Result<(), TransferError> {
        if request.from_id == request.to_id {
            return Err(TransferError::SameAccount);
        }
        if request.amount <= Decimal::zero() {
            return Err(TransferError::NonPositiveAmount);
        }

        self.boundary
            .run_in_transaction(|store| -> Result<(), TransferError> {
                let mut from = store.get(request.from_id)?;
                let mut to = store.get(request.to_id)?;

                from.debit(request.amount)?;
                to.credit(request.amount);

                store.put(from)?;
                store.put(to)?;
                Ok(())
            })?;

        tracing::info!(
            from = request.from_id,
            to = request.to_id,
            amount = %request.amount,
            "transfer committed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{account::Account, store::in_memory_store::InMemoryAccountStore};

    use super::*;

    fn seeded_store(accounts: &[(AccountId, &str, Decimal)]) -> InMemoryAccountStore {
        let store = InMemoryAccountStore::default();
        for (id, name, balance) in accounts {
            store.seed(Account::new(*id, *name, *balance)).unwrap();
        }
        store
    }

    #[test]
    fn transfer_moves_amount_between_accounts() {
        let store = seeded_store(&[(1, "A", dec!(1000)), (2, "B", dec!(200))]);
        let service = TransferService::new(&store);

        service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(500),
            })
            .unwrap();

        assert_eq!(store.get(1).unwrap().balance, dec!(500));
        assert_eq!(store.get(2).unwrap().balance, dec!(700));
    }

    #[test]
    fn transfer_conserves_total_balance() {
        let store = seeded_store(&[(1, "A", dec!(123.45)), (2, "B", dec!(0.55))]);
        let service = TransferService::new(&store);
        let before = store.get(1).unwrap().balance + store.get(2).unwrap().balance;

        service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(23.45),
            })
            .unwrap();

        let after = store.get(1).unwrap().balance + store.get(2).unwrap().balance;
        assert_eq!(before, after);
        assert!(store.get(1).unwrap().balance >= Decimal::zero());
    }

    #[test]
    fn insufficient_funds_leaves_balances_untouched() {
        let store = seeded_store(&[(1, "A", dec!(100)), (2, "B", dec!(0))]);
        let service = TransferService::new(&store);

        let err = service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(500),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::AccountErr(AccountError::InsufficientFunds)
        ));
        assert_eq!(err.to_string(), "Insufficient funds");
        assert_eq!(store.get(1).unwrap().balance, dec!(100));
        assert_eq!(store.get(2).unwrap().balance, dec!(0));
    }

    #[test]
    fn missing_destination_rolls_back() {
        let store = seeded_store(&[(1, "A", dec!(100))]);
        let service = TransferService::new(&store);

        let err = service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 99,
                amount: dec!(10),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::StoreErr(StoreError::NotFound(99))
        ));
        assert_eq!(store.get(1).unwrap().balance, dec!(100));
    }

    #[test]
    fn missing_source_is_rejected() {
        let store = seeded_store(&[(2, "B", dec!(100))]);
        let service = TransferService::new(&store);

        let err = service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(10),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::StoreErr(StoreError::NotFound(1))
        ));
    }

    #[test]
    fn preconditions_are_checked_before_any_read() {
        // no accounts seeded at all, so a store read would fail first
        let store = InMemoryAccountStore::default();
        let service = TransferService::new(&store);

        let err = service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 1,
                amount: dec!(10),
            })
            .unwrap_err();
        assert!(matches!(err, TransferError::SameAccount));

        let err = service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(0),
            })
            .unwrap_err();
        assert!(matches!(err, TransferError::NonPositiveAmount));

        let err = service
            .transfer(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(-5),
            })
            .unwrap_err();
        assert!(matches!(err, TransferError::NonPositiveAmount));
    }

    #[test]
    fn concurrent_transfers_conserve_total() {
        let store = seeded_store(&[(1, "A", dec!(1000)), (2, "B", dec!(1000))]);

        // worst-case interleaving still leaves both sides solvent, so
        // every transfer must succeed regardless of scheduling
        std::thread::scope(|scope| {
            scope.spawn(|| {
                let service = TransferService::new(&store);
                for _ in 0..100 {
                    service
                        .transfer(TransferRequest {
                            from_id: 1,
                            to_id: 2,
                            amount: dec!(5),
                        })
                        .unwrap();
                }
            });
            scope.spawn(|| {
                let service = TransferService::new(&store);
                for _ in 0..100 {
                    service
                        .transfer(TransferRequest {
                            from_id: 2,
                            to_id: 1,
                            amount: dec!(3),
                        })
                        .unwrap();
                }
            });
            // observer must never see a negative balance while the
            // transfers race
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(store.get(1).unwrap().balance >= Decimal::zero());
                    assert!(store.get(2).unwrap().balance >= Decimal::zero());
                }
            });
        });

        let a = store.get(1).unwrap().balance;
        let b = store.get(2).unwrap().balance;
        assert_eq!(a + b, dec!(2000));
        assert_eq!(a, dec!(800));
        assert_eq!(b, dec!(1200));
    }
}
