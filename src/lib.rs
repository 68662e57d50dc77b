/// The account record itself: id, display name and a decimal balance,
/// plus the debit/credit mutations that keep the balance non-negative.
pub mod account;

/// Storage contracts (`get`/`put` plus the transaction boundary) and the
/// in-memory implementation with commit/rollback semantics.
pub mod store;

/// The transfer service: applies the debit/credit invariant for one
/// request inside a single transaction boundary.
pub mod transfer;

/// Driver/reporting layer: seeds the store, runs one transfer and
/// renders the outcome line. Lives in the library so the integration
/// tests can drive the binary's code path.
pub mod bin_utils;
