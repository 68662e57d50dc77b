//! Bootstrap glue between the binary and the core: everything here could
//! live in the binary itself, but keeping it in the library lets the
//! integration tests exercise the exact code path the binary runs.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use csv_parser::CsvAccountParser;

use crate::{
    account::Account,
    store::{StoreError, in_memory_store::InMemoryAccountStore},
    transfer::{TransferError, TransferRequest, TransferService},
};

pub mod csv_parser;

/// Wires the store and the transfer service together by hand: seeds
/// accounts from `accounts`, runs a single transfer and writes exactly
/// one outcome line to `output`.
///
/// A rejected transfer (missing account, insufficient funds, bad
/// request) is a reported outcome, not an error; only unexpected faults
/// (unreadable input, storage failure) make `run` fail.
pub struct Service<'w, R, W: 'w> {
    pub accounts: R,
    pub request: TransferRequest,
    pub output: &'w mut W,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(self) -> Result<()> {
        let store = InMemoryAccountStore::default();
        for (line, row) in CsvAccountParser::new(self.accounts) {
            let row =
                row.with_context(|| format!("Malformed account record at line {line}"))?;
            store
                .seed(Account::new(row.id, row.name, row.balance))
                .context("Failed to seed account store")?;
        }

        let service = TransferService::new(&store);
        match service.transfer(self.request) {
            Ok(()) => writeln!(self.output, "Transfer successful!")?,
            Err(TransferError::StoreErr(err @ StoreError::Storage(_))) => {
                // rollback cannot be guaranteed here, so this one is fatal
                return Err(err).context("Transfer aborted by storage failure");
            }
            Err(err) => writeln!(self.output, "Transfer failed: {err}")?,
        }
        Ok(())
    }
}
