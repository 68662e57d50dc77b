use std::io::Read;

use crate::account::AccountId;
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One seed record from the account file.
#[derive(Debug, Deserialize)]
pub struct AccountRow {
    pub id: AccountId,
    pub name: String,
    pub balance: Decimal,
}

/// Parses the seed-account list in CSV format (`id,name,balance` with a
/// header row). Yields each row together with its line number so the
/// caller can report malformed records.
pub struct CsvAccountParser<R> {
    iter: DeserializeRecordsIntoIter<R, AccountRow>,
}

impl<R> CsvAccountParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvAccountParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<AccountRow>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
