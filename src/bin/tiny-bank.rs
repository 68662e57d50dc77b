use std::fs::File;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tiny_bank::{bin_utils::Service, transfer::TransferRequest};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected an account file as the first argument")?;
    let from_id = args
        .next()
        .context("Expected a source account id as the second argument")?
        .parse()
        .context("Source account id must be an integer")?;
    let to_id = args
        .next()
        .context("Expected a destination account id as the third argument")?
        .parse()
        .context("Destination account id must be an integer")?;
    let amount: Decimal = args
        .next()
        .context("Expected a transfer amount as the fourth argument")?
        .parse()
        .context("Transfer amount must be a decimal number")?;

    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        accounts: file,
        request: TransferRequest {
            from_id,
            to_id,
            amount,
        },
        output: &mut std::io::stdout(),
    };
    service.run()
}
