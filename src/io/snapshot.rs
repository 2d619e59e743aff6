use std::str::FromStr;

use tracing::warn;

use crate::{
    common::{error::StoreError, money::Money},
    domain::{ledger::Ledger, transaction::TransactionRecord},
    io::store::KeyValueStore,
};

pub const BALANCE_KEY: &str = "balance";
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Rebuilds the ledger from the store.
///
/// A missing, malformed or negative `balance` reads as zero and a missing or
/// malformed `transactions` value reads as an empty history; both are logged
/// and never fail hydration. Records with a non-positive amount or a negative
/// bonus are dropped. Only a store that cannot be read is an error.
pub fn load_ledger<S: KeyValueStore + ?Sized>(store: &S) -> Result<Ledger, StoreError> {
    let balance = match store.get(BALANCE_KEY)? {
        Some(raw) if !raw.trim().is_empty() => match Money::from_str(&raw) {
            Ok(balance) if !balance.is_negative() => balance,
            Ok(balance) => {
                warn!(%balance, "stored balance is negative, starting from zero");
                Money::zero()
            }
            Err(e) => {
                warn!(error = %e, "stored balance is malformed, starting from zero");
                Money::zero()
            }
        },
        _ => Money::zero(),
    };

    let txs = match store.get(TRANSACTIONS_KEY)? {
        Some(raw) => match serde_json::from_str::<Vec<TransactionRecord>>(&raw) {
            Ok(txs) => txs,
            Err(e) => {
                warn!(error = %e, "stored transactions are malformed, starting with empty history");
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    let txs = drop_invalid_records(txs);

    let ledger = Ledger::from_parts(balance, txs);
    if let Some(index) = ledger.verify_running_totals() {
        warn!(
            index,
            balance = %ledger.balance,
            "stored history does not add up to the stored balance"
        );
    }
    Ok(ledger)
}

/// Keeps only records with a positive amount and a non-negative bonus.
fn drop_invalid_records(mut txs: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    let stored = txs.len();
    txs.retain(|t| t.amount.is_positive() && !t.bonus.is_negative());
    let dropped = stored - txs.len();
    if dropped > 0 {
        warn!(dropped, "stored transactions with invalid amounts were discarded");
    }
    txs
}

/// Writes balance and history in one store operation.
pub fn save_ledger<S: KeyValueStore + ?Sized>(
    store: &mut S,
    ledger: &Ledger,
) -> Result<(), StoreError> {
    let txs = serde_json::to_string(ledger.transactions()).map_err(|source| {
        StoreError::Encode {
            key: TRANSACTIONS_KEY.to_string(),
            source,
        }
    })?;
    let balance = ledger.balance.to_string_4dp();
    store.set_all(&[
        (TRANSACTIONS_KEY, txs.as_str()),
        (BALANCE_KEY, balance.as_str()),
    ])
}
