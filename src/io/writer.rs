use std::io::Write;

use chrono::SecondsFormat;

use crate::domain::transaction::TransactionRecord;

#[derive(serde::Serialize)]
/// Internal CSV output row representation matching the statement headers.
///
/// Headers written (in this order): `seq,type,amount,bonus,balance,id,timestamp`.
/// Monetary fields are formatted to 4 decimal places as strings.
struct StatementRow {
    seq: usize,
    #[serde(rename = "type")]
    tx_type: &'static str,
    amount: String,
    bonus: String,
    balance: String,
    id: String,
    timestamp: String,
}

/// Writes the transaction history as a CSV statement, oldest first.
///
/// `seq` is the 1-based position, the same numbering edit commands accept as
/// a target. Timestamps are RFC 3339 in UTC.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use wallet_ledger::io::writer::write_statement;
///
/// let mut out = Vec::new();
/// write_statement(&mut out, &[]).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "seq,type,amount,bonus,balance,id,timestamp\n");
/// ```
pub fn write_statement<W: Write>(
    writer: W,
    transactions: &[TransactionRecord],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // serialize() skips the header for an empty history, so write it by hand
    wtr.write_record(["seq", "type", "amount", "bonus", "balance", "id", "timestamp"])?;

    for (i, tx) in transactions.iter().enumerate() {
        let row = StatementRow {
            seq: i + 1,
            tx_type: tx.tx_type.as_str(),
            amount: tx.amount.to_string_4dp(),
            bonus: tx.bonus.to_string_4dp(),
            balance: tx.resulting_balance.to_string_4dp(),
            id: tx.id.to_string(),
            timestamp: tx.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{common::money::Money, domain::transaction::TxType};

    // Helper: writes a statement to a Vec<u8> and returns UTF-8 string.
    fn write_to_string(transactions: &[TransactionRecord]) -> String {
        let mut out = Vec::new();
        write_statement(&mut out, transactions).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_header_and_rows_in_history_order() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let deposit = TransactionRecord::new(
            TxType::Deposit,
            Money::units(1000),
            Money::units(50),
            Money::units(1050),
            at,
        );
        let withdrawal = TransactionRecord::new(
            TxType::Withdrawal,
            Money::new(12_345),
            Money::zero(),
            Money::new(10_487_655),
            at,
        );
        let ids = (deposit.id, withdrawal.id);

        let s = write_to_string(&[deposit, withdrawal]);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3, "expected header + 2 rows");

        assert_eq!(lines[0], "seq,type,amount,bonus,balance,id,timestamp");
        assert_eq!(
            lines[1],
            format!(
                "1,deposit,1000.0000,50.0000,1050.0000,{},2026-01-01T12:00:00.000Z",
                ids.0
            )
        );
        assert_eq!(
            lines[2],
            format!(
                "2,withdrawal,1.2345,0.0000,1048.7655,{},2026-01-01T12:00:00.000Z",
                ids.1
            )
        );
    }
}
