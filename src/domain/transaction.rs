use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::money::Money;

/// One entry of the wallet history, stored in the `transactions` key.
///
/// Field names on disk follow the browser wallet's layout (`type`,
/// `balance`, `timestamp` in epoch milliseconds) so old state still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub amount: Money,
    #[serde(default, alias = "bouns")]
    pub bonus: Money,
    #[serde(rename = "balance")]
    pub resulting_balance: Money,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    #[serde(alias = "add", alias = "Added")]
    Deposit,
    #[serde(alias = "withdraw", alias = "WithDraw")]
    Withdrawal,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Deposit => "deposit",
            TxType::Withdrawal => "withdrawal",
        }
    }
}

impl TransactionRecord {
    pub fn new(
        tx_type: TxType,
        amount: Money,
        bonus: Money,
        resulting_balance: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx_type,
            amount,
            bonus,
            resulting_balance,
            created_at,
        }
    }

    /// Signed effect of this entry on the balance.
    pub fn net_effect(&self) -> Money {
        match self.tx_type {
            TxType::Deposit => self.amount + self.bonus,
            TxType::Withdrawal => Money::zero() - self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn net_effect_counts_bonus_only_for_deposits() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let dep = TransactionRecord::new(
            TxType::Deposit,
            Money::units(1000),
            Money::units(50),
            Money::units(1050),
            at,
        );
        let wd = TransactionRecord::new(
            TxType::Withdrawal,
            Money::units(30),
            Money::zero(),
            Money::units(1020),
            at,
        );
        assert_eq!(dep.net_effect(), Money::units(1050));
        assert_eq!(wd.net_effect(), Money::units(-30));
        assert_ne!(dep.id, wd.id);
    }

    #[test]
    fn loads_browser_wallet_records() {
        // one record from each historic layout
        let raw = r#"[
            {"id":"6f1c2a56-54d4-4a6e-9b1e-0c8e8f1d2b3a","type":"Added","amount":1000,
             "balance":1050,"bouns":50,"date":"1/1/2026, 12:00:00 PM","timestamp":1767268800000},
            {"id":"0b7f7a1e-2c3d-4e5f-8a9b-1c2d3e4f5a6b","type":"withdraw","amount":20.5,
             "date":"1/1/2026, 12:01:00 PM","balance":1029.5,"timestamp":1767268860000}
        ]"#;

        let records: Vec<TransactionRecord> = serde_json::from_str(raw).unwrap();

        assert_eq!(records[0].tx_type, TxType::Deposit);
        assert_eq!(records[0].bonus, Money::units(50));
        assert_eq!(records[0].created_at.timestamp_millis(), 1_767_268_800_000);
        assert_eq!(records[1].tx_type, TxType::Withdrawal);
        assert_eq!(records[1].bonus, Money::zero());
        assert_eq!(records[1].resulting_balance, Money::new(10_295_000));
    }

    #[test]
    fn writes_canonical_field_names() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let rec = TransactionRecord::new(
            TxType::Withdrawal,
            Money::units(5),
            Money::zero(),
            Money::units(10),
            at,
        );
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["type"], "withdrawal");
        assert_eq!(json["amount"], "5.0000");
        assert_eq!(json["balance"], "10.0000");
        assert_eq!(json["timestamp"], at.timestamp_millis());
    }
}
