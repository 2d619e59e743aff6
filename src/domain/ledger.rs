use uuid::Uuid;

use crate::{
    common::{event::TxRef, money::Money},
    domain::transaction::TransactionRecord,
};

/// Balance plus the ordered history that produced it. Insertion order is
/// creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub balance: Money,
    pub txs: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            balance: Money::zero(),
            txs: Vec::new(),
        }
    }

    pub fn from_parts(balance: Money, txs: Vec<TransactionRecord>) -> Self {
        Self { balance, txs }
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.txs
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.txs.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&TransactionRecord> {
        self.txs.iter().find(|t| t.id == id)
    }

    /// Resolves a reference to an index into `txs`.
    pub fn resolve(&self, target: TxRef) -> Option<usize> {
        match target {
            TxRef::Id(id) => self.position_of(id),
            TxRef::Position(n) if n >= 1 && n <= self.txs.len() => Some(n - 1),
            TxRef::Position(_) => None,
        }
    }

    pub fn push(&mut self, record: TransactionRecord) {
        self.balance = record.resulting_balance;
        self.txs.push(record);
    }

    pub fn total_bonus(&self) -> Money {
        self.txs.iter().map(|t| t.bonus).sum()
    }

    /// Returns the index of the first record whose stored resulting balance
    /// disagrees with the running total, or `None` when history and balance
    /// are consistent.
    pub fn verify_running_totals(&self) -> Option<usize> {
        let mut running = Money::zero();
        for (i, tx) in self.txs.iter().enumerate() {
            running += tx.net_effect();
            if tx.resulting_balance != running {
                return Some(i);
            }
        }
        if running != self.balance {
            return Some(self.txs.len());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::transaction::TxType;

    fn record(tx_type: TxType, amount: i64, bonus: i64, balance: i64) -> TransactionRecord {
        TransactionRecord::new(
            tx_type,
            Money::units(amount),
            Money::units(bonus),
            Money::units(balance),
            Utc::now(),
        )
    }

    #[test]
    fn push_tracks_resulting_balance() {
        let mut ledger = Ledger::new();
        ledger.push(record(TxType::Deposit, 500, 20, 520));
        ledger.push(record(TxType::Withdrawal, 20, 0, 500));

        assert_eq!(ledger.balance, Money::units(500));
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(ledger.total_bonus(), Money::units(20));
        assert_eq!(ledger.verify_running_totals(), None);
    }

    #[test]
    fn resolve_by_id_and_position() {
        let mut ledger = Ledger::new();
        ledger.push(record(TxType::Deposit, 10, 0, 10));
        ledger.push(record(TxType::Deposit, 10, 0, 20));
        let second = ledger.txs[1].id;

        assert_eq!(ledger.resolve(TxRef::Id(second)), Some(1));
        assert_eq!(ledger.resolve(TxRef::Position(1)), Some(0));
        assert_eq!(ledger.resolve(TxRef::Position(0)), None);
        assert_eq!(ledger.resolve(TxRef::Position(3)), None);
        assert_eq!(ledger.resolve(TxRef::Id(Uuid::new_v4())), None);
    }

    #[test]
    fn verify_flags_stale_running_total() {
        let ledger = Ledger::from_parts(
            Money::units(30),
            vec![
                record(TxType::Deposit, 10, 0, 10),
                record(TxType::Deposit, 10, 0, 25),
            ],
        );
        assert_eq!(ledger.verify_running_totals(), Some(1));
    }

    #[test]
    fn verify_flags_balance_mismatch() {
        let ledger = Ledger::from_parts(Money::units(99), vec![record(TxType::Deposit, 10, 0, 10)]);
        assert_eq!(ledger.verify_running_totals(), Some(1));
    }
}
