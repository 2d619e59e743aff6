use chrono::{DateTime, Utc};

use crate::{
    common::{error::Rejection, money::Money, outcome::Outcome},
    domain::{
        ledger::Ledger,
        transaction::{TransactionRecord, TxType},
    },
};

pub fn handle(ledger: &mut Ledger, amount: Money, now: DateTime<Utc>) -> Outcome {
    if !amount.is_positive() {
        return Rejection::InvalidAmount.into();
    }

    let Some(new_balance) = apply_withdrawal(ledger.balance, amount) else {
        return Rejection::InsufficientFunds {
            requested: amount,
            available: ledger.balance,
        }
        .into();
    };

    let record = TransactionRecord::new(TxType::Withdrawal, amount, Money::zero(), new_balance, now);
    let tx = record.id;
    ledger.push(record);

    Outcome::Applied {
        tx,
        balance: new_balance,
    }
}

fn apply_withdrawal(balance: Money, amount: Money) -> Option<Money> {
    if balance >= amount {
        Some(balance - amount)
    } else {
        None
    }
}
