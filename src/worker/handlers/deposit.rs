use chrono::{DateTime, Utc};

use crate::{
    common::{error::Rejection, money::Money, outcome::Outcome},
    domain::{
        bonus::BonusPolicy,
        ledger::Ledger,
        transaction::{TransactionRecord, TxType},
    },
};

pub fn handle(
    ledger: &mut Ledger,
    policy: &BonusPolicy,
    amount: Money,
    now: DateTime<Utc>,
) -> Outcome {
    if !amount.is_positive() {
        return Rejection::InvalidAmount.into();
    }

    let bonus = policy.compute_bonus(amount);
    let Some(new_balance) = apply_deposit(ledger.balance, amount, bonus) else {
        return Rejection::AmountTooLarge.into();
    };

    let record = TransactionRecord::new(TxType::Deposit, amount, bonus, new_balance, now);
    let tx = record.id;
    ledger.push(record);

    Outcome::Applied {
        tx,
        balance: new_balance,
    }
}

fn apply_deposit(balance: Money, amount: Money, bonus: Money) -> Option<Money> {
    balance.checked_add(amount)?.checked_add(bonus)
}
