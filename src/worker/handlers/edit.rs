use chrono::{DateTime, Duration, Utc};

use crate::{
    common::{error::Rejection, money::Money, outcome::Outcome},
    domain::{bonus::BonusPolicy, ledger::Ledger, transaction::TxType},
};

/// A transaction may be edited while no more than `window` has passed since
/// it was created.
pub fn can_edit(created_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now - created_at <= window
}

/// Changes the amount of the transaction at `index` and shifts the resulting
/// balance of it and every later transaction by the same difference.
pub fn handle(
    ledger: &mut Ledger,
    policy: &BonusPolicy,
    index: usize,
    new_amount: Money,
    now: DateTime<Utc>,
    window: Duration,
) -> Outcome {
    let Some(old) = ledger.txs.get(index) else {
        return Rejection::TransactionNotFound.into();
    };

    if !can_edit(old.created_at, now, window) {
        return Rejection::EditWindowExpired.into();
    }

    if !new_amount.is_positive() {
        return Rejection::InvalidAmount.into();
    }

    let (new_bonus, new_balance) = match old.tx_type {
        TxType::Deposit => {
            let bonus = policy.compute_bonus(new_amount);
            let balance = old
                .amount
                .checked_add(old.bonus)
                .and_then(|credited| ledger.balance.checked_sub(credited))
                .and_then(|b| b.checked_add(new_amount))
                .and_then(|b| b.checked_add(bonus));
            (bonus, balance)
        }
        TxType::Withdrawal => {
            let balance = new_amount
                .checked_sub(old.amount)
                .and_then(|diff| ledger.balance.checked_sub(diff));
            (Money::zero(), balance)
        }
    };
    let Some(new_balance) = new_balance else {
        return Rejection::AmountTooLarge.into();
    };

    // new running totals of the edited entry and everything after it
    let Some(delta) = new_balance.checked_sub(ledger.balance) else {
        return Rejection::AmountTooLarge.into();
    };
    let Some(shifted) = ledger.txs[index..]
        .iter()
        .map(|t| t.resulting_balance.checked_add(delta))
        .collect::<Option<Vec<Money>>>()
    else {
        return Rejection::AmountTooLarge.into();
    };
    if new_balance.is_negative() || shifted.iter().any(Money::is_negative) {
        return Rejection::WouldOverdraw.into();
    }

    let tx = old.id;
    let edited = &mut ledger.txs[index];
    edited.amount = new_amount;
    edited.bonus = new_bonus;
    for (later, total) in ledger.txs[index..].iter_mut().zip(shifted) {
        later.resulting_balance = total;
    }
    ledger.balance = new_balance;

    Outcome::Applied {
        tx,
        balance: new_balance,
    }
}
