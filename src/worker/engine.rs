use std::str::FromStr;

use chrono::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    common::{
        clock::Clock,
        config::WalletConfig,
        error::{AppError, Rejection},
        event::{TxRef, WalletCommand},
        money::Money,
        outcome::Outcome,
    },
    domain::{bonus::BonusPolicy, ledger::Ledger, transaction::TransactionRecord},
    io::{snapshot, store::KeyValueStore},
    worker::{
        handlers::{deposit, edit, withdrawal},
        session::EditSession,
    },
};

/// The wallet: owns the ledger, writes it back to the store after every
/// change and tracks the edit session.
///
/// Amount arguments are the raw text from an input field. Text that is not a
/// positive number is rejected, never an error; `Err` is reserved for a store
/// that refused the write, in which case the ledger is left as it was before
/// the call.
pub struct LedgerEngine<S: KeyValueStore, C: Clock> {
    ledger: Ledger,
    store: S,
    clock: C,
    policy: BonusPolicy,
    edit_window: Duration,
    session: EditSession,
}

impl<S: KeyValueStore, C: Clock> LedgerEngine<S, C> {
    /// Loads the ledger from `store`.
    pub fn hydrate(store: S, clock: C, config: &WalletConfig) -> Result<Self, AppError> {
        let ledger = snapshot::load_ledger(&store)?;
        info!(
            balance = %ledger.balance,
            transactions = ledger.txs.len(),
            "wallet loaded"
        );
        Ok(Self {
            ledger,
            store,
            clock,
            policy: BonusPolicy::new(config.bonus_tiers.clone()),
            edit_window: config.edit_window(),
            session: EditSession::Viewing,
        })
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        self.ledger.transactions()
    }

    pub fn transaction(&self, id: Uuid) -> Option<&TransactionRecord> {
        self.ledger.get(id)
    }

    pub fn total_bonus(&self) -> Money {
        self.ledger.total_bonus()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn editing(&self) -> &EditSession {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn can_edit(&self, id: Uuid) -> bool {
        self.ledger
            .get(id)
            .is_some_and(|t| edit::can_edit(t.created_at, self.clock.now(), self.edit_window))
    }

    pub fn deposit(&mut self, input: &str) -> Result<Outcome, AppError> {
        let Some(amount) = parse_amount(input) else {
            return Ok(self.reject("deposit", Rejection::InvalidAmount));
        };
        let before = self.ledger.clone();
        let now = self.clock.now();
        let outcome = deposit::handle(&mut self.ledger, &self.policy, amount, now);
        self.commit("deposit", before, outcome)
    }

    pub fn withdraw(&mut self, input: &str) -> Result<Outcome, AppError> {
        let Some(amount) = parse_amount(input) else {
            return Ok(self.reject("withdraw", Rejection::InvalidAmount));
        };
        let before = self.ledger.clone();
        let now = self.clock.now();
        let outcome = withdrawal::handle(&mut self.ledger, amount, now);
        self.commit("withdraw", before, outcome)
    }

    /// Replaces the amount of an existing transaction.
    pub fn edit_transaction(&mut self, target: TxRef, input: &str) -> Result<Outcome, AppError> {
        let Some(index) = self.ledger.resolve(target) else {
            return Ok(self.reject("edit", Rejection::TransactionNotFound));
        };
        let Some(amount) = parse_amount(input) else {
            return Ok(self.reject("edit", Rejection::InvalidAmount));
        };
        let before = self.ledger.clone();
        let now = self.clock.now();
        let outcome = edit::handle(
            &mut self.ledger,
            &self.policy,
            index,
            amount,
            now,
            self.edit_window,
        );
        self.commit("edit", before, outcome)
    }

    /// Opens the edit session for `id`, seeding the draft with its current
    /// amount. Replaces any edit already in progress.
    pub fn start_edit(&mut self, id: Uuid) -> Outcome {
        let Some(tx) = self.ledger.get(id) else {
            return self.reject("start edit", Rejection::TransactionNotFound);
        };
        if !edit::can_edit(tx.created_at, self.clock.now(), self.edit_window) {
            return self.reject("start edit", Rejection::EditWindowExpired);
        }
        let draft = tx.amount.to_string_4dp();
        self.session = EditSession::Editing {
            tx: id,
            draft: draft.clone(),
        };
        debug!(tx = %id, "edit started");
        Outcome::EditStarted { tx: id, draft }
    }

    /// Replaces the draft text. Validation waits for `save_edit`.
    pub fn set_draft(&mut self, text: impl Into<String>) -> Outcome {
        let EditSession::Editing { tx, draft } = &mut self.session else {
            return self.reject("set draft", Rejection::NoEditInProgress);
        };
        *draft = text.into();
        Outcome::DraftUpdated {
            tx: *tx,
            draft: draft.clone(),
        }
    }

    /// Applies the draft to the transaction being edited. The session closes
    /// only when the edit is applied; a rejected draft can be corrected and
    /// saved again.
    pub fn save_edit(&mut self) -> Result<Outcome, AppError> {
        let EditSession::Editing { tx, draft } = self.session.clone() else {
            return Ok(self.reject("save edit", Rejection::NoEditInProgress));
        };
        let outcome = self.edit_transaction(TxRef::Id(tx), &draft)?;
        if outcome.is_applied() {
            self.session = EditSession::Viewing;
        }
        Ok(outcome)
    }

    pub fn cancel_edit(&mut self) -> Outcome {
        if let Some(tx) = self.session.target() {
            debug!(tx = %tx, "edit cancelled");
        }
        self.session = EditSession::Viewing;
        Outcome::EditCancelled
    }

    pub fn process(&mut self, command: WalletCommand) -> Result<Outcome, AppError> {
        match command {
            WalletCommand::Deposit { amount } => self.deposit(&amount),
            WalletCommand::Withdraw { amount } => self.withdraw(&amount),
            WalletCommand::Edit { target, amount } => self.edit_transaction(target, &amount),
            WalletCommand::CancelEdit => Ok(self.cancel_edit()),
        }
    }

    fn reject(&self, op: &str, reason: Rejection) -> Outcome {
        debug!(op, %reason, "rejected");
        Outcome::Rejected(reason)
    }

    fn commit(&mut self, op: &str, before: Ledger, outcome: Outcome) -> Result<Outcome, AppError> {
        match &outcome {
            Outcome::Applied { tx, balance } => {
                if let Err(e) = snapshot::save_ledger(&mut self.store, &self.ledger) {
                    self.ledger = before;
                    return Err(e.into());
                }
                info!(op, tx = %tx, balance = %balance, "applied");
            }
            Outcome::Rejected(reason) => {
                debug!(op, %reason, "rejected");
            }
            Outcome::EditStarted { .. } | Outcome::DraftUpdated { .. } | Outcome::EditCancelled => {}
        }
        Ok(outcome)
    }
}

/// Reads an amount the way the wallet form does: surrounding whitespace is
/// ignored, anything that is not a decimal number yields `None`.
pub fn parse_amount(input: &str) -> Option<Money> {
    Money::from_str(input).ok()
}
