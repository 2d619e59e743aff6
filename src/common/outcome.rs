use uuid::Uuid;

use crate::common::{error::Rejection, money::Money};

/// Result of a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The ledger changed. `tx` is the transaction created or edited and
    /// `balance` the ledger total afterwards.
    Applied { tx: Uuid, balance: Money },
    /// Nothing changed.
    Rejected(Rejection),
    /// The edit session changed but the ledger did not.
    EditStarted { tx: Uuid, draft: String },
    DraftUpdated { tx: Uuid, draft: String },
    EditCancelled,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<Rejection> for Outcome {
    fn from(reason: Rejection) -> Self {
        Outcome::Rejected(reason)
    }
}
