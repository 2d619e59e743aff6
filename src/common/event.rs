use uuid::Uuid;

/// Identifies the transaction an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxRef {
    Id(Uuid),
    /// 1-based position in the history.
    Position(usize),
}

/// Represents a wallet command that is sent from the reader to the engine for processing.
///
/// Amounts stay as the raw text the user typed; the engine decides whether
/// they are usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletCommand {
    Deposit { amount: String },
    Withdraw { amount: String },
    Edit { target: TxRef, amount: String },
    CancelEdit,
}
