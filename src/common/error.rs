use crate::common::money::Money;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing arguments. usage: wallet <store.json> <commands.csv> [config.json]")]
    MissingArg,
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Failures of the key-value store backing the ledger.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("store file is corrupt: {0}")]
    Corrupt(String),
}

/// Why an operation was refused. A rejected operation leaves the ledger and
/// the store untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },
    #[error("transaction not found")]
    TransactionNotFound,
    #[error("edit window has expired")]
    EditWindowExpired,
    #[error("amount is too large for the wallet balance")]
    AmountTooLarge,
    #[error("edit would leave a negative balance")]
    WouldOverdraw,
    #[error("no edit in progress")]
    NoEditInProgress,
}
