use std::io::{BufWriter, stdout};

use tracing::info;

use crate::{
    common::{clock::SystemClock, config::WalletConfig, error::AppError, outcome::Outcome},
    io::{reader, store::FileStore, writer},
    worker::engine::LedgerEngine,
};

/// Runs a command script against a file-backed wallet and prints the
/// resulting statement.
///
/// Arguments: `<store.json> <commands.csv> [config.json]`.
pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 3 {
        return Err(AppError::MissingArg);
    }
    let store_path = &args[1];
    let commands_path = &args[2];

    let config = match args.get(3) {
        Some(path) => WalletConfig::load(path)?,
        None => WalletConfig::default(),
    };

    let store = FileStore::open(store_path)?;
    let mut engine = LedgerEngine::hydrate(store, SystemClock, &config)?;

    let file = std::fs::File::open(commands_path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut applied = 0usize;
    let mut rejected = 0usize;
    for command in reader::read_commands(&mut reader) {
        let command = command.map_err(AppError::Parse)?;
        match engine.process(command)? {
            Outcome::Applied { .. } => applied += 1,
            Outcome::Rejected(_) => rejected += 1,
            Outcome::EditStarted { .. } | Outcome::DraftUpdated { .. } | Outcome::EditCancelled => {}
        }
    }
    info!(applied, rejected, balance = %engine.balance(), "script finished");

    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    writer::write_statement(writer, engine.transactions())?;

    Ok(())
}
