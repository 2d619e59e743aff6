use std::process::ExitCode;

fn main() -> ExitCode {
    // stdout carries the statement, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match wallet_ledger::app::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
