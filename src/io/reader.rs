use crate::common::event::{TxRef, WalletCommand};
use std::io::Read;
use uuid::Uuid;

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the input headers. `target` is
/// only used by `edit` rows and `amount` is blank for `cancel`.
struct CsvRow {
    action: String,
    target: Option<String>,
    amount: Option<String>,
}

/// Reads wallet commands from a CSV reader.
///
/// Supported headers: `action,target,amount`.
/// Actions are case-insensitive: `deposit`, `withdraw`, `edit`, `cancel`.
/// The edit `target` is a transaction UUID or a 1-based history position.
/// Amounts are passed through as text; whether they are usable is up to the
/// engine.
///
/// # Examples
///
/// ```
/// use wallet_ledger::io::reader::read_commands;
/// use wallet_ledger::common::event::{TxRef, WalletCommand};
/// use csv::ReaderBuilder;
///
/// let data = "action,target,amount\n\
/// deposit,,1000\n\
/// edit,1,500\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let commands: Vec<_> = read_commands(&mut rdr).collect();
///
/// assert!(matches!(commands[0], Ok(WalletCommand::Deposit { .. })));
/// assert!(matches!(
///     commands[1],
///     Ok(WalletCommand::Edit { target: TxRef::Position(1), .. })
/// ));
/// ```
pub fn read_commands<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<WalletCommand, String>> + '_ {
    rdr.deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, res)| {
            let line = i + 2;
            let row = res.map_err(|e| e.to_string())?;
            let action = row.action.trim().to_ascii_lowercase();
            let amount = row.amount.unwrap_or_default();

            match action.as_str() {
                "deposit" => Ok(WalletCommand::Deposit { amount }),
                "withdraw" | "withdrawal" => Ok(WalletCommand::Withdraw { amount }),
                "edit" => {
                    let raw = row
                        .target
                        .filter(|t| !t.trim().is_empty())
                        .ok_or_else(|| format!("edit missing target on line {line}"))?;
                    let target = parse_target(&raw)
                        .ok_or_else(|| format!("invalid edit target {raw} on line {line}"))?;
                    Ok(WalletCommand::Edit { target, amount })
                }
                "cancel" => Ok(WalletCommand::CancelEdit),
                other => Err(format!("unknown action: {other} on line {line}")),
            }
        })
}

fn parse_target(raw: &str) -> Option<TxRef> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return Some(TxRef::Position(n));
    }
    Uuid::parse_str(raw).ok().map(TxRef::Id)
}

#[cfg(test)]
mod tests {
    use super::*;
    // Helper: parse CSV input into collected commands for assertions.
    fn collect_commands(input: &str) -> Vec<Result<WalletCommand, String>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input.as_bytes());
        read_commands(&mut reader).collect()
    }

    #[test]
    fn parses_all_supported_actions() {
        let data = "action,target,amount\n\
Deposit,,1000\nwithdraw,,20.5\nedit,2,30\nedit,6f1c2a56-54d4-4a6e-9b1e-0c8e8f1d2b3a,40\ncancel,,\n";
        let commands = collect_commands(data);

        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            Ok(WalletCommand::Deposit {
                amount: "1000".into()
            })
        );
        assert_eq!(
            commands[1],
            Ok(WalletCommand::Withdraw {
                amount: "20.5".into()
            })
        );
        assert_eq!(
            commands[2],
            Ok(WalletCommand::Edit {
                target: TxRef::Position(2),
                amount: "30".into()
            })
        );
        assert!(matches!(
            commands[3],
            Ok(WalletCommand::Edit {
                target: TxRef::Id(_),
                ..
            })
        ));
        assert_eq!(commands[4], Ok(WalletCommand::CancelEdit));
    }

    #[test]
    fn keeps_unusable_amount_text_for_the_engine() {
        let commands = collect_commands("action,target,amount\ndeposit,,abc\nwithdraw,,\n");
        assert_eq!(
            commands[0],
            Ok(WalletCommand::Deposit {
                amount: "abc".into()
            })
        );
        assert_eq!(
            commands[1],
            Ok(WalletCommand::Withdraw {
                amount: String::new()
            })
        );
    }

    #[test]
    fn reports_missing_or_bad_edit_target() {
        let commands = collect_commands("action,target,amount\nedit,,10\nedit,first,10\n");
        assert_eq!(
            commands[0],
            Err("edit missing target on line 2".to_string())
        );
        assert_eq!(
            commands[1],
            Err("invalid edit target first on line 3".to_string())
        );
    }

    #[test]
    fn reports_unknown_action_error() {
        let commands = collect_commands("action,target,amount\nrefund,,10\n");
        assert_eq!(commands.len(), 1);
        let err = commands.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err, "unknown action: refund on line 2");
    }
}
