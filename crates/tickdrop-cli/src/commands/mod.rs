mod companies;
mod run;
mod sectors;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Run => run::run(cli.pretty).await,
        Command::Companies(args) => companies::run(args, cli.pretty),
        Command::Sectors => sectors::run(cli.pretty),
    }
}

/// Serialize a value to stdout, pretty or compact.
pub(crate) fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
