use tickdrop_core::{CompanyDirectory, CompanyRecord};

use super::print_json;
use crate::cli::CompaniesArgs;
use crate::error::CliError;

pub fn run(args: &CompaniesArgs, pretty: bool) -> Result<(), CliError> {
    let directory = CompanyDirectory::builtin();

    let records: Vec<&CompanyRecord> = directory
        .iter()
        .filter(|record| {
            args.sector
                .as_deref()
                .is_none_or(|sector| record.sector.eq_ignore_ascii_case(sector))
        })
        .filter(|record| {
            args.tier
                .is_none_or(|tier| record.cap_tier == tier.into())
        })
        .collect();

    print_json(&records, pretty)
}
