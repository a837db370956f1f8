use tickdrop_core::CompanyDirectory;

use super::print_json;
use crate::error::CliError;

pub fn run(pretty: bool) -> Result<(), CliError> {
    let directory = CompanyDirectory::builtin();
    print_json(&directory.sector_distribution(), pretty)
}
