use serde_json::Value;

use tickdrop_core::{CompanyDirectory, QuoteClient};
use tickdrop_pipeline::{handle, ExecutionContext, Orchestrator, PipelineConfig};
use tickdrop_store::BatchWriter;

use super::print_json;
use crate::error::CliError;

pub async fn run(pretty: bool) -> Result<(), CliError> {
    let config = PipelineConfig::from_env()?;

    let client = QuoteClient::new(config.api_key.clone());
    let directory = CompanyDirectory::builtin();
    let writer = BatchWriter::s3(&config.bucket)?;
    let orchestrator = Orchestrator::new(client, directory, writer);

    let context = ExecutionContext::local();
    let response = handle(&orchestrator, &Value::Null, &context).await?;

    let summary: Value = serde_json::from_str(&response.body)?;
    print_json(&summary, pretty)
}
