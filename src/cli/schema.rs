//! `schema` command.

use anyhow::Result;
use clap::Args;

use crate::plugin::AzurePlugin;

/// Print the validation schemas as pretty JSON.
#[derive(Args, Debug, Default)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn execute(self) -> Result<()> {
        let schema = AzurePlugin::new().validation_schema()?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
