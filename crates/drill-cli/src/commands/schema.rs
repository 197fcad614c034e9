use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `drill schema`. Tables make no sense for a schema, so they fall
/// back to pretty JSON.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = drill_store::document_schema();
    let format = match flags.format {
        OutputFormat::Table => OutputFormat::Json,
        other => other,
    };
    output(&schema, format)
}
