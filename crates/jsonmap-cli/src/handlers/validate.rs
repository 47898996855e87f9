//! Validate command handler

use super::utils::load_template;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::{instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(template = %args.template))]
pub async fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let (path, template) = load_template(&args.template, config)?;
    output.info(&format!("Validating template: {}", path.display()))?;

    if let Err(err) = template.validate() {
        warn!(error = %err, "Template validation failed");
        output.warning("✗ Template validation failed")?;
        return Err(err.into());
    }

    output.success(&format!("✓ Template is valid ({} fields)", template.len()))?;
    Ok(())
}
