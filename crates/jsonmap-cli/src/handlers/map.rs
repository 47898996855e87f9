//! Map command handler

use super::utils::{load_template, read_document};
use crate::cli::MapArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{render, OutputWriter};
use tracing::{debug, info, instrument};

/// Handle the map command
#[instrument(skip(config, output), fields(template = %args.template, input = %args.input.display()))]
pub async fn handle_map(args: MapArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("map_command", &args.template);

    let (template_path, template) = load_template(&args.template, config)?;
    debug!(template = %template_path.display(), "Template loaded");

    let source = read_document(&args.input)?;

    let mapped = {
        let _mapping_timer = Timer::new("mapping");
        jsonmap_core::map(&source, &template).await?
    };
    info!(fields = template.len(), "Mapping completed");

    let format = args.format.unwrap_or_else(|| config.output_format());
    let pretty = args.pretty || config.output.pretty;
    let rendered = render(&mapped, format, pretty)?;

    match args.save_to {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", rendered.trim_end()))?;
            output.success(&format!("✓ Saved mapped document to {}", path.display()))?;
        }
        None => output.data(&rendered)?,
    }

    Ok(())
}
