/// Terminal front end for editing picoCAD models
use anyhow::Result;
use std::io::stdout;
use tracing::info;

pub mod commands;
pub mod config;
pub mod files;
pub mod listing;

pub use config::{Command, Config, OutputTarget};

/// Load the configured file, print its summary and, for editing commands,
/// apply the edit and save the result.
pub fn run(config: &Config) -> Result<()> {
    let model = files::load_model(&config.file)?;
    info!(
        file = %config.file.display(),
        name = %model.name,
        meshes = model.meshes.len(),
        "model loaded"
    );

    if !config.command.edits() {
        listing::write_summary(&mut stdout(), &model, config.threshold)?;
        return Ok(());
    }

    let edited = commands::apply(&model, &config.command, config.threshold)?;
    let path = files::output_path(&config.file, &config.output_target())?;
    files::save_model(&edited, &config.file, &path)?;

    listing::write_summary(&mut stdout(), &edited, config.threshold)?;
    println!("Wrote file {}", path.display());
    Ok(())
}
