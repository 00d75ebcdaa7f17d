/// Reading and writing picoCAD documents on disk
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use picocad_core::Model;
use tracing::{debug, info};

use crate::config::OutputTarget;

const NONCE_MARKER: &str = "_picocadet_";

pub fn ensure_txt(path: &Path) -> Result<()> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
        bail!("{} must be a .txt file", path.display());
    }
    Ok(())
}

pub fn load_model(path: &Path) -> Result<Model> {
    ensure_txt(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let model =
        Model::parse(&text).with_context(|| format!("failed to load {}", path.display()))?;
    debug!(path = %path.display(), meshes = model.meshes.len(), "loaded model");
    Ok(model)
}

/// The first `name_picocadet_N.txt` next to `path` that `exists` rejects.
///
/// A file already carrying the suffix continues counting from its `N + 1`.
pub fn generate_unique_filename<F>(path: &Path, exists: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (base, mut nonce) = match stem.rsplit_once(NONCE_MARKER) {
        Some((base, n)) if !base.is_empty() => match n.parse::<u64>() {
            Ok(n) => (base.to_string(), n + 1),
            Err(_) => (stem.clone(), 0),
        },
        _ => (stem.clone(), 0),
    };

    loop {
        let candidate = path.with_file_name(format!("{base}{NONCE_MARKER}{nonce}.txt"));
        if !exists(&candidate) {
            return candidate;
        }
        nonce += 1;
    }
}

/// Resolve where `target` writes for a model loaded from `input`.
pub fn output_path(input: &Path, target: &OutputTarget) -> Result<PathBuf> {
    let path = match target {
        OutputTarget::Overwrite => input.to_path_buf(),
        OutputTarget::Path(path) => path.clone(),
        OutputTarget::Generated => generate_unique_filename(input, Path::exists),
    };
    ensure_txt(&path)?;
    Ok(path)
}

/// Write `model` to `path`. Saving under a different file renames the
/// model after the file stem so picoCAD saves back to the new file.
pub fn save_model(model: &Model, input: &Path, path: &Path) -> Result<()> {
    let model = if path == input {
        model.clone()
    } else {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        model
            .renamed(&stem)
            .with_context(|| format!("cannot name the model after {}", path.display()))?
    };

    fs::write(path, model.serialize())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), name = %model.name, "wrote model");
    Ok(())
}
