/// Applies one edit command to a loaded model
use anyhow::{Context, Result};
use picocad_core::{FaceFlags, Model};
use tracing::{debug, info};

use crate::config::Command;
use crate::files::load_model;

/// Run `command` against `model` and return the edited copy. `threshold`
/// is the overlap distance for `merge-overlapping`.
pub fn apply(model: &Model, command: &Command, threshold: f64) -> Result<Model> {
    let edited = match command {
        Command::Info => model.clone(),
        Command::Recenter { mesh } => model.edit_mesh(*mesh, |m| m.recenter())?,
        Command::Flip { mesh, axis } => model.edit_mesh(*mesh, |m| Ok(m.flip(*axis)))?,
        Command::Rotate { mesh, axis, degrees } => {
            model.edit_mesh(*mesh, |m| Ok(m.rotate(*axis, *degrees)))?
        }
        Command::Merge { into, from } => model.merge_meshes(*into, from)?,
        Command::MergeOverlapping => {
            let before = model.vertex_count();
            let merged = model.merge_overlapping_vertices(threshold);
            info!(removed = before - merged.vertex_count(), "merged overlapping vertices");
            merged
        }
        Command::Prune => {
            info!(removed = model.count_unused_vertices(), "deleting unused vertices");
            model.without_unused_vertices()
        }
        Command::Round { mesh, multiple } => {
            let mut rounded = model.clone();
            for &index in mesh {
                rounded = rounded.edit_mesh(index, |m| m.round_vertices(*multiple))?;
            }
            rounded
        }
        Command::Rename { mesh, name } => {
            let renamed = model.mesh(*mesh)?.renamed(name)?;
            model.with_mesh(*mesh, renamed)?
        }
        Command::FaceProps {
            mesh,
            double_sided,
            no_shading,
            no_texture,
            render_first,
        } => {
            let flags = FaceFlags {
                shading: !no_shading,
                texture: !no_texture,
                double_sided: *double_sided,
                render_first: *render_first,
            };
            model.edit_mesh(*mesh, |m| Ok(m.with_face_flags(flags)))?
        }
        Command::CopyUvs { mesh, face, to } => {
            model.edit_mesh(*mesh, |m| m.copy_uvs(*face, to))?
        }
        Command::Import { from, mesh, merge } => {
            let other = load_model(from)?;
            model
                .import_meshes(&other, mesh, *merge)
                .with_context(|| format!("cannot import from {}", from.display()))?
        }
        Command::AddShape { shape } => model.with_added_mesh(shape.mesh.clone()),
    };

    debug!(?command, meshes = edited.meshes.len(), "applied command");
    Ok(edited)
}
