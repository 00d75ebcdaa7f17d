/// Editing operations over meshes and models
///
/// Every operation borrows its input and returns a new value; nothing here
/// mutates a caller's mesh or model. Face indices are assumed to be in
/// bounds, which the decoder guarantees for parsed documents.
use std::collections::BTreeSet;

use crate::error::{GeometryError, ValidationError};
use crate::geometry::{
    validate_mesh_name, validate_model_name, Face, FaceFlags, Mesh, Model, Vec3,
};
use crate::transform::{Axis, Transform};

/// Default closeness used when merging or reporting overlapping vertices.
pub const DEFAULT_CLOSENESS_THRESHOLD: f64 = 0.0001;

/// True when every coordinate differs by less than `threshold`.
///
/// This is a per-axis test, not a Euclidean radius: points up to
/// `threshold * sqrt(3)` apart can count as close.
pub fn is_close(a: &Vec3, b: &Vec3, threshold: f64) -> bool {
    (a - b).iter().all(|d| d.abs() < threshold)
}

/// Every face index must be in bounds of `remap`.
fn remap_faces(faces: &[Face], remap: &[usize]) -> Vec<Face> {
    faces
        .iter()
        .map(|face| Face {
            indices: face.indices.iter().map(|&i| remap[i]).collect(),
            ..face.clone()
        })
        .collect()
}

impl Mesh {
    pub fn avg_local_vertex_position(&self) -> Result<Vec3, GeometryError> {
        if self.vertices.is_empty() {
            return Err(GeometryError::EmptyMesh {
                name: self.name.clone(),
            });
        }
        let sum = self.vertices.iter().fold(Vec3::zeros(), |acc, v| acc + v);
        Ok(sum / self.vertices.len() as f64)
    }

    pub fn avg_world_vertex_position(&self) -> Result<Vec3, GeometryError> {
        let local = self.avg_local_vertex_position()?;
        Ok(self.to_world(&local))
    }

    /// Move `pos` to the mean vertex position, keeping world positions.
    pub fn recenter(&self) -> Result<Mesh, GeometryError> {
        let center = self.avg_world_vertex_position()?;
        Ok(Mesh {
            pos: center,
            vertices: self
                .vertices
                .iter()
                .map(|v| self.to_world(v) - center)
                .collect(),
            ..self.clone()
        })
    }

    /// Move `pos` to `world_pos`, keeping world positions.
    pub fn move_origin_to_world_position(&self, world_pos: Vec3) -> Mesh {
        let to_world = self.position_matrix();
        let to_local = Transform::translation_matrix(&-world_pos);
        Mesh {
            pos: world_pos,
            vertices: self
                .vertices
                .iter()
                .map(|v| Transform::apply(&to_local, &Transform::apply(&to_world, v)))
                .collect(),
            ..self.clone()
        }
    }

    pub fn move_origin_to_local_position(&self, local_pos: Vec3) -> Mesh {
        self.move_origin_to_world_position(self.to_world(&local_pos))
    }

    /// Mirror across the plane of `axis`. Face winding is reversed so the
    /// faces keep pointing outwards; UVs are left as they are.
    pub fn flip(&self, axis: Axis) -> Mesh {
        let mut mesh = self.clone();
        for vertex in &mut mesh.vertices {
            vertex[axis.index()] = -vertex[axis.index()];
        }
        for face in &mut mesh.faces {
            face.indices.reverse();
        }
        mesh
    }

    /// Rotate vertices about the mesh origin. `rot` is not updated.
    pub fn rotate(&self, axis: Axis, degrees: f64) -> Mesh {
        let rotation = Transform::rotation_matrix(axis, degrees);
        Mesh {
            vertices: self.vertices.iter().map(|v| rotation * v).collect(),
            ..self.clone()
        }
    }

    /// Snap every coordinate to the nearest multiple of `multiple`.
    pub fn round_vertices(&self, multiple: f64) -> Result<Mesh, GeometryError> {
        if !(multiple.is_finite() && multiple > 0.0) {
            return Err(GeometryError::InvalidMultiple(multiple));
        }
        Ok(Mesh {
            vertices: self
                .vertices
                .iter()
                .map(|v| v.map(|c| (c / multiple).round() * multiple))
                .collect(),
            ..self.clone()
        })
    }

    /// Fold each vertex into the earliest kept vertex that is close to it.
    ///
    /// # Panics
    ///
    /// If a face references a vertex index past the end of `vertices`.
    pub fn merge_overlapping_vertices(&self, threshold: f64) -> Mesh {
        let mut vertices: Vec<Vec3> = Vec::new();
        let mut remap = Vec::with_capacity(self.vertices.len());

        for vertex in &self.vertices {
            match vertices.iter().position(|kept| is_close(vertex, kept, threshold)) {
                Some(index) => remap.push(index),
                None => {
                    remap.push(vertices.len());
                    vertices.push(*vertex);
                }
            }
        }

        Mesh {
            faces: remap_faces(&self.faces, &remap),
            vertices,
            ..self.clone()
        }
    }

    /// Pairs of distinct vertices that are close to each other.
    pub fn overlapping_vertices(&self, threshold: f64) -> Vec<(Vec3, Vec3)> {
        let mut pairs = Vec::new();
        for (i, a) in self.vertices.iter().enumerate() {
            for b in &self.vertices[i + 1..] {
                if is_close(a, b, threshold) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }

    /// Indices of vertices no face references.
    pub fn unused_indices(&self) -> BTreeSet<usize> {
        let mut used = vec![false; self.vertices.len()];
        for &index in self.faces.iter().flat_map(|face| &face.indices) {
            if let Some(slot) = used.get_mut(index) {
                *slot = true;
            }
        }
        used.iter()
            .enumerate()
            .filter(|&(_, &is_used)| !is_used)
            .map(|(index, _)| index)
            .collect()
    }

    /// Drop unused vertices, keeping the order of the rest.
    ///
    /// # Panics
    ///
    /// If a face references a vertex index past the end of `vertices`.
    pub fn without_unused_vertices(&self) -> Mesh {
        let unused = self.unused_indices();
        let mut vertices = Vec::with_capacity(self.vertices.len() - unused.len());
        let mut remap = Vec::with_capacity(self.vertices.len());

        for (index, vertex) in self.vertices.iter().enumerate() {
            remap.push(vertices.len());
            if !unused.contains(&index) {
                vertices.push(*vertex);
            }
        }

        Mesh {
            faces: remap_faces(&self.faces, &remap),
            vertices,
            ..self.clone()
        }
    }

    /// Append `from`'s geometry, keeping its world position.
    ///
    /// Name, `pos` and `rot` stay those of `self`. Vertices left unused are
    /// kept; call [`Mesh::without_unused_vertices`] to drop them.
    pub fn merge(&self, from: &Mesh) -> Mesh {
        let offset = self.vertices.len();
        let from_world = from.position_matrix();
        let into_local = self.inverse_position_matrix();

        let mut mesh = self.clone();
        mesh.vertices.extend(
            from.vertices
                .iter()
                .map(|v| Transform::apply(&into_local, &Transform::apply(&from_world, v))),
        );
        mesh.faces.extend(from.faces.iter().map(|face| Face {
            indices: face.indices.iter().map(|i| i + offset).collect(),
            ..face.clone()
        }));
        mesh
    }

    /// Copy the UVs of face `source` onto each of `targets`.
    pub fn copy_uvs(&self, source: usize, targets: &[usize]) -> Result<Mesh, GeometryError> {
        let len = self.faces.len();
        let source_face = self
            .faces
            .get(source)
            .ok_or(GeometryError::FaceOutOfRange { index: source, len })?;

        let mut mesh = self.clone();
        for &target in targets {
            let face = mesh
                .faces
                .get_mut(target)
                .ok_or(GeometryError::FaceOutOfRange { index: target, len })?;
            if face.indices.len() != source_face.indices.len() {
                return Err(GeometryError::VertexCountMismatch {
                    target,
                    expected: source_face.indices.len(),
                    found: face.indices.len(),
                });
            }
            face.uvs = source_face.uvs.clone();
        }
        Ok(mesh)
    }

    /// Give every face the same flags.
    pub fn with_face_flags(&self, flags: FaceFlags) -> Mesh {
        Mesh {
            faces: self
                .faces
                .iter()
                .map(|face| face.clone().with_flags(flags))
                .collect(),
            ..self.clone()
        }
    }

    /// Rename; a blank name keeps the current one.
    pub fn renamed(&self, name: &str) -> Result<Mesh, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(self.clone());
        }
        validate_mesh_name(name)?;
        Ok(Mesh {
            name: name.to_string(),
            ..self.clone()
        })
    }
}

impl Model {
    pub fn mesh(&self, index: usize) -> Result<&Mesh, GeometryError> {
        self.meshes.get(index).ok_or(GeometryError::MeshOutOfRange {
            index,
            len: self.meshes.len(),
        })
    }

    /// Replace the mesh at `index`.
    pub fn with_mesh(&self, index: usize, mesh: Mesh) -> Result<Model, GeometryError> {
        self.mesh(index)?;
        let mut model = self.clone();
        model.meshes[index] = mesh;
        Ok(model)
    }

    /// Apply `edit` to the mesh at `index`.
    pub fn edit_mesh<F>(&self, index: usize, edit: F) -> Result<Model, GeometryError>
    where
        F: FnOnce(&Mesh) -> Result<Mesh, GeometryError>,
    {
        let mesh = edit(self.mesh(index)?)?;
        self.with_mesh(index, mesh)
    }

    pub fn with_added_mesh(&self, mesh: Mesh) -> Model {
        let mut model = self.clone();
        model.meshes.push(mesh);
        model
    }

    pub fn renamed(&self, name: &str) -> Result<Model, ValidationError> {
        let name = name.trim();
        validate_model_name(name)?;
        Ok(Model {
            name: name.to_string(),
            ..self.clone()
        })
    }

    pub fn merge_overlapping_vertices(&self, threshold: f64) -> Model {
        Model {
            meshes: self
                .meshes
                .iter()
                .map(|mesh| mesh.merge_overlapping_vertices(threshold))
                .collect(),
            ..self.clone()
        }
    }

    pub fn find_overlapping_vertices(&self, threshold: f64) -> Vec<(Vec3, Vec3)> {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.overlapping_vertices(threshold))
            .collect()
    }

    pub fn count_unused_vertices(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.unused_indices().len()).sum()
    }

    pub fn without_unused_vertices(&self) -> Model {
        Model {
            meshes: self.meshes.iter().map(Mesh::without_unused_vertices).collect(),
            ..self.clone()
        }
    }

    /// Merge the meshes at `from` into the mesh at `into`, in index order,
    /// then remove them from the model.
    pub fn merge_meshes(&self, into: usize, from: &[usize]) -> Result<Model, GeometryError> {
        let sources = self.selection(from)?;
        if sources.contains(&into) {
            return Err(GeometryError::SelfMerge(into));
        }

        let merged = sources
            .iter()
            .fold(self.mesh(into)?.clone(), |acc, &i| acc.merge(&self.meshes[i]));

        let meshes = self
            .meshes
            .iter()
            .enumerate()
            .filter(|(i, _)| !sources.contains(i))
            .map(|(i, mesh)| if i == into { merged.clone() } else { mesh.clone() })
            .collect();
        Ok(Model {
            meshes,
            ..self.clone()
        })
    }

    /// Append copies of `other`'s meshes at `indices`, optionally merged
    /// into the first selected one.
    pub fn import_meshes(
        &self,
        other: &Model,
        indices: &[usize],
        merge: bool,
    ) -> Result<Model, GeometryError> {
        let selected: Vec<&Mesh> = other
            .selection(indices)?
            .into_iter()
            .map(|i| &other.meshes[i])
            .collect();

        let mut model = self.clone();
        if merge {
            if let Some((first, rest)) = selected.split_first() {
                let merged = rest.iter().fold((*first).clone(), |acc, mesh| acc.merge(mesh));
                model.meshes.push(merged);
            }
        } else {
            model.meshes.extend(selected.into_iter().cloned());
        }
        Ok(model)
    }

    /// Validated, de-duplicated, ascending mesh indices.
    fn selection(&self, indices: &[usize]) -> Result<BTreeSet<usize>, GeometryError> {
        if indices.is_empty() {
            return Err(GeometryError::NothingSelected);
        }
        indices
            .iter()
            .map(|&i| self.mesh(i).map(|_| i))
            .collect()
    }
}
