/// Domain model for picoCAD documents: models, meshes and faces
use nalgebra::Vector3;

use crate::error::ValidationError;
use crate::texture::Texture;

/// A point or offset in 3D space.
pub type Vec3 = Vector3<f64>;

pub const DEFAULT_BACKGROUND_INDEX: u8 = 1;
pub const DEFAULT_ALPHA_INDEX: u8 = 0;
pub const DEFAULT_ZOOM_LEVEL: f64 = 16.0;

/// The header line is `;` separated and ends at a line break.
const MODEL_NAME_FORBIDDEN: &[char] = &[';', '\n', '\r'];
/// Mesh names are written inside `'...'` with no escapes.
const MESH_NAME_FORBIDDEN: &[char] = &['\''];

fn check_chars(name: &str, forbidden: &[char]) -> Result<(), ValidationError> {
    match name.chars().find(|c| forbidden.contains(c)) {
        Some(found) => Err(ValidationError::InvalidName {
            name: name.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

/// Non-blank and writable into the header line.
pub fn validate_model_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    check_chars(name, MODEL_NAME_FORBIDDEN)
}

pub fn validate_mesh_name(name: &str) -> Result<(), ValidationError> {
    check_chars(name, MESH_NAME_FORBIDDEN)
}

/// Render flags of a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceFlags {
    pub shading: bool,
    pub texture: bool,
    pub double_sided: bool,
    pub render_first: bool,
}

impl Default for FaceFlags {
    fn default() -> Self {
        Self {
            shading: true,
            texture: true,
            double_sided: false,
            render_first: false,
        }
    }
}

/// A polygon referencing vertices of its mesh by 0-based index.
///
/// Winding order is significant. `uvs` holds one (u, v) pair per index.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub indices: Vec<usize>,
    pub color_index: u8,
    pub uvs: Vec<(f64, f64)>,
    pub flags: FaceFlags,
}

impl Face {
    pub fn new(indices: Vec<usize>, color_index: u8, uvs: Vec<(f64, f64)>) -> Self {
        Self {
            indices,
            color_index,
            uvs,
            flags: FaceFlags::default(),
        }
    }

    pub fn with_flags(self, flags: FaceFlags) -> Self {
        Self { flags, ..self }
    }
}

/// A named sub-mesh. Vertices are in mesh-local space; `pos` moves them
/// into world space. `rot` is kept for the file but never applied here.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub pos: Vec3,
    pub rot: Vec3,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// An empty mesh at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pos: Vec3::zeros(),
            rot: Vec3::zeros(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A whole picoCAD document.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub background_index: u8,
    pub alpha_index: u8,
    pub zoom_level: f64,
    pub texture: Texture,
}

impl Model {
    /// A model with default view settings and a blank texture.
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_model_name(&name)?;
        Ok(Self {
            name,
            meshes,
            background_index: DEFAULT_BACKGROUND_INDEX,
            alpha_index: DEFAULT_ALPHA_INDEX,
            zoom_level: DEFAULT_ZOOM_LEVEL,
            texture: Texture::empty(),
        })
    }

    /// A model with no meshes. Surrounding whitespace is dropped from the name.
    pub fn empty(name: &str) -> Result<Self, ValidationError> {
        Self::new(name.trim(), Vec::new())
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(Mesh::face_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }
}
