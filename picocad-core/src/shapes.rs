/// Canned primitive meshes that can be added to a model
use crate::geometry::{Face, Mesh, Vec3};

/// A primitive with its display name and a short lookup key.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub key: &'static str,
    pub name: &'static str,
    pub mesh: Mesh,
}

const TETRAHEDRON_COLOR: u8 = 11;

fn tetrahedron(vertices: [Vec3; 4]) -> Mesh {
    let face = |indices: [usize; 3], uvs: [(f64, f64); 3]| {
        Face::new(indices.to_vec(), TETRAHEDRON_COLOR, uvs.to_vec())
    };

    let mut mesh = Mesh::new("tetrahedron");
    mesh.vertices = vertices.to_vec();
    mesh.faces = vec![
        face([2, 0, 1], [(3.0, 0.0), (2.0, 1.25), (1.0, 0.0)]),
        face([3, 1, 0], [(8.0, 1.25), (9.0, 0.0), (7.0, 0.0)]),
        face([3, 0, 2], [(6.0, 1.25), (5.0, 0.0), (7.0, 0.0)]),
        face([1, 3, 2], [(5.0, 0.0), (4.0, 1.25), (3.0, 0.0)]),
    ];
    mesh
}

/// Tetrahedron with its corners snapped to the quarter grid.
pub fn tetrahedron_on_grid() -> Mesh {
    tetrahedron([
        Vec3::new(1.0, 0.5, 0.0),
        Vec3::new(-0.5, 0.5, 0.75),
        Vec3::new(-0.5, 0.5, -0.75),
        Vec3::new(0.0, -0.75, 0.0),
    ])
}

/// Regular tetrahedron, so corners fall off the grid.
pub fn tetrahedron_off_grid() -> Mesh {
    tetrahedron([
        Vec3::new(0.943, 0.5, 0.0),
        Vec3::new(-0.471, 0.5, 0.816),
        Vec3::new(-0.471, 0.5, -0.816),
        Vec3::new(0.0, -0.8329, 0.0),
    ])
}

/// Look a shape up by its key.
pub fn find_shape(key: &str) -> Option<Shape> {
    shapes().into_iter().find(|shape| shape.key == key)
}

pub fn shapes() -> Vec<Shape> {
    vec![
        Shape {
            key: "tetrahedron-on-grid",
            name: "Tetrahedron (on grid)",
            mesh: tetrahedron_on_grid(),
        },
        Shape {
            key: "tetrahedron-off-grid",
            name: "Tetrahedron (off grid)",
            mesh: tetrahedron_off_grid(),
        },
    ]
}
