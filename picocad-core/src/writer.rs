/// Serialization of a [`Model`] back into picoCAD document text
use std::fmt::Write;

use crate::geometry::{Face, Mesh, Model, Vec3};
use crate::texture::encode_texture;

/// Render a number the way picoCAD writes it: shortest round-trip decimal
/// and no negative zero. Never uses exponent notation, which the table
/// reader does not accept.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    n.to_string()
}

fn write_vec3(out: &mut String, v: &Vec3) {
    let _ = write!(
        out,
        "{{{},{},{}}}",
        format_number(v.x),
        format_number(v.y),
        format_number(v.z)
    );
}

fn write_face(out: &mut String, face: &Face) {
    out.push_str("  {");
    let indices: Vec<String> = face.indices.iter().map(|i| (i + 1).to_string()).collect();
    out.push_str(&indices.join(","));
    let _ = write!(out, ", c={}, ", face.color_index);

    if face.flags.double_sided {
        out.push_str("dbl=1, ");
    }
    if !face.flags.shading {
        out.push_str("noshade=1, ");
    }
    if !face.flags.texture {
        out.push_str("notex=1, ");
    }
    if face.flags.render_first {
        out.push_str("prio=1, ");
    }

    let uvs: Vec<String> = face
        .uvs
        .iter()
        .map(|&(u, v)| format!("{},{}", format_number(u), format_number(v)))
        .collect();
    let _ = write!(out, "uv={{{}}} }}", uvs.join(","));
}

fn write_mesh(out: &mut String, mesh: &Mesh) {
    let _ = write!(out, "{{\n name='{}', pos=", mesh.name);
    write_vec3(out, &mesh.pos);
    out.push_str(", rot=");
    write_vec3(out, &mesh.rot);
    out.push_str(",\n");

    out.push_str(" v={\n");
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        write_vec3(out, vertex);
    }
    out.push_str("\n },\n");

    out.push_str(" f={\n");
    for (i, face) in mesh.faces.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        write_face(out, face);
    }
    // picoCAD itself leaves a space after the closing brace
    out.push_str("\n } \n}");
}

/// Render a complete document. Never fails.
pub fn write_model(model: &Model) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "picocad;{};{};{};{}",
        model.name,
        format_number(model.zoom_level),
        model.background_index,
        model.alpha_index
    );

    out.push_str("{\n");
    for (i, mesh) in model.meshes.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_mesh(&mut out, mesh);
    }
    out.push_str("\n}%\n");

    out.push_str(&encode_texture(&model.texture));
    out
}

impl Model {
    pub fn serialize(&self) -> String {
        write_model(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FaceFlags;
    use crate::transform::Axis;
    use crate::texture::{TEXTURE_HEIGHT, TEXTURE_WIDTH};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e-6), "0.000001");
        assert_eq!(format_number(1.5e-7), "0.00000015");
        assert_eq!(format_number(-4.592425496802574e-17), "-0.00000000000000004592425496802574");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(123456789.0), "123456789");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    fn sample_mesh() -> Mesh {
        let mut mesh = Mesh::new("plane");
        mesh.pos = Vec3::new(0.0, -1.5, 2.0);
        mesh.vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 1.0),
        ];
        mesh.faces = vec![
            Face::new(vec![0, 1, 2], 7, vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]),
            Face::new(vec![2, 1, 0], 0, vec![(0.0, 0.0), (0.25, 0.0), (0.5, 0.25)]).with_flags(
                FaceFlags {
                    shading: false,
                    texture: false,
                    double_sided: true,
                    render_first: true,
                },
            ),
        ];
        mesh
    }

    #[test]
    fn test_mesh_block() {
        let mut out = String::new();
        write_mesh(&mut out, &sample_mesh());
        let expected = "{\n name='plane', pos={0,-1.5,2}, rot={0,0,0},\n v={\n  {0,0,0},\n  {1,0,0},\n  {0.5,0,1}\n },\n f={\n  {1,2,3, c=7, uv={0,0,1,0,0.5,1} },\n  {3,2,1, c=0, dbl=1, noshade=1, notex=1, prio=1, uv={0,0,0.25,0,0.5,0.25} }\n } \n}";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_document_layout() {
        let model = Model::new("demo", vec![sample_mesh(), sample_mesh()]).unwrap();
        let text = model.serialize();

        assert!(text.starts_with("picocad;demo;16;1;0\n{\n{\n name='plane'"));
        assert!(text.contains(" } \n},{\n name='plane'"));
        assert!(text.contains("\n } \n}\n}%\n"));

        let texture = text.split_once("}%\n").unwrap().1;
        let rows: Vec<&str> = texture.split_terminator('\n').collect();
        assert_eq!(rows.len(), TEXTURE_HEIGHT);
        assert!(rows.iter().all(|row| row.len() == TEXTURE_WIDTH));
        assert!(texture.ends_with('\n'));
    }

    #[test]
    fn test_empty_model() {
        let model = Model::empty("nothing").unwrap();
        assert!(model.serialize().starts_with("picocad;nothing;16;1;0\n{\n\n}%\n"));
    }

    #[test]
    fn test_tiny_rotation_residue_reparses() {
        let model = Model::new("spun", vec![crate::shapes::tetrahedron_on_grid()])
            .unwrap()
            .edit_mesh(0, |m| Ok(m.rotate(Axis::Z, 90.0)))
            .unwrap();
        let residue = model.meshes[0].vertices[3].y;
        assert!(residue != 0.0 && residue.abs() < 1e-6);

        let text = model.serialize();
        assert!(text.contains("  {0.75,-0.00000000000000004592425496802574,0}"));
        let parsed = Model::parse(&text).unwrap();
        assert_eq!(parsed, model);
        assert_eq!(parsed.serialize(), text);
    }

    #[test]
    fn test_round_trip() {
        let mut model = Model::new("trip", vec![sample_mesh()]).unwrap();
        model.zoom_level = 9.75;
        model.background_index = 12;
        model.alpha_index = 3;

        let text = model.serialize();
        let parsed = Model::parse(&text).unwrap();
        assert_eq!(parsed, model);
        assert_eq!(parsed.serialize(), text);
    }
}
