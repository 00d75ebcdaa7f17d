/// Decoding of picoCAD documents into the domain model
///
/// A document is a `picocad;` header line, a Lua table literal holding one
/// table per mesh, a `%` terminator and the texture block.
use crate::error::{DecodeError, PicoError, PicoResult};
use crate::geometry::{Face, FaceFlags, Mesh, Model, Vec3};
use crate::lua::{parse_table, LuaTable, LuaValue};
use crate::texture::{decode_texture, read_line, Texture};

/// Prefix every picoCAD document starts with.
pub const MAGIC: &str = "picocad;";

/// The `picocad;name;zoom;background;alpha` header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub zoom_level: f64,
    pub background_index: u8,
    pub alpha_index: u8,
}

impl Header {
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        let mut fields = line.split(';').skip(1);
        let name = fields
            .next()
            .ok_or_else(|| missing("header.name".into()))?
            .to_string();
        let zoom_level = header_number(fields.next(), "header.zoom_level")?;
        let background_index = header_number(fields.next(), "header.background_index")
            .and_then(|n| palette_index(n, "header.background_index".into()))?;
        let alpha_index = header_number(fields.next(), "header.alpha_index")
            .and_then(|n| palette_index(n, "header.alpha_index".into()))?;

        Ok(Self {
            name,
            zoom_level,
            background_index,
            alpha_index,
        })
    }
}

fn header_number(field: Option<&str>, path: &str) -> Result<f64, DecodeError> {
    let field = field.ok_or_else(|| missing(path.into()))?;
    field.trim().parse().map_err(|_| DecodeError::WrongType {
        path: path.into(),
        expected: "a number",
    })
}

fn missing(path: String) -> DecodeError {
    DecodeError::MissingField { path }
}

fn field<'a>(table: &'a LuaTable, key: &str, path: &str) -> Result<&'a LuaValue, DecodeError> {
    table.get(key).ok_or_else(|| missing(format!("{path}.{key}")))
}

fn table_field<'a>(table: &'a LuaTable, key: &str, path: &str) -> Result<&'a LuaTable, DecodeError> {
    as_table(field(table, key, path)?, format!("{path}.{key}"))
}

fn as_table(value: &LuaValue, path: String) -> Result<&LuaTable, DecodeError> {
    value.as_table().ok_or(DecodeError::WrongType {
        path,
        expected: "a table",
    })
}

fn as_number(value: &LuaValue, path: String) -> Result<f64, DecodeError> {
    value.as_number().ok_or(DecodeError::WrongType {
        path,
        expected: "a number",
    })
}

fn palette_index(value: f64, path: String) -> Result<u8, DecodeError> {
    if value.fract() == 0.0 && (0.0..16.0).contains(&value) {
        Ok(value as u8)
    } else {
        Err(DecodeError::PaletteIndex { path, value })
    }
}

/// First three positional numbers of a table.
fn vec3(table: &LuaTable, path: &str) -> Result<Vec3, DecodeError> {
    let mut coords = [0.0; 3];
    for (i, coord) in coords.iter_mut().enumerate() {
        let value = table
            .array
            .get(i)
            .ok_or_else(|| missing(format!("{path}[{i}]")))?;
        *coord = as_number(value, format!("{path}[{i}]"))?;
    }
    Ok(Vec3::new(coords[0], coords[1], coords[2]))
}

/// A flag key is set only when present with the value 1.
fn flag(table: &LuaTable, key: &str) -> bool {
    table.get(key).and_then(LuaValue::as_number) == Some(1.0)
}

fn decode_face(table: &LuaTable, vertex_count: usize, path: &str) -> Result<Face, DecodeError> {
    let indices = table
        .array
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let path = format!("{path}[{i}]");
            let value = as_number(value, path.clone())?;
            // 1-based in the file
            if value.fract() == 0.0 && value >= 1.0 && value <= vertex_count as f64 {
                Ok(value as usize - 1)
            } else {
                Err(DecodeError::VertexIndex {
                    path,
                    value,
                    len: vertex_count,
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let color_index = palette_index(
        as_number(field(table, "c", path)?, format!("{path}.c"))?,
        format!("{path}.c"),
    )?;

    let flat_uvs = table_field(table, "uv", path)?
        .array
        .iter()
        .enumerate()
        .map(|(i, value)| as_number(value, format!("{path}.uv[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    // A trailing odd coordinate is dropped.
    let uvs = flat_uvs.chunks_exact(2).map(|uv| (uv[0], uv[1])).collect();

    Ok(Face {
        indices,
        color_index,
        uvs,
        flags: FaceFlags {
            shading: !flag(table, "noshade"),
            texture: !flag(table, "notex"),
            double_sided: flag(table, "dbl"),
            render_first: flag(table, "prio"),
        },
    })
}

fn decode_mesh(table: &LuaTable, path: &str) -> Result<Mesh, DecodeError> {
    let name = field(table, "name", path)?
        .as_str()
        .ok_or(DecodeError::WrongType {
            path: format!("{path}.name"),
            expected: "a string",
        })?
        .to_string();
    let pos = vec3(table_field(table, "pos", path)?, &format!("{path}.pos"))?;
    let rot = vec3(table_field(table, "rot", path)?, &format!("{path}.rot"))?;

    let vertices = table_field(table, "v", path)?
        .array
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let path = format!("{path}.v[{i}]");
            vec3(as_table(value, path.clone())?, &path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let faces = table_field(table, "f", path)?
        .array
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let path = format!("{path}.f[{i}]");
            decode_face(as_table(value, path.clone())?, vertices.len(), &path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Mesh {
        name,
        pos,
        rot,
        vertices,
        faces,
    })
}

/// Decode the positional entries of the top-level table as meshes.
pub fn decode_meshes(table: &LuaTable) -> Result<Vec<Mesh>, DecodeError> {
    table
        .array
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let path = format!("meshes[{i}]");
            decode_mesh(as_table(value, path.clone())?, &path)
        })
        .collect()
}

/// Build a model from its header, parsed table and texture.
pub fn decode_model(header: Header, table: &LuaTable, texture: Texture) -> PicoResult<Model> {
    let meshes = decode_meshes(table)?;
    let mut model = Model::new(header.name, meshes)?;
    model.zoom_level = header.zoom_level;
    model.background_index = header.background_index;
    model.alpha_index = header.alpha_index;
    model.texture = texture;
    Ok(model)
}

impl Model {
    /// Parse a complete picoCAD document.
    pub fn parse(text: &str) -> PicoResult<Model> {
        if !text.starts_with(MAGIC) {
            return Err(PicoError::NotPicoCad);
        }

        let (header_line, body) = read_line(text);
        let header = Header::parse(header_line)?;

        let body_offset = text.len() - body.len();
        let (data, texture_text) = body.split_once('%').unwrap_or((body, ""));
        let table = parse_table(data).map_err(|e| e.shifted(body_offset))?;

        // the rest of the `%` line is not texture data
        let (_, texture_text) = read_line(texture_text);
        let texture = decode_texture(texture_text)?;

        decode_model(header, &table, texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseErrorKind, TextureDecodeError, ValidationError};
    use crate::texture::{TEXTURE_HEIGHT, TEXTURE_WIDTH};

    fn texture_block() -> String {
        let mut text = String::new();
        for y in 0..TEXTURE_HEIGHT {
            let digit = char::from_digit((y % 16) as u32, 16).unwrap();
            text.push_str(&digit.to_string().repeat(TEXTURE_WIDTH));
            text.push('\n');
        }
        text
    }

    fn document(meshes: &str) -> String {
        format!("picocad;box;16;1;0\n{{\n{meshes}\n}}%\n{}", texture_block())
    }

    const CUBE_SIDE: &str = "{\n name='side', pos={0,1.5,-2}, rot={0,0,0},\n v={\n  {0,0,0},\n  {1,0,0},\n  {1,1,0},\n  {0,1,0}\n },\n f={\n  {1,2,3,4, c=11, dbl=1, noshade=1, uv={0,0,1,0,1,1,0,1,9} }\n } \n}";

    #[test]
    fn test_header() {
        let header = Header::parse("picocad;my model;12.5;3;15").unwrap();
        assert_eq!(header.name, "my model");
        assert_eq!(header.zoom_level, 12.5);
        assert_eq!(header.background_index, 3);
        assert_eq!(header.alpha_index, 15);
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(
            Header::parse("picocad;m;16;1"),
            Err(DecodeError::MissingField { path: "header.alpha_index".into() })
        );
        assert!(matches!(
            Header::parse("picocad;m;big;1;0"),
            Err(DecodeError::WrongType { .. })
        ));
        assert!(matches!(
            Header::parse("picocad;m;16;16;0"),
            Err(DecodeError::PaletteIndex { .. })
        ));
    }

    #[test]
    fn test_parse_document() {
        let model = Model::parse(&document(CUBE_SIDE)).unwrap();
        assert_eq!(model.name, "box");
        assert_eq!(model.zoom_level, 16.0);
        assert_eq!(model.meshes.len(), 1);

        let mesh = &model.meshes[0];
        assert_eq!(mesh.name, "side");
        assert_eq!(mesh.pos, Vec3::new(0.0, 1.5, -2.0));
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[2], Vec3::new(1.0, 1.0, 0.0));

        let face = &mesh.faces[0];
        assert_eq!(face.indices, vec![0, 1, 2, 3]);
        assert_eq!(face.color_index, 11);
        assert_eq!(face.uvs, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(face.flags.double_sided);
        assert!(!face.flags.shading);
        assert!(face.flags.texture);
        assert!(!face.flags.render_first);

        assert_eq!(model.texture.get(5, 0), Some(0));
        assert_eq!(model.texture.get(5, 17), Some(1));
    }

    #[test]
    fn test_crlf_document() {
        let text = document(CUBE_SIDE).replace('\n', "\r\n");
        let model = Model::parse(&text).unwrap();
        assert_eq!(model.meshes[0].faces.len(), 1);
        assert_eq!(model.texture.get(0, 119), Some(7));
    }

    #[test]
    fn test_not_picocad() {
        assert_eq!(Model::parse("hello"), Err(PicoError::NotPicoCad));
    }

    #[test]
    fn test_parse_error_offsets_are_document_relative() {
        let text = document("{ name=@ }");
        let err = Model::parse(&text).unwrap_err();
        let PicoError::Parse(err) = err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert_eq!(err.kind, ParseErrorKind::UnknownValue(Some('@')));
        assert_eq!(&text[err.offset..err.offset + 1], "@");
    }

    #[test]
    fn test_missing_field() {
        let err = Model::parse(&document("{ name='a', pos={0,0,0}, v={}, f={} }")).unwrap_err();
        assert_eq!(
            err,
            PicoError::Decode(DecodeError::MissingField { path: "meshes[0].rot".into() })
        );
    }

    #[test]
    fn test_face_index_out_of_bounds() {
        let mesh = "{ name='a', pos={0,0,0}, rot={0,0,0}, v={{0,0,0}}, f={{1,2, c=0, uv={}}} }";
        let err = Model::parse(&document(mesh)).unwrap_err();
        assert!(matches!(
            err,
            PicoError::Decode(DecodeError::VertexIndex { ref path, len: 1, .. }) if path == "meshes[0].f[0][1]"
        ));
    }

    #[test]
    fn test_missing_uv() {
        let mesh = "{ name='a', pos={0,0,0}, rot={0,0,0}, v={{0,0,0}}, f={{1, c=0}} }";
        let err = Model::parse(&document(mesh)).unwrap_err();
        assert_eq!(
            err,
            PicoError::Decode(DecodeError::MissingField { path: "meshes[0].f[0].uv".into() })
        );
    }

    #[test]
    fn test_short_texture() {
        let text = format!("picocad;box;16;1;0\n{{\n}}%\n{}", "0".repeat(TEXTURE_WIDTH));
        assert!(matches!(
            Model::parse(&text),
            Err(PicoError::Texture(TextureDecodeError::ShortRow { row: 1, .. }))
        ));
    }

    #[test]
    fn test_empty_name() {
        let text = format!("picocad; ;16;1;0\n{{\n}}%\n{}", texture_block());
        assert_eq!(
            Model::parse(&text),
            Err(PicoError::Validation(ValidationError::EmptyName))
        );
    }
}
