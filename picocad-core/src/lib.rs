/// picoCAD Core Library - Document model, parsing and geometry editing
///
/// This library provides the stateless core for picoCAD tooling: the Lua
/// table reader, the model decoder, the geometry engine and the writer that
/// reproduces picoCAD's own file layout.

pub mod color;
pub mod decode;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod lua;
pub mod shapes;
pub mod texture;
pub mod transform;
pub mod writer;

// Re-export commonly used types
pub use color::{Color, PALETTE};
pub use edit::{is_close, DEFAULT_CLOSENESS_THRESHOLD};
pub use error::{
    DecodeError, GeometryError, ParseError, ParseErrorKind, PicoError, PicoResult,
    TextureDecodeError, UnknownAxis, ValidationError,
};
pub use geometry::{Face, FaceFlags, Mesh, Model, Vec3};
pub use lua::{parse_table, LuaTable, LuaValue};
pub use shapes::{find_shape, shapes, Shape};
pub use texture::{Texture, TEXTURE_HEIGHT, TEXTURE_WIDTH};
pub use transform::{Axis, Transform};
pub use writer::{format_number, write_model};
