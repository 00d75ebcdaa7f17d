/// Error types for loading and editing picoCAD documents
///
/// Each stage of loading has its own error so callers can tell a grammar
/// problem from a missing field. [`PicoError`] unifies them for
/// [`Model::parse`](crate::Model::parse).
use thiserror::Error;

/// What went wrong inside the table literal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// A value started with a character that begins no value.
    #[error("unknown value {}", describe(.0))]
    UnknownValue(Option<char>),
    /// A quoted string ran to the end of input.
    #[error("unterminated string")]
    UnterminatedString,
    /// A run of `[-.0-9]` that is not a number.
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    /// A specific character was required.
    #[error("expected `{0}`")]
    Expected(char),
    /// Non-whitespace text after the outermost table.
    #[error("unexpected text after table")]
    TrailingInput,
    #[error("syntax error ({0:?})")]
    Syntax(nom::error::ErrorKind),
}

fn describe(found: &Option<char>) -> String {
    match *found {
        Some(c) => format!("`{c}` (U+{:04X})", c as u32),
        None => "at end of input".to_string(),
    }
}

/// Malformed table grammar, with the byte offset of the offending character.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("parse error at offset {offset}: {kind}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }

    /// Move the offset forward, for tables embedded in a larger document.
    pub fn shifted(self, by: usize) -> Self {
        Self {
            offset: self.offset + by,
            ..self
        }
    }
}

/// The texture block does not hold 120 rows of 128 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureDecodeError {
    #[error("texture row {row} has {len} cells, expected {expected}")]
    ShortRow { row: usize, len: usize, expected: usize },
    #[error("texture row {row}, column {column}: `{found}` is not a hex digit")]
    InvalidDigit { row: usize, column: usize, found: char },
    #[error("texture buffer has {len} cells, expected {expected}")]
    WrongSize { len: usize, expected: usize },
}

/// A structurally valid table is missing something the domain model needs.
///
/// `path` names the field, e.g. `meshes[2].f[0].uv`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("missing field `{path}`")]
    MissingField { path: String },
    #[error("`{path}` should be {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("`{path}` = {value} is not a palette index (0-15)")]
    PaletteIndex { path: String, value: f64 },
    #[error("`{path}` = {value} does not reference one of {len} vertices")]
    VertexIndex { path: String, value: f64, len: usize },
}

/// Model level validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("model name required")]
    EmptyName,
    /// The character would end the name early in a saved document.
    #[error("name `{name}` cannot contain {found:?}")]
    InvalidName { name: String, found: char },
}

/// Misuse of a geometry operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("mesh `{name}` has no vertices")]
    EmptyMesh { name: String },
    #[error("rounding multiple must be a positive number, got {0}")]
    InvalidMultiple(f64),
    #[error("mesh index {index} out of range ({len} meshes)")]
    MeshOutOfRange { index: usize, len: usize },
    #[error("face index {index} out of range ({len} faces)")]
    FaceOutOfRange { index: usize, len: usize },
    #[error("face {target} has {found} vertices, source face has {expected}")]
    VertexCountMismatch {
        target: usize,
        expected: usize,
        found: usize,
    },
    #[error("a mesh cannot be merged into itself (index {0})")]
    SelfMerge(usize),
    #[error("no meshes selected")]
    NothingSelected,
}

/// An axis name other than x, y or z.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown axis `{0}`, expected x, y or z")]
pub struct UnknownAxis(pub String);

/// Any failure while turning document text into a [`Model`](crate::Model).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PicoError {
    #[error("not a picoCAD file")]
    NotPicoCad,
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Texture(#[from] TextureDecodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type PicoResult<T> = Result<T, PicoError>;
