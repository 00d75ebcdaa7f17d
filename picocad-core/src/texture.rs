/// The 128x120 palette-indexed texture stored after the mesh table
use crate::error::TextureDecodeError;

pub const TEXTURE_WIDTH: usize = 128;
pub const TEXTURE_HEIGHT: usize = 120;
pub const TEXTURE_SIZE: usize = TEXTURE_WIDTH * TEXTURE_HEIGHT;

/// Row-major palette indices (0-15), always exactly [`TEXTURE_SIZE`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    cells: Vec<u8>,
}

impl Texture {
    /// A texture filled with palette index 0.
    pub fn empty() -> Self {
        Self {
            cells: vec![0; TEXTURE_SIZE],
        }
    }

    pub fn from_cells(cells: Vec<u8>) -> Result<Self, TextureDecodeError> {
        if cells.len() != TEXTURE_SIZE {
            return Err(TextureDecodeError::WrongSize {
                len: cells.len(),
                expected: TEXTURE_SIZE,
            });
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= TEXTURE_WIDTH || y >= TEXTURE_HEIGHT {
            return None;
        }
        Some(self.cells[y * TEXTURE_WIDTH + x])
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(TEXTURE_WIDTH)
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::empty()
    }
}

/// Split off the first line. Lines end at `\n`, `\r` or `\r\n`; the
/// terminator belongs to neither half.
pub(crate) fn read_line(s: &str) -> (&str, &str) {
    match s.find(|c: char| c == '\n' || c == '\r') {
        Some(end) => {
            let rest = &s[end..];
            let rest = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .or_else(|| rest.strip_prefix('\r'))
                .unwrap_or(rest);
            (&s[..end], rest)
        }
        None => (s, ""),
    }
}

/// Decode 120 lines of 128 hex digits. Characters past column 128 are ignored.
pub fn decode_texture(text: &str) -> Result<Texture, TextureDecodeError> {
    let mut cells = Vec::with_capacity(TEXTURE_SIZE);
    let mut rest = text;

    for row in 0..TEXTURE_HEIGHT {
        let (line, tail) = read_line(rest);
        rest = tail;

        let mut len = 0;
        for (column, c) in line.chars().take(TEXTURE_WIDTH).enumerate() {
            let digit = c
                .to_digit(16)
                .ok_or(TextureDecodeError::InvalidDigit { row, column, found: c })?;
            cells.push(digit as u8);
            len += 1;
        }
        if len < TEXTURE_WIDTH {
            return Err(TextureDecodeError::ShortRow {
                row,
                len,
                expected: TEXTURE_WIDTH,
            });
        }
    }

    Texture::from_cells(cells)
}

/// Encode as 120 newline-terminated lines of lower-case hex digits.
pub fn encode_texture(texture: &Texture) -> String {
    let mut out = String::with_capacity(TEXTURE_SIZE + TEXTURE_HEIGHT);
    for row in texture.rows() {
        for &cell in row {
            out.push(hex_digit(cell));
        }
        out.push('\n');
    }
    out
}

fn hex_digit(cell: u8) -> char {
    char::from_digit(u32::from(cell & 0x0f), 16).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped_text(line_end: &str) -> String {
        let line: String = (0..TEXTURE_WIDTH)
            .map(|x| char::from_digit((x % 16) as u32, 16).unwrap())
            .collect();
        vec![line; TEXTURE_HEIGHT].join(line_end)
    }

    #[test]
    fn test_read_line() {
        assert_eq!(read_line("a\nb"), ("a", "b"));
        assert_eq!(read_line("a\r\nb\r\n"), ("a", "b\r\n"));
        assert_eq!(read_line("a\rb"), ("a", "b"));
        assert_eq!(read_line("last"), ("last", ""));
        assert_eq!(read_line(""), ("", ""));
    }

    #[test]
    fn test_decode_lf_and_crlf() {
        for line_end in ["\n", "\r\n"] {
            let texture = decode_texture(&striped_text(line_end)).unwrap();
            assert_eq!(texture.cells().len(), TEXTURE_SIZE);
            assert_eq!(texture.get(0, 0), Some(0));
            assert_eq!(texture.get(15, 119), Some(15));
            assert_eq!(texture.get(17, 3), Some(1));
            assert_eq!(texture.get(TEXTURE_WIDTH, 0), None);
        }
    }

    #[test]
    fn test_upper_case_digits() {
        let text = vec!["F".repeat(TEXTURE_WIDTH); TEXTURE_HEIGHT].join("\n");
        let texture = decode_texture(&text).unwrap();
        assert!(texture.cells().iter().all(|&c| c == 15));
    }

    #[test]
    fn test_short_row_fails() {
        let mut lines = vec!["0".repeat(TEXTURE_WIDTH); TEXTURE_HEIGHT];
        lines[7] = "0".repeat(100);
        let err = decode_texture(&lines.join("\n")).unwrap_err();
        assert_eq!(
            err,
            TextureDecodeError::ShortRow { row: 7, len: 100, expected: TEXTURE_WIDTH }
        );
    }

    #[test]
    fn test_missing_rows_fail() {
        let text = vec!["0".repeat(TEXTURE_WIDTH); 10].join("\n");
        let err = decode_texture(&text).unwrap_err();
        assert!(matches!(err, TextureDecodeError::ShortRow { row: 10, len: 0, .. }));
    }

    #[test]
    fn test_invalid_digit() {
        let mut text = striped_text("\n");
        text.replace_range(2..3, "g");
        let err = decode_texture(&text).unwrap_err();
        assert_eq!(err, TextureDecodeError::InvalidDigit { row: 0, column: 2, found: 'g' });
    }

    #[test]
    fn test_encode_is_lower_case_with_trailing_newline() {
        let text = striped_text("\n") + "\n";
        let texture = decode_texture(&text.to_uppercase()).unwrap();
        assert_eq!(encode_texture(&texture), text);
    }

    #[test]
    fn test_from_cells_checks_size() {
        assert!(Texture::from_cells(vec![0; 10]).is_err());
        assert_eq!(Texture::from_cells(vec![0; TEXTURE_SIZE]).unwrap(), Texture::empty());
    }
}
