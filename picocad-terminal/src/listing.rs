/// Model summary with colored face swatches for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use picocad_core::{color, Mesh, Model};
use std::io::Write;

const SWATCH: char = '█';

/// Palette 0 is black and would vanish on a dark terminal.
const BLACK_STAND_IN: Color = Color::Rgb {
    r: 0x11,
    g: 0x11,
    b: 0x11,
};

/// Terminal color for a palette index
pub fn swatch_color(color_index: u8) -> Color {
    if color_index == 0 {
        return BLACK_STAND_IN;
    }
    match color::Color::from_index(color_index) {
        Some(c) => Color::Rgb {
            r: c.rgb.0,
            g: c.rgb.1,
            b: c.rgb.2,
        },
        None => Color::Reset,
    }
}

pub fn summary_line(model: &Model, threshold: f64) -> String {
    format!(
        "found {} meshes, {} faces, {} vertices ({} unused, {} overlapping)",
        model.meshes.len(),
        model.face_count(),
        model.vertex_count(),
        model.count_unused_vertices(),
        model.find_overlapping_vertices(threshold).len()
    )
}

/// Mesh name followed by one swatch per face, so meshes that share a name
/// can still be told apart.
pub fn write_mesh_entry<W: Write>(writer: &mut W, mesh: &Mesh) -> std::io::Result<()> {
    writer.queue(Print(format!("{} ", mesh.name)))?;
    for face in &mesh.faces {
        writer.queue(SetForegroundColor(swatch_color(face.color_index)))?;
        writer.queue(Print(SWATCH))?;
    }
    writer.queue(ResetColor)?;
    Ok(())
}

pub fn write_summary<W: Write>(writer: &mut W, model: &Model, threshold: f64) -> std::io::Result<()> {
    writer.queue(Print(summary_line(model, threshold)))?;
    writer.queue(Print('\n'))?;
    for (i, mesh) in model.meshes.iter().enumerate() {
        writer.queue(Print(format!(" {}. ", i + 1)))?;
        write_mesh_entry(writer, mesh)?;
        writer.queue(Print('\n'))?;
    }
    writer.flush()
}
