/// Command-line configuration for the `picocad` binary
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use picocad_core::{find_shape, shapes, Axis, Shape, DEFAULT_CLOSENESS_THRESHOLD};
use tracing::Level;

/// Edit picoCAD model files from the command line
#[derive(Parser, Debug)]
#[command(name = "picocad")]
#[command(author, version, about = "Command-line editor for picoCAD models", long_about = None)]
pub struct Config {
    /// The picoCAD `.txt` file to load
    pub file: PathBuf,

    /// Write the result back to FILE
    #[arg(long, global = true, conflicts_with = "output")]
    pub overwrite: bool,

    /// Write the result to this path instead of a generated sibling file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Per-axis distance under which two vertices count as overlapping
    #[arg(long, global = true, default_value_t = DEFAULT_CLOSENESS_THRESHOLD)]
    pub threshold: f64,

    /// Logging verbosity level
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Mesh and face numbers are given 1-based, as listed by `info`, and held
/// 0-based.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a summary of the model and its meshes
    Info,

    /// Move a mesh's origin to the average of its vertices
    Recenter {
        #[arg(short, long, value_parser = one_based)]
        mesh: usize,
    },

    /// Mirror a mesh along an axis
    Flip {
        #[arg(short, long, value_parser = one_based)]
        mesh: usize,
        #[arg(short, long)]
        axis: Axis,
    },

    /// Rotate a mesh's vertices about an axis through its origin
    Rotate {
        #[arg(short, long, value_parser = one_based)]
        mesh: usize,
        #[arg(short, long)]
        axis: Axis,
        #[arg(short, long, allow_negative_numbers = true)]
        degrees: f64,
    },

    /// Merge meshes into a destination mesh and remove them
    Merge {
        /// Destination mesh
        #[arg(long, value_parser = one_based)]
        into: usize,
        /// Meshes merged into the destination
        #[arg(long, required = true, num_args = 1.., value_parser = one_based)]
        from: Vec<usize>,
    },

    /// Merge vertices closer than --threshold in every mesh
    MergeOverlapping,

    /// Delete vertices no face references
    Prune,

    /// Snap the vertices of meshes to the nearest multiple
    Round {
        #[arg(short, long, required = true, num_args = 1.., value_parser = one_based)]
        mesh: Vec<usize>,
        #[arg(long, default_value_t = 0.25)]
        multiple: f64,
    },

    /// Rename a mesh
    Rename {
        #[arg(short, long, value_parser = one_based)]
        mesh: usize,
        #[arg(short, long)]
        name: String,
    },

    /// Set the properties of every face of a mesh
    FaceProps {
        #[arg(short, long, value_parser = one_based)]
        mesh: usize,
        #[arg(long)]
        double_sided: bool,
        #[arg(long)]
        no_shading: bool,
        #[arg(long)]
        no_texture: bool,
        /// Draw these faces behind the others
        #[arg(long)]
        render_first: bool,
    },

    /// Copy the UVs of one face onto other faces of the same mesh
    CopyUvs {
        #[arg(short, long, value_parser = one_based)]
        mesh: usize,
        /// Face whose UVs are copied
        #[arg(short, long, value_parser = one_based)]
        face: usize,
        /// Faces receiving the UVs
        #[arg(long, required = true, num_args = 1.., value_parser = one_based)]
        to: Vec<usize>,
    },

    /// Append meshes from another picoCAD file
    Import {
        /// File to import from
        #[arg(long)]
        from: PathBuf,
        #[arg(short, long, required = true, num_args = 1.., value_parser = one_based)]
        mesh: Vec<usize>,
        /// Merge the imported meshes into one
        #[arg(long)]
        merge: bool,
    },

    /// Append a primitive shape
    AddShape {
        /// Shape key, e.g. `tetrahedron-on-grid`
        #[arg(value_parser = shape_by_key)]
        shape: Shape,
    },
}

/// Where an edited model is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Overwrite,
    Path(PathBuf),
    /// A fresh `name_picocadet_N.txt` next to the input
    Generated,
}

impl Config {
    pub fn output_target(&self) -> OutputTarget {
        match (&self.output, self.overwrite) {
            (_, true) => OutputTarget::Overwrite,
            (Some(path), false) => OutputTarget::Path(path.clone()),
            (None, false) => OutputTarget::Generated,
        }
    }

    pub fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }
}

impl Command {
    /// Whether the command changes the model and so needs saving.
    pub fn edits(&self) -> bool {
        !matches!(self, Command::Info)
    }
}

fn shape_by_key(s: &str) -> Result<Shape, String> {
    find_shape(s.trim()).ok_or_else(|| {
        let keys: Vec<&str> = shapes().iter().map(|shape| shape.key).collect();
        format!("unknown shape, expected one of: {}", keys.join(", "))
    })
}

fn one_based(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("numbering starts at 1".to_string()),
        Ok(n) => Ok(n - 1),
        Err(e) => Err(e.to_string()),
    }
}
