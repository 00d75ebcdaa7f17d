use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use picocad_core::Model;
use picocad_terminal::{run, Config};

const PLANE: &str = include_str!("fixtures/plane.txt");

/// A scratch directory holding a copy of the fixture.
fn workspace(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("picocad-{test}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("plane.txt"), PLANE).unwrap();
    dir
}

fn config(dir: &Path, args: &[&str]) -> Config {
    let file = dir.join("plane.txt");
    let mut argv = vec!["picocad".to_string(), file.display().to_string()];
    argv.extend(args.iter().map(|a| a.to_string()));
    Config::try_parse_from(argv).unwrap()
}

#[test]
fn test_edit_saves_to_generated_file() {
    let dir = workspace("generated");
    run(&config(&dir, &["prune"])).unwrap();

    let saved = fs::read_to_string(dir.join("plane_picocadet_0.txt")).unwrap();
    let model = Model::parse(&saved).unwrap();
    assert_eq!(model.name, "plane_picocadet_0");
    assert_eq!(model.vertex_count(), 4);

    // the input is untouched
    assert_eq!(fs::read_to_string(dir.join("plane.txt")).unwrap(), PLANE);

    run(&config(&dir, &["prune"])).unwrap();
    assert!(dir.join("plane_picocadet_1.txt").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_overwrite_keeps_model_name() {
    let dir = workspace("overwrite");
    run(&config(&dir, &["add-shape", "tetrahedron-on-grid", "--overwrite"])).unwrap();

    let model = Model::parse(&fs::read_to_string(dir.join("plane.txt")).unwrap()).unwrap();
    assert_eq!(model.name, "unused");
    assert_eq!(model.meshes.len(), 2);
    assert_eq!(model.meshes[1].name, "tetrahedron");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_info_writes_nothing() {
    let dir = workspace("info");
    run(&config(&dir, &["info"])).unwrap();
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_bad_mesh_number_is_an_error() {
    let dir = workspace("bad-mesh");
    assert!(run(&config(&dir, &["recenter", "--mesh", "3"])).is_err());
    fs::remove_dir_all(&dir).unwrap();
}
