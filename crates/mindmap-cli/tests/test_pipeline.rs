use std::fs;
use std::path::PathBuf;

use mindmap::{MindmapOptions, OutputFormat, RunOutput, load_config, run_main};
use mindmap_error::ErrorKind;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LIFE_SYSTEMS: &str = "\
Health:
  Sleep:
    - 8 hours
    - No screens
Money:
  - Budget
  - Budget
";

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn options(input: PathBuf, dir: &TempDir) -> MindmapOptions {
    MindmapOptions {
        input,
        output_stem: dir.path().join("out").join("mindmap_output"),
        formats: vec![OutputFormat::Dot],
        ..MindmapOptions::default()
    }
}

#[test]
fn test_emit_dot_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "mindmap.yaml", LIFE_SYSTEMS);
    let opts = MindmapOptions {
        emit_dot: true,
        ..options(input, &dir)
    };

    let RunOutput::Dot(dot) = run_main(&opts).unwrap() else {
        panic!("expected DOT output");
    };

    assert!(dot.starts_with("digraph \"MindMap\" {"));
    assert!(dot.contains("\"Mind_Map\"[label=\"Mind Map\", shape=\"box\""));
    assert!(dot.contains("\"Mind_Map_Health_Sleep_No_screens\"[label=\"No screens\""));
    assert!(dot.contains("\"Mind_Map_Money\"[label=\"Money\", style=\"filled\", fillcolor=\"#4dabf7\"]"));
    assert_eq!(dot.matches("\"Mind_Map_Money_Budget\"[").count(), 1);
    assert_eq!(
        dot.matches("\"Mind_Map_Money\" -> \"Mind_Map_Money_Budget\";").count(),
        2
    );
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_yaml_floats_and_empty_values_become_leaves() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "mindmap.yaml", "A: [1.0, 1]\nHealth:\n  Sleep:\n");
    let opts = MindmapOptions {
        emit_dot: true,
        ..options(input, &dir)
    };

    let RunOutput::Dot(dot) = run_main(&opts).unwrap() else {
        panic!("expected DOT output");
    };

    assert!(dot.contains("\"Mind_Map_A_1.0\"[label=\"1.0\""));
    assert!(dot.contains("\"Mind_Map_A_1\"[label=\"1\""));
    assert!(dot.contains("\"Mind_Map_A\" -> \"Mind_Map_A_1.0\";"));
    assert!(dot.contains("\"Mind_Map_A\" -> \"Mind_Map_A_1\";"));
    assert!(dot.contains("\"Mind_Map_Health_Sleep_None\"[label=\"None\""));
    assert!(dot.contains("\"Mind_Map_Health_Sleep\" -> \"Mind_Map_Health_Sleep_None\";"));
}

#[test]
fn test_dot_artifact_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "mindmap.json", r#"{"A": ["x", "y"]}"#);

    let RunOutput::Artifacts(paths) = run_main(&options(input, &dir)).unwrap() else {
        panic!("expected artifacts");
    };

    let expected = dir.path().join("out").join("mindmap_output.dot");
    assert_eq!(paths, vec![expected.clone()]);
    let text = fs::read_to_string(expected).unwrap();
    assert!(text.contains("\"Mind_Map_A\" -> \"Mind_Map_A_x\";"));
    assert!(text.contains("\"Mind_Map_A\" -> \"Mind_Map_A_y\";"));
}

#[test]
fn test_config_file_drives_build() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "mindmap.toml", "[Goals]\nitems = [\"Ship\"]\n");
    let config_path = write(
        &dir,
        "mindmap.config.toml",
        "root_id = \"Life_Systems\"\nroot_label = \"Life Systems Master Map\"\npalette = [\"#000000\"]\n",
    );
    let config = load_config(&config_path).unwrap();

    let opts = MindmapOptions {
        config,
        emit_dot: true,
        ..options(input, &dir)
    };
    let RunOutput::Dot(dot) = run_main(&opts).unwrap() else {
        panic!("expected DOT output");
    };

    assert!(dot.contains("\"Life_Systems_Goals\"[label=\"Goals\", style=\"filled\", fillcolor=\"#000000\"]"));
    // 0 + 255 * 0.35 = 89.25 -> 0x59
    assert!(dot.contains("\"Life_Systems_Goals_items\"[label=\"items\", style=\"filled\", fillcolor=\"#595959\"]"));
}

#[test]
fn test_top_level_list_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(&dir, "mindmap.yaml", "- a\n- b\n");

    let err = run_main(&options(input, &dir)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDocumentShape);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_main(&options(dir.path().join("absent.yaml"), &dir)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn test_bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(&dir, "bad.toml", "palette = 3\n");
    let err = load_config(&config_path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
}
