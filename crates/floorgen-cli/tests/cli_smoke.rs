use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(kind: &str, name: &str) -> PathBuf {
    let path = repo_root()
        .join("fixtures")
        .join("requests")
        .join(kind)
        .join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("floorgen-cli"));
    cmd.current_dir(repo_root());
    cmd
}

#[test]
fn cli_renders_svg_to_stdout() {
    let input = fixture("valid", "scenario_a_tb.json");
    let output = cli()
        .args(["render", input.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches(r#"class="unit-group""#).count(), 10);
}

#[test]
fn cli_check_prints_derived_metrics() {
    let input = fixture("valid", "scenario_a_tb.json");
    let output = cli()
        .args(["check", input.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["arrangement"], "TB");
    assert_eq!(v["unitCount"], 10);
    let public = v["publicAreaM2"].as_f64().expect("public area");
    assert!((public - 200.0).abs() < 1e-9);
}

#[test]
fn cli_layout_accepts_flags_without_input_file() {
    let output = cli()
        .args([
            "layout", "--area", "600", "--units", "5", "--ratio", "0.25", "--arrangement", "LR",
            "--spacing", "0.5", "--balcony", "1",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let sides: Vec<&str> = v["placements"]
        .as_array()
        .expect("placements")
        .iter()
        .filter_map(|p| p["side"].as_str())
        .collect();
    assert_eq!(sides, ["left", "left", "left", "right", "right"]);
}

#[test]
fn cli_flags_override_document_fields() {
    let input = fixture("invalid", "two_sided_single_unit.json");
    cli()
        .args(["check", "--units", "2", input.to_string_lossy().as_ref()])
        .assert()
        .success();
}

#[test]
fn cli_renders_png_smoke() {
    let input = fixture("valid", "left_only.json");
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn cli_renders_pdf_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_input = tmp.path().join("plan.json");
    fs::copy(fixture("valid", "odd_split_lr.json"), &tmp_input).expect("copy fixture");

    cli()
        .args([
            "render",
            "--format",
            "pdf",
            tmp_input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(tmp_input.with_extension("pdf")).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn cli_exit_codes_distinguish_failures() {
    for name in [
        "two_sided_single_unit.json",
        "zero_public_ratio.json",
        "unknown_arrangement.json",
        "missing_units.json",
    ] {
        let input = fixture("invalid", name);
        cli()
            .args(["render", input.to_string_lossy().as_ref()])
            .assert()
            .code(3);
    }

    cli().args(["render", "--format", "gif"]).assert().code(2);

    let input = fixture("valid", "scenario_a_tb.json");
    cli()
        .args([
            "render",
            "--format",
            "jpg",
            "--background",
            "transparent",
            "--out",
            "-",
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);

    cli()
        .args(["check", "does/not/exist.json"])
        .assert()
        .code(1);
}
