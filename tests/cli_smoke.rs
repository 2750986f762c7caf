use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_scrubline")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "scrubline.exe"
            } else {
                "scrubline"
            });
            p
        })
}

#[test]
fn cli_validates_a_written_scene() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let scene_path = dir.join("scene.json");
    let scene = scrubline::presets::about_scene().unwrap();
    let f = std::fs::File::create(&scene_path).unwrap();
    serde_json::to_writer_pretty(f, &scene).unwrap();

    let status = Command::new(bin())
        .args(["validate", "--in"])
        .arg(&scene_path)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_sample_emits_parseable_state() {
    let output = Command::new(bin())
        .args([
            "sample", "--scroll", "2160.0", "--width", "1920", "--height", "1080",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let progress = state["progress"].as_f64().unwrap();
    // 2160 px into a 4 x 1080 px pin.
    assert!((progress - 0.5).abs() < 1e-9);
    assert_eq!(state["frame"]["index"].as_u64(), Some(24));
}

#[test]
fn cli_sweep_emits_one_line_per_step() {
    let output = Command::new(bin())
        .args(["sweep", "--steps", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: Vec<&str> = std::str::from_utf8(&output.stdout)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();
    assert_eq!(lines.len(), 5);
    for line in lines {
        let state: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(state["progress"].as_f64().is_some());
    }
}
