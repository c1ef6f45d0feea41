mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::test_frames::gradient;
use fovea::{OptimizedImage, Size};

fn fovea(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fovea"))
        .args(args)
        .output()
        .expect("fovea binary should run")
}

fn write_source(dir: &Path) -> String {
    let path = dir.join("pano.png");
    fovea::io::save_frame(&gradient(Size::new(720, 360)), &path).unwrap();
    path.display().to_string()
}

#[test]
fn roundtrip_writes_a_full_size_frame_and_reports_compression() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let output = dir.path().join("out.png");

    let out = fovea(&[
        "roundtrip",
        &input,
        "--azimuth",
        "-30",
        "--elevation",
        "90",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Compression"));
    assert!(stdout.contains(&format!("{}", 720 * 360 * 4)));
    assert_eq!(fovea::io::load_frame(&output).unwrap().size(), Size::new(720, 360));
}

#[test]
fn encode_inspect_decode_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let record = dir.path().join("pano.fovea.json");
    let decoded = dir.path().join("decoded.png");
    let record_arg = record.to_str().unwrap();

    let out = fovea(&[
        "encode", &input, "-a", "180", "-e", "45", "--crop-angle", "121", "--shrink", "3", "-o",
        record_arg,
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(OptimizedImage::load(&record).unwrap().crop_width(), 242);

    let out = fovea(&["inspect", record_arg]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Crop width:   242"));

    let out = fovea(&["decode", record_arg, "-o", decoded.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fovea::io::load_frame(&decoded).unwrap().size(), Size::new(720, 360));
}

#[test]
fn invalid_flags_fail_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let out = fovea(&[
        "encode", &input, "-a", "0", "-e", "90", "--shrink", "0", "-o", "unused.json",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("shrink_factor"));
}
