use std::path::PathBuf;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_exif-matrix")
}

#[test]
fn plan_lists_the_canonical_paths() {
    let output = Command::new(bin()).arg("plan").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4 * 9 * 3);
    assert!(lines.contains(
        &"TestExifOrientation/Format[jpeg]/Landscape/Case[1024x768]/Landscape_1024x768_6.jpeg"
    ));
}

#[test]
fn plan_json_is_parseable() {
    let output = Command::new(bin())
        .args(["plan", "--dimensions", "100,200", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fixtures = parsed.as_array().unwrap();
    // 100x100, 200x200, 100x200, 200x100 -> 4 sizes x 9 x 3.
    assert_eq!(fixtures.len(), 4 * 9 * 3);
    assert!(fixtures[0].get("relative_path").is_some());
}

#[test]
fn generate_skip_tagging_writes_a_tree() {
    let root = PathBuf::from("target").join("cli_smoke_generate");
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();

    let status = Command::new(bin())
        .args([
            "generate",
            "--skip-tagging",
            "--dimensions",
            "32,48",
            "--cell-size",
            "8",
            "--root",
        ])
        .arg(&root)
        .status()
        .unwrap();
    assert!(status.success());

    assert!(root.join("TestExifOrientation.txt").is_file());
    assert!(
        root.join("TestExifOrientation")
            .join("Format[png]")
            .join("Square")
            .join("Case[32x32]")
            .join("Square_32x32_0.png")
            .is_file()
    );
}
