use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn mlabel_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("mlabel");
    path
}

/// A temp tree with `photos/` holding the given files and an empty config.
fn setup_test_env(files: &[&str]) -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("mlabel.toml");
    fs::write(&config_path, "").unwrap();

    let photos = root.join("photos");
    fs::create_dir_all(&photos).unwrap();
    for name in files {
        fs::write(photos.join(name), b"x").unwrap();
    }

    (tmp, config_path, photos)
}

fn run_mlabel(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = mlabel_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run mlabel binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn read_document(path: &Path) -> serde_json::Map<String, serde_json::Value> {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_show_paginates_sixteen_images() {
    let names: Vec<String> = (1..=16).map(|i| format!("img{:02}.jpg", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let (_tmp, config_path, photos) = setup_test_env(&refs);
    let dir = photos.to_str().unwrap();

    let (stdout, stderr, success) = run_mlabel(&config_path, &["show", dir]);
    assert!(success, "show failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Total Pages: 2"));
    assert!(stdout.contains("Total Images: 16"));
    assert!(stdout.contains("Page 1 / 2"));

    let (stdout, _, success) = run_mlabel(&config_path, &["show", dir, "--page", "2", "--json"]);
    assert!(success);
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["page"], 2);
    assert_eq!(view["total_pages"], 2);
    assert_eq!(view["entries"].as_array().unwrap().len(), 1);
}

#[test]
fn test_show_filters_extensions_case_insensitively() {
    let (_tmp, config_path, photos) =
        setup_test_env(&["a.JPG", "b.png", "notes.txt", "clip.mp4", "c.jpeg"]);
    let dir = photos.to_str().unwrap();

    let (stdout, _, success) = run_mlabel(&config_path, &["show", dir]);
    assert!(success);
    assert!(stdout.contains("Total Images: 3"));

    let (stdout, _, success) = run_mlabel(&config_path, &["show", dir, "--kind", "video"]);
    assert!(success);
    assert!(stdout.contains("Total Videos: 1"));
    assert!(stdout.contains("clip.mp4"));
}

#[test]
fn test_empty_directory_reports_no_media() {
    let (_tmp, config_path, photos) = setup_test_env(&["readme.txt"]);

    let (stdout, _, success) = run_mlabel(&config_path, &["show", photos.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("No images present in this directory."));
    assert!(stdout.contains("Total Pages: 0"));
}

#[test]
fn test_apply_persists_to_combined_document() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg", "b.jpg"]);
    let dir = photos.to_str().unwrap();

    let (stdout, stderr, success) = run_mlabel(
        &config_path,
        &["apply", dir, "--add", "cat", "--add", "dog", "--set", "a.jpg=cat", "--set", "b.jpg=dog"],
    );
    assert!(success, "apply failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Label 'cat' added."));
    assert!(stdout.contains("Changes saved successfully."));

    let document_path = tmp.path().join("selected_labels_file.json");
    let text = fs::read_to_string(&document_path).unwrap();
    assert!(text.contains("    \"a.jpg\": \"cat\""), "unexpected layout: {}", text);

    let document = read_document(&document_path);
    assert_eq!(document["a.jpg"], "cat");
    assert_eq!(document["b.jpg"], "dog");

    // A later pass sees the saved labels.
    let (stdout, _, success) = run_mlabel(&config_path, &["show", dir]);
    assert!(success);
    assert!(stdout.contains("cat"));
    assert!(stdout.contains("dog"));
}

#[test]
fn test_remove_blocked_while_referenced() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg"]);
    let dir = photos.to_str().unwrap();

    run_mlabel(&config_path, &["apply", dir, "--add", "cat", "--set", "a.jpg=cat"]);
    let (_, stderr, success) = run_mlabel(&config_path, &["apply", dir, "--remove", "cat"]);
    assert!(success);
    assert!(stderr.contains("There are some items labeled with \"cat\"."));

    let document = read_document(&tmp.path().join("selected_labels_file.json"));
    assert_eq!(document["a.jpg"], "cat");

    let (stdout, _, _) = run_mlabel(&config_path, &["labels", dir]);
    assert!(stdout.contains("cat"));
}

#[test]
fn test_rename_cascades_into_document() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg", "b.jpg"]);
    let dir = photos.to_str().unwrap();

    run_mlabel(
        &config_path,
        &["apply", dir, "--add", "cat", "--add", "dog", "--set", "a.jpg=cat", "--set", "b.jpg=dog"],
    );
    let (stdout, stderr, success) = run_mlabel(&config_path, &["apply", dir, "--rename", "cat=feline"]);
    assert!(success, "rename failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Label 'cat' renamed to 'feline'."));

    let document = read_document(&tmp.path().join("selected_labels_file.json"));
    assert_eq!(document["a.jpg"], "feline");
    assert_eq!(document["b.jpg"], "dog");
}

#[test]
fn test_dry_run_does_not_write() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg"]);
    let dir = photos.to_str().unwrap();

    let (stdout, _, success) = run_mlabel(
        &config_path,
        &["apply", dir, "--add", "cat", "--set", "a.jpg=cat", "--dry-run"],
    );
    assert!(success);
    assert!(stdout.contains("\"a.jpg\": \"cat\""));
    assert!(stdout.contains("Dry run"));
    assert!(!tmp.path().join("selected_labels_file.json").exists());
}

#[test]
fn test_image_variant_uses_fixed_document() {
    let (tmp, config_path, photos) = setup_test_env(&["a.png", "clip.mov"]);
    let store = tmp.path().join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(
        &config_path,
        format!("[storage]\nvariant = \"image\"\nroot = \"{}\"\n", store.display()),
    )
    .unwrap();
    let dir = photos.to_str().unwrap();

    let (stdout, stderr, success) =
        run_mlabel(&config_path, &["apply", dir, "--add", "cat", "--set", "a.png=cat"]);
    assert!(success, "apply failed: stdout={}, stderr={}", stdout, stderr);

    let document = read_document(&store.join("selected_labels_file1.json"));
    assert_eq!(document["a.png"], "cat");
    assert!(!tmp.path().join("selected_labels_file.json").exists());

    let (_, _, success) = run_mlabel(&config_path, &["show", dir, "--kind", "video"]);
    assert!(!success, "image variant must refuse --kind video");
}

#[test]
fn test_video_variant_document_name() {
    let (tmp, config_path, photos) = setup_test_env(&["clip.MKV"]);
    fs::write(
        &config_path,
        format!("[storage]\nvariant = \"video\"\nroot = \"{}\"\n", tmp.path().display()),
    )
    .unwrap();

    let (_, _, success) = run_mlabel(
        &config_path,
        &["apply", photos.to_str().unwrap(), "--add", "intro", "--set", "clip.MKV=intro"],
    );
    assert!(success);
    let document = read_document(&tmp.path().join("selected_labels_file_videio.json"));
    assert_eq!(document["clip.MKV"], "intro");
}

#[test]
fn test_malformed_document_loads_empty() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg"]);
    let document_path = tmp.path().join("selected_labels_file.json");
    fs::write(&document_path, "this is not json").unwrap();
    let dir = photos.to_str().unwrap();

    let (stdout, stderr, success) = run_mlabel(&config_path, &["show", dir]);
    assert!(success, "show failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Total Images: 1"));

    let (_, _, success) = run_mlabel(&config_path, &["apply", dir, "--add", "cat", "--set", "a.jpg=cat"]);
    assert!(success);
    let document = read_document(&document_path);
    assert_eq!(document.len(), 1);
    assert_eq!(document["a.jpg"], "cat");
}

#[test]
fn test_clear_label_keeps_key() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg"]);
    let dir = photos.to_str().unwrap();

    run_mlabel(&config_path, &["apply", dir, "--add", "cat", "--set", "a.jpg=cat"]);
    let (_, _, success) = run_mlabel(&config_path, &["apply", dir, "--set", "a.jpg=NO LABEL"]);
    assert!(success);

    let document = read_document(&tmp.path().join("selected_labels_file.json"));
    assert_eq!(document["a.jpg"], "");
}

#[test]
fn test_export_groups_by_label() {
    let (tmp, config_path, photos) = setup_test_env(&["a.jpg", "b.jpg", "c.jpg"]);
    let dir = photos.to_str().unwrap();

    run_mlabel(
        &config_path,
        &["apply", dir, "--add", "cat", "--set", "a.jpg=cat", "--set", "c.jpg=cat"],
    );
    let out = tmp.path().join("out").join("groups.json");
    let (_, stderr, success) =
        run_mlabel(&config_path, &["export", dir, "--output", out.to_str().unwrap()]);
    assert!(success, "export failed: {}", stderr);

    let groups: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(groups["cat"].as_array().unwrap().len(), 2);
    assert_eq!(groups[""], serde_json::json!(["b.jpg"]));
}

#[test]
fn test_stats_reports_progress() {
    let (_tmp, config_path, photos) = setup_test_env(&["a.jpg", "b.jpg"]);
    let dir = photos.to_str().unwrap();

    run_mlabel(&config_path, &["apply", dir, "--add", "cat", "--set", "a.jpg=cat"]);
    let (stdout, _, success) = run_mlabel(&config_path, &["stats", dir]);
    assert!(success);
    assert!(stdout.contains("Labeled images: 1 / 2 (50%)"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let (tmp, _config_path, photos) = setup_test_env(&["a.jpg"]);
    let absent = tmp.path().join("absent.toml");

    let (stdout, _, success) = run_mlabel(&absent, &["show", photos.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("Total Images: 1"));
}

#[test]
fn test_completions_without_config() {
    let binary = mlabel_binary();
    let output = Command::new(&binary).args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("mlabel"));
}
