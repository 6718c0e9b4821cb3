use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Get a command for running the spacehoggers binary
fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("spacehoggers");
    cmd.env_remove("RUST_LOG").env_remove("DEBUG");
    cmd
}

fn write(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "x".repeat(len)).unwrap();
}

/// Paths of the data rows, in report order
fn report_paths(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .skip(2)
        .map(|line| line[24..].to_string())
        .collect()
}

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("spacehoggers"))
        .stdout(predicate::str::contains("PATH"))
        .stdout(predicate::str::contains("--reverse"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_scan_current_directory() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("      Size       Usage  Path\n"));
}

#[test]
fn test_summarize_sorted_by_size() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a/one"), 100);
    write(&dir.path().join("b/two"), 50);
    write(&dir.path().join("b/three"), 25);

    let output = cmd().arg(dir.path()).output().unwrap();
    assert!(output.status.success());

    let root = dir.path().display().to_string();
    assert_eq!(
        report_paths(&output.stdout),
        [format!("{}/a", root), format!("{}/b", root)]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("100.0 B"));
    assert!(stdout.contains("75.0 B"));
}

#[test]
fn test_reverse_flag() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("big/f"), 5000);
    write(&dir.path().join("small/f"), 50);

    let output = cmd().arg(dir.path()).arg("-r").output().unwrap();
    let paths = report_paths(&output.stdout);
    assert!(paths[0].ends_with("small"));
    assert!(paths[1].ends_with("big"));
}

#[test]
fn test_limit_flag() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        write(&dir.path().join(format!("dir{}/file.txt", i)), (i + 1) * 100);
    }

    let output = cmd().arg(dir.path()).args(["-l", "3"]).output().unwrap();
    let paths = report_paths(&output.stdout);
    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("dir4"));

    let output = cmd().arg(dir.path()).args(["-l", "0"]).output().unwrap();
    assert_eq!(report_paths(&output.stdout).len(), 5);
}

#[test]
fn test_all_flag_lists_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("testfile.txt"), 7);
    write(&dir.path().join("nested/inner.txt"), 20);

    let output = cmd().arg(dir.path()).arg("--all").output().unwrap();
    assert!(output.status.success());

    let paths = report_paths(&output.stdout);
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("nested/inner.txt"));
    assert!(paths[1].ends_with("testfile.txt"));
}

#[test]
fn test_root_flag() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("only.txt"), 3);

    cmd()
        .args(["-R"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("only.txt"));
}

#[test]
fn test_total_flag() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), 1024);
    write(&dir.path().join("b"), 1024);
    write(&dir.path().join("c"), 1024);

    cmd()
        .arg(dir.path())
        .args(["-t", "-l", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.0 K"))
        .stdout(predicate::str::contains("total (3 entries)"));
}

#[test]
fn test_sort_by_usage() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("empty"), 0);
    write(&dir.path().join("full"), 5000);

    let output = cmd()
        .arg(dir.path())
        .args(["-s", "usage"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let paths = report_paths(&output.stdout);
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("full"));
    assert!(paths[1].ends_with("empty"));

    let output = cmd()
        .arg(dir.path())
        .args(["-s", "usage", "-r"])
        .output()
        .unwrap();
    let paths = report_paths(&output.stdout);
    assert!(paths[0].ends_with("empty"));
    assert!(paths[1].ends_with("full"));
}

#[test]
fn test_invalid_sort_key() {
    cmd()
        .args(["-s", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sort key"));
}

#[test]
fn test_nonexistent_path() {
    cmd()
        .arg("/nonexistent/path/that/does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot access path"));
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("file.txt");
    fs::write(&file_path, "content").unwrap();

    cmd()
        .arg(&file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[cfg(unix)]
#[test]
fn test_skipped_child_is_logged() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("good/f"), 10);
    fs::create_dir(dir.path().join("bad")).unwrap();
    std::os::unix::fs::symlink(
        dir.path().join("missing"),
        dir.path().join("bad/dangling"),
    )
    .unwrap();

    let output = cmd().arg(dir.path()).arg("-L").output().unwrap();
    assert!(output.status.success());
    assert_eq!(report_paths(&output.stdout).len(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("WARN"));

    cmd()
        .arg(dir.path())
        .args(["-L", "--on-error", "abort"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scan"));
}
