//! Per-entry output lines: realization, column layout, ignore policies.

use super::test_utils::{digest_hex, run_capture};
use std::fs;
use std::os::unix::fs::symlink;
use tempfile::TempDir;
use treesum::config::SumConfig;
use treesum::hash;

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn sorted_config() -> SumConfig {
    SumConfig::new().with_sorted(true)
}

#[test]
fn test_single_file_tree() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();

    let output = run_capture(temp_dir.path(), &sorted_config());
    assert_eq!(output, format!("{}  a\n", HELLO_SHA256));
}

#[test]
fn test_file_and_unfollowed_symlink() {
    // `a` containing "hello" and `b -> a` in no-follow mode: b's digest
    // covers the string "b", not "hello".
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();
    symlink("a", temp_dir.path().join("b")).unwrap();

    let config = sorted_config().with_follow_symlinks(false);
    let output = run_capture(temp_dir.path(), &config);

    let b_sum = digest_hex(b"b", hash::SHA256);
    assert_eq!(
        output,
        format!("{}  a\n{}  b -> a\n", HELLO_SHA256, b_sum)
    );
}

#[test]
fn test_followed_symlink_hashes_target_content() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();
    symlink("a", temp_dir.path().join("b")).unwrap();

    let output = run_capture(temp_dir.path(), &sorted_config());
    assert_eq!(
        output,
        format!("{}  a\n{}  b -> a\n", HELLO_SHA256, HELLO_SHA256)
    );
}

#[test]
fn test_nested_directories_realize_relative() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("sub/deep")).unwrap();
    fs::write(temp_dir.path().join("sub/deep/f"), "x").unwrap();

    let output = run_capture(temp_dir.path(), &sorted_config());
    let sum = digest_hex(b"x", hash::SHA256);
    assert_eq!(output, format!("{}  sub/deep/f\n", sum));
}

#[test]
fn test_file_as_input_realizes_basename() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("a");
    fs::write(&file, "hello").unwrap();

    let output = run_capture(&file, &sorted_config());
    assert_eq!(output, format!("{}  a\n", HELLO_SHA256));
}

#[test]
fn test_hash_only_prints_bare_digests() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();

    let mut config = sorted_config();
    config.hash_only = true;
    let output = run_capture(temp_dir.path(), &config);
    assert_eq!(output, format!("{}\n", HELLO_SHA256));
}

#[test]
fn test_swap_reverses_columns() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();

    let mut config = sorted_config();
    config.swap = true;
    let output = run_capture(temp_dir.path(), &config);
    assert_eq!(output, format!("a  {}\n", HELLO_SHA256));
}

#[test]
fn test_abs_prints_absolute_paths() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();

    let mut config = sorted_config();
    config.absolute = true;
    let output = run_capture(temp_dir.path(), &config);

    let line = output.lines().next().unwrap();
    let (sum, path) = line.split_once("  ").unwrap();
    assert_eq!(sum, HELLO_SHA256);
    assert!(path.starts_with('/'));
    assert!(path.ends_with("/a"));
}

#[test]
fn test_alternate_algorithm_changes_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();

    let config = sorted_config().with_algorithm(hash::MD5);
    let output = run_capture(temp_dir.path(), &config);
    assert_eq!(output, format!("{}  a\n", digest_hex(b"hello", hash::MD5)));
}

#[test]
fn test_ignore_dot_file_policy() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();
    fs::write(temp_dir.path().join(".hidden"), "secret").unwrap();

    let mut config = sorted_config();
    config.ignore_dot_file = true;
    let output = run_capture(temp_dir.path(), &config);
    assert_eq!(output, format!("{}  a\n", HELLO_SHA256));
}

#[test]
fn test_ignore_dot_dir_policy() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join(".git")).unwrap();
    fs::write(temp_dir.path().join(".git/config"), "secret").unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();

    let mut config = sorted_config();
    config.ignore_dot_dir = true;
    let output = run_capture(temp_dir.path(), &config);
    assert_eq!(output, format!("{}  a\n", HELLO_SHA256));
}

#[test]
fn test_ignore_symlink_policy() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), "hello").unwrap();
    symlink("a", temp_dir.path().join("b")).unwrap();

    let mut config = sorted_config();
    config.ignore_symlink = true;
    let output = run_capture(temp_dir.path(), &config);
    assert_eq!(output, format!("{}  a\n", HELLO_SHA256));
}

#[test]
fn test_empty_directory_produces_no_lines() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_capture(temp_dir.path(), &sorted_config());
    assert_eq!(output, "");
}
