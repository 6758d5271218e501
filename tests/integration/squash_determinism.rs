//! Aggregate ("squashed") digest behavior across policies.

use super::test_utils::run_capture;
use std::fs;
use tempfile::TempDir;
use treesum::config::SumConfig;
use treesum::squash::SquashPolicy;

fn squash_config(policy: SquashPolicy) -> SumConfig {
    SumConfig::new().with_squash(Some(policy))
}

fn make_tree(root: &std::path::Path) {
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("b.txt"), "beta").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.txt"), "gamma").unwrap();
}

#[test]
fn test_squash_produces_single_tagged_line() {
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    let output = run_capture(temp_dir.path(), &squash_config(SquashPolicy::Set));
    assert_eq!(output.lines().count(), 1);
    assert!(output.trim_end().ends_with("  squash1:."), "{:?}", output);

    let output = run_capture(temp_dir.path(), &squash_config(SquashPolicy::Chain));
    assert_eq!(output.lines().count(), 1);
    assert!(output.trim_end().ends_with("  squash2:."), "{:?}", output);
}

#[test]
fn test_set_squash_invariant_to_visit_order() {
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    // Sorted and OS-order traversals must agree under the set policy.
    let unsorted = run_capture(temp_dir.path(), &squash_config(SquashPolicy::Set));
    let sorted = run_capture(
        temp_dir.path(),
        &squash_config(SquashPolicy::Set).with_sorted(true),
    );
    assert_eq!(unsorted, sorted);
}

#[test]
fn test_set_squash_stable_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    let config = squash_config(SquashPolicy::Set);
    let first = run_capture(temp_dir.path(), &config);
    let second = run_capture(temp_dir.path(), &config);
    assert_eq!(first, second);
}

#[test]
fn test_chain_squash_stable_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    // Chain policy implies sorted traversal, so repeated runs agree.
    let config = squash_config(SquashPolicy::Chain);
    assert!(config.sorted);
    let first = run_capture(temp_dir.path(), &config);
    let second = run_capture(temp_dir.path(), &config);
    assert_eq!(first, second);
}

#[test]
fn test_policies_disagree_on_same_tree() {
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    let set = run_capture(temp_dir.path(), &squash_config(SquashPolicy::Set));
    let chain = run_capture(temp_dir.path(), &squash_config(SquashPolicy::Chain));
    let set_sum = set.split_whitespace().next().unwrap();
    let chain_sum = chain.split_whitespace().next().unwrap();
    assert_ne!(set_sum, chain_sum);
}

#[test]
fn test_content_change_changes_squash() {
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    let config = squash_config(SquashPolicy::Set);
    let before = run_capture(temp_dir.path(), &config);
    fs::write(temp_dir.path().join("a.txt"), "changed").unwrap();
    let after = run_capture(temp_dir.path(), &config);
    assert_ne!(before, after);
}

#[test]
fn test_empty_directory_shapes_squash() {
    // Directory payloads are prefix-relative paths, so adding an empty
    // directory alone must change the aggregate.
    let temp_dir = TempDir::new().unwrap();
    make_tree(temp_dir.path());

    let config = squash_config(SquashPolicy::Set);
    let before = run_capture(temp_dir.path(), &config);
    fs::create_dir(temp_dir.path().join("empty")).unwrap();
    let after = run_capture(temp_dir.path(), &config);
    assert_ne!(before, after);
}

#[test]
fn test_rename_changes_squash() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "alpha").unwrap();

    let config = squash_config(SquashPolicy::Set);
    let before = run_capture(temp_dir.path(), &config);
    fs::rename(
        temp_dir.path().join("a.txt"),
        temp_dir.path().join("b.txt"),
    )
    .unwrap();
    let after = run_capture(temp_dir.path(), &config);
    assert_ne!(before, after);
}

#[test]
fn test_hash_only_squash_ignores_names() {
    // In hash-only mode the payload is the digest alone, so a rename that
    // keeps content identical leaves the set aggregate unchanged.
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "alpha").unwrap();

    let mut config = squash_config(SquashPolicy::Set);
    config.hash_only = true;
    let before = run_capture(temp_dir.path(), &config);
    fs::rename(
        temp_dir.path().join("a.txt"),
        temp_dir.path().join("b.txt"),
    )
    .unwrap();
    let after = run_capture(temp_dir.path(), &config);
    assert_eq!(before, after);
}

#[test]
fn test_identical_trees_same_squash() {
    let dir1 = TempDir::new().unwrap();
    let dir2 = TempDir::new().unwrap();
    make_tree(dir1.path());
    make_tree(dir2.path());

    let config = squash_config(SquashPolicy::Set);
    assert_eq!(
        run_capture(dir1.path(), &config),
        run_capture(dir2.path(), &config)
    );
}
