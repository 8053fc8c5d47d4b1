//! End-to-end pipeline tests against real temp directory trees.

use gleaner::{Opts, glean_dir};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Fresh per-test directory under the system temp dir; unique across
/// parallel tests in this process.
fn test_dir(name: &str) -> PathBuf {
    let id = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "gleaner-test-{}-{}-{}",
        std::process::id(),
        name,
        id
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Sorted file names in `dir`.
fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn opts(pattern: &str, extension: &str) -> Opts {
    Opts {
        pattern: pattern.to_string(),
        extension: extension.to_string(),
        ..Opts::default()
    }
}

#[test]
fn test_end_to_end_copies_only_matches() {
    let root = test_dir("e2e-root");
    let dest = test_dir("e2e-dest");
    write_file(&root.join("A/foo.txt"), "text");
    write_file(&root.join("A/bar.log"), "bar");
    write_file(&root.join("B/foo.log"), "the one");

    let report = glean_dir(
        &root,
        &dest,
        &Opts {
            queue_capacity: 2,
            ..opts("foo", ".log")
        },
    )
    .unwrap();

    assert_eq!(dir_names(&dest), vec!["foo.log"]);
    assert_eq!(fs::read_to_string(dest.join("foo.log")).unwrap(), "the one");
    assert_eq!(report.directories, 2);
    assert_eq!(report.matched, 1);
    assert_eq!(report.copied, 1);
    assert_eq!(report.failed, 0);

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(&dest);
}

#[test]
fn test_files_directly_under_root_are_not_scanned() {
    let root = test_dir("rootfiles-root");
    let dest = test_dir("rootfiles-dest");
    write_file(&root.join("foo.log"), "top level, never scanned");
    write_file(&root.join("sub/foo.log"), "from sub");

    let report = glean_dir(&root, &dest, &opts("foo", ".log")).unwrap();

    assert_eq!(dir_names(&dest), vec!["foo.log"]);
    assert_eq!(fs::read_to_string(dest.join("foo.log")).unwrap(), "from sub");
    assert_eq!(report.matched, 1);

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(&dest);
}

#[test]
fn test_nested_tree_with_worker_pools_and_tiny_queues() {
    let root = test_dir("nested-root");
    let dest = test_dir("nested-dest");
    // 4 levels deep, 30 matches spread over the tree; capacity 2 forces
    // every stage through the blocking paths.
    let mut expected = Vec::new();
    for a in 0..3 {
        for b in 0..2 {
            for c in 0..5 {
                let name = format!("report-{a}-{b}-{c}.log");
                write_file(&root.join(format!("lvl{a}/sub{b}/leaf{c}/{name}")), &name);
                expected.push(name);
            }
            write_file(
                &root.join(format!("lvl{a}/sub{b}/notes.txt")),
                "not a match",
            );
        }
    }
    expected.sort();

    let report = glean_dir(
        &root,
        &dest,
        &Opts {
            matchers: 4,
            transfers: 3,
            queue_capacity: 2,
            ..opts("report", ".log")
        },
    )
    .unwrap();

    assert_eq!(dir_names(&dest), expected);
    // lvl{a} + sub{b} + leaf{c} directories.
    assert_eq!(report.directories, 3 + 3 * 2 + 3 * 2 * 5);
    assert_eq!(report.matched, 30);
    assert_eq!(report.copied, 30);
    assert_eq!(report.failed, 0);

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(&dest);
}

#[test]
fn test_empty_root_finishes_with_empty_report() {
    let root = test_dir("empty-root");
    let dest = test_dir("empty-dest");

    let report = glean_dir(&root, &dest, &opts("foo", ".log")).unwrap();

    assert!(dir_names(&dest).is_empty());
    assert_eq!(report, gleaner::Report::default());

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(&dest);
}

#[test]
fn test_duplicate_base_names_last_write_wins() {
    let root = test_dir("dup-root");
    let dest = test_dir("dup-dest");
    write_file(&root.join("A/dup.log"), "from A");
    write_file(&root.join("B/dup.log"), "from B");

    let report = glean_dir(&root, &dest, &opts("dup", ".log")).unwrap();

    // Both copies run; they land on the same destination name.
    assert_eq!(report.matched, 2);
    assert_eq!(report.copied, 2);
    assert_eq!(dir_names(&dest), vec!["dup.log"]);
    let contents = fs::read_to_string(dest.join("dup.log")).unwrap();
    assert!(contents == "from A" || contents == "from B");

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(&dest);
}

#[test]
fn test_invalid_root_is_an_error() {
    let dest = test_dir("badroot-dest");
    let missing = std::env::temp_dir().join("gleaner-test-no-such-root");
    assert!(glean_dir(&missing, &dest, &opts("foo", ".log")).is_err());
    let _ = fs::remove_dir_all(&dest);
}

#[test]
fn test_dest_is_created_when_missing() {
    let root = test_dir("mkdest-root");
    write_file(&root.join("A/foo.log"), "x");
    let dest = test_dir("mkdest-base").join("deeper/dest");

    let report = glean_dir(&root, &dest, &opts("foo", ".log")).unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(dir_names(&dest), vec!["foo.log"]);

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(dest.parent().unwrap().parent().unwrap());
}
