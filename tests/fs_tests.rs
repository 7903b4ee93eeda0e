//! Filesystem tests: enumeration and staging against fixture trees under
//! tests/fixtures (created per test, removed on success).

use splitarc::pipeline::{clear_scratch, enumerate_files, stage_batch};
use splitarc::{Batch, FileEntry, Opts};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn write_file(path: &Path, len: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'x'; len]).unwrap();
}

fn rel_sizes(root: &Path, entries: &[FileEntry]) -> Vec<(PathBuf, u64)> {
    let mut v: Vec<(PathBuf, u64)> = entries
        .iter()
        .map(|e| (e.path.strip_prefix(root).unwrap().to_path_buf(), e.size))
        .collect();
    v.sort();
    v
}

// --- enumeration ---

#[test]
fn test_enumerate_finds_nested_files_with_sizes() {
    let root = fixture_dir("enum_nested");
    write_file(&root.join("a.txt"), 100);
    write_file(&root.join("sub/b.txt"), 50);
    write_file(&root.join("sub/deep/c.bin"), 10);

    let entries = enumerate_files(&root, &Opts::default(), None, None).unwrap();

    assert_eq!(
        rel_sizes(&root, &entries),
        [
            (PathBuf::from("a.txt"), 100),
            (PathBuf::from("sub/b.txt"), 50),
            (PathBuf::from("sub/deep/c.bin"), 10),
        ]
    );

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_enumerate_never_emits_directories() {
    let root = fixture_dir("enum_dirs");
    write_file(&root.join("sub/only.txt"), 1);
    fs::create_dir_all(root.join("empty/inner")).unwrap();

    let entries = enumerate_files(&root, &Opts::default(), None, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].path.ends_with("only.txt"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_enumerate_honors_exclude_patterns() {
    let root = fixture_dir("enum_exclude");
    write_file(&root.join("keep.txt"), 1);
    write_file(&root.join("skip.log"), 1);
    write_file(&root.join("node_modules/dep.js"), 1);

    let opts = Opts {
        exclude: vec!["*.log".to_string(), "node_modules".to_string()],
        ..Opts::default()
    };
    let entries = enumerate_files(&root, &opts, None, None).unwrap();
    let rel = rel_sizes(&root, &entries);
    assert_eq!(rel, [(PathBuf::from("keep.txt"), 1)]);

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_enumerate_skips_manifest_inside_root() {
    let root = fixture_dir("enum_manifest");
    write_file(&root.join("data.txt"), 5);
    write_file(&root.join("summary.txt"), 5);
    let root = root.canonicalize().unwrap();
    let manifest = root.join("summary.txt");

    let entries = enumerate_files(&root, &Opts::default(), Some(&manifest), None).unwrap();
    assert_eq!(rel_sizes(&root, &entries), [(PathBuf::from("data.txt"), 5)]);

    fs::remove_dir_all(&root).unwrap();
}

// --- staging ---

fn batch_of(root: &Path, rels: &[(&str, u64)]) -> Batch {
    let members: Vec<FileEntry> = rels
        .iter()
        .map(|(rel, size)| FileEntry {
            path: root.join(rel),
            size: *size,
        })
        .collect();
    let total_size = members.iter().map(|m| m.size).sum();
    Batch {
        id: 1,
        members,
        total_size,
    }
}

#[test]
fn test_clear_scratch_removes_leftovers() {
    let scratch = fixture_dir("scratch_clear");
    write_file(&scratch.join("stale/old.txt"), 3);

    clear_scratch(&scratch).unwrap();
    assert!(scratch.is_dir());
    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);

    fs::remove_dir_all(&scratch).unwrap();
}

#[test]
fn test_clear_scratch_creates_missing_directory() {
    let scratch = fixture_dir("scratch_missing");
    let _ = fs::remove_dir_all(&scratch);

    clear_scratch(&scratch).unwrap();
    assert!(scratch.is_dir());

    fs::remove_dir_all(&scratch).unwrap();
}

#[test]
fn test_stage_batch_mirrors_relative_structure() {
    let root = fixture_dir("stage_mirror");
    write_file(&root.join("a.txt"), 100);
    write_file(&root.join("sub/deep/c.bin"), 10);
    let scratch = fixture_dir("stage_mirror_scratch");
    clear_scratch(&scratch).unwrap();

    let batch = batch_of(&root, &[("a.txt", 100), ("sub/deep/c.bin", 10)]);
    let staged = stage_batch(&batch, &root, &scratch, true);

    assert_eq!(staged.len(), 2);
    assert_eq!(staged[0].rel_path, PathBuf::from("a.txt"));
    assert_eq!(staged[1].rel_path, PathBuf::from("sub/deep/c.bin"));
    assert_eq!(fs::metadata(scratch.join("a.txt")).unwrap().len(), 100);
    assert_eq!(
        fs::metadata(scratch.join("sub/deep/c.bin")).unwrap().len(),
        10
    );

    fs::remove_dir_all(&root).unwrap();
    fs::remove_dir_all(&scratch).unwrap();
}

#[test]
fn test_stage_batch_dry_mode_copies_nothing() {
    let root = fixture_dir("stage_dry");
    write_file(&root.join("sub/b.txt"), 50);
    let scratch = fixture_dir("stage_dry_scratch");
    let _ = fs::remove_dir_all(&scratch);

    let batch = batch_of(&root, &[("sub/b.txt", 50)]);
    let staged = stage_batch(&batch, &root, &scratch, false);

    // Relative paths are still computed so the manifest stays accurate.
    assert_eq!(staged[0].rel_path, PathBuf::from("sub/b.txt"));
    assert_eq!(staged[0].size, 50);
    assert!(!scratch.exists());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_stage_batch_member_outside_root_falls_back_to_file_name() {
    let root = fixture_dir("stage_outside");
    fs::create_dir_all(&root).unwrap();

    let batch = Batch {
        id: 1,
        members: vec![FileEntry {
            path: PathBuf::from("/elsewhere/loose.dat"),
            size: 7,
        }],
        total_size: 7,
    };
    let staged = stage_batch(&batch, &root, &fixture_dir("stage_outside_scratch"), false);
    assert_eq!(staged[0].rel_path, PathBuf::from("loose.dat"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_failed_copy_does_not_block_remaining_members() {
    let root = fixture_dir("stage_partial");
    write_file(&root.join("ok.txt"), 4);
    let scratch = fixture_dir("stage_partial_scratch");
    clear_scratch(&scratch).unwrap();

    // First member's source is missing; the second still stages.
    let batch = batch_of(&root, &[("missing.txt", 9), ("ok.txt", 4)]);
    let staged = stage_batch(&batch, &root, &scratch, true);

    assert_eq!(staged.len(), 2);
    assert!(!scratch.join("missing.txt").exists());
    assert_eq!(fs::metadata(scratch.join("ok.txt")).unwrap().len(), 4);

    fs::remove_dir_all(&root).unwrap();
    fs::remove_dir_all(&scratch).unwrap();
}
