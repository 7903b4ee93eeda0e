//! Packer tests: batch formation under both policies, the admission rule,
//! and the invariants the run loop depends on.

use splitarc::engine::{next_batch, pack, sort_for_policy};
use splitarc::{Batch, FileEntry, PackingPolicy};
use std::path::PathBuf;

fn entry(name: &str, size: u64) -> FileEntry {
    FileEntry {
        path: PathBuf::from(format!("/data/{name}")),
        size,
    }
}

fn names(batch: &Batch) -> Vec<String> {
    batch
        .members
        .iter()
        .map(|m| m.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// --- documented scenarios ---

#[test]
fn test_preserve_order_stops_at_first_misfit() {
    // 300, 800, 400 with a 1000-byte ceiling: 800 would make 1100, so the
    // first batch closes at {300} even though 400 would have fit.
    let files = vec![entry("a", 300), entry("b", 800), entry("c", 400)];
    let batches = pack(files, 1000, PackingPolicy::PreserveOrder);

    assert_eq!(batches.len(), 3);
    assert_eq!(names(&batches[0]), ["a"]);
    assert_eq!(names(&batches[1]), ["b"]);
    assert_eq!(names(&batches[2]), ["c"]);
    assert_eq!(batches[0].total_size, 300);
    assert_eq!(batches[1].total_size, 800);
    assert_eq!(batches[2].total_size, 400);
}

#[test]
fn test_arrange_by_size_greedy_fill() {
    // Sorted descending: 800, 400, 300. Batch 1 takes 800 (first item),
    // rejects 400 (1200) and 300 (1100). Batch 2 takes 400 then 300 (700).
    let files = vec![entry("a", 300), entry("b", 800), entry("c", 400)];
    let batches = pack(files, 1000, PackingPolicy::ArrangeBySize);

    assert_eq!(batches.len(), 2);
    assert_eq!(names(&batches[0]), ["b"]);
    assert_eq!(names(&batches[1]), ["c", "a"]);
    assert_eq!(batches[1].total_size, 700);
}

// --- admission rule ---

#[test]
fn test_exact_fit_is_excluded() {
    // The admission is strictly less-than: a candidate landing the total
    // exactly on the ceiling is rejected unless it is the first item.
    let files = vec![entry("a", 600), entry("b", 400)];
    let batches = pack(files, 1000, PackingPolicy::PreserveOrder);

    assert_eq!(batches.len(), 2);
    assert_eq!(names(&batches[0]), ["a"]);
    assert_eq!(names(&batches[1]), ["b"]);
}

#[test]
fn test_first_item_exactly_at_ceiling_is_admitted() {
    let files = vec![entry("a", 1000)];
    let batches = pack(files, 1000, PackingPolicy::PreserveOrder);

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].total_size, 1000);
}

#[test]
fn test_oversized_file_gets_its_own_batch() {
    // A file larger than the ceiling is never skipped; it rides alone.
    let files = vec![entry("huge", 1500), entry("tiny", 10)];

    for policy in [PackingPolicy::PreserveOrder, PackingPolicy::ArrangeBySize] {
        let batches = pack(files.clone(), 1000, policy);
        assert_eq!(batches.len(), 2, "{policy:?}");
        assert_eq!(names(&batches[0]), ["huge"]);
        assert_eq!(batches[0].total_size, 1500);
        assert_eq!(names(&batches[1]), ["tiny"]);
    }
}

#[test]
fn test_preserve_order_no_lookahead_past_misfit() {
    // 900 then 500 then 50: the 50 would fit after 900 failed, but
    // PreserveOrder never considers entries out of order.
    let files = vec![entry("a", 900), entry("b", 500), entry("c", 50)];
    let batches = pack(files, 1000, PackingPolicy::PreserveOrder);

    assert_eq!(batches.len(), 2);
    assert_eq!(names(&batches[0]), ["a"]);
    assert_eq!(names(&batches[1]), ["b", "c"]);
}

// --- invariants ---

#[test]
fn test_completeness_no_duplicates_no_omissions() {
    let files: Vec<FileEntry> = (0..25)
        .map(|i| entry(&format!("f{i}"), (i * 137 % 900) + 1))
        .collect();
    let all_paths = {
        let mut v: Vec<PathBuf> = files.iter().map(|e| e.path.clone()).collect();
        v.sort();
        v
    };

    for policy in [PackingPolicy::PreserveOrder, PackingPolicy::ArrangeBySize] {
        let batches = pack(files.clone(), 1000, policy);
        let mut packed: Vec<PathBuf> = batches
            .iter()
            .flat_map(|b| b.members.iter().map(|m| m.path.clone()))
            .collect();
        packed.sort();
        assert_eq!(packed, all_paths, "{policy:?}");
    }
}

#[test]
fn test_preserve_order_concatenation_equals_input_order() {
    let files = vec![
        entry("a", 10),
        entry("b", 990),
        entry("c", 20),
        entry("d", 500),
        entry("e", 499),
    ];
    let expected: Vec<PathBuf> = files.iter().map(|e| e.path.clone()).collect();

    let batches = pack(files, 1000, PackingPolicy::PreserveOrder);
    let concatenated: Vec<PathBuf> = batches
        .iter()
        .flat_map(|b| b.members.iter().map(|m| m.path.clone()))
        .collect();
    assert_eq!(concatenated, expected);
}

#[test]
fn test_arrange_by_size_bound_on_multi_member_batches() {
    let files: Vec<FileEntry> = (0..40)
        .map(|i| entry(&format!("f{i}"), (i * 251 % 1400) + 1))
        .collect();
    let batches = pack(files, 1000, PackingPolicy::ArrangeBySize);

    for batch in &batches {
        assert_eq!(
            batch.total_size,
            batch.members.iter().map(|m| m.size).sum::<u64>()
        );
        if batch.members.len() > 1 {
            assert!(batch.total_size < 1000, "batch #{} overflows", batch.id);
        }
    }
}

#[test]
fn test_termination_at_most_n_batches() {
    // Every file alone exceeds the ceiling pair-wise, so each takes its
    // own batch: exactly N batches for N files, never more.
    let files: Vec<FileEntry> = (0..5).map(|i| entry(&format!("f{i}"), 600)).collect();
    let batches = pack(files, 1000, PackingPolicy::PreserveOrder);
    assert_eq!(batches.len(), 5);
}

#[test]
fn test_sequential_ids_from_one() {
    let files: Vec<FileEntry> = (0..7).map(|i| entry(&format!("f{i}"), 600)).collect();
    for policy in [PackingPolicy::PreserveOrder, PackingPolicy::ArrangeBySize] {
        let batches = pack(files.clone(), 1000, policy);
        let ids: Vec<u64> = batches.iter().map(|b| b.id).collect();
        assert_eq!(ids, (1..=batches.len() as u64).collect::<Vec<_>>());
    }
}

#[test]
fn test_empty_input_yields_no_batches() {
    assert!(pack(Vec::new(), 1000, PackingPolicy::PreserveOrder).is_empty());
    assert!(pack(Vec::new(), 1000, PackingPolicy::ArrangeBySize).is_empty());
}

// --- sorting ---

#[test]
fn test_sort_for_policy_descending_stable() {
    let mut files = vec![
        entry("first", 10),
        entry("big", 500),
        entry("second", 10),
        entry("third", 10),
    ];
    sort_for_policy(&mut files, PackingPolicy::ArrangeBySize);
    let names: Vec<&str> = files
        .iter()
        .map(|e| e.path.file_name().unwrap().to_str().unwrap())
        .collect();
    // Descending by size; equal sizes keep source order.
    assert_eq!(names, ["big", "first", "second", "third"]);
}

#[test]
fn test_sort_for_policy_preserve_order_is_noop() {
    let mut files = vec![entry("z", 1), entry("a", 900), entry("m", 30)];
    let before = files.clone();
    sort_for_policy(&mut files, PackingPolicy::PreserveOrder);
    assert_eq!(files, before);
}

// --- next_batch / drain behavior ---

#[test]
fn test_next_batch_drains_remaining() {
    let mut remaining = vec![entry("a", 300), entry("b", 800), entry("c", 400)];

    let batch = next_batch(&mut remaining, 1000, PackingPolicy::PreserveOrder, 1).unwrap();
    assert_eq!(names(&batch), ["a"]);
    assert_eq!(remaining.len(), 2);

    let batch = next_batch(&mut remaining, 1000, PackingPolicy::PreserveOrder, 2).unwrap();
    assert_eq!(batch.id, 2);
    assert_eq!(names(&batch), ["b"]);

    let batch = next_batch(&mut remaining, 1000, PackingPolicy::PreserveOrder, 3).unwrap();
    assert_eq!(names(&batch), ["c"]);
    assert!(remaining.is_empty());
    assert!(next_batch(&mut remaining, 1000, PackingPolicy::PreserveOrder, 4).is_none());
}

#[test]
fn test_next_batch_arrange_keeps_rejected_order() {
    // Sorted input 900, 500, 400, 90: batch 1 takes 900 and 90 (990);
    // the rejected 500 and 400 stay in order for batch 2.
    let mut remaining = vec![
        entry("a", 900),
        entry("b", 500),
        entry("c", 400),
        entry("d", 90),
    ];
    let batch = next_batch(&mut remaining, 1000, PackingPolicy::ArrangeBySize, 1).unwrap();
    assert_eq!(names(&batch), ["a", "d"]);
    assert_eq!(batch.total_size, 990);

    let rest: Vec<&str> = remaining
        .iter()
        .map(|e| e.path.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(rest, ["b", "c"]);
}
