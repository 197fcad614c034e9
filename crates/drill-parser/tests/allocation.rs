//! Allocation and rewrite behaviour over real files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use drill_parser::{ParserError, allocate_and_persist, discover, parse_file};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("fixture should write");
    path
}

fn parse_all(paths: &[PathBuf]) -> Vec<drill_parser::ParsedFile> {
    paths
        .iter()
        .map(|path| parse_file(path).expect("fixture should parse"))
        .collect()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("fixture should read")
}

#[test]
fn fresh_file_gets_first_identifier() {
    let temp = TempDir::new().unwrap();
    let deck = write(temp.path(), "math.txt", "What is 2+2??\n4\n");

    let allocation = allocate_and_persist(parse_all(&[deck.clone()]), &BTreeSet::new()).unwrap();

    assert_eq!(read(&deck), "What is 2+2?? 1\n4\n");
    assert_eq!(allocation.assigned(), vec![1]);
    assert_eq!(allocation.rewritten_files, vec![deck]);
    assert_eq!(allocation.points[0].point.question, "What is 2+2?");
    assert!(allocation.points[0].newly_assigned);
}

#[test]
fn new_identifiers_are_consecutive_and_above_every_known_id() {
    let temp = TempDir::new().unwrap();
    let first = write(
        temp.path(),
        "a.txt",
        "#!drill\nOld? 3\nold\n\nNew one?\nx\n// note\nNew two?\ny\n",
    );
    let second = write(temp.path(), "b.txt", "Other? 8\nz\nNew three?\nw\n");

    let store_ids = BTreeSet::from([1, 2, 11]);
    let allocation = allocate_and_persist(parse_all(&[first.clone(), second.clone()]), &store_ids)
        .unwrap();

    assert_eq!(allocation.assigned(), vec![12, 13, 14]);
    assert_eq!(allocation.ids(), vec![3, 12, 13, 8, 14]);
    assert_eq!(
        read(&first),
        "#!drill\nOld? 3\nold\n\nNew one? 12\nx\n// note\nNew two? 13\ny\n"
    );
    assert_eq!(read(&second), "Other? 8\nz\nNew three? 14\nw\n");
}

#[test]
fn second_run_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let deck = write(temp.path(), "deck.txt", "#!drill\r\nA?\r\n1\r\n\r\nB?\r\n2");

    allocate_and_persist(parse_all(&[deck.clone()]), &BTreeSet::new()).unwrap();
    let after_first = std::fs::read(&deck).unwrap();

    let allocation = allocate_and_persist(parse_all(&[deck.clone()]), &BTreeSet::new()).unwrap();
    let after_second = std::fs::read(&deck).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(after_first, b"#!drill\r\nA? 1\r\n1\r\n\r\nB? 2\r\n2".to_vec());
    assert!(allocation.assigned().is_empty());
    assert!(allocation.rewritten_files.is_empty());
}

#[test]
fn duplicate_identifier_across_files_is_fatal_before_any_rewrite() {
    let temp = TempDir::new().unwrap();
    let first = write(temp.path(), "a.txt", "One? 5\n1\nFresh?\nf\n");
    let second = write(temp.path(), "b.txt", "Two? 5\n2\n");

    let err = allocate_and_persist(parse_all(&[first.clone(), second]), &BTreeSet::new())
        .unwrap_err();

    match err {
        ParserError::DuplicateIdentifier { id, first, second } => {
            assert_eq!(id, 5);
            assert!(first.ends_with("a.txt:1"));
            assert!(second.ends_with("b.txt:1"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(read(&first), "One? 5\n1\nFresh?\nf\n");
}

#[test]
fn identifiers_are_unique_after_allocation() {
    let temp = TempDir::new().unwrap();
    let deck = write(temp.path(), "deck.txt", "A?\na\nB? 2\nb\nC?\nc\nD? 1\nd\n");

    let allocation = allocate_and_persist(parse_all(&[deck]), &BTreeSet::new()).unwrap();
    let ids = allocation.ids();
    let unique: BTreeSet<_> = ids.iter().copied().collect();

    assert_eq!(ids.len(), unique.len());
    assert_eq!(allocation.assigned(), vec![3, 4]);
}

#[test]
fn aliased_paths_do_not_look_like_duplicates() {
    let temp = TempDir::new().unwrap();
    let deck = write(temp.path(), "d2.txt", "A? 1\na\nB?\nb\n");
    let alias = temp.path().join(".").join("d2.txt");

    let paths = discover(&[deck.clone(), alias]).unwrap();
    let allocation = allocate_and_persist(parse_all(&paths), &BTreeSet::new()).unwrap();

    assert_eq!(paths, vec![deck.clone()]);
    assert_eq!(allocation.ids(), vec![1, 2]);
    assert_eq!(read(&deck), "A? 1\na\nB? 2\nb\n");
}
