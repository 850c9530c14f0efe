use sortbench::engine::{build, build_concurrent, Diagnostic, RowError};
use sortbench::{average, AxisSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "Dataset Size,Dataset Variation,Sorting Algorithm,Time Taken\n";

fn axes() -> AxisSet {
    AxisSet::new(
        ["Sorted", "Random"],
        ["Quick Sort", "Merge Sort"],
        vec![1000, 2000],
    )
}

fn write_source(dir: &Path, name: &str, rows: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{}{}", HEADER, rows)).unwrap();
    path
}

#[test]
fn test_average_across_two_runs() {
    let dir = TempDir::new().unwrap();
    let a = write_source(dir.path(), "a.csv", "1000,Sorted,Quick Sort,5000\n2000,Sorted,Quick Sort,9000\n");
    let b = write_source(dir.path(), "b.csv", "1000,Sorted,Quick Sort,7000\n");
    let axes = axes();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let collection = build(&[a, b], &axes, &mut diagnostics).unwrap();
    let averages = average(&collection, &axes).unwrap();
    assert!(diagnostics.is_empty());

    let sorted = averages.get("Sorted").unwrap();
    assert_eq!(sorted.get(0, 0), Some(6000.0));
    assert_eq!(sorted.samples(0, 0), 2);
    // Only one run measured this cell
    assert_eq!(sorted.get(0, 1), Some(9000.0));
    assert_eq!(sorted.samples(0, 1), 1);
    assert_eq!(sorted.get(1, 0), None);
    assert!(!averages.get("Random").unwrap().has_data());
}

#[test]
fn test_bad_row_is_skipped_and_rest_survives() {
    let dir = TempDir::new().unwrap();
    let run = write_source(
        dir.path(),
        "run.csv",
        "abc,Sorted,Quick Sort,5000\n1000,Sorted,Merge Sort,4000\n",
    );
    let axes = axes();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let collection = build(&[run.clone()], &axes, &mut diagnostics).unwrap();

    assert_eq!(diagnostics.len(), 1);
    match &diagnostics[0] {
        Diagnostic::RowSkipped { source, line, reason, .. } => {
            assert_eq!(source, &run.display().to_string());
            assert_eq!(*line, 2);
            assert_eq!(reason, &RowError::InvalidSize("abc".to_string()));
        }
        other => panic!("unexpected diagnostic: {:?}", other),
    }

    let table = collection.by_index(0).next().unwrap().1;
    assert_eq!(table.get(0, 0), None);
    assert_eq!(table.get(1, 0), Some(4000.0));
}

#[test]
fn test_missing_file_fails_only_that_source() {
    let dir = TempDir::new().unwrap();
    let present = write_source(dir.path(), "a.csv", "1000,Sorted,Quick Sort,5000\n");
    let missing = dir.path().join("missing.csv");
    let axes = axes();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let collection = build(&[present, missing.clone()], &axes, &mut diagnostics).unwrap();
    let averages = average(&collection, &axes).unwrap();

    assert_eq!(collection.sources().len(), 1);
    assert_eq!(collection.failures().len(), 1);
    assert!(collection.failures()[0].is_not_found());
    assert!(matches!(
        &diagnostics[..],
        [Diagnostic::SourceFailed(err)] if err.source == missing.display().to_string()
    ));
    assert_eq!(averages.get("Sorted").unwrap().get(0, 0), Some(5000.0));
}

#[test]
fn test_invalid_axes_are_fatal() {
    let axes = AxisSet::new(["Sorted"], Vec::<String>::new(), vec![1000]);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    assert!(build(&[], &axes, &mut diagnostics).is_err());
}

#[tokio::test]
async fn test_concurrent_build_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        write_source(dir.path(), "a.csv", "1000,Sorted,Quick Sort,5000\nxyz,Random,Merge Sort,1\n"),
        dir.path().join("gone.csv"),
        write_source(dir.path(), "b.csv", "1000,Sorted,Quick Sort,7000\n2000,Random,Merge Sort,300\n"),
        write_source(dir.path(), "c.csv", "2000,Random,Merge Sort,500\n1000,Random,Bogo Sort,1\n"),
    ];
    let axes = axes();

    let mut sequential: Vec<Diagnostic> = Vec::new();
    let expected = build(&sources, &axes, &mut sequential).unwrap();

    let mut concurrent: Vec<Diagnostic> = Vec::new();
    let actual = build_concurrent(&sources, &axes, &mut concurrent).await.unwrap();

    assert_eq!(actual.sources(), expected.sources());
    assert_eq!(actual.failures(), expected.failures());
    assert_eq!(concurrent, sequential);
    for v in 0..axes.variations.len() {
        let left: Vec<_> = actual.by_index(v).collect();
        let right: Vec<_> = expected.by_index(v).collect();
        assert_eq!(left, right);
    }

    let averages = average(&actual, &axes).unwrap();
    assert_eq!(averages.get("Random").unwrap().get(1, 1), Some(400.0));
}
