use std::fs;

use ordered_index::cli::{
    random_values, read_values, render_report, run, CliError, InputSource, RunConfig,
};
use ordered_index::OrderedIndex;

fn config(source: InputSource) -> RunConfig {
    RunConfig {
        source,
        probes: Vec::new(),
        deletions: Vec::new(),
        output_file: None,
    }
}

fn run_to_string(config: &RunConfig) -> (OrderedIndex<i64>, String) {
    let mut out = Vec::new();
    let index = run(config, &mut out).expect("run succeeds");
    (index, String::from_utf8(out).expect("utf-8 report"))
}

#[test]
fn numbers_report_matrix() {
    let mut cfg = config(InputSource::Numbers(vec![10, 20, 30]));
    cfg.probes = vec![20, 99];
    let (index, report) = run_to_string(&cfg);

    assert_eq!(index.to_string(), "20(10)(30)");
    assert!(report.starts_with("Unsorted list\n------------------------------\n[10, 20, 30]\n\n"));
    assert!(report.contains("Root value: 20 Node count: 3 Value count: 3 Height: 2\n"));
    assert!(report.contains("String representation\n------------------------------\n20(10)(30)\n"));
    assert!(report.contains("Linear search results"));
    assert!(report.contains("Binary search results"));
    assert_eq!(report.matches("20 is present").count(), 2);
    assert_eq!(report.matches("99 is missing").count(), 2);
    assert!(report.contains("The linear search took "));
    assert!(report.contains("The binary search took "));
}

#[test]
fn deletions_apply_before_reporting_matrix() {
    let mut cfg = config(InputSource::Numbers(vec![5, 5, 5, 7]));
    cfg.deletions = vec![5, 42];
    let (index, report) = run_to_string(&cfg);
    assert_eq!(index.size(), (2, 3));
    assert!(report.contains("Node count: 2 Value count: 3"));
    assert!(report.contains("[5, 5, 7]\n"));
}

#[test]
fn deleted_values_are_missing_from_both_searches_matrix() {
    let mut cfg = config(InputSource::Numbers(vec![5, 7]));
    cfg.probes = vec![5, 7];
    cfg.deletions = vec![5];
    let (index, report) = run_to_string(&cfg);

    assert!(!index.search(&5));
    assert!(report.starts_with("Unsorted list\n------------------------------\n[7]\n\n"));
    assert_eq!(report.matches("5 is present").count(), 0);
    assert_eq!(report.matches("5 is missing").count(), 2);
    assert_eq!(report.matches("7 is present").count(), 2);
}

#[test]
fn deleting_one_duplicate_keeps_it_searchable_matrix() {
    let mut cfg = config(InputSource::Numbers(vec![3, 9, 3]));
    cfg.probes = vec![3];
    cfg.deletions = vec![3, 4];
    let (index, report) = run_to_string(&cfg);

    assert_eq!(index.frequency(&3), 1);
    assert!(report.contains("[9, 3]\n"));
    assert_eq!(report.matches("3 is present").count(), 2);
}

#[test]
fn empty_input_reports_no_root_matrix() {
    let (index, report) = run_to_string(&config(InputSource::Numbers(Vec::new())));
    assert!(index.is_empty());
    assert!(report.contains("Root value: none Node count: 0 Value count: 0 Height: 0\n"));
}

#[test]
fn input_and_output_files_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("values.json");
    let output = dir.path().join("tree.txt");
    fs::write(&input, "[7, 6, 5, 0, 8, 6, 8, 1, 6, 7]").unwrap();

    let mut cfg = config(InputSource::File(input.clone()));
    cfg.output_file = Some(output.clone());
    let (index, _) = run_to_string(&cfg);

    assert_eq!(index.size(), (6, 10));
    assert_eq!(fs::read_to_string(&output).unwrap(), index.to_string());
    assert_eq!(read_values(&input).unwrap().len(), 10);
}

#[test]
fn bad_input_file_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("values.json");
    fs::write(&input, "{\"not\": \"a list\"}").unwrap();
    assert!(matches!(read_values(&input), Err(CliError::Parse { .. })));

    let missing = dir.path().join("missing.json");
    assert!(matches!(read_values(&missing), Err(CliError::Read { .. })));

    let mut out = Vec::new();
    assert!(run(&config(InputSource::File(missing)), &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn random_values_matrix() {
    let a = random_values(50, -5, 5, Some(7)).unwrap();
    let b = random_values(50, -5, 5, Some(7)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 50);
    assert!(a.iter().all(|v| (-5..=5).contains(v)));

    assert_eq!(random_values(3, 4, 4, None).unwrap(), vec![4, 4, 4]);
    assert!(matches!(
        random_values(3, 10, 0, None),
        Err(CliError::InvalidRange { min: 10, max: 0 })
    ));
}

#[test]
fn large_inputs_skip_listing_matrix() {
    let values: Vec<i64> = (0..1500).collect();
    let index: OrderedIndex<i64> = values.iter().copied().collect();
    let report = render_report(&values, &index, &[]).unwrap();
    assert!(!report.contains("Unsorted list"));
    assert!(!report.contains("String representation"));
    assert!(report.contains("Node count: 1500 Value count: 1500"));
}
