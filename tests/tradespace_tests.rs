use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use firebreak::tradespace::{
    filter_by_time, load_antichain, pareto_2d_min, shade_frontier, ResultKind, ShadeMode,
    TradespaceError,
};

fn unique_temp_file(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("firebreak-{name}-{stamp}.yaml"))
}

fn write_document(name: &str, body: &str) -> PathBuf {
    let path = unique_temp_file(name);
    fs::write(&path, body).expect("document should be writable");
    path
}

#[test]
fn loads_and_sorts_the_optimistic_branch() {
    let path = write_document(
        "load",
        r#"optimistic:
  minimals: "{(Decimal('100.0'), Decimal('50.0'), Decimal('10.0')), (90.0, 60.0, 5.0), (80.0, 40.0, 20.0)}"
pessimistic:
  minimals: "{(80.0, 40.0, 20.0)}"
"#,
    );

    let points = load_antichain(&path, ResultKind::Optimistic).expect("load should succeed");
    let loads: Vec<f64> = points.iter().map(|p| p.load).collect();
    let costs: Vec<f64> = points.iter().map(|p| p.cost).collect();
    let times: Vec<f64> = points.iter().map(|p| p.time).collect();
    assert_eq!(loads, vec![40.0, 50.0, 60.0]);
    assert_eq!(costs, vec![80.0, 100.0, 90.0]);
    assert_eq!(times, vec![20.0, 10.0, 5.0]);

    fs::remove_file(&path).ok();
}

#[test]
fn two_component_tuples_default_time_to_zero() {
    let path = write_document(
        "pairs",
        r#"optimistic:
  minimals: "{(100.0, 50.0), (90.0, 60.0)}"
"#,
    );

    let points = load_antichain(&path, ResultKind::Optimistic).expect("load should succeed");
    assert!(points.iter().all(|p| p.time == 0.0));

    fs::remove_file(&path).ok();
}

#[test]
fn empty_minimals_is_the_empty_result_condition() {
    let path = write_document(
        "empty",
        r#"optimistic:
  minimals: "frozenset()"
"#,
    );

    let err = load_antichain(&path, ResultKind::Optimistic).unwrap_err();
    assert!(matches!(err, TradespaceError::EmptyAntichain));

    fs::remove_file(&path).ok();
}

#[test]
fn absent_branch_is_reported_by_name() {
    let path = write_document(
        "branch",
        r#"optimistic:
  minimals: "{(1.0, 2.0, 3.0)}"
"#,
    );

    let err = load_antichain(&path, ResultKind::Pessimistic).unwrap_err();
    assert!(matches!(err, TradespaceError::MissingBranch("pessimistic")));
    assert!(err.to_string().contains("pessimistic"));

    fs::remove_file(&path).ok();
}

#[test]
fn malformed_document_fails_to_parse() {
    let path = write_document("malformed", "optimistic: [not, a, branch]\n");
    let err = load_antichain(&path, ResultKind::Optimistic).unwrap_err();
    assert!(matches!(err, TradespaceError::Parse(_)));
    fs::remove_file(&path).ok();
}

#[test]
fn missing_file_surfaces_the_read_error() {
    let err = load_antichain("no-such-directory/output.yaml", ResultKind::Optimistic).unwrap_err();
    assert!(matches!(err, TradespaceError::Read(_)));
}

#[test]
fn filter_then_frontier_matches_the_slice_shading() {
    let path = write_document(
        "slice",
        r#"optimistic:
  minimals: "{(100.0, 50.0, 10.0), (90.0, 60.0, 5.0), (80.0, 40.0, 20.0)}"
"#,
    );

    let points = load_antichain(&path, ResultKind::Optimistic).expect("load should succeed");
    let sliced = filter_by_time(&points, 10.0).expect("filter should retain points");
    assert_eq!(sliced.len(), 2);

    let direct: Vec<(f64, f64)> = pareto_2d_min(&sliced)
        .into_iter()
        .map(|idx| (sliced[idx].load, sliced[idx].cost))
        .collect();
    let shaded = shade_frontier(&sliced, ShadeMode::Slice, Some(10.0))
        .expect("slice with ceiling is valid")
        .expect("slice produces a frontier");
    assert_eq!(direct, shaded);

    fs::remove_file(&path).ok();
}
