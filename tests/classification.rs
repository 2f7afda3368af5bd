use chrono::NaiveDate;
use severityboard::dataset::Dataset;
use severityboard::detect::engine::{classify, SeverityEngine, Summary};
use severityboard::detect::window::trailing_window;
use severityboard::detect::{DetectError, Severity};

fn mock_dataset() -> Dataset {
    let path = format!(
        "{}/data/mock_single_server_error_data.csv",
        env!("CARGO_MANIFEST_DIR")
    );
    Dataset::load_csv(path).expect("mock dataset should load")
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
}

fn severities(summary: &Summary) -> Vec<Severity> {
    summary.groups().iter().map(|g| g.severity).collect()
}

#[test]
fn test_mock_dataset_covers_january() {
    let ds = mock_dataset();
    assert_eq!(ds.len(), 31);
    assert_eq!(ds.first_date(), Some(jan(1)));
    assert_eq!(ds.last_date(), Some(jan(31)));
}

#[test]
fn test_every_rule_critical() {
    let engine = SeverityEngine::from(mock_dataset());
    let eval = engine.evaluate(jan(5)).unwrap();

    assert_eq!(severities(&eval.summary), vec![Severity::Critical]);
    assert_eq!(
        eval.summary.groups()[0].warnings,
        vec![
            "server_0 has problem_0 status",
            "server_0 has had problem_1 status for 4 day(s)",
            "server_0 has 10 report(s) of problem_2 status",
        ]
    );
}

#[test]
fn test_mixed_severities_in_display_order() {
    let engine = SeverityEngine::from(mock_dataset());
    let eval = engine.evaluate(jan(10)).unwrap();

    assert_eq!(
        severities(&eval.summary),
        vec![Severity::Critical, Severity::High, Severity::Moderate]
    );
    for group in eval.summary.groups() {
        assert_eq!(group.warnings.len(), 1, "{:?}", group.severity);
    }
}

#[test]
fn test_quiet_day() {
    let engine = SeverityEngine::from(mock_dataset());
    assert_eq!(engine.evaluate(jan(6)).unwrap().summary, Summary::NoProblems);
}

#[test]
fn test_first_day_window() {
    let engine = SeverityEngine::from(mock_dataset());
    let eval = engine.evaluate(jan(1)).unwrap();
    assert_eq!(eval.window.len(), 1);
    assert!(eval.summary.is_no_problems());
}

#[test]
fn test_selected_row_is_last() {
    let ds = mock_dataset();
    let window = trailing_window(&ds, jan(20), 3).unwrap();
    assert_eq!(window.len(), 4);
    assert_eq!(window.rows().last().unwrap().date, jan(20));
    assert_eq!(window.rows()[0].date, jan(17));
}

#[test]
fn test_window_is_independent_copy() {
    let ds = mock_dataset();
    let mut rows = trailing_window(&ds, jan(9), 3).unwrap().into_rows();
    rows[3].problem_2 = 999;
    assert_eq!(ds.rows()[8].problem_2, 7);
    assert_eq!(trailing_window(&ds, jan(9), 3).unwrap().latest().problem_2, 7);
}

#[test]
fn test_two_low_findings_share_a_card() {
    let ds = mock_dataset();
    let summary = classify(&trailing_window(&ds, jan(31), 3).unwrap()).unwrap();
    assert_eq!(severities(&summary), vec![Severity::Low]);
    assert_eq!(summary.groups()[0].warnings.len(), 2);
}

#[test]
fn test_long_streak_within_default_window() {
    let engine = SeverityEngine::from(mock_dataset());
    let eval = engine.evaluate(jan(19)).unwrap();
    assert_eq!(severities(&eval.summary), vec![Severity::Critical]);
}

#[test]
fn test_long_streak_with_wider_window_is_error() {
    let engine = SeverityEngine::from(mock_dataset());
    let err = engine.evaluate_with(jan(19), 4).unwrap_err();
    assert_eq!(err, DetectError::StreakOutOfRange { streak: 5, max: 4 });
}

#[test]
fn test_unknown_date() {
    let engine = SeverityEngine::from(mock_dataset());
    let missing = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
    assert_eq!(
        engine.evaluate(missing).unwrap_err(),
        DetectError::DateNotFound { date: missing }
    );
}

#[test]
fn test_repeat_evaluation_is_stable() {
    let engine = SeverityEngine::from(mock_dataset());
    for day in 1..=31 {
        let first = engine.evaluate(jan(day)).unwrap();
        let second = engine.evaluate(jan(day)).unwrap();
        assert_eq!(first, second, "day {}", day);
    }
}
