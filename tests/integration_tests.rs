//! End-to-end scenarios: a scripted clock and a memory sink, driven through
//! `run::tests`, asserting on the captured output and exit codes.

use tally::{run, Config, ErrorKind, EventListener, Reporter};
use tally::clock::Scripted;
use tally::model::{TestIdentity, TestOutcome};
use tally::sink::Memory;

fn reporter_with(config: Config, readings: Vec<u64>) -> Reporter<Scripted, Memory> {
    Reporter::new(config, Scripted::new(readings), Memory::new())
}

/// Three passing tests taking 10/20/30 ms; the whole run reads top to bottom.
#[test]
fn all_tests_pass() {
    pretty_env_logger::init();

    let mut config = Config::default();
    config.suite_name = "Integration Test Suite".to_owned();

    // program start, then (start, end) per test, then program end.
    let mut reporter = reporter_with(config, vec![0, 0, 10, 10, 30, 30, 60, 60]);

    let status = run::tests(&mut reporter, |suite| {
        suite.add_case("Repository", "stores_records", || TestOutcome::Passed);
        suite.add_case("Repository", "loads_records", || TestOutcome::Passed);
        suite.add_case("Logic", "validates_input", || TestOutcome::Passed);
    }).expect("run should complete");

    assert_eq!(status.exit_code(), 0);
    assert_eq!(reporter.passed_count(), 3);
    assert_eq!(reporter.failed_count(), 0);

    let sink = reporter.into_sink();
    assert_eq!(sink.lines(), &[
        "=== Integration Test Suite ===".to_owned(),
        "[RUNNING ] Repository.stores_records".to_owned(),
        "[  OK  ] Repository.stores_records (10 ms)".to_owned(),
        "[RUNNING ] Repository.loads_records".to_owned(),
        "[  OK  ] Repository.loads_records (20 ms)".to_owned(),
        "[RUNNING ] Logic.validates_input".to_owned(),
        "[  OK  ] Logic.validates_input (30 ms)".to_owned(),
        "==================================================".to_owned(),
        "Total tests run: 3".to_owned(),
        "Tests passed: 3".to_owned(),
        "Tests failed: 0".to_owned(),
        "Total execution time: 60 ms".to_owned(),
        "[SUCCESS] All tests passed.".to_owned(),
        "Average test execution time: 20 ms".to_owned(),
    ]);
}

/// One pass, one failure carrying two message parts.
#[test]
fn one_failure_with_two_parts() {
    let mut reporter = reporter_with(Config::default(), vec![0, 0, 5, 5, 20, 20]);

    let status = run::tests(&mut reporter, |suite| {
        suite.add_case("Math", "addition", || TestOutcome::Passed);
        suite.add_case("Math", "equality", || {
            TestOutcome::failed(vec!["assertion x==1 failed", "got 2"])
        });
    }).expect("run should complete");

    assert_eq!(status.exit_code(), 1);
    assert_eq!(reporter.passed_count(), 1);
    assert_eq!(reporter.failed_count(), 1);

    let sink = reporter.into_sink();
    let lines = sink.lines();

    let status_index = lines.iter()
        .position(|l| l == "[ FAIL ] Math.equality (15 ms)")
        .expect("missing failure status line");

    assert_eq!(lines[status_index + 1], "  FAILURE: assertion x==1 failed");
    assert_eq!(lines[status_index + 2], "  FAILURE: got 2");

    assert!(sink.contains_line("Tests passed: 1"));
    assert!(sink.contains_line("Tests failed: 1"));
    assert!(sink.contains_line("[WARNING] Some tests failed. Check the output above for details."));
}

/// A single 250 ms test against the default 100 ms threshold.
#[test]
fn slow_tests_trigger_the_threshold_notice() {
    let mut reporter = reporter_with(Config::default(), vec![0, 0, 250, 250]);

    let status = run::tests(&mut reporter, |suite| {
        suite.add_case("Slow", "crawls", || TestOutcome::Passed);
    }).expect("run should complete");

    assert_eq!(status.exit_code(), 0);

    let sink = reporter.into_sink();
    assert!(sink.contains_line("Average test execution time: 250 ms"));
    assert!(sink.contains_line(
        "[NOTICE] Average test time exceeds 100 ms. Consider optimizing slow tests."));
}

/// No tests registered at all.
#[test]
fn empty_run_reports_no_average() {
    let mut reporter = reporter_with(Config::default(), vec![0, 0]);

    let status = run::tests(&mut reporter, |_suite| {}).expect("run should complete");

    assert_eq!(status.exit_code(), 0);

    let sink = reporter.into_sink();
    assert!(sink.contains_line("Total tests run: 0"));
    assert!(sink.contains_line("Tests passed: 0"));
    assert!(sink.contains_line("Tests failed: 0"));
    assert!(sink.contains_line("Average test execution time: n/a"));
}

/// Strict mode surfaces a test end that was never started and refuses to
/// process anything afterwards.
#[test]
fn strict_mode_rejects_end_without_start() {
    let mut config = Config::default();
    config.strict_ordering = true;

    let mut reporter = reporter_with(config, vec![0, 1, 2]);
    reporter.on_program_start(1).unwrap();

    let ghost = TestIdentity::new("Ghost", "unstarted");
    let err = reporter.on_test_end(&ghost, TestOutcome::Passed).unwrap_err();
    match *err.kind() {
        ErrorKind::EndWithoutStart(ref id) => assert_eq!(id, "Ghost.unstarted"),
        ref k => panic!("unexpected error kind: {:?}", k),
    }

    assert!(reporter.on_program_end().is_err());

    let sink = reporter.into_sink();
    assert!(!sink.lines().iter().any(|l| l.starts_with("Total tests run:")));
}

/// The reporter keeps its banner-line contract: opaque strings, echoed
/// verbatim, in order.
#[test]
fn banner_lines_are_echoed_verbatim() {
    let mut config = Config::default();
    config.suite_name = "Repository Suite".to_owned();
    config.add_banner_line("Database: in-memory");
    config.add_banner_line("Coverage: repository layer + business logic");

    let mut reporter = reporter_with(config, vec![0, 0, 1, 1]);

    run::tests(&mut reporter, |suite| {
        suite.add_case("Repository", "roundtrip", || TestOutcome::Passed);
    }).expect("run should complete");

    let sink = reporter.into_sink();
    assert_eq!(sink.lines()[0], "=== Repository Suite ===");
    assert_eq!(sink.lines()[1], "Database: in-memory");
    assert_eq!(sink.lines()[2], "Coverage: repository layer + business logic");
}
