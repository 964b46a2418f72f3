//! End-to-end report rendering tests.

use std::time::{Duration, SystemTime};

use suite_report::{
    cli::Coloring,
    label,
    writer::{Console, Recorder, WritableString},
    Reporter, ResultNode, Severity, Site, Status, THEORY,
};

fn failed(name: &str) -> ResultNode {
    ResultNode::test(name).with_status(Status::Failed)
}

fn skipped(name: &str) -> ResultNode {
    ResultNode::test(name).with_status(Status::Skipped)
}

fn record(root: &ResultNode, stop_on_error: bool) -> Recorder {
    let mut reporter = Reporter::new(root, Recorder::new());
    reporter.produce_report(stop_on_error).unwrap();
    reporter.into_sink()
}

fn render(root: &ResultNode) -> String {
    let console =
        Console::new(WritableString::default()).with_coloring(Coloring::Never);
    let mut reporter = Reporter::new(root, console);
    reporter.produce_report(false).unwrap();
    reporter.into_sink().into_inner().0
}

fn entries(rec: &Recorder) -> Vec<String> {
    rec.texts()
        .into_iter()
        .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .collect()
}

#[test]
fn passing_run_has_only_summary() {
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_518_568_087);
    let root = ResultNode::suite("Assembly")
        .with_timing(start, Duration::from_millis(1_250))
        .with_children((1..=3).map(|i| ResultNode::test(format!("A.T{i}"))));

    let output = render(&root);

    assert_eq!(
        output,
        "Test Run Summary\n\
         \x20  Overall result: Passed\n\
         \x20  Tests run: 3, Passed: 3, Errors: 0, Failures: 0, \
         Inconclusive: 0\n\
         \x20    Not run: 0, Invalid: 0, Ignored: 0, Skipped: 0\n\
         \x20 Start time: 2018-02-14 00:28:07Z\n\
         \x20   End time: 2018-02-14 00:28:08Z\n\
         \x20   Duration: 1.250 seconds\n\
         \n",
    );
}

#[test]
fn empty_run_warns_about_no_tests() {
    let rec = record(&ResultNode::suite("Assembly"), false);

    let first = &rec.lines()[0];
    assert_eq!(first.text(), "Warning: No tests found");
    assert_eq!(first.severity(), Severity::Warning);
    assert!(rec.lines()[1].is_blank());
    assert_eq!(rec.texts()[2], "Test Run Summary");
    assert!(rec.texts().contains(&"   Tests run: 0, Passed: 0, Errors: 0, \
                                    Failures: 0, Inconclusive: 0"
        .to_owned()));
}

#[test]
fn set_up_failure_reports_only_fixture() {
    let root = ResultNode::suite("Fixture")
        .with_status(Status::Failed)
        .with_label(label::ERROR)
        .with_site(Site::SetUp)
        .with_message("OneTimeSetUp: boom\n")
        .with_child(failed("Fixture.Test1").with_site(Site::Parent))
        .with_child(failed("Fixture.Test2").with_site(Site::Parent));

    let rec = record(&root, false);

    assert_eq!(entries(&rec), ["1) SetUp Error : Fixture"]);
    let texts = rec.texts();
    let header = texts.iter().position(|l| l == "Errors and Failures").unwrap();
    assert!(rec.lines()[header + 1].is_blank());
    assert_eq!(texts[header + 2], "1) SetUp Error : Fixture");
    assert_eq!(rec.lines()[header + 2].severity(), Severity::Failure);
    assert_eq!(texts[header + 3], "OneTimeSetUp: boom");
    assert!(rec.lines()[header + 4].is_blank());
    assert_eq!(texts.len(), header + 5);
}

#[test]
fn theory_reports_suite_and_failed_case() {
    let root = ResultNode::suite("Math")
        .with_status(Status::Failed)
        .with_child(
            ResultNode::suite("Math.Sum")
                .with_status(Status::Failed)
                .with_test_type(THEORY)
                .with_child(failed("Math.Sum(1,1)"))
                .with_child(ResultNode::test("Math.Sum(2,2)")),
        );

    let rec = record(&root, false);

    assert_eq!(
        entries(&rec),
        ["1) Failed : Math.Sum", "2) Failed : Math.Sum(1,1)"],
    );
}

#[test]
fn ignored_test_is_reported_as_warning() {
    let root = ResultNode::suite("A")
        .with_status(Status::Skipped)
        .with_child(
            skipped("A.T")
                .with_label(label::IGNORED)
                .with_message("Not ready yet"),
        );

    let rec = record(&root, false);

    let texts = rec.texts();
    assert!(texts.contains(&"   Overall result: Warning".to_owned()));
    assert!(!texts.contains(&"Errors and Failures".to_owned()));
    let header = texts.iter().position(|l| l == "Tests Not Run").unwrap();
    let entry = &rec.lines()[header + 2];
    assert_eq!(entry.text(), "1) Ignored : A.T");
    assert_eq!(entry.severity(), Severity::Warning);
    assert_eq!(rec.lines()[header + 3].text(), "Not ready yet");
    assert_eq!(rec.lines()[header + 3].severity(), Severity::Warning);
}

#[test]
fn numbering_restarts_for_not_run_section() {
    let root = ResultNode::suite("A")
        .with_status(Status::Failed)
        .with_child(failed("A.F1"))
        .with_child(skipped("A.S1"))
        .with_child(
            ResultNode::suite("A.B")
                .with_status(Status::Failed)
                .with_child(failed("A.B.F2"))
                .with_child(skipped("A.B.S2").with_label(label::IGNORED)),
        )
        .with_child(failed("A.F3"));

    let rec = record(&root, false);

    assert_eq!(
        entries(&rec),
        [
            "1) Failed : A.F1",
            "2) Failed : A.B.F2",
            "3) Failed : A.F3",
            "1) Skipped : A.S1",
            "2) Ignored : A.B.S2",
        ],
    );
}

#[test]
fn stop_on_error_notice_requires_failures() {
    let failing = ResultNode::suite("A")
        .with_status(Status::Failed)
        .with_child(failed("A.T"));
    let passing = ResultNode::suite("A").with_child(ResultNode::test("A.T"));

    let rec = record(&failing, true);
    assert_eq!(rec.texts()[0], "Execution terminated after first error");
    assert_eq!(rec.lines()[0].severity(), Severity::Failure);

    let rec = record(&passing, true);
    assert_eq!(rec.texts()[0], "Test Run Summary");

    let rec = record(&failing, false);
    assert_eq!(rec.texts()[0], "Test Run Summary");
}

#[test]
fn summary_counts_are_styled_only_when_non_zero() {
    let root = ResultNode::suite("A")
        .with_status(Status::Failed)
        .with_child(failed("A.F"))
        .with_child(skipped("A.I").with_label(label::IGNORED));

    let rec = record(&root, false);

    let texts = rec.texts();
    let run = texts.iter().position(|l| l.starts_with("   Tests run")).unwrap();
    assert_eq!(
        texts[run],
        "   Tests run: 1, Passed: 0, Errors: 0, Failures: 1, Inconclusive: 0",
    );
    let segments = &rec.lines()[run].segments;
    assert_eq!(segments[5], (Severity::Output, "0".to_owned()));
    assert_eq!(segments[7], (Severity::Failure, "1".to_owned()));

    assert_eq!(
        texts[run + 1],
        "     Not run: 1, Invalid: 0, Ignored: 1, Skipped: 0",
    );
    let segments = &rec.lines()[run + 1].segments;
    assert_eq!(segments[3], (Severity::Output, "0".to_owned()));
    assert_eq!(segments[5], (Severity::Warning, "1".to_owned()));
}

#[test]
fn invalid_tests_are_counted_but_not_listed_as_not_run() {
    let root = ResultNode::suite("A")
        .with_child(skipped("A.Bad").with_label(label::INVALID));

    let rec = record(&root, false);

    let texts = rec.texts();
    assert!(texts.contains(
        &"     Not run: 1, Invalid: 1, Ignored: 0, Skipped: 0".to_owned(),
    ));
    assert!(!texts.contains(&"Tests Not Run".to_owned()));
}

#[test]
fn failure_details_are_rendered() {
    let root = ResultNode::suite("A").with_status(Status::Failed).with_child(
        failed("A.T")
            .with_message("  Expected: 1\n  But was:  2\r\n")
            .with_stack_trace("at A.T() in T.cs:line 7\n"),
    );

    let output = render(&root);

    assert!(output.ends_with(
        "Errors and Failures\n\
         \n\
         1) Failed : A.T\n\
         \x20 Expected: 1\n\
         \x20 But was:  2\n\
         at A.T() in T.cs:line 7\n\
         \n",
    ));
}

#[test]
fn line_break_only_message_renders_empty_line() {
    let root = ResultNode::suite("A")
        .with_status(Status::Failed)
        .with_child(failed("A.T").with_message("\r\n"));

    let rec = record(&root, false);

    let texts = rec.texts();
    let entry = texts.iter().position(|l| l == "1) Failed : A.T").unwrap();
    assert_eq!(texts[entry + 1], "");
    assert_eq!(rec.lines()[entry + 1].severity(), Severity::Failure);
    assert!(rec.lines()[entry + 2].is_blank());
    assert_eq!(texts.len(), entry + 3);
}
