// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aggregated counts and timing of a test run.

use std::time::{Duration, SystemTime};

use smart_default::SmartDefault;

use crate::result::{Outcome, ResultNode, Status};

/// Summary of a whole tree of [`ResultNode`]s.
///
/// Only test cases are counted. Suites contribute their children, so no
/// test is ever counted twice.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Summary {
    /// Overall [`Status`] of the run (the one of its root).
    pub result: Status,

    /// Number of test cases in the tree.
    pub test_count: usize,

    /// Number of [`Outcome::Passed`] tests.
    pub passed: usize,

    /// Number of [`Outcome::Failed`] tests.
    pub failed: usize,

    /// Number of [`Outcome::Error`] tests.
    pub errors: usize,

    /// Number of [`Outcome::Inconclusive`] tests.
    pub inconclusive: usize,

    /// Number of [`Outcome::Skipped`] tests.
    pub skipped: usize,

    /// Number of [`Outcome::Ignored`] tests.
    pub ignored: usize,

    /// Number of [`Outcome::Invalid`] tests.
    pub invalid: usize,

    /// Number of [`Outcome::Unrecognized`] tests.
    pub unrecognized: usize,

    /// Time the run started at.
    #[default(SystemTime::UNIX_EPOCH)]
    pub start_time: SystemTime,

    /// Time the run finished at.
    #[default(SystemTime::UNIX_EPOCH)]
    pub end_time: SystemTime,

    /// Time spent on the run.
    pub duration: Duration,
}

impl Summary {
    /// Summarizes the tree rooted at the given `root`.
    #[must_use]
    pub fn new(root: &ResultNode) -> Self {
        let mut summary = Self {
            result: root.status,
            start_time: root.start_time,
            end_time: root.end_time,
            duration: root.duration,
            ..Self::default()
        };
        for test in root.tests() {
            summary.record(test);
        }
        summary
    }

    /// Counts the given `test` case in the bucket of its [`Outcome`].
    fn record(&mut self, test: &ResultNode) {
        self.test_count += 1;

        let bucket = match test.outcome() {
            Outcome::Passed => &mut self.passed,
            Outcome::Failed => &mut self.failed,
            Outcome::Error => &mut self.errors,
            Outcome::Inconclusive => &mut self.inconclusive,
            Outcome::Skipped => &mut self.skipped,
            Outcome::Ignored => &mut self.ignored,
            Outcome::Invalid => &mut self.invalid,
            Outcome::Unrecognized => {
                tracing::warn!(
                    test = %test.full_name,
                    status = %test.status,
                    label = test.label(),
                    "unrecognized test outcome"
                );
                &mut self.unrecognized
            }
        };
        *bucket += 1;
    }

    /// Number of tests that have actually run.
    #[must_use]
    pub const fn run_count(&self) -> usize {
        self.passed + self.failed + self.errors + self.inconclusive
    }

    /// Number of tests that haven't run.
    #[must_use]
    pub const fn not_run_count(&self) -> usize {
        self.skipped + self.ignored + self.invalid
    }

    /// Indicates whether any test has failed or errored.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed + self.errors > 0
    }

    /// Indicates whether any test was skipped or ignored.
    #[must_use]
    pub const fn has_skipped(&self) -> bool {
        self.skipped + self.ignored > 0
    }
}

#[cfg(test)]
mod tests {
    use crate::result::{label, Site};

    use super::*;

    fn leaf(name: &str, status: Status) -> ResultNode {
        ResultNode::test(name).with_status(status)
    }

    #[test]
    fn empty_tree_has_no_tests() {
        let summary = Summary::new(&ResultNode::suite("Empty"));

        assert_eq!(summary.test_count, 0);
        assert_eq!(summary.run_count(), 0);
        assert_eq!(summary.not_run_count(), 0);
    }

    #[test]
    fn counts_each_outcome_once() {
        let root = ResultNode::suite("A")
            .with_status(Status::Failed)
            .with_child(leaf("A.Pass", Status::Passed))
            .with_child(
                ResultNode::suite("A.B")
                    .with_status(Status::Failed)
                    .with_child(leaf("A.B.Fail", Status::Failed))
                    .with_child(
                        leaf("A.B.Err", Status::Failed).with_label(label::ERROR),
                    )
                    .with_child(
                        leaf("A.B.Parent", Status::Failed).with_site(Site::Parent),
                    ),
            )
            .with_child(leaf("A.Maybe", Status::Inconclusive))
            .with_child(leaf("A.Skip", Status::Skipped))
            .with_child(
                leaf("A.Ignore", Status::Skipped).with_label(label::IGNORED),
            )
            .with_child(
                leaf("A.Invalid", Status::Failed).with_label(label::INVALID),
            )
            .with_child(leaf("A.Odd", Status::Passed).with_label(label::ERROR));

        let summary = Summary::new(&root);

        assert_eq!(summary.result, Status::Failed);
        assert_eq!(summary.test_count, 9);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.inconclusive, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(summary.run_count(), 5);
        assert_eq!(summary.not_run_count(), 3);
        assert!(summary.has_failures());
        assert!(summary.has_skipped());
    }

    #[test]
    fn run_count_is_sum_of_run_outcomes() {
        let root = ResultNode::suite("A").with_children(
            [Status::Passed, Status::Passed, Status::Failed, Status::Skipped]
                .into_iter()
                .enumerate()
                .map(|(i, s)| leaf(&format!("A.T{i}"), s)),
        );

        let summary = Summary::new(&root);

        assert_eq!(
            summary.run_count(),
            summary.passed
                + summary.failed
                + summary.errors
                + summary.inconclusive,
        );
        assert_eq!(summary.run_count(), 3);
        assert_eq!(summary.not_run_count(), 1);
    }

    #[test]
    fn timing_comes_from_root() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let root = ResultNode::suite("A")
            .with_timing(start, Duration::from_millis(2_500))
            .with_child(leaf("A.T", Status::Passed));

        let summary = Summary::new(&root);

        assert_eq!(summary.start_time, start);
        assert_eq!(summary.end_time, start + Duration::from_millis(2_500));
        assert_eq!(summary.duration, Duration::from_millis(2_500));
    }

    #[test]
    fn passing_run_has_no_failures() {
        let summary = Summary::new(
            &ResultNode::suite("A").with_child(leaf("A.T", Status::Passed)),
        );

        assert!(!summary.has_failures());
        assert!(!summary.has_skipped());
    }
}
