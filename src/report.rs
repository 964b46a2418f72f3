// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering of a test run report.
//!
//! A report consists of three sections, written in order:
//! 1. Summary of counts and timing, always.
//! 2. Errors and failures, if the run has failed.
//! 3. Tests not run, if any test was skipped or ignored.
//!
//! Each detail section numbers its entries starting from `1`.

use std::{
    borrow::Cow,
    time::{Duration, SystemTime},
};

use crate::{
    error::Result,
    result::{label, Outcome, ResultNode, Site, Status},
    summary::Summary,
    writer::{Severity, Sink},
};

/// Latest time [`timestamp()`] is able to render (`9999-12-31 23:59:59Z`).
const MAX_TIMESTAMP_SECS: u64 = 253_402_300_799;

/// Characters trimmed from the end of messages and stack traces.
const TRIM_CHARS: &[char] = &['\r', '\n'];

/// Numbered entry of a report section.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReportEntry<'t> {
    /// Number of this entry in its section, starting from `1`.
    pub index: usize,

    /// [`ResultNode`] this entry is about.
    pub node: &'t ResultNode,

    /// [`Severity`] this entry is written at.
    pub severity: Severity,
}

impl<'t> ReportEntry<'t> {
    /// Returns the status of the [`ResultNode`] as displayed in a report.
    ///
    /// Prefers the label over the generic [`Status`] name, and prefixes
    /// failures and errors of a fixture with the [`Site`] they occurred at
    /// (like `SetUp Error`).
    #[must_use]
    pub fn status(&self) -> Cow<'t, str> {
        let status = self
            .node
            .label()
            .map_or_else(|| self.node.status.to_string().into(), Cow::Borrowed);
        let is_failure =
            matches!(self.node.outcome(), Outcome::Failed | Outcome::Error);

        match self.node.site {
            Site::SetUp | Site::TearDown if is_failure => {
                format!("{} {status}", self.node.site).into()
            }
            _ => status,
        }
    }

    /// Returns the numbered heading line of this entry.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{}) {} : {}", self.index, self.status(), self.node.full_name)
    }

    /// Returns the message of the [`ResultNode`], if non-empty, without
    /// trailing line breaks.
    #[must_use]
    pub fn message(&self) -> Option<&'t str> {
        trimmed(self.node.message.as_deref())
    }

    /// Returns the stack trace of the [`ResultNode`], if non-empty, without
    /// trailing line breaks.
    #[must_use]
    pub fn stack_trace(&self) -> Option<&'t str> {
        trimmed(self.node.stack_trace.as_deref())
    }
}

/// Selects the entries of the "Errors and Failures" section.
///
/// Walks the tree depth-first. A failed suite is selected if it's a theory
/// or has failed in its set-up or tear-down. A suite failed in its set-up
/// is never descended into, as its tests haven't run at all. Failed test
/// cases are always selected, regardless of the status of their parents.
#[must_use]
pub fn errors_and_failures(root: &ResultNode) -> Vec<ReportEntry<'_>> {
    let mut selected = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let failed = node.status == Status::Failed;
        if !node.is_container() {
            if failed {
                selected.push(node);
            }
            continue;
        }

        if failed {
            if node.is_theory() || matches!(node.site, Site::SetUp | Site::TearDown)
            {
                selected.push(node);
            }
            if node.site == Site::SetUp {
                continue;
            }
        }
        stack.extend(node.children.iter().rev());
    }
    numbered(selected, |_| Severity::Failure)
}

/// Selects the entries of the "Tests Not Run" section.
///
/// Walks the tree depth-first, selecting every skipped node without
/// children. Ignored ones are selected at [`Severity::Warning`].
#[must_use]
pub fn not_run(root: &ResultNode) -> Vec<ReportEntry<'_>> {
    let mut selected = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_leaf() {
            if node.status == Status::Skipped {
                selected.push(node);
            }
        } else {
            stack.extend(node.children.iter().rev());
        }
    }
    numbered(selected, |node| {
        if node.label() == Some(label::IGNORED) {
            Severity::Warning
        } else {
            Severity::Output
        }
    })
}

/// Numbers the `selected` nodes starting from `1`.
fn numbered<'t>(
    selected: Vec<&'t ResultNode>,
    severity: impl Fn(&ResultNode) -> Severity,
) -> Vec<ReportEntry<'t>> {
    selected
        .into_iter()
        .zip(1..)
        .map(|(node, index)| ReportEntry {
            index,
            node,
            severity: severity(node),
        })
        .collect()
}

/// Renders the overall result of a run: its [`Status`] name, except that a
/// skipped run is a warning.
#[must_use]
pub fn overall_result(status: Status) -> Cow<'static, str> {
    match status {
        Status::Skipped => "Warning".into(),
        s => s.to_string().into(),
    }
}

/// Returns the [`Severity`] of the overall result of a run.
#[must_use]
pub const fn overall_severity(status: Status) -> Severity {
    match status {
        Status::Passed => Severity::Pass,
        Status::Failed => Severity::Failure,
        Status::Skipped => Severity::Warning,
        Status::Inconclusive => Severity::Output,
    }
}

/// Formats the given `time` in the sortable `YYYY-MM-DD HH:MM:SSZ` UTC
/// format.
///
/// Times before the Unix epoch or after the year `9999` are clamped.
#[must_use]
pub fn timestamp(time: SystemTime) -> String {
    let max = SystemTime::UNIX_EPOCH + Duration::from_secs(MAX_TIMESTAMP_SECS);
    let time = time.clamp(SystemTime::UNIX_EPOCH, max);
    humantime::format_rfc3339_seconds(time)
        .to_string()
        .replacen('T', " ", 1)
}

/// Formats the given `duration` as seconds with millisecond precision.
#[must_use]
pub fn seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

/// Renderer of a report about a tree of [`ResultNode`]s into a [`Sink`].
#[derive(Debug)]
pub struct Reporter<'t, S> {
    /// Root of the reported tree.
    root: &'t ResultNode,

    /// [`Summary`] of the reported tree.
    summary: Summary,

    /// [`Sink`] to write the report into.
    sink: S,
}

impl<'t, S: Sink> Reporter<'t, S> {
    /// Creates a new [`Reporter`] of the tree rooted at the given `root`,
    /// summarizing it.
    #[must_use]
    pub fn new(root: &'t ResultNode, sink: S) -> Self {
        Self { root, summary: Summary::new(root), sink }
    }

    /// Returns the [`Summary`] of the reported tree.
    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Unwraps this [`Reporter`], returning its [`Sink`].
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Writes the whole report.
    ///
    /// `stop_on_error` indicates that the test run was configured to stop
    /// on its first error, so its results may be incomplete.
    ///
    /// # Errors
    ///
    /// If the [`Sink`] fails to write.
    pub fn produce_report(&mut self, stop_on_error: bool) -> Result<()> {
        tracing::debug!(
            root = %self.root.full_name,
            tests = self.summary.test_count,
            stop_on_error,
            "producing report"
        );

        if self.summary.test_count == 0 {
            self.sink.write_line(Severity::Warning, "Warning: No tests found")?;
            self.sink.new_line()?;
        }
        if stop_on_error && self.summary.has_failures() {
            self.sink.write_line(
                Severity::Failure,
                "Execution terminated after first error",
            )?;
            self.sink.new_line()?;
        }

        self.write_summary_report()?;
        if self.summary.result == Status::Failed {
            self.write_errors_and_failures_report()?;
        }
        if self.summary.has_skipped() {
            self.write_not_run_report()?;
        }
        self.sink.flush()
    }

    /// Writes the "Test Run Summary" section.
    ///
    /// # Errors
    ///
    /// If the [`Sink`] fails to write.
    pub fn write_summary_report(&mut self) -> Result<()> {
        let Self { summary: s, sink, .. } = self;

        sink.write_line(Severity::SectionHeader, "Test Run Summary")?;
        sink.write_label_line(
            "   Overall result: ",
            &overall_result(s.result),
            Some(overall_severity(s.result)),
        )?;

        write_count(sink, "   Tests run: ", s.run_count(), None)?;
        write_count(sink, ", Passed: ", s.passed, None)?;
        write_count(sink, ", Errors: ", s.errors, Some(Severity::Failure))?;
        write_count(sink, ", Failures: ", s.failed, Some(Severity::Failure))?;
        write_count(sink, ", Inconclusive: ", s.inconclusive, None)?;
        sink.new_line()?;

        write_count(sink, "     Not run: ", s.not_run_count(), None)?;
        write_count(sink, ", Invalid: ", s.invalid, Some(Severity::Failure))?;
        write_count(sink, ", Ignored: ", s.ignored, Some(Severity::Warning))?;
        write_count(sink, ", Skipped: ", s.skipped, None)?;
        sink.new_line()?;

        sink.write_label_line("  Start time: ", &timestamp(s.start_time), None)?;
        sink.write_label_line("    End time: ", &timestamp(s.end_time), None)?;
        sink.write_label_line(
            "    Duration: ",
            &format!("{} seconds", seconds(s.duration)),
            None,
        )?;
        sink.new_line()
    }

    /// Writes the "Errors and Failures" section.
    ///
    /// # Errors
    ///
    /// If the [`Sink`] fails to write.
    pub fn write_errors_and_failures_report(&mut self) -> Result<()> {
        self.write_section("Errors and Failures", errors_and_failures(self.root))
    }

    /// Writes the "Tests Not Run" section.
    ///
    /// # Errors
    ///
    /// If the [`Sink`] fails to write.
    pub fn write_not_run_report(&mut self) -> Result<()> {
        self.write_section("Tests Not Run", not_run(self.root))
    }

    fn write_section(
        &mut self,
        header: &str,
        entries: Vec<ReportEntry<'_>>,
    ) -> Result<()> {
        self.sink.write_line(Severity::SectionHeader, header)?;
        for entry in &entries {
            tracing::trace!(
                section = header,
                index = entry.index,
                test = %entry.node.full_name,
                "reporting entry"
            );
            write_entry(&mut self.sink, entry)?;
        }
        self.sink.new_line()?;

        tracing::debug!(section = header, entries = entries.len(), "section written");
        Ok(())
    }
}

/// Writes a single counter of the summary, styling it with the given
/// [`Severity`] only if it's not zero.
fn write_count<S: Sink>(
    sink: &mut S,
    label: &str,
    count: usize,
    severity: Option<Severity>,
) -> Result<()> {
    sink.write_label(label, &count.to_string(), severity.filter(|_| count > 0))
}

/// Writes the given [`ReportEntry`] preceded by a blank line.
fn write_entry<S: Sink>(sink: &mut S, entry: &ReportEntry<'_>) -> Result<()> {
    sink.new_line()?;
    sink.write_line(entry.severity, &entry.heading())?;
    if let Some(msg) = entry.message() {
        sink.write_line(entry.severity, msg)?;
    }
    if let Some(trace) = entry.stack_trace() {
        sink.write_line(entry.severity, trace)?;
    }
    Ok(())
}

/// Trims trailing line breaks of a non-empty `text`.
///
/// A `text` of line breaks only is kept as an empty line.
fn trimmed(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty()).map(|t| t.trim_end_matches(TRIM_CHARS))
}
