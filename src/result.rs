// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tree of test run results, as handed over by a test executor.

use std::{
    str::FromStr,
    time::{Duration, SystemTime},
};

use derive_more::with_trait::Display;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Well-known [`ResultNode::label`]s refining a [`Status`].
pub mod label {
    /// Test was ignored on purpose.
    pub const IGNORED: &str = "Ignored";

    /// Test (or its fixture) raised an unexpected error.
    pub const ERROR: &str = "Error";

    /// Test is not runnable (malformed signature, bad arguments, etc.).
    pub const INVALID: &str = "Invalid";

    /// Test run was cancelled while this test was executing.
    pub const CANCELLED: &str = "Cancelled";

    /// Checks whether the given `label` is one of the well-known ones.
    #[must_use]
    pub fn is_well_known(label: &str) -> bool {
        [IGNORED, ERROR, INVALID, CANCELLED].contains(&label)
    }
}

/// [`ResultNode::test_type`] of parameterized, data-driven suites.
pub const THEORY: &str = "Theory";

/// Coarse status of a [`ResultNode`].
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Status {
    /// Test has passed.
    #[default]
    Passed,

    /// Test has failed (includes errors and invalid tests).
    Failed,

    /// Test hasn't been run (includes ignored tests).
    Skipped,

    /// Test has run, but its outcome is undecided.
    Inconclusive,
}

impl FromStr for Status {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            "inconclusive" => Ok(Self::Inconclusive),
            _ => Err("possible options: passed, failed, skipped, inconclusive"),
        }
    }
}

/// Phase of a test execution where its outcome was determined.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Site {
    /// Test body itself.
    #[default]
    Test,

    /// Set-up of a fixture.
    SetUp,

    /// Tear-down of a fixture.
    TearDown,

    /// Outcome was inherited from a parent suite.
    Parent,
}

impl FromStr for Site {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "setup" => Ok(Self::SetUp),
            "teardown" => Ok(Self::TearDown),
            "parent" => Ok(Self::Parent),
            _ => Err("possible options: test, setup, teardown, parent"),
        }
    }
}

/// Resolved outcome of a [`ResultNode`], combining its [`Status`],
/// [`label`] and [`Site`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// [`Status::Passed`].
    Passed,

    /// [`Status::Failed`] in a test body.
    Failed,

    /// [`Status::Failed`] with an [`label::ERROR`] (or
    /// [`label::CANCELLED`]) label, or failed outside of a test body.
    Error,

    /// [`Status::Inconclusive`].
    Inconclusive,

    /// Plain [`Status::Skipped`].
    Skipped,

    /// [`Status::Skipped`] with an [`label::IGNORED`] label.
    Ignored,

    /// [`label::INVALID`] test, whether [`Status::Failed`] or
    /// [`Status::Skipped`].
    Invalid,

    /// [`Status`] contradicted by a well-known [`label`].
    Unrecognized,
}

/// Node of an immutable tree of test run results.
///
/// A node is a leaf if it has no [`children`]. Non-leaf nodes are always
/// suites, while a suite may still have no [`children`] at all.
///
/// [`children`]: ResultNode::children
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResultNode {
    /// Indicates whether this node is a suite (fixture, namespace, assembly,
    /// etc.) rather than a single test case.
    pub is_suite: bool,

    /// Short name of this node.
    pub name: String,

    /// Dotted path of this node.
    pub full_name: String,

    /// Coarse [`Status`] of this node.
    pub status: Status,

    /// Finer-grained status, like [`label::IGNORED`] or [`label::ERROR`].
    pub label: Option<String>,

    /// [`Site`] where the [`Status`] was determined.
    pub site: Site,

    /// Message describing the outcome.
    pub message: Option<String>,

    /// Stack trace of a failure.
    pub stack_trace: Option<String>,

    /// Time this node started executing at.
    #[default(SystemTime::UNIX_EPOCH)]
    pub start_time: SystemTime,

    /// Time this node finished executing at.
    #[default(SystemTime::UNIX_EPOCH)]
    pub end_time: SystemTime,

    /// Time spent executing this node.
    pub duration: Duration,

    /// Child nodes, in execution order.
    pub children: Vec<ResultNode>,

    /// Kind of a suite, like [`THEORY`].
    pub test_type: Option<String>,
}

impl ResultNode {
    /// Creates a new passed test case leaf with the given dotted
    /// `full_name`.
    #[must_use]
    pub fn test(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Self {
            name: short_name(&full_name).to_owned(),
            full_name,
            ..Self::default()
        }
    }

    /// Creates a new passed and empty suite with the given dotted
    /// `full_name`.
    #[must_use]
    pub fn suite(full_name: impl Into<String>) -> Self {
        Self { is_suite: true, ..Self::test(full_name) }
    }

    /// Sets the [`Status`] of this node.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the [`label`] of this node.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the [`Site`] of this node.
    #[must_use]
    pub fn with_site(mut self, site: Site) -> Self {
        self.site = site;
        self
    }

    /// Sets the message of this node.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the stack trace of this node.
    #[must_use]
    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }

    /// Sets the suite kind of this node.
    #[must_use]
    pub fn with_test_type(mut self, test_type: impl Into<String>) -> Self {
        self.test_type = Some(test_type.into());
        self
    }

    /// Sets the timing of this node, deriving its end time.
    #[must_use]
    pub fn with_timing(mut self, start: SystemTime, duration: Duration) -> Self {
        self.start_time = start;
        self.end_time = start.checked_add(duration).unwrap_or(start);
        self.duration = duration;
        self
    }

    /// Appends the given `child`, turning this node into a suite.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.is_suite = true;
        self.children.push(child);
        self
    }

    /// Appends all the given `children`, turning this node into a suite.
    #[must_use]
    pub fn with_children(
        mut self,
        children: impl IntoIterator<Item = Self>,
    ) -> Self {
        self.is_suite = true;
        self.children.extend(children);
        self
    }

    /// Indicates whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Indicates whether this node groups other nodes.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.is_suite || !self.is_leaf()
    }

    /// Indicates whether this node is a [`THEORY`] suite.
    #[must_use]
    pub fn is_theory(&self) -> bool {
        self.test_type.as_deref() == Some(THEORY)
    }

    /// Returns the non-empty [`label`] of this node, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Resolves the [`Outcome`] of this node.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        use label::{CANCELLED, ERROR, IGNORED, INVALID};

        match (self.status, self.label()) {
            (Status::Passed | Status::Inconclusive, Some(l))
                if label::is_well_known(l) =>
            {
                Outcome::Unrecognized
            }
            (Status::Passed, _) => Outcome::Passed,
            (Status::Inconclusive, _) => Outcome::Inconclusive,
            (Status::Failed, Some(INVALID)) => Outcome::Invalid,
            (Status::Failed, Some(IGNORED)) => Outcome::Unrecognized,
            (Status::Failed, Some(ERROR | CANCELLED)) => Outcome::Error,
            (Status::Failed, _) if self.site != Site::Test => Outcome::Error,
            (Status::Failed, _) => Outcome::Failed,
            (Status::Skipped, Some(IGNORED)) => Outcome::Ignored,
            (Status::Skipped, Some(INVALID)) => Outcome::Invalid,
            (Status::Skipped, Some(ERROR | CANCELLED)) => Outcome::Unrecognized,
            (Status::Skipped, _) => Outcome::Skipped,
        }
    }

    /// Returns an [`Iterator`] over the test cases of this tree in
    /// depth-first order.
    ///
    /// Suites (even empty ones) are never yielded.
    pub fn tests(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                if node.is_container() {
                    stack.extend(node.children.iter().rev());
                } else {
                    return Some(node);
                }
            }
            None
        })
    }
}

/// Extracts the last segment of a dotted `full_name`, ignoring dots inside
/// arguments of a parameterized test.
fn short_name(full_name: &str) -> &str {
    let head = full_name.find('(').map_or(full_name, |i| &full_name[..i]);
    head.rfind('.').map_or(full_name, |i| &full_name[i + 1..])
}
