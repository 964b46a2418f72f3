// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory [`Sink`] keeping the written lines along with their
//! [`Severity`]s.

use itertools::Itertools as _;

use crate::error::Result;

use super::{Severity, Sink};

/// Single line written into a [`Recorder`], as a sequence of styled
/// segments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    /// Segments of this [`Line`] in the order they were written.
    pub segments: Vec<(Severity, String)>,
}

impl Line {
    /// Returns the unstyled text of this [`Line`].
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|(_, s)| s).join("")
    }

    /// Returns the [`Severity`] of the last segment of this [`Line`], or
    /// [`Severity::Output`] for a blank one.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.segments.last().map(|(sev, _)| *sev).unwrap_or_default()
    }

    /// Indicates whether nothing was written on this [`Line`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|(_, s)| s.is_empty())
    }
}

/// [`Sink`] recording everything written into it.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Terminated [`Line`]s.
    lines: Vec<Line>,

    /// [`Line`] being written at the moment.
    current: Line,
}

impl Recorder {
    /// Creates a new empty [`Recorder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all the terminated [`Line`]s.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the unstyled text of all the terminated [`Line`]s.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }

    /// Returns the unstyled output, including a not yet terminated
    /// [`Line`].
    #[must_use]
    pub fn output(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}\n", l.text()))
            .chain((!self.current.is_blank()).then(|| self.current.text()))
            .join("")
    }
}

impl Sink for Recorder {
    fn write(&mut self, severity: Severity, text: &str) -> Result<()> {
        self.current.segments.push((severity, text.to_owned()));
        Ok(())
    }

    fn new_line(&mut self) -> Result<()> {
        self.lines.push(std::mem::take(&mut self.current));
        Ok(())
    }
}
