// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sinks for outputting report lines.

pub mod console;
pub mod out;
pub mod recorder;

use derive_more::with_trait::Display;

use crate::error::Result;

#[doc(inline)]
pub use self::{
    console::Console,
    out::{Styles, WritableString},
    recorder::{Line, Recorder},
};

/// Styling category of an output line.
///
/// [`Sink`]s decide how each [`Severity`] is rendered.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Severity {
    /// Something has passed.
    Pass,

    /// Something has failed or errored.
    Failure,

    /// Something deserves attention, but hasn't failed.
    Warning,

    /// Header of a report section.
    SectionHeader,

    /// Neutral output.
    #[default]
    Output,
}

/// Output sink accepting styled lines of a report.
///
/// Only [`Sink::write()`] and [`Sink::new_line()`] are required, the rest
/// is composed of them.
pub trait Sink {
    /// Writes the given `text` at the given [`Severity`], without
    /// terminating the current line.
    ///
    /// # Errors
    ///
    /// If the underlying output fails to be written.
    fn write(&mut self, severity: Severity, text: &str) -> Result<()>;

    /// Terminates the current line. Writes a blank line if nothing was
    /// written on the current line yet.
    ///
    /// # Errors
    ///
    /// If the underlying output fails to be written.
    fn new_line(&mut self) -> Result<()>;

    /// Writes the given `text` at the given [`Severity`] as a whole line.
    ///
    /// # Errors
    ///
    /// If the underlying output fails to be written.
    fn write_line(&mut self, severity: Severity, text: &str) -> Result<()> {
        self.write(severity, text)?;
        self.new_line()
    }

    /// Writes a `label` followed by its `value`, styling the `value` with
    /// the given [`Severity`] (if any).
    ///
    /// # Errors
    ///
    /// If the underlying output fails to be written.
    fn write_label(
        &mut self,
        label: &str,
        value: &str,
        severity: Option<Severity>,
    ) -> Result<()> {
        self.write(Severity::Output, label)?;
        self.write(severity.unwrap_or_default(), value)
    }

    /// Same as [`Sink::write_label()`], but terminates the line afterwards.
    ///
    /// # Errors
    ///
    /// If the underlying output fails to be written.
    fn write_label_line(
        &mut self,
        label: &str,
        value: &str,
        severity: Option<Severity>,
    ) -> Result<()> {
        self.write_label(label, value, severity)?;
        self.new_line()
    }

    /// Flushes everything written so far.
    ///
    /// # Errors
    ///
    /// If the underlying output fails to be flushed.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, severity: Severity, text: &str) -> Result<()> {
        (**self).write(severity, text)
    }

    fn new_line(&mut self) -> Result<()> {
        (**self).new_line()
    }

    fn write_line(&mut self, severity: Severity, text: &str) -> Result<()> {
        (**self).write_line(severity, text)
    }

    fn write_label(
        &mut self,
        label: &str,
        value: &str,
        severity: Option<Severity>,
    ) -> Result<()> {
        (**self).write_label(label, value, severity)
    }

    fn write_label_line(
        &mut self,
        label: &str,
        value: &str,
        severity: Option<Severity>,
    ) -> Result<()> {
        (**self).write_label_line(label, value, severity)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
