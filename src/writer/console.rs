// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Sink`] rendering into a terminal (or any [`io::Write`]).

use std::io;

use crate::{cli::Coloring, error::Result};

use super::{out::WriteStrExt as _, Severity, Sink, Styles};

/// [`Sink`] rendering [`Severity`]s as terminal colors into some
/// [`io::Write`] output.
#[derive(Clone, Debug)]
pub struct Console<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    output: Out,

    /// [`Styles`] for terminal output.
    styles: Styles,
}

impl Console {
    /// Creates a new [`Console`] writing into [`io::stdout()`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<Out: io::Write> Console<Out> {
    /// Creates a new [`Console`] writing into the given `output`.
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self { output, styles: Styles::new() }
    }

    /// Applies the given [`Coloring`] policy to this [`Console`].
    #[must_use]
    pub fn with_coloring(mut self, color: Coloring) -> Self {
        self.styles.apply_coloring(color);
        self
    }

    /// Returns the [`Styles`] this [`Console`] renders with.
    #[must_use]
    pub const fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Returns a reference to the underlying output.
    #[must_use]
    pub const fn get_ref(&self) -> &Out {
        &self.output
    }

    /// Unwraps this [`Console`], returning the underlying output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }
}

impl<Out: io::Write> Sink for Console<Out> {
    fn write(&mut self, severity: Severity, text: &str) -> Result<()> {
        let text = self.styles.styled(severity, text);
        self.output.write_str(text)?;
        Ok(())
    }

    fn new_line(&mut self) -> Result<()> {
        self.output.write_str("\n")?;
        Ok(())
    }

    fn write_line(&mut self, severity: Severity, text: &str) -> Result<()> {
        let text = self.styles.styled(severity, text);
        self.output.write_line(text)?;
        Ok(())
    }

    fn write_label(
        &mut self,
        label: &str,
        value: &str,
        severity: Option<Severity>,
    ) -> Result<()> {
        let value = match severity {
            Some(sev) => self.styles.styled(sev, value),
            None => self.styles.bold(value),
        };
        self.output.write_str(label)?;
        self.output.write_str(value)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}
