// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error handling of report writing.
//!
//! Walking a result tree never fails, so the only errors are the ones of an
//! output a [`Sink`] writes into.
//!
//! [`Sink`]: crate::writer::Sink

use std::io;

use derive_more::with_trait::{Display, Error, From};

/// Error of writing a report.
#[derive(Debug, Display, Error, From)]
pub enum ReportError {
    /// I/O error during output writing.
    #[display("I/O operation failed: {_0}")]
    Io(#[error(source)] io::Error),
}

/// Result type alias using [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
