// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Human-readable reports of hierarchical test runs.
//!
//! Given a finished tree of [`ResultNode`]s, a [`Reporter`] writes into a
//! [`Sink`]:
//! - a summary of counts and timing;
//! - a numbered list of errors and failures;
//! - a numbered list of tests not run.
//!
//! ```rust
//! use suite_report::{
//!     label, writer::Recorder, Reporter, ResultNode, Site, Status,
//! };
//!
//! let root = ResultNode::suite("Fixture")
//!     .with_status(Status::Failed)
//!     .with_label(label::ERROR)
//!     .with_site(Site::SetUp)
//!     .with_child(ResultNode::test("Fixture.Test1").with_status(Status::Failed));
//!
//! let mut reporter = Reporter::new(&root, Recorder::new());
//! reporter.produce_report(false).unwrap();
//!
//! let lines = reporter.into_sink().texts();
//! assert!(lines.contains(&"1) SetUp Error : Fixture".to_owned()));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
pub mod error;
pub mod report;
pub mod result;
pub mod summary;
pub mod writer;

#[doc(inline)]
pub use self::{
    error::{ReportError, Result},
    report::{ReportEntry, Reporter},
    result::{label, Outcome, ResultNode, Site, Status, THEORY},
    summary::Summary,
    writer::{Severity, Sink},
};
