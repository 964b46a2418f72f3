// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of a report.
//!
//! [`Cli`] is meant to be flattened into the CLI of a binary running tests,
//! which then hands the finished result tree over to [`Cli::report()`].
//!
//! # Example
//!
//! ```rust
//! use clap::Parser as _;
//! use suite_report::{cli, ResultNode};
//!
//! #[derive(clap::Parser)]
//! struct Opts {
//!     #[command(flatten)]
//!     report: cli::Cli,
//! }
//!
//! let opts = Opts::parse_from(["runner", "--color", "never"]);
//! let root = ResultNode::suite("Assembly")
//!     .with_child(ResultNode::test("Assembly.Passing"));
//!
//! opts.report.report(&root).unwrap();
//! ```

use std::str::FromStr;

use smart_default::SmartDefault;

use crate::{
    error,
    report::Reporter,
    result::ResultNode,
    writer::Console,
};

pub use clap::{Args, Parser};

/// CLI options of a report.
#[derive(Clone, Copy, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Coloring policy for a console output.
    #[arg(
        long,
        value_name = "auto|always|never",
        default_value = "auto",
        global = true
    )]
    #[default(Coloring::Auto)]
    pub color: Coloring,

    /// Indicates that the test run was stopped on its first error.
    #[arg(long, global = true)]
    pub stop_on_error: bool,
}

impl Cli {
    /// Creates a [`Console`] on [`io::stdout()`] honoring these options.
    ///
    /// [`io::stdout()`]: std::io::stdout
    #[must_use]
    pub fn console(&self) -> Console {
        Console::stdout().with_coloring(self.color)
    }

    /// Reports the tree rooted at the given `root` into [`io::stdout()`].
    ///
    /// # Errors
    ///
    /// If [`io::stdout()`] fails to be written.
    ///
    /// [`io::stdout()`]: std::io::stdout
    pub fn report(&self, root: &ResultNode) -> error::Result<()> {
        Reporter::new(root, self.console()).produce_report(self.stop_on_error)
    }
}

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}
